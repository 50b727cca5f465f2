use crate::append_vec::AppendOnlyVec;
use crate::error::Error;
use crate::symbol::{NonTerminalId, ProductionId, Symbol, TerminalId};
use crate::HashMap;

/// A single grammar rule: one non-terminal producing one ordered sequence
/// of symbols. An empty right-hand side makes the left-hand side nullable.
#[derive(Debug, Clone)]
pub struct Production {
    id: ProductionId,
    lhs: NonTerminalId,
    rhs: Vec<Symbol>,
}

impl Production {
    pub(crate) fn id(&self) -> ProductionId {
        self.id
    }
    pub fn lhs(&self) -> NonTerminalId {
        self.lhs
    }
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }
}

#[derive(Debug, Clone)]
struct TerminalDef {
    kind: String,
}

#[derive(Debug, Clone)]
struct NonTerminalDef {
    name: String,
    productions: Vec<ProductionId>,
}

/// An immutable context-free grammar, indexed for recognition: productions
/// grouped by left-hand side, a distinguished start symbol, and the
/// transitive-nullable closure of every non-terminal.
///
/// Build one with [`Grammar::builder`]; recognize input against it with
/// [`crate::Recognizer`]. A grammar is never mutated after construction and
/// may be shared by any number of recognizers.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: AppendOnlyVec<TerminalDef, TerminalId>,
    nonterminals: AppendOnlyVec<NonTerminalDef, NonTerminalId>,
    productions: AppendOnlyVec<Production, ProductionId>,
    start: NonTerminalId,
    nullable: Vec<bool>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// The distinguished start non-terminal.
    pub fn start(&self) -> NonTerminalId {
        self.start
    }

    /// Productions whose left-hand side is `nonterminal`, in rule order.
    pub fn rules_for(&self, nonterminal: NonTerminalId) -> impl Iterator<Item = &Production> {
        self.nonterminals
            .get(nonterminal)
            .into_iter()
            .flat_map(move |def| def.productions.iter().map(move |id| self.production(*id)))
    }

    /// Productions whose left-hand side is the start non-terminal.
    pub fn start_productions(&self) -> impl Iterator<Item = &Production> {
        self.rules_for(self.start)
    }

    pub fn productions_iter(&self) -> impl Iterator<Item = &Production> {
        self.productions.iter()
    }

    /// True when `nonterminal` derives the empty string, directly or
    /// transitively.
    pub fn nullable(&self, nonterminal: NonTerminalId) -> bool {
        self.nullable[usize::from(nonterminal)]
    }

    /// The token type a terminal symbol matches.
    pub fn terminal_kind(&self, terminal: TerminalId) -> &str {
        &self
            .terminals
            .get(terminal)
            .expect("interned terminal")
            .kind
    }

    pub fn nonterminal_name(&self, nonterminal: NonTerminalId) -> &str {
        &self
            .nonterminals
            .get(nonterminal)
            .expect("interned non-terminal")
            .name
    }

    pub(crate) fn production(&self, id: ProductionId) -> &Production {
        self.productions.get(id).expect("valid production id")
    }
}

/// Builds a [`Grammar`] by interning symbols and collecting rules.
///
/// ```rust
/// use pulse::Grammar;
///
/// let mut builder = Grammar::builder();
/// let a = builder.terminal("a");
/// let list = builder.nonterminal("list");
/// builder.rule(list, &[a, list]);
/// builder.rule(list, &[a]);
/// builder.start(list);
/// let grammar = builder.build().unwrap();
///
/// assert_eq!(grammar.start_productions().count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    terminals: AppendOnlyVec<TerminalDef, TerminalId>,
    terminals_by_kind: HashMap<String, TerminalId>,
    nonterminals: AppendOnlyVec<NonTerminalDef, NonTerminalId>,
    nonterminals_by_name: HashMap<String, NonTerminalId>,
    rules: Vec<(Symbol, Vec<Symbol>)>,
    start: Option<Symbol>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interned terminal symbol matching tokens of type `kind`.
    pub fn terminal(&mut self, kind: &str) -> Symbol {
        let id = match self.terminals_by_kind.get(kind) {
            Some(id) => *id,
            None => {
                let id = self.terminals.push(TerminalDef {
                    kind: kind.to_owned(),
                });
                self.terminals_by_kind.insert(kind.to_owned(), id);
                id
            }
        };
        Symbol::Terminal(id)
    }

    /// Interned non-terminal symbol named `name`.
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        let id = match self.nonterminals_by_name.get(name) {
            Some(id) => *id,
            None => {
                let id = self.nonterminals.push(NonTerminalDef {
                    name: name.to_owned(),
                    productions: Vec::new(),
                });
                self.nonterminals_by_name.insert(name.to_owned(), id);
                id
            }
        };
        Symbol::NonTerminal(id)
    }

    /// Add the rule `lhs → rhs`. An empty `rhs` makes `lhs` nullable.
    pub fn rule(&mut self, lhs: Symbol, rhs: &[Symbol]) -> &mut Self {
        self.rules.push((lhs, rhs.to_vec()));
        self
    }

    /// Set the start symbol; must be a non-terminal with at least one rule.
    pub fn start(&mut self, symbol: Symbol) -> &mut Self {
        self.start = Some(symbol);
        self
    }

    /// Finalize the grammar.
    ///
    /// # Errors
    ///
    /// Fails when no start symbol was set, when the start symbol or a rule's
    /// left-hand side is a terminal, or when a non-terminal is referenced
    /// (on a right-hand side or as start) but never defined by a rule.
    pub fn build(self) -> Result<Grammar, Error> {
        let start = match self.start {
            Some(Symbol::NonTerminal(start)) => start,
            Some(Symbol::Terminal(_)) => {
                return Err(Error::ValidationError(String::from(
                    "start symbol must be a non-terminal",
                )))
            }
            None => {
                return Err(Error::ValidationError(String::from(
                    "no start symbol set",
                )))
            }
        };

        let mut nonterminals = self.nonterminals;
        let mut productions = AppendOnlyVec::<Production, ProductionId>::new();

        for (lhs, rhs) in self.rules {
            let lhs = match lhs {
                Symbol::NonTerminal(lhs) => lhs,
                Symbol::Terminal(terminal) => {
                    return Err(Error::ValidationError(format!(
                        "terminal \"{}\" cannot be a rule left-hand side",
                        self.terminals.get(terminal).expect("interned terminal").kind
                    )))
                }
            };
            let production = productions.push_with_id(|id| Production { id, lhs, rhs });
            let id = production.id;
            nonterminals
                .get_mut(lhs)
                .expect("interned non-terminal")
                .productions
                .push(id);
        }

        undefined_check(&nonterminals, productions.iter(), start)?;
        let nullable = nullable_closure(&nonterminals, &productions);

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals,
            productions,
            start,
            nullable,
        })
    }
}

/// Every non-terminal referenced on a right-hand side, or as start, must be
/// defined by at least one rule; recognizing against an undefined
/// non-terminal could never succeed.
fn undefined_check<'a>(
    nonterminals: &AppendOnlyVec<NonTerminalDef, NonTerminalId>,
    productions: impl Iterator<Item = &'a Production>,
    start: NonTerminalId,
) -> Result<(), Error> {
    let defined = |nt: NonTerminalId| -> bool {
        !nonterminals
            .get(nt)
            .expect("interned non-terminal")
            .productions
            .is_empty()
    };

    let mut undefined: Vec<&str> = Vec::new();
    let mut record = |nt: NonTerminalId| {
        let name = &nonterminals.get(nt).expect("interned non-terminal").name;
        if !undefined.contains(&name.as_str()) {
            undefined.push(name);
        }
    };

    if !defined(start) {
        record(start);
    }
    for production in productions {
        for symbol in production.rhs() {
            if let Symbol::NonTerminal(nt) = symbol {
                if !defined(*nt) {
                    record(*nt);
                }
            }
        }
    }

    if undefined.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "undefined non-terminals: {}",
            undefined.join(", ")
        )))
    }
}

/// Fixpoint of "derives the empty string": a non-terminal is nullable iff
/// some rule's right-hand side is entirely nullable (trivially so when
/// empty).
fn nullable_closure(
    nonterminals: &AppendOnlyVec<NonTerminalDef, NonTerminalId>,
    productions: &AppendOnlyVec<Production, ProductionId>,
) -> Vec<bool> {
    let mut nullable = vec![false; nonterminals.len()];

    let mut changed = true;
    while changed {
        changed = false;
        for production in productions.iter() {
            if nullable[usize::from(production.lhs)] {
                continue;
            }
            let all_nullable = production.rhs.iter().all(|symbol| match symbol {
                Symbol::Terminal(_) => false,
                Symbol::NonTerminal(nt) => nullable[usize::from(*nt)],
            });
            if all_nullable {
                nullable[usize::from(production.lhs)] = true;
                changed = true;
            }
        }
    }

    nullable
}
