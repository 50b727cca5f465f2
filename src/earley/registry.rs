use crate::append_vec::{append_only_vec_id, AppendOnlyVec};
use crate::grammar::Grammar;
use crate::symbol::{ProductionId, Symbol};

append_only_vec_id!(pub(crate) DottedRuleId);

/// An interned (production, dot position) pair. The dot splits the
/// right-hand side into matched and unmatched symbols.
#[derive(Debug, Clone)]
pub(crate) struct DottedRule {
    pub production: ProductionId,
    pub position: usize,
    postdot: Option<Symbol>,
    rhs_len: usize,
}

impl DottedRule {
    /// The dot sits past the last right-hand-side symbol.
    pub fn complete(&self) -> bool {
        self.position == self.rhs_len
    }

    /// The symbol immediately after the dot, if any.
    pub fn postdot(&self) -> Option<Symbol> {
        self.postdot
    }
}

/// Interned dotted rules covering every (production, position) pair of a
/// grammar, populated once at engine construction.
///
/// The `|rhs| + 1` rules of a production are registered contiguously, so
/// advancing the dot is an id bump. Asking for an unregistered pair, or
/// advancing a complete rule, is a programmer error and panics.
#[derive(Debug)]
pub(crate) struct RuleRegistry {
    rules: AppendOnlyVec<DottedRule, DottedRuleId>,
    base_by_production: Vec<DottedRuleId>,
}

impl RuleRegistry {
    pub fn new(grammar: &Grammar) -> Self {
        let mut rules = AppendOnlyVec::new();
        let mut base_by_production = Vec::new();

        for production in grammar.productions_iter() {
            let rhs = production.rhs();
            for position in 0..=rhs.len() {
                let id = rules.push(DottedRule {
                    production: production.id(),
                    position,
                    postdot: rhs.get(position).copied(),
                    rhs_len: rhs.len(),
                });
                if position == 0 {
                    base_by_production.push(id);
                }
            }
        }

        Self {
            rules,
            base_by_production,
        }
    }

    /// The interned rule for `(production, position)`.
    pub fn get(&self, production: ProductionId, position: usize) -> DottedRuleId {
        let base = self.base_by_production[usize::from(production)];
        let id = DottedRuleId::from(usize::from(base) + position);
        let rule = self.rule(id);
        assert!(
            rule.production == production && rule.position == position,
            "dotted rule position out of range"
        );
        id
    }

    pub fn rule(&self, id: DottedRuleId) -> &DottedRule {
        self.rules.get(id).expect("registered dotted rule")
    }

    /// The interned rule with the dot advanced over one symbol.
    pub fn advance(&self, id: DottedRuleId) -> DottedRuleId {
        assert!(
            !self.rule(id).complete(),
            "cannot advance a complete dotted rule"
        );
        DottedRuleId::from(usize::from(id) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::NonTerminalId;

    fn two_rule_grammar() -> Grammar {
        let mut builder = Grammar::builder();
        let a = builder.terminal("a");
        let b = builder.terminal("b");
        let s = builder.nonterminal("s");
        let t = builder.nonterminal("t");
        builder.rule(s, &[a, t]);
        builder.rule(t, &[b]);
        builder.start(s);
        builder.build().unwrap()
    }

    #[test]
    fn every_position_is_registered() {
        let grammar = two_rule_grammar();
        let registry = RuleRegistry::new(&grammar);

        for production in grammar.productions_iter() {
            for position in 0..=production.rhs().len() {
                let id = registry.get(production.id(), position);
                let rule = registry.rule(id);
                assert_eq!(rule.position, position);
                assert_eq!(rule.complete(), position == production.rhs().len());
                assert_eq!(rule.postdot(), production.rhs().get(position).copied());
            }
        }
    }

    #[test]
    fn advance_walks_one_production() {
        let grammar = two_rule_grammar();
        let registry = RuleRegistry::new(&grammar);
        let first = grammar.productions_iter().next().unwrap();

        let mut id = registry.get(first.id(), 0);
        for expected_position in 1..=first.rhs().len() {
            id = registry.advance(id);
            let rule = registry.rule(id);
            assert_eq!(rule.production, first.id());
            assert_eq!(rule.position, expected_position);
        }
        assert!(registry.rule(id).complete());
    }

    #[test]
    fn interning_is_canonical() {
        let grammar = two_rule_grammar();
        let registry = RuleRegistry::new(&grammar);
        let first = grammar.productions_iter().next().unwrap();

        let advanced = registry.advance(registry.get(first.id(), 0));
        assert_eq!(advanced, registry.get(first.id(), 1));
    }

    #[test]
    #[should_panic(expected = "cannot advance a complete dotted rule")]
    fn advancing_complete_rule_panics() {
        let grammar = two_rule_grammar();
        let registry = RuleRegistry::new(&grammar);
        let first = grammar.productions_iter().next().unwrap();

        let complete = registry.get(first.id(), first.rhs().len());
        registry.advance(complete);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_position_panics() {
        let grammar = two_rule_grammar();
        let registry = RuleRegistry::new(&grammar);
        let first = grammar.productions_iter().next().unwrap();

        registry.get(first.id(), first.rhs().len() + 1);
    }

    #[test]
    fn empty_rhs_registers_single_complete_rule() {
        let mut builder = Grammar::builder();
        let s = builder.nonterminal("s");
        builder.rule(s, &[]);
        builder.start(s);
        let grammar = builder.build().unwrap();
        let registry = RuleRegistry::new(&grammar);

        let production = grammar.rules_for(NonTerminalId::from(0)).next().unwrap();
        let id = registry.get(production.id(), 0);
        assert!(registry.rule(id).complete());
        assert_eq!(registry.rule(id).postdot(), None);
    }
}
