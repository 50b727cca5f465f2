use super::registry::{DottedRuleId, RuleRegistry};
use crate::grammar::Grammar;
use crate::symbol::{NonTerminalId, Symbol};
use crate::{HashMap, HashSet};

/// A chart entry. Only normal states exist today; the tag leaves room for
/// other chart residents (materialized Leo items, forest nodes) without
/// reshaping the hot paths, which all dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum State {
    Normal(Normal),
}

/// An Earley item: a dotted rule plus the location the hypothesis began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Normal {
    pub dotted: DottedRuleId,
    pub origin: usize,
}

/// Cached Leo shortcut: once a completion for the keyed non-terminal
/// reaches the owning set, inserting `(dotted, origin)` stands in for the
/// whole chain of completions plain Earley would enumerate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Transition {
    pub dotted: DottedRuleId,
    pub origin: usize,
}

/// States proved at one input location, partitioned by what the dot faces:
/// a non-terminal (predictions), nothing (completions), or a terminal
/// (scans). `sources` is a back-reference index from a non-terminal to the
/// states waiting on it; it does not own the states.
#[derive(Debug, Default)]
struct EarleySet {
    predictions: Vec<Normal>,
    completions: Vec<Normal>,
    scans: Vec<Normal>,
    by_key: HashSet<(DottedRuleId, usize)>,
    transitions: HashMap<NonTerminalId, Transition>,
    sources: HashMap<NonTerminalId, Vec<Normal>>,
}

/// The ordered, append-only sequence of Earley sets. Sets are created
/// lazily by the first insertion at their location; states are never
/// removed or mutated once added.
#[derive(Debug, Default)]
pub(crate) struct Chart {
    sets: Vec<EarleySet>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sets; the newest set has index `len() - 1`.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn contains(&self, location: usize, dotted: DottedRuleId, origin: usize) -> bool {
        self.set(location)
            .is_some_and(|set| set.by_key.contains(&(dotted, origin)))
    }

    /// Deduplicating insert. Creates the set on the first insertion at
    /// `location`; returns false when the state was already present.
    pub fn enqueue(&mut self, location: usize, state: State, registry: &RuleRegistry) -> bool {
        let State::Normal(normal) = state;

        let set = self.set_mut(location);
        if !set.by_key.insert((normal.dotted, normal.origin)) {
            return false;
        }

        match registry.rule(normal.dotted).postdot() {
            None => set.completions.push(normal),
            Some(Symbol::Terminal(_)) => set.scans.push(normal),
            Some(Symbol::NonTerminal(nonterminal)) => {
                set.predictions.push(normal);
                set.sources.entry(nonterminal).or_default().push(normal);
            }
        }
        true
    }

    pub fn prediction(&self, location: usize, index: usize) -> Option<Normal> {
        self.set(location)
            .and_then(|set| set.predictions.get(index))
            .copied()
    }

    pub fn completion(&self, location: usize, index: usize) -> Option<Normal> {
        self.set(location)
            .and_then(|set| set.completions.get(index))
            .copied()
    }

    pub fn scan(&self, location: usize, index: usize) -> Option<Normal> {
        self.set(location)
            .and_then(|set| set.scans.get(index))
            .copied()
    }

    /// States at `location` waiting on `nonterminal`, by insertion index.
    /// Index-based so callers may keep advancing while the set grows.
    pub fn source(&self, location: usize, nonterminal: NonTerminalId, index: usize) -> Option<Normal> {
        self.set(location)
            .and_then(|set| set.sources.get(&nonterminal))
            .and_then(|sources| sources.get(index))
            .copied()
    }

    pub fn sources_iter(
        &self,
        location: usize,
    ) -> impl Iterator<Item = (NonTerminalId, &[Normal])> {
        self.set(location).into_iter().flat_map(|set| {
            set.sources
                .iter()
                .map(|(nonterminal, sources)| (*nonterminal, sources.as_slice()))
        })
    }

    /// Complete states at `location` whose production's left-hand side is
    /// `nonterminal`.
    pub fn find_reductions<'a>(
        &'a self,
        location: usize,
        nonterminal: NonTerminalId,
        grammar: &'a Grammar,
        registry: &'a RuleRegistry,
    ) -> impl Iterator<Item = Normal> + 'a {
        self.set(location)
            .into_iter()
            .flat_map(|set| set.completions.iter().copied())
            .filter(move |completion| {
                let production = registry.rule(completion.dotted).production;
                grammar.production(production).lhs() == nonterminal
            })
    }

    pub fn find_transition(&self, location: usize, nonterminal: NonTerminalId) -> Option<Transition> {
        self.set(location)
            .and_then(|set| set.transitions.get(&nonterminal))
            .copied()
    }

    /// At most one transition per (set, non-terminal); installing twice for
    /// the same key is a bug upstream.
    pub fn install_transition(
        &mut self,
        location: usize,
        nonterminal: NonTerminalId,
        transition: Transition,
    ) {
        let previous = self.sets[location].transitions.insert(nonterminal, transition);
        debug_assert!(previous.is_none(), "transition installed twice");
    }

    fn set(&self, location: usize) -> Option<&EarleySet> {
        self.sets.get(location)
    }

    fn set_mut(&mut self, location: usize) -> &mut EarleySet {
        debug_assert!(location <= self.sets.len(), "locations grow one at a time");
        if location == self.sets.len() {
            self.sets.push(EarleySet::default());
        }
        &mut self.sets[location]
    }
}
