//! The Earley engine: token-driven chart construction with Leo shortcuts
//! for right-recursive productions.

mod chart;
mod registry;

use crate::grammar::Grammar;
use crate::symbol::{NonTerminalId, Symbol};
use crate::tracing;
use crate::{HashSet, Token};
use chart::{Chart, Normal, State, Transition};
use registry::{DottedRuleId, RuleRegistry};

/// A token-driven recognizer for a [`Grammar`].
///
/// Feed tokens one at a time with [`pulse`](Recognizer::pulse). Between
/// pulses, [`accepted`](Recognizer::accepted) reports whether the tokens so
/// far form a complete sentence, and [`expected`](Recognizer::expected)
/// lists the token types that could come next.
///
/// ```rust
/// use pulse::{Grammar, Recognizer};
///
/// let mut builder = Grammar::builder();
/// let number = builder.terminal("number");
/// let plus = builder.terminal("+");
/// let expr = builder.nonterminal("expr");
/// builder.rule(expr, &[expr, plus, expr]);
/// builder.rule(expr, &[number]);
/// builder.start(expr);
/// let grammar = builder.build()?;
///
/// let mut recognizer = Recognizer::new(&grammar);
/// for token in ["number", "+", "number"] {
///     assert!(recognizer.pulse(token));
/// }
/// assert!(recognizer.accepted());
/// # Ok::<(), pulse::Error>(())
/// ```
pub struct Recognizer<'gram> {
    grammar: &'gram Grammar,
    registry: RuleRegistry,
    chart: Chart,
    location: usize,
    leo: bool,
}

impl<'gram> Recognizer<'gram> {
    pub fn new(grammar: &'gram Grammar) -> Self {
        Self::with_leo(grammar, true)
    }

    /// Plain Earley completion only; recognizes the same language, but
    /// right-recursion costs quadratic chart states. Kept for equivalence
    /// testing.
    #[cfg(test)]
    pub(crate) fn without_leo(grammar: &'gram Grammar) -> Self {
        Self::with_leo(grammar, false)
    }

    fn with_leo(grammar: &'gram Grammar, leo: bool) -> Self {
        let registry = RuleRegistry::new(grammar);
        let mut recognizer = Self {
            grammar,
            registry,
            chart: Chart::new(),
            location: 0,
            leo,
        };
        recognizer.initialize();
        recognizer
    }

    /// Discard all chart state and start recognizing a fresh input against
    /// the same grammar.
    pub fn reset(&mut self) {
        self.chart = Chart::new();
        self.location = 0;
        self.initialize();
    }

    fn initialize(&mut self) {
        let _span = tracing::span!(tracing::Level::DEBUG, "initialize").entered();
        let grammar = self.grammar;
        for production in grammar.start_productions() {
            let dotted = self.registry.get(production.id(), 0);
            self.enqueue(0, dotted, 0);
        }
        self.reduction_pass(0);
    }

    /// Feed one token. Returns `true` when the token extends the
    /// recognized prefix, `false` when it is rejected at the current
    /// location.
    ///
    /// A rejection leaves the chart untouched: the caller may consult
    /// [`expected`](Recognizer::expected) and pulse a different token, or
    /// give up.
    pub fn pulse<T: Token + ?Sized>(&mut self, token: &T) -> bool {
        let _span = tracing::span!(tracing::Level::DEBUG, "pulse").entered();
        self.scan_pass(self.location, token.kind());

        let recognized = self.chart.len() > self.location + 1;
        if !recognized {
            return false;
        }

        self.location += 1;
        self.reduction_pass(self.location);
        true
    }

    /// The number of tokens consumed so far; also the index of the newest
    /// Earley set.
    pub fn location(&self) -> usize {
        self.location
    }

    /// True when the tokens pulsed so far form a complete sentence of the
    /// grammar's start symbol.
    pub fn accepted(&self) -> bool {
        let start = self.grammar.start();
        self.chart
            .find_reductions(self.location, start, self.grammar, &self.registry)
            .any(|completion| completion.origin == 0)
    }

    /// Token types that could extend the recognized prefix, deduplicated,
    /// in scan-state insertion order.
    pub fn expected(&self) -> Vec<&'gram str> {
        let grammar = self.grammar;
        let mut seen = HashSet::new();
        let mut expected = Vec::new();

        let mut index = 0;
        while let Some(state) = self.chart.scan(self.location, index) {
            index += 1;
            if let Some(Symbol::Terminal(terminal)) = self.registry.rule(state.dotted).postdot() {
                if seen.insert(terminal) {
                    expected.push(grammar.terminal_kind(terminal));
                }
            }
        }
        expected
    }

    /// Exhaustively apply complete and predict at `location`. Completions
    /// drain ahead of predictions; transitions consulted by a completion
    /// live in earlier sets, which are fully built and frozen by the time
    /// this pass runs.
    fn reduction_pass(&mut self, location: usize) {
        let _span = tracing::span!(tracing::Level::DEBUG, "reduction_pass").entered();

        let mut completion = 0;
        let mut prediction = 0;
        loop {
            if let Some(state) = self.chart.completion(location, completion) {
                self.complete(state, location);
                completion += 1;
            } else if let Some(state) = self.chart.prediction(location, prediction) {
                self.predict(state, location);
                prediction += 1;
            } else {
                break;
            }
        }

        if self.leo {
            self.install_transitions(location);
        }
    }

    fn scan_pass(&mut self, location: usize, kind: &str) {
        let _span = tracing::span!(tracing::Level::TRACE, "scan_pass").entered();
        let mut index = 0;
        while let Some(state) = self.chart.scan(location, index) {
            self.scan(state, location, kind);
            index += 1;
        }
    }

    fn scan(&mut self, state: Normal, location: usize, kind: &str) {
        let terminal = match self.registry.rule(state.dotted).postdot() {
            Some(Symbol::Terminal(terminal)) => terminal,
            _ => unreachable!("scan partition holds only terminal post-dot states"),
        };
        if self.grammar.terminal_kind(terminal) != kind {
            return;
        }

        let advanced = self.registry.advance(state.dotted);
        if self.chart.contains(location + 1, advanced, state.origin) {
            return;
        }
        self.enqueue(location + 1, advanced, state.origin);
    }

    fn predict(&mut self, evidence: Normal, location: usize) {
        let _span = tracing::span!(tracing::Level::TRACE, "predict").entered();
        let grammar = self.grammar;
        let nonterminal = match self.registry.rule(evidence.dotted).postdot() {
            Some(Symbol::NonTerminal(nonterminal)) => nonterminal,
            _ => unreachable!("prediction partition holds only non-terminal post-dot states"),
        };

        for production in grammar.rules_for(nonterminal) {
            let dotted = self.registry.get(production.id(), 0);
            self.enqueue(location, dotted, location);
        }

        // Aycock-Horspool: the dot may also hop over a nullable symbol.
        if grammar.nullable(nonterminal) {
            let advanced = self.registry.advance(evidence.dotted);
            self.enqueue(location, advanced, evidence.origin);
        }
    }

    fn complete(&mut self, completed: Normal, location: usize) {
        let _span = tracing::span!(tracing::Level::TRACE, "complete").entered();
        let lhs = self.production_lhs(completed.dotted);

        let transition = if self.leo {
            self.chart.find_transition(completed.origin, lhs)
        } else {
            None
        };
        match transition {
            Some(transition) => self.leo_complete(transition, location),
            None => self.earley_complete(completed, lhs, location),
        }
    }

    /// One insertion stands in for the whole chain of completions plain
    /// Earley would cascade through, keeping right-recursion linear.
    fn leo_complete(&mut self, transition: Transition, location: usize) {
        if self.chart.contains(location, transition.dotted, transition.origin) {
            return;
        }
        self.enqueue(location, transition.dotted, transition.origin);
    }

    fn earley_complete(&mut self, completed: Normal, lhs: NonTerminalId, location: usize) {
        // Index-based: when origin == location, advancing a source may add
        // further sources for the same non-terminal mid-loop.
        let mut index = 0;
        while let Some(source) = self.chart.source(completed.origin, lhs, index) {
            index += 1;
            let advanced = self.registry.advance(source.dotted);
            if self.chart.contains(location, advanced, source.origin) {
                continue;
            }
            self.enqueue(location, advanced, source.origin);
        }
    }

    /// Leo's deterministic-reduction cache. A non-terminal with exactly one
    /// waiting state in this set, sitting on its penult symbol, gets a
    /// transition; chaining through the origin set's transition makes the
    /// cached item the topmost of the whole reduction chain.
    ///
    /// Runs after the reduction pass fixed point, once the set's sources
    /// are final; only later sets consult these entries.
    fn install_transitions(&mut self, location: usize) {
        let _span = tracing::span!(tracing::Level::TRACE, "install_transitions").entered();

        let mut installs: Vec<(NonTerminalId, Transition)> = Vec::new();
        for (nonterminal, sources) in self.chart.sources_iter(location) {
            if sources.len() != 1 {
                continue;
            }
            let source = sources[0];

            let advanced = self.registry.advance(source.dotted);
            if !self.registry.rule(advanced).complete() {
                continue;
            }

            let lhs = self.production_lhs(source.dotted);
            let transition = self
                .chart
                .find_transition(source.origin, lhs)
                .unwrap_or(Transition {
                    dotted: advanced,
                    origin: source.origin,
                });
            installs.push((nonterminal, transition));
        }

        for (nonterminal, transition) in installs {
            self.chart.install_transition(location, nonterminal, transition);
        }
    }

    fn enqueue(&mut self, location: usize, dotted: DottedRuleId, origin: usize) -> bool {
        let state = State::Normal(Normal { dotted, origin });
        self.chart.enqueue(location, state, &self.registry)
    }

    fn production_lhs(&self, dotted: DottedRuleId) -> NonTerminalId {
        let production = self.registry.rule(dotted).production;
        self.grammar.production(production).lhs()
    }
}
