use crate::append_vec::append_only_vec_id;

append_only_vec_id!(pub TerminalId);
append_only_vec_id!(pub NonTerminalId);
append_only_vec_id!(pub(crate) ProductionId);

/// A grammar symbol: a terminal matched against token types, or a
/// non-terminal expanded by productions.
///
/// Symbols are interned by [`crate::GrammarBuilder`]: asking for the same
/// terminal kind or non-terminal name twice returns the same symbol, so
/// equality and hashing reduce to comparing small ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Terminal(TerminalId),
    NonTerminal(NonTerminalId),
}

/// A unit of input handed to [`crate::Recognizer::pulse`].
///
/// The engine is oblivious to everything about a token except its type,
/// which must compare equal to a terminal's token type for a scan to match.
pub trait Token {
    /// The token type, e.g. `"number"` or `"+"`.
    fn kind(&self) -> &str;
}

impl Token for str {
    fn kind(&self) -> &str {
        self
    }
}

impl Token for String {
    fn kind(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_equality_is_by_id() {
        let a = Symbol::Terminal(TerminalId::from(0));
        let b = Symbol::Terminal(TerminalId::from(0));
        let c = Symbol::Terminal(TerminalId::from(1));
        let d = Symbol::NonTerminal(NonTerminalId::from(0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn str_and_string_are_tokens() {
        assert_eq!("ident".kind(), "ident");
        assert_eq!(String::from("ident").kind(), "ident");
    }
}
