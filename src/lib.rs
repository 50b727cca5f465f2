//! pulse, an incremental Earley recognizer driven one token at a time.
//!
//! A [`Recognizer`] consumes tokens with [`Recognizer::pulse`]; after every
//! token it can report whether the prefix read so far is a complete
//! sentence ([`Recognizer::accepted`]) and which token types could come
//! next ([`Recognizer::expected`]). Completions use Leo's optimization, so
//! right-recursive grammars parse in linear time and space; nullable
//! productions are handled with the Aycock-Horspool prediction rule.
//!
//! The engine recognizes; it does not tokenize, build parse trees, or
//! recover from errors beyond reporting the expected-token set.
//!
//! ## Example
//!
//! ```rust
//! use pulse::{Grammar, Recognizer};
//!
//! // list → item list | item ; item → "word"
//! let mut builder = Grammar::builder();
//! let word = builder.terminal("word");
//! let list = builder.nonterminal("list");
//! let item = builder.nonterminal("item");
//! builder.rule(list, &[item, list]);
//! builder.rule(list, &[item]);
//! builder.rule(item, &[word]);
//! builder.start(list);
//! let grammar = builder.build()?;
//!
//! let mut recognizer = Recognizer::new(&grammar);
//! assert!(recognizer.pulse("word"));
//! assert!(recognizer.accepted());
//!
//! // a grammar is immutable and can drive any number of recognizers
//! let mut another = Recognizer::new(&grammar);
//! assert!(!another.pulse("number"));
//! assert_eq!(another.expected(), vec!["word"]);
//! # Ok::<(), pulse::Error>(())
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: emit [`tracing`] spans from the engine's hot passes
//! - `serde`: `Serialize`/`Deserialize` impls for symbols and ids

mod append_vec;
mod earley;
mod error;
mod grammar;
mod symbol;
pub(crate) mod tracing;

pub use earley::Recognizer;
pub use error::Error;
pub use grammar::{Grammar, GrammarBuilder, Production};
pub use symbol::{NonTerminalId, Symbol, TerminalId, Token};

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V>;
pub(crate) type HashSet<T> = hashbrown::HashSet<T>;
