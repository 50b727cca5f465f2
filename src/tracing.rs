//! Spans for the engine's hot passes. With the `tracing` cargo feature the
//! real [`tracing`] crate is used; without it, `span!` compiles to nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{span, Level};

#[cfg(not(feature = "tracing"))]
mod noop {
    pub(crate) struct Span;

    impl Span {
        pub(crate) fn entered(self) -> Self {
            self
        }
    }

    macro_rules! span {
        ($($args:tt)*) => {
            crate::tracing::Span
        };
    }

    pub(crate) use span;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::*;
