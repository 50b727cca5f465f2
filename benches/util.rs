#[cfg(feature = "tracing")]
#[must_use]
pub fn init_tracing() -> impl Drop {
    use tracing_flame::FlameLayer;
    use tracing_subscriber::{fmt, prelude::*};
    let filter_layer = tracing_subscriber::EnvFilter::from_default_env();
    let fmt_layer = fmt::Layer::default();
    let (flame_layer, _guard) = FlameLayer::with_file("./tracing.folded").unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(flame_layer)
        .init();

    _guard
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {}

/// E → E + E | n, the classic ambiguous sum grammar.
pub fn sum_grammar() -> pulse::Grammar {
    let mut builder = pulse::Grammar::builder();
    let n = builder.terminal("n");
    let plus = builder.terminal("+");
    let expr = builder.nonterminal("expr");
    builder.rule(expr, &[expr, plus, expr]);
    builder.rule(expr, &[n]);
    builder.start(expr);
    builder.build().unwrap()
}

/// S → A; A → a A | a, the right-recursion worst case Leo keeps linear.
pub fn right_recursive_grammar() -> pulse::Grammar {
    let mut builder = pulse::Grammar::builder();
    let a = builder.terminal("a");
    let s = builder.nonterminal("s");
    let list = builder.nonterminal("list");
    builder.rule(s, &[list]);
    builder.rule(list, &[a, list]);
    builder.rule(list, &[a]);
    builder.start(s);
    builder.build().unwrap()
}
