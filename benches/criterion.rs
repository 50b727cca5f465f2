mod util;

use criterion::{criterion_group, criterion_main, Criterion};
use pulse::Recognizer;

fn recognize(c: &mut Criterion) {
    c.bench_function("right recursion 1000 tokens", |b| {
        let grammar = util::right_recursive_grammar();
        b.iter(|| {
            let mut recognizer = Recognizer::new(&grammar);
            for _ in 0..1000 {
                assert!(recognizer.pulse("a"));
            }
            assert!(recognizer.accepted());
        });
    });

    c.bench_function("ambiguous sum 64 terms", |b| {
        let grammar = util::sum_grammar();
        b.iter(|| {
            let mut recognizer = Recognizer::new(&grammar);
            assert!(recognizer.pulse("n"));
            for _ in 1..64 {
                assert!(recognizer.pulse("+"));
                assert!(recognizer.pulse("n"));
            }
            assert!(recognizer.accepted());
        });
    });
}

criterion_group!(benches, recognize);
criterion_main!(benches);
