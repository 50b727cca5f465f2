mod util;

fn main() {
    let _tracing = util::init_tracing();

    #[cfg(feature = "tracing")]
    let _span = tracing::span!(tracing::Level::DEBUG, "BENCH RECOGNIZE").entered();

    divan::main();
}

mod recognize {
    use pulse::Recognizer;

    #[divan::bench(min_time = 5, max_time = 60)]
    fn right_recursion_1000(bencher: divan::Bencher) {
        let grammar = crate::util::right_recursive_grammar();

        bencher.bench_local(|| {
            let mut recognizer = Recognizer::new(&grammar);
            for _ in 0..1000 {
                assert!(recognizer.pulse("a"));
            }
            assert!(recognizer.accepted());
        });
    }

    #[divan::bench(min_time = 5, max_time = 60)]
    fn random_sums(bencher: divan::Bencher) {
        use rand::seq::SliceRandom;

        let grammar = crate::util::sum_grammar();

        // pseudo random for consistent metrics
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(0);
        let walk_count = 100usize;
        let mut walks: Vec<Vec<&str>> = (0..walk_count)
            .map(|i| {
                let terms = i % 32 + 1;
                let mut walk = vec!["n"];
                for _ in 1..terms {
                    walk.push("+");
                    walk.push("n");
                }
                walk
            })
            .collect();
        walks.shuffle(&mut rng);
        let walks = divan::black_box(walks);
        let mut index = (0..walk_count).cycle();

        bencher.bench_local(|| {
            let walk = &walks[index.next().unwrap()];
            let mut recognizer = Recognizer::new(&grammar);
            for token in walk {
                assert!(recognizer.pulse(*token));
            }
            assert!(recognizer.accepted());
        });
    }
}
