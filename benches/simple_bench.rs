use criterion::{black_box, criterion_group, criterion_main, Criterion};
use needleset::scanner::Input;
use needleset::AhoCorasickBuilder;

fn random_keywords(n: usize) -> Vec<String> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let len = rng.gen_range(3..8);
            (0..len)
                .map(|_| (b'a' + rng.gen_range(0..26)) as char)
                .collect::<String>()
        })
        .collect()
}

fn random_haystack(len: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| (b'a' + rng.gen_range(0..26)) as char)
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let keywords = random_keywords(1000);
    c.bench_function("build_1000_keywords", |b| {
        b.iter(|| {
            let mut builder = AhoCorasickBuilder::new(false);
            for k in &keywords {
                builder = builder.add(k.as_str()).unwrap();
            }
            black_box(builder.build())
        });
    });
}

fn bench_scan(c: &mut Criterion) {
    let keywords = random_keywords(1000);
    let mut builder = AhoCorasickBuilder::new(false);
    for k in &keywords {
        builder = builder.add(k.as_str()).unwrap();
    }
    let automaton = builder.build();
    let haystack = random_haystack(100_000);

    c.bench_function("scan_100k_against_1000_keywords", |b| {
        b.iter(|| {
            let hits = automaton.find_all(Input::Text(&haystack));
            black_box(hits.len())
        });
    });
}

fn bench_scan_ignore_case(c: &mut Criterion) {
    let keywords = random_keywords(200);
    let mut builder = AhoCorasickBuilder::new(true);
    for k in &keywords {
        builder = builder.add(k.as_str()).unwrap();
    }
    let automaton = builder.build();
    let haystack = random_haystack(100_000);

    c.bench_function("scan_100k_ignore_case", |b| {
        b.iter(|| {
            let hits = automaton.find_all(Input::Text(&haystack));
            black_box(hits.len())
        });
    });
}

criterion_group!(benches, bench_build, bench_scan, bench_scan_ignore_case);
criterion_main!(benches);
