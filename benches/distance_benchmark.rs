use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knowledge_clustering::{
    distance::set_distance, term_distance, BagStore, ClusterConfig, ClusteringEngine, Language,
    ScopeMeanings, SnowballLinguist,
};

fn words(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|w| w.to_string()).collect()
}

fn bench_set_distance(c: &mut Criterion) {
    let linguist = SnowballLinguist::new(Language::English);
    let prefixes = words(&["", "in", "non", "co"]);

    let short_a = words(&["regular", "language"]);
    let short_b = words(&["regular", "languages"]);
    let long_a = words(&["countable", "ordinal", "word", "regular", "language", "semigroup"]);
    let long_b = words(&["regular", "semigroups", "ordinals", "countable", "languages", "inseparable"]);

    c.bench_function("set_distance_2_words", |b| {
        b.iter(|| black_box(set_distance(&short_a, &short_b, &prefixes, &linguist)));
    });

    c.bench_function("set_distance_6_words", |b| {
        b.iter(|| black_box(set_distance(&long_a, &long_b, &prefixes, &linguist)));
    });
}

fn bench_term_distance(c: &mut Criterion) {
    let linguist = SnowballLinguist::new(Language::English);
    let prefixes = words(&["", "in"]);
    let engine = ClusteringEngine::new(ClusterConfig::new(Language::English)).unwrap();
    let store = BagStore::from_bags(vec![
        vec!["regular language over countable ordinals", "regular languages@ord"],
        vec!["word", "words"],
        vec!["word@ord", "countable word"],
    ]);
    let meanings = engine.infer_scopes(&store);
    let empty = ScopeMeanings::new();

    c.bench_function("term_distance_unscoped", |b| {
        b.iter(|| {
            black_box(term_distance(
                "regular \\kl{languages} of words",
                "regular language over words",
                &prefixes,
                &empty,
                &linguist,
            ))
        });
    });

    c.bench_function("term_distance_scoped", |b| {
        b.iter(|| {
            black_box(term_distance(
                "regular language over countable ordinals",
                "regular languages@ord",
                &prefixes,
                &meanings,
                &linguist,
            ))
        });
    });
}

criterion_group!(benches, bench_set_distance, bench_term_distance);
criterion_main!(benches);
