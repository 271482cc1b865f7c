//! Latency benchmarks for the no-network analysis path
//!
//! The lexicon classifier and trust filter sit on every request; both
//! should stay comfortably under a millisecond.
//!
//! Run with: cargo bench -p mailguard-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use mailguard_classifiers::{Classifier, LexiconClassifier, TrustFilter};

fn benchmark_lexicon_classifier(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = LexiconClassifier::new().expect("Failed to create lexicon classifier");

    let test_cases = vec![
        ("short_clean", "Lunch at noon tomorrow works for me."),
        (
            "short_spam",
            "URGENT: verify your account immediately or it will be suspended.",
        ),
        (
            "medium_clean",
            "The quarterly report is attached. Let me know if the numbers in section three need another pass before Friday.",
        ),
        (
            "medium_spam",
            "Congratulations, you are a winner! Claim your prize now: click here and confirm your password to receive the gift card.",
        ),
    ];

    let mut group = c.benchmark_group("Lexicon_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| rt.block_on(async { classifier.classify(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

fn benchmark_trust_filter(c: &mut Criterion) {
    let filter = TrustFilter::new().expect("Failed to create trust filter");

    let test_cases = vec![
        ("no_match", "Please review the attached invoice before Thursday."),
        (
            "match",
            "Google LLC, 1600 Amphitheatre Parkway, Mountain View, CA 94043",
        ),
    ];

    let mut group = c.benchmark_group("Trust_Filter");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("is_trusted", name), &text, |b, text| {
            b.iter(|| filter.is_trusted(black_box(text)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lexicon_classifier, benchmark_trust_filter);
criterion_main!(benches);
