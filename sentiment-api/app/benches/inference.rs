use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sentiment_api::artifacts::Artifacts;
use sentiment_api::explain::{LimeConfig, LimeTextExplainer};
use sentiment_api::model::TfidfClassifier;
use sentiment_api::preprocess::{NormalizeMode, TextNormalizer};
use std::path::PathBuf;

const TWEET: &str =
    "@friend I absolutely love this movie 😍 but the ending was sad 😢 #cinema https://t.co/abc";

struct Fixture {
    normalizer: TextNormalizer,
    classifier: TfidfClassifier,
}

fn fixture() -> Fixture {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../api_artifacts");
    let artifacts = Artifacts::load(&dir).expect("artifacts load");
    let normalizer = TextNormalizer::new(
        &artifacts.emojis,
        artifacts.stopwords,
        artifacts.lemma_exceptions,
        NormalizeMode::Lemmatize,
    )
    .expect("normalizer builds");
    let classifier = TfidfClassifier::new(
        artifacts.vectorizer.expect("vectorizer present"),
        artifacts.model.expect("model present"),
    )
    .expect("model fits vectorizer");
    Fixture {
        normalizer,
        classifier,
    }
}

fn bench_normalize(c: &mut Criterion) {
    let lemma = fixture().normalizer;
    let stem = TextNormalizer::plain(NormalizeMode::Stem);

    let mut group = c.benchmark_group("normalize");
    group.bench_function("lemmatize", |b| b.iter(|| lemma.normalize(black_box(TWEET))));
    group.bench_function("stem", |b| b.iter(|| stem.normalize(black_box(TWEET))));
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let Fixture {
        normalizer,
        classifier,
    } = fixture();
    let cleaned = normalizer.normalize(TWEET);

    c.bench_function("predict_one", |b| {
        b.iter(|| classifier.predict_one(black_box(&cleaned)));
    });
}

fn bench_explain(c: &mut Criterion) {
    let Fixture {
        normalizer,
        classifier,
    } = fixture();
    let cleaned = normalizer.normalize(TWEET);

    let mut group = c.benchmark_group("lime_explain");
    group.sample_size(10);
    for samples in [500_usize, 5000] {
        let explainer = LimeTextExplainer::new(LimeConfig {
            num_samples: samples,
            ..LimeConfig::default()
        });
        group.bench_with_input(BenchmarkId::new("samples", samples), &cleaned, |b, text| {
            b.iter(|| explainer.explain_instance(black_box(text), &classifier));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_predict, bench_explain);
criterion_main!(benches);
