use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spelltag::{Dictionary, EditSession, SpellChecker, Tokenizer};

fn document(paragraphs: usize) -> String {
    "The quick brwon fox jumps over the lazy dog, then teh dog sleeps. "
        .repeat(paragraphs)
}

fn bench_recompute(c: &mut Criterion) {
    let dict = Dictionary::from_words([
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "then", "sleeps",
    ])
    .unwrap();
    let text = document(500);

    c.bench_function("insert_recompute_500", |b| {
        let mut session =
            EditSession::with_text(SpellChecker::new(&dict, Tokenizer::default()), text.clone());
        b.iter(|| {
            session.insert(0, black_box("x")).unwrap();
            session.delete(spelltag::TextSpan::new(0, 1).unwrap()).unwrap();
        })
    });

    c.bench_function("search_500", |b| {
        let mut session =
            EditSession::with_text(SpellChecker::new(&dict, Tokenizer::default()), text.clone());
        b.iter(|| session.search(black_box("dog")))
    });
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
