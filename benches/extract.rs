use cardscan::FieldExtractor;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const CARD: &str = "Jane Doe
Senior Engineer
Platform Team
Acme Widgets Inc.
123 Main Street
Springfield, IL 62704
Tel: 555-123-4567
Cell: 555-987-6543
jane.doe@acme.com
www.acmewidgets.com
linkedin.com/in/janedoe";

fn bench_extract_card(c: &mut Criterion) {
    let extractor = FieldExtractor::new();
    c.bench_function("extract_full_card", |b| {
        b.iter(|| extractor.extract(black_box(CARD)))
    });
}

fn bench_extract_empty(c: &mut Criterion) {
    let extractor = FieldExtractor::new();
    c.bench_function("extract_empty", |b| b.iter(|| extractor.extract(black_box(""))));
}

fn bench_extract_batch(c: &mut Criterion) {
    let extractor = FieldExtractor::new();
    let texts = vec![CARD; 256];
    c.bench_function("extract_batch_256", |b| {
        b.iter(|| extractor.extract_batch(black_box(&texts)))
    });
}

criterion_group!(benches, bench_extract_card, bench_extract_empty, bench_extract_batch);
criterion_main!(benches);
