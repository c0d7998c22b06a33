use cardscan::{CodecConfig, ContactRecord, ECLevel, Payload, QrCodec};
use cardscan::encoder::encode_text;
use cardscan::utils::binarization::{adaptive_binarize, otsu_binarize};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn contact() -> Payload {
    Payload::Contact(ContactRecord {
        name: Some("Jane Doe".into()),
        company: Some("Acme Widgets Inc.".into()),
        position: Some("Senior Engineer".into()),
        phone: Some("555-123-4567".into()),
        email: Some("jane.doe@acme.com".into()),
        website: Some("acmewidgets.com".into()),
        ..ContactRecord::default()
    })
}

fn bench_encode_symbol(c: &mut Criterion) {
    let text = contact().canonical_text();
    c.bench_function("encode_symbol_vcard", |b| {
        b.iter(|| encode_text(black_box(&text), ECLevel::L))
    });
}

fn bench_encode_png(c: &mut Criterion) {
    let codec = QrCodec::new(CodecConfig::fixed());
    let payload = contact();
    c.bench_function("encode_png_vcard", |b| b.iter(|| codec.encode(black_box(&payload))));
}

fn bench_decode_png(c: &mut Criterion) {
    let codec = QrCodec::new(CodecConfig::fixed());
    let png = codec.encode(&contact()).map(|qr| qr.png).unwrap_or_default();
    c.bench_function("decode_png_vcard", |b| b.iter(|| codec.decode(black_box(&png))));
}

fn bench_decode_blank(c: &mut Criterion) {
    let gray = vec![200u8; 640 * 480];
    c.bench_function("decode_blank_640x480", |b| {
        b.iter(|| cardscan::decoder::QrDecoder::decode_gray(black_box(&gray), 640, 480))
    });
}

fn bench_binarize(c: &mut Criterion) {
    let gray: Vec<u8> = (0..640 * 480).map(|i| ((i * 7) % 256) as u8).collect();
    c.bench_function("otsu_binarize_640x480", |b| {
        b.iter(|| otsu_binarize(black_box(&gray), 640, 480))
    });
    c.bench_function("adaptive_binarize_640x480", |b| {
        b.iter(|| adaptive_binarize(black_box(&gray), 640, 480, 61))
    });
}

criterion_group!(
    benches,
    bench_encode_symbol,
    bench_encode_png,
    bench_decode_png,
    bench_decode_blank,
    bench_binarize
);
criterion_main!(benches);
