//! End-to-end codec tests: payloads rendered to rasters and read back
//!
//! Rasters are re-encoded, rotated and composited onto larger canvases so the
//! reader is exercised on more than the exact PNG the encoder produced.

use std::io::Cursor;

use cardscan::{
    CodecConfig, ContactRecord, ECLevel, Error, FieldMap, Payload, PayloadKind, QrCodec,
};
use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma, imageops};

fn codec() -> QrCodec {
    QrCodec::new(CodecConfig::fixed())
}

fn jane() -> ContactRecord {
    ContactRecord {
        name: Some("Jane Doe".into()),
        company: Some("Acme Widgets Inc.".into()),
        position: Some("Senior Engineer".into()),
        phone: Some("555-123-4567".into()),
        email: Some("jane.doe@acme.com".into()),
        ..ContactRecord::default()
    }
}

fn write(image: &DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn load(png: &[u8]) -> DynamicImage {
    image::load_from_memory(png).unwrap()
}

#[test]
fn test_raw_text_round_trip() {
    for text in ["", "HELLO WORLD", "0123456789012345", "https://example.com/a?b=c", "Zürich café ✓"] {
        let qr = codec().encode(&Payload::RawText(text.into())).unwrap();
        assert_eq!(qr.kind, PayloadKind::RawText);
        assert_eq!(qr.text, text);
        assert_eq!(codec().decode(&qr.png).unwrap().as_deref(), Some(text), "{text:?}");
    }
}

#[test]
fn test_contact_round_trip_is_vcard() {
    let qr = codec().encode(&Payload::Contact(jane())).unwrap();
    assert!(qr.text.starts_with("BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\n"));
    assert!(qr.text.contains("\nURL:\n"));
    assert!(qr.text.ends_with("END:VCARD"));
    assert_eq!(codec().decode(&qr.png).unwrap(), Some(qr.text));
}

#[test]
fn test_company_fields_round_trip() {
    let fields = FieldMap::new()
        .with("type", Some("company"))
        .with("company_name", Some("Acme Corp"))
        .with("registration_number", Some("REG-42"))
        .with("fax", None::<String>)
        .with("website", Some(""));
    let qr = codec().encode_fields(PayloadKind::Company, &fields).unwrap();
    assert_eq!(qr.text, "Company Name: Acme Corp\nRegistration Number: REG-42");
    assert_eq!(codec().decode(&qr.png).unwrap(), Some(qr.text));
}

#[test]
fn test_every_level_round_trips() {
    for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
        let codec = QrCodec::new(CodecConfig::fixed().with_ec_level(level));
        let qr = codec.encode(&Payload::Contact(jane())).unwrap();
        assert_eq!(qr.ec_level, level);
        let symbol = codec.decode_symbol(&qr.png).unwrap().unwrap();
        assert_eq!(symbol.ec_level, level);
        assert_eq!(symbol.version, qr.version);
        assert_eq!(symbol.mask, qr.mask);
        assert_eq!(symbol.text, qr.text);
    }
}

#[test]
fn test_jpeg_round_trip() {
    let qr = codec().encode(&Payload::Contact(jane())).unwrap();
    let jpeg = write(&load(&qr.png), ImageOutputFormat::Jpeg(90));
    assert_eq!(codec().decode(&jpeg).unwrap(), Some(qr.text));
}

#[test]
fn test_rotated_symbols() {
    let qr = codec().encode(&Payload::RawText("rotate me".into())).unwrap();
    let image = load(&qr.png);
    for rotated in [image.rotate90(), image.rotate180(), image.rotate270()] {
        let png = write(&rotated, ImageOutputFormat::Png);
        assert_eq!(codec().decode(&png).unwrap().as_deref(), Some("rotate me"));
    }
}

#[test]
fn test_symbol_on_a_larger_card() {
    let codec = QrCodec::new(CodecConfig::fixed().with_module_px(4));
    let qr = codec.encode(&Payload::RawText("on a card".into())).unwrap();
    let symbol = load(&qr.png).to_luma8();

    let mut card = GrayImage::from_pixel(640, 400, Luma([235]));
    imageops::overlay(&mut card, &symbol, 420, 150);
    let png = write(&DynamicImage::ImageLuma8(card), ImageOutputFormat::Png);
    assert_eq!(codec.decode(&png).unwrap().as_deref(), Some("on a card"));
}

#[test]
fn test_capacity_failure_is_reported() {
    let text = "x".repeat(3000);
    match codec().encode(&Payload::RawText(text)) {
        Err(Error::Capacity {
            needed_bits,
            available_bits,
            ec_level,
        }) => {
            assert_eq!(needed_bits, 24_020);
            assert_eq!(available_bits, 23_648);
            assert_eq!(ec_level, ECLevel::L);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

#[test]
fn test_image_without_symbol_is_none() {
    let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 120, Luma([255])));
    let png = write(&blank, ImageOutputFormat::Png);
    assert_eq!(codec().decode(&png).unwrap(), None);
}

#[test]
fn test_garbage_is_malformed() {
    assert!(matches!(codec().decode(b"definitely not a raster"), Err(Error::MalformedImage(_))));
    assert!(matches!(codec().decode(&[]), Err(Error::MalformedImage(_))));
}

#[test]
fn test_png_regenerates_from_text() {
    let a = codec().encode(&Payload::RawText("same".into())).unwrap();
    let b = codec().render(&a.text).unwrap();
    assert_eq!(a.png, b);
}

#[test]
fn test_smallest_module_size_round_trips() {
    let codec = QrCodec::new(CodecConfig::fixed().with_module_px(1));
    assert_eq!(codec.config().module_px, 3);
    let qr = codec.encode(&Payload::RawText("Jane Doe 555-123-4567".into())).unwrap();
    assert_eq!(codec.decode(&qr.png).unwrap(), Some(qr.text));
}

#[test]
fn test_narrow_quiet_zone_round_trips() {
    for border in [0, 1] {
        let codec = QrCodec::new(CodecConfig::fixed().with_border(border));
        let qr = codec.encode(&Payload::RawText("Jane Doe 555-123-4567".into())).unwrap();
        assert_eq!(codec.decode(&qr.png).unwrap(), Some(qr.text), "border {border}");
    }
}

#[test]
fn test_version_36_symbol_round_trips() {
    let codec = QrCodec::new(CodecConfig::fixed().with_module_px(4));
    let text = "x".repeat(2400);
    let qr = codec.encode(&Payload::RawText(text.clone())).unwrap();
    assert_eq!(qr.version.number(), 36);
    assert_eq!(codec.decode(&qr.png).unwrap(), Some(text));
}
