//! Card scanning pipeline with stub recognizers and a real directory store

use std::fs;

use cardscan::{
    CardScanner, CodecConfig, ContactRecord, Error, FsImageStore, NamingScheme, Payload, QrCodec,
    StaticText,
};
use tempfile::TempDir;

const CARD_TEXT: &str = "Jane Doe\nCTO\nAcme Inc\njane@acme.com\n555-123-4567";

fn card_with_qr() -> (Vec<u8>, String) {
    let codec = QrCodec::new(CodecConfig::fixed().with_module_px(4));
    let record = ContactRecord {
        name: Some("Jane Doe".into()),
        email: Some("jane@acme.com".into()),
        ..ContactRecord::default()
    };
    let qr = codec.encode(&Payload::Contact(record)).unwrap();
    (qr.png, qr.text)
}

#[test]
fn test_scan_stores_extracts_and_reads_qr() {
    let temp = TempDir::new().unwrap();
    let store = FsImageStore::new(temp.path().join("cards")).with_naming(NamingScheme::ContentAddressed);
    let scanner = CardScanner::new(StaticText::new(CARD_TEXT)).with_store(store);
    let (png, vcard) = card_with_qr();

    let scan = scanner.scan(&png).unwrap();

    let stored = scan.image_ref.clone().unwrap();
    assert!(stored.ends_with(".png"));
    assert_eq!(fs::read(&stored).unwrap(), png);

    assert_eq!(scan.record.name.as_deref(), Some("Jane Doe"));
    assert_eq!(scan.record.position.as_deref(), Some("CTO"));
    assert_eq!(scan.record.company.as_deref(), Some("Acme Inc"));
    assert_eq!(scan.record.phone.as_deref(), Some("555-123-4567"));
    assert_eq!(scan.qr_text, Some(vcard));
    assert_eq!(scan.extraction().record, scan.record);
}

#[test]
fn test_timestamped_store_keeps_every_scan() {
    let temp = TempDir::new().unwrap();
    let scanner = CardScanner::new(StaticText::new(CARD_TEXT))
        .with_store(FsImageStore::new(temp.path()))
        .read_qr(false);
    let (png, _) = card_with_qr();

    let first = scanner.scan(&png).unwrap().image_ref;
    let second = scanner.scan(&png).unwrap().image_ref;
    assert_ne!(first, second);
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
}

#[test]
fn test_card_without_qr() {
    let scanner = CardScanner::new(StaticText::new(CARD_TEXT));
    let blank = {
        let image = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            300,
            180,
            image::Luma([250]),
        ));
        let mut out = std::io::Cursor::new(Vec::new());
        image.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    };
    let scan = scanner.scan(&blank).unwrap();
    assert_eq!(scan.qr_text, None);
    assert_eq!(scan.record.email.as_deref(), Some("jane@acme.com"));
}

#[test]
fn test_store_failure_stops_the_scan() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    fs::write(&blocker, b"not a directory").unwrap();
    let scanner = CardScanner::new(StaticText::new(CARD_TEXT)).with_store(FsImageStore::new(&blocker));
    let (png, _) = card_with_qr();
    assert!(matches!(scanner.scan(&png), Err(Error::Io(_))));
}

#[test]
fn test_scan_serializes_to_json() {
    let scanner = CardScanner::new(StaticText::new(CARD_TEXT));
    let (png, vcard) = card_with_qr();
    let json = serde_json::to_value(scanner.scan(&png).unwrap()).unwrap();
    assert_eq!(json["qr_text"], vcard.as_str());
    assert_eq!(json["record"]["email"], "jane@acme.com");
    assert_eq!(json["raw_text"]["lines"][1], "CTO");
    assert!(json.get("image_ref").is_none());
}
