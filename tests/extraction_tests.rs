//! Field extraction behavior over whole card texts

use cardscan::{ContactRecord, FieldExtractor, extract};

const CARDS: [&str; 4] = [
    "Jane Doe
Senior Engineer
Platform Team
Acme Widgets Inc.
123 Main Street
Springfield, IL 62704
Tel: 555-123-4567
jane.doe@acme.com
www.acmewidgets.com",
    "ACME CORP
Jane Doe
Tel: 555-111-2222 / Fax: 555-333-4444
https://acme.example",
    "  Dr. Ana Lima  \n\n  Head of Research\n Twitter:ana_lima \n facebook.com/ana.lima ",
    "(555)222-3333\n+44-555-444-5555\n555.666.7777\n555 888 9999",
];

#[test]
fn test_values_come_from_the_text() {
    for card in CARDS {
        let record = extract(card).record;
        for (name, value) in record.fields() {
            if let Some(value) = value {
                assert!(card.contains(value), "{name} = {value:?} fabricated from {card:?}");
            }
        }
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = FieldExtractor::new();
    for card in CARDS {
        assert_eq!(extractor.extract(card), extractor.extract(card));
    }
}

#[test]
fn test_phone_slots_are_positional() {
    let record = extract(CARDS[1]).record;
    // The fax number lands in the mobile slot because slots fill in order
    assert_eq!(record.phone.as_deref(), Some("555-111-2222"));
    assert_eq!(record.mobile.as_deref(), Some("555-333-4444"));
    assert_eq!(record.fax, None);
}

#[test]
fn test_leading_company_line_becomes_name() {
    let record = extract(CARDS[1]).record;
    assert_eq!(record.name.as_deref(), Some("ACME CORP"));
    assert_eq!(record.position.as_deref(), Some("Jane Doe"));
    assert_eq!(record.company.as_deref(), Some("ACME CORP"));
    assert_eq!(record.website.as_deref(), Some("acme.example"));
}

#[test]
fn test_lines_are_trimmed() {
    let extraction = extract(CARDS[2]);
    assert_eq!(extraction.raw_text.lines().len(), 4);
    assert_eq!(extraction.record.name.as_deref(), Some("Dr. Ana Lima"));
    assert_eq!(extraction.record.position.as_deref(), Some("Head of Research"));
    assert_eq!(extraction.record.twitter.as_deref(), Some("ana_lima"));
    assert_eq!(extraction.record.facebook.as_deref(), Some("ana.lima"));
    assert_eq!(extraction.record.email, None);
}

#[test]
fn test_three_phone_slots() {
    let record = extract(CARDS[3]).record;
    assert_eq!(record.phone.as_deref(), Some("(555)222-3333"));
    assert_eq!(record.mobile.as_deref(), Some("+44-555-444-5555"));
    assert_eq!(record.fax.as_deref(), Some("555.666.7777"));
}

#[test]
fn test_nothing_recognizable_is_not_an_error() {
    assert!(extract("").record.is_empty());
    assert!(extract("\n \t\n").record.is_empty());

    let record = extract("hello").record;
    assert_eq!(record.name.as_deref(), Some("hello"));
    assert_eq!(record.populated_count(), 1);
}

#[test]
fn test_record_json_omits_absent_fields() {
    let record = extract(CARDS[0]).record;
    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("\"fax\""));
    let back: ContactRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_three_phones_fill_phone_mobile_fax() {
    let record = extract("555-111-2222\n555-333-4444\n555-555-6666").record;
    assert_eq!(record.phone.as_deref(), Some("555-111-2222"));
    assert_eq!(record.mobile.as_deref(), Some("555-333-4444"));
    assert_eq!(record.fax.as_deref(), Some("555-555-6666"));
}

#[test]
fn test_name_and_position_from_line_order() {
    let record = extract("Jane Doe\nVP Engineering\njane@example.com").record;
    assert_eq!(record.name.as_deref(), Some("Jane Doe"));
    assert_eq!(record.position.as_deref(), Some("VP Engineering"));
    assert_eq!(record.email.as_deref(), Some("jane@example.com"));
}

#[test]
fn test_company_marker_line() {
    let record = extract("Jane Doe\nVP Engineering\nAcme Corp\njane@example.com").record;
    assert_eq!(record.company.as_deref(), Some("Acme Corp"));
}
