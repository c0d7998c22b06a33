use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::contact::ContactRecord;
use super::symbol::{ECLevel, MaskPattern, Version};

/// Which canonical-text builder a payload uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Text embedded verbatim
    RawText,
    /// vCard-shaped block built from a contact record
    Contact,
    /// `Key: Value` lines built from a company field map
    Company,
}

impl PayloadKind {
    /// Identifier form used in flat maps and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::RawText => "raw_text",
            PayloadKind::Contact => "contact",
            PayloadKind::Company => "company",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "raw_text" | "raw-text" | "text" => Ok(PayloadKind::RawText),
            "contact" | "business_card" => Ok(PayloadKind::Contact),
            "company" => Ok(PayloadKind::Company),
            other => Err(format!("unknown payload kind: {other}")),
        }
    }
}

/// Insertion-ordered mapping of identifier-style keys to optional values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldMap(Vec<(String, Option<String>)>);

impl FieldMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value; a replaced key keeps its original position
    pub fn insert(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        let key = key.into();
        let value = value.map(Into::into);
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`FieldMap::insert`]
    pub fn with(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for `key`, `None` when absent or unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of entries, set or not
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Input to the QR encoder, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Embed the text as-is
    RawText(String),
    /// Render a vCard block
    Contact(ContactRecord),
    /// Render `Key: Value` lines
    Company(FieldMap),
}

impl Payload {
    /// The payload's kind tag
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::RawText(_) => PayloadKind::RawText,
            Payload::Contact(_) => PayloadKind::Contact,
            Payload::Company(_) => PayloadKind::Company,
        }
    }

    /// Build a payload of `kind` from a flat field map.
    ///
    /// `raw_text` reads the `raw_text` key (empty when unset). `company`
    /// drops a `type` key, which carries the kind tag in flat maps.
    pub fn from_fields(kind: PayloadKind, fields: &FieldMap) -> Self {
        match kind {
            PayloadKind::RawText => {
                Payload::RawText(fields.get("raw_text").unwrap_or_default().to_owned())
            }
            PayloadKind::Contact => Payload::Contact(ContactRecord::from_fields(fields.iter())),
            PayloadKind::Company => Payload::Company(
                fields
                    .iter()
                    .filter(|(k, _)| *k != "type")
                    .collect::<FieldMap>(),
            ),
        }
    }

    /// The exact text a QR symbol for this payload carries
    pub fn canonical_text(&self) -> String {
        match self {
            Payload::RawText(text) => text.clone(),
            Payload::Contact(record) => vcard_text(record),
            Payload::Company(fields) => company_text(fields),
        }
    }
}

fn vcard_text(record: &ContactRecord) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or_default().to_owned();
    [
        "BEGIN:VCARD".to_owned(),
        "VERSION:3.0".to_owned(),
        format!("FN:{}", field(&record.name)),
        format!("ORG:{}", field(&record.company)),
        format!("TITLE:{}", field(&record.position)),
        format!("TEL:{}", field(&record.phone)),
        format!("EMAIL:{}", field(&record.email)),
        format!("URL:{}", field(&record.website)),
        "END:VCARD".to_owned(),
    ]
    .join("\n")
}

fn company_text(fields: &FieldMap) -> String {
    fields
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some(format!("{}: {}", title_case(key), v)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `registration_number` -> `Registration Number`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// An encoded QR payload: canonical text plus its PNG rendering.
///
/// The text is authoritative; the PNG can always be regenerated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// Kind of payload the text was built from
    pub kind: PayloadKind,
    /// Canonical text carried by the symbol
    pub text: String,
    /// PNG-encoded raster
    pub png: Vec<u8>,
    /// Symbol version chosen for the text
    pub version: Version,
    /// Error correction level used
    pub ec_level: ECLevel,
    /// Mask pattern chosen by penalty score
    pub mask: MaskPattern,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("registration_number"), "Registration Number");
        assert_eq!(title_case("NAME"), "Name");
        assert_eq!(title_case("social_linkedIn"), "Social Linkedin");
        assert_eq!(title_case("email"), "Email");
    }

    #[test]
    fn test_vcard_text_renders_absent_fields_empty() {
        let record = ContactRecord {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            ..Default::default()
        };
        let text = Payload::Contact(record).canonical_text();
        assert_eq!(
            text,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:\nTITLE:\nTEL:\nEMAIL:jane@example.com\nURL:\nEND:VCARD"
        );
    }

    #[test]
    fn test_company_text_skips_absent_and_empty() {
        let fields = FieldMap::new()
            .with("name", Some("Acme Corp"))
            .with("email", None::<String>)
            .with("website", Some(""))
            .with("registration_number", Some("RC-1"));
        assert_eq!(
            Payload::Company(fields).canonical_text(),
            "Name: Acme Corp\nRegistration Number: RC-1"
        );
    }

    #[test]
    fn test_from_fields_per_kind() {
        let fields = FieldMap::new()
            .with("type", Some("company"))
            .with("raw_text", Some("hello"))
            .with("name", Some("Acme"));

        assert_eq!(
            Payload::from_fields(PayloadKind::RawText, &fields),
            Payload::RawText("hello".into())
        );
        match Payload::from_fields(PayloadKind::Contact, &fields) {
            Payload::Contact(record) => assert_eq!(record.name.as_deref(), Some("Acme")),
            other => panic!("unexpected payload {other:?}"),
        }
        match Payload::from_fields(PayloadKind::Company, &fields) {
            Payload::Company(map) => {
                assert_eq!(map.get("type"), None);
                assert_eq!(map.len(), 2);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_field_map_replace_keeps_position() {
        let mut map = FieldMap::new().with("a", Some("1")).with("b", Some("2"));
        map.insert("a", Some("3"));
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some("3"));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("raw_text".parse(), Ok(PayloadKind::RawText));
        assert_eq!("company".parse(), Ok(PayloadKind::Company));
        assert!("vcard".parse::<PayloadKind>().is_err());
        assert_eq!(PayloadKind::Contact.to_string(), "contact");
    }
}
