use serde::{Deserialize, Serialize};

/// OCR output: the original blob plus its non-empty trimmed lines in order.
///
/// Line position is a weak signal for field identity, so the order is kept
/// exactly as the recognizer produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RawText {
    text: String,
    lines: Vec<String>,
}

impl RawText {
    /// Split a newline-delimited blob into trimmed, non-empty lines
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { text, lines }
    }

    /// The blob as received
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Non-empty trimmed lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when no line carries any text
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Structured contact fields recovered from a card. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactRecord {
    /// Field names in declaration order
    pub const FIELD_NAMES: [&'static str; 18] = [
        "name",
        "position",
        "department",
        "company",
        "email",
        "phone",
        "mobile",
        "fax",
        "website",
        "street_address",
        "city",
        "state",
        "postal_code",
        "country",
        "linkedin",
        "twitter",
        "facebook",
        "notes",
    ];

    /// Ordered `(name, value)` view over every field
    pub fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        Self::FIELD_NAMES
            .iter()
            .map(|&name| (name, self.get(name)))
            .collect()
    }

    /// Value of a field by name; `None` when absent or the name is unknown
    pub fn get(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "name" => &self.name,
            "position" => &self.position,
            "department" => &self.department,
            "company" => &self.company,
            "email" => &self.email,
            "phone" => &self.phone,
            "mobile" => &self.mobile,
            "fax" => &self.fax,
            "website" => &self.website,
            "street_address" | "address" => &self.street_address,
            "city" => &self.city,
            "state" => &self.state,
            "postal_code" => &self.postal_code,
            "country" => &self.country,
            "linkedin" => &self.linkedin,
            "twitter" => &self.twitter,
            "facebook" => &self.facebook,
            "notes" => &self.notes,
            _ => return None,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "name" => &mut self.name,
            "position" => &mut self.position,
            "department" => &mut self.department,
            "company" => &mut self.company,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "mobile" => &mut self.mobile,
            "fax" => &mut self.fax,
            "website" => &mut self.website,
            "street_address" | "address" => &mut self.street_address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "postal_code" => &mut self.postal_code,
            "country" => &mut self.country,
            "linkedin" => &mut self.linkedin,
            "twitter" => &mut self.twitter,
            "facebook" => &mut self.facebook,
            "notes" => &mut self.notes,
            _ => return None,
        };
        Some(slot)
    }

    /// Build a record from named values. Unknown names are ignored and
    /// `address` is accepted for `street_address`.
    pub fn from_fields<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut record = Self::default();
        for (name, value) in pairs {
            if let Some(slot) = record.slot_mut(name) {
                *slot = value.map(str::to_owned);
            }
        }
        record
    }

    /// Number of populated fields
    pub fn populated_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// True when no field is populated
    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }
}

/// The atomic output of field extraction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Extraction {
    /// Text the record was derived from
    pub raw_text: RawText,
    /// Recovered fields
    pub record: ContactRecord,
}
