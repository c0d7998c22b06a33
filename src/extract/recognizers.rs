//! Independent field recognizers.
//!
//! Each recognizer fills one field family from the recognized text and leaves
//! every other field alone. Values are always slices of the input text, so a
//! populated field can be found verbatim in the card.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ContactRecord, RawText};

/// A recognizer for one field family
pub type Recognizer = fn(&RawText, &mut ContactRecord);

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:\+?\d{1,3}[-.]?)?\(?\d{3}\)?[-.]?\d{3}[-.]?\d{4}"));

static WEBSITE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:https?://)?(?:www\.)?([A-Za-z0-9-]+(?:\.[A-Za-z]{2,})+)"));

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(?:linkedin\.com/in/|linkedin:?)([A-Za-z0-9_-]+)"));
static TWITTER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(?:twitter\.com/|twitter:?)([A-Za-z0-9_]+)"));
static FACEBOOK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(?:facebook\.com/|facebook:?)([A-Za-z0-9_.]+)"));

static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b\d{5}(?:-\d{4})?\b"));

// Horizontal whitespace only, so an address stays on its own line
static STREET_ADDRESS: LazyLock<Regex> = LazyLock::new(|| compile(r"\b\d+[ \t]+[A-Za-z0-9 \t,.-]+\b"));

const COMPANY_MARKERS: [&str; 6] = ["inc", "corp", "ltd", "llc", "company", "co."];
const DEPARTMENT_MARKERS: [&str; 4] = ["department", "dept", "division", "team"];

/// The standard recognizers in application order
pub const STANDARD: [Recognizer; 9] = [
    email,
    phones,
    website,
    social,
    street_address,
    postal_code,
    name_and_position,
    company,
    department,
];

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_owned())
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

fn first_line_containing(raw: &RawText, markers: &[&str]) -> Option<String> {
    raw.lines()
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            markers.iter().any(|marker| lower.contains(marker))
        })
        .cloned()
}

/// First e-mail address anywhere in the text
pub fn email(raw: &RawText, record: &mut ContactRecord) {
    record.email = first_match(&EMAIL, raw.as_str());
}

/// Phone-like numbers in reading order fill phone, mobile, then fax
pub fn phones(raw: &RawText, record: &mut ContactRecord) {
    let mut numbers = PHONE.find_iter(raw.as_str()).map(|m| m.as_str().to_owned());
    record.phone = numbers.next();
    record.mobile = numbers.next();
    record.fax = numbers.next();
}

/// Domain of the first web-address-like run, scheme and `www.` stripped
pub fn website(raw: &RawText, record: &mut ContactRecord) {
    record.website = first_capture(&WEBSITE, raw.as_str());
}

/// LinkedIn, Twitter and Facebook handles, matched case-insensitively
pub fn social(raw: &RawText, record: &mut ContactRecord) {
    let text = raw.as_str();
    record.linkedin = first_capture(&LINKEDIN, text);
    record.twitter = first_capture(&TWITTER, text);
    record.facebook = first_capture(&FACEBOOK, text);
}

/// Five-digit ZIP, optionally ZIP+4
pub fn postal_code(raw: &RawText, record: &mut ContactRecord) {
    record.postal_code = first_match(&POSTAL_CODE, raw.as_str());
}

/// A number followed by words on the same line
pub fn street_address(raw: &RawText, record: &mut ContactRecord) {
    record.street_address = first_match(&STREET_ADDRESS, raw.as_str());
}

/// First line is taken as the name, second as the position.
///
/// Purely positional: cards that lead with a logo line or company name get
/// those values instead.
pub fn name_and_position(raw: &RawText, record: &mut ContactRecord) {
    let mut lines = raw.lines().iter().cloned();
    record.name = lines.next();
    record.position = lines.next();
}

/// First line carrying a company suffix such as "Inc" or "Ltd"
pub fn company(raw: &RawText, record: &mut ContactRecord) {
    record.company = first_line_containing(raw, &COMPANY_MARKERS);
}

/// First line naming a department, division or team
pub fn department(raw: &RawText, record: &mut ContactRecord) {
    record.department = first_line_containing(raw, &DEPARTMENT_MARKERS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(recognizer: Recognizer, text: &str) -> ContactRecord {
        let mut record = ContactRecord::default();
        recognizer(&RawText::new(text), &mut record);
        record
    }

    #[test]
    fn test_email() {
        let record = run(email, "Jane\njane.doe+cards@acme.co.uk and bob@x.io");
        assert_eq!(record.email.as_deref(), Some("jane.doe+cards@acme.co.uk"));
        assert_eq!(run(email, "no address here").email, None);
    }

    #[test]
    fn test_phone_slots_fill_in_order() {
        let record = run(phones, "Tel 555-123-4567\nMobile +1-555-987-6543\nFax (555)222-3333");
        assert_eq!(record.phone.as_deref(), Some("555-123-4567"));
        assert_eq!(record.mobile.as_deref(), Some("+1-555-987-6543"));
        assert_eq!(record.fax.as_deref(), Some("(555)222-3333"));

        let record = run(phones, "555.123.4567");
        assert_eq!(record.phone.as_deref(), Some("555.123.4567"));
        assert_eq!(record.mobile, None);
        assert_eq!(record.fax, None);
    }

    #[test]
    fn test_duplicate_numbers_are_kept() {
        let record = run(phones, "5551234567 5551234567");
        assert_eq!(record.phone, record.mobile);
        assert!(record.phone.is_some());
    }

    #[test]
    fn test_website_strips_scheme() {
        let record = run(website, "Visit https://www.acme-widgets.com/about");
        assert_eq!(record.website.as_deref(), Some("acme-widgets.com"));
    }

    #[test]
    fn test_social_handles_keep_case() {
        let record = run(social, "LinkedIn:JaneDoe\nlinkedin.com/in/other\nTwitter:@x\nfacebook.com/Jane.Doe");
        assert_eq!(record.linkedin.as_deref(), Some("JaneDoe"));
        // A space after the label leaves no handle to capture
        assert_eq!(run(social, "LinkedIn: JaneDoe").linkedin, None);
        assert_eq!(record.facebook.as_deref(), Some("Jane.Doe"));
        // "@" is not a handle character, so nothing is captured
        assert_eq!(record.twitter, None);
    }

    #[test]
    fn test_postal_code() {
        assert_eq!(run(postal_code, "Springfield, IL 62704-1234").postal_code.as_deref(), Some("62704-1234"));
        assert_eq!(run(postal_code, "Call 5551234567").postal_code, None);
    }

    #[test]
    fn test_street_address_stays_on_one_line() {
        let record = run(street_address, "Jane Doe\n123 Main Street, Suite 4\nSpringfield");
        assert_eq!(record.street_address.as_deref(), Some("123 Main Street, Suite 4"));
    }

    #[test]
    fn test_name_and_position() {
        let record = run(name_and_position, "\n  Jane Doe  \n\nChief Widget Officer\nAcme");
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.position.as_deref(), Some("Chief Widget Officer"));

        let record = run(name_and_position, "Solo");
        assert_eq!(record.position, None);
    }

    #[test]
    fn test_company_and_department() {
        let text = "Jane Doe\nSales Team\nACME WIDGETS INC\nMarketing Department";
        assert_eq!(run(company, text).company.as_deref(), Some("ACME WIDGETS INC"));
        assert_eq!(run(department, text).department.as_deref(), Some("Sales Team"));
        assert_eq!(run(company, "Jane Doe\nEngineer").company, None);
    }
}
