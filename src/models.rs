//! Frontend Models
//!
//! Receipt record as exchanged with the receipt service.
//! Decoding is lenient: the service has stored prices as text and as numbers,
//! ids as `_id`, and dates both as plain dates and as timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the receipt service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ReceiptId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match TextOrNumber::deserialize(deserializer)? {
            TextOrNumber::Text(id) => ReceiptId(id),
            TextOrNumber::Number(id) => ReceiptId(id.to_string()),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// What the purchase was for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Purpose {
    #[default]
    Work,
    Uber,
    Ecom,
    /// Stored by the service but not offered by this UI
    Other(String),
}

impl Purpose {
    /// Options offered in selects, in display order
    pub const ALL: [Purpose; 3] = [Purpose::Work, Purpose::Uber, Purpose::Ecom];

    pub fn as_str(&self) -> &str {
        match self {
            Purpose::Work => "Work",
            Purpose::Uber => "Uber",
            Purpose::Ecom => "Ecom",
            Purpose::Other(raw) => raw,
        }
    }

    /// Case-insensitive, whitespace-trimmed
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "work" => Purpose::Work,
            "uber" => Purpose::Uber,
            "ecom" => Purpose::Ecom,
            _ => Purpose::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Purpose {
    fn from(raw: String) -> Self {
        Purpose::parse(&raw)
    }
}

impl From<Purpose> for String {
    fn from(purpose: Purpose) -> Self {
        match purpose {
            Purpose::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose receipt it is
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Person {
    #[default]
    Harsha,
    Hesh,
    /// Stored by the service but not offered by this UI
    Other(String),
}

impl Person {
    /// Options offered in selects, in display order
    pub const ALL: [Person; 2] = [Person::Harsha, Person::Hesh];

    pub fn as_str(&self) -> &str {
        match self {
            Person::Harsha => "Harsha",
            Person::Hesh => "Hesh",
            Person::Other(raw) => raw,
        }
    }

    /// Case-insensitive, whitespace-trimmed
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "harsha" => Person::Harsha,
            "hesh" => Person::Hesh,
            _ => Person::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Person {
    fn from(raw: String) -> Self {
        Person::parse(&raw)
    }
}

impl From<Person> for String {
    fn from(person: Person) -> Self {
        match person {
            Person::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt data structure (matches the receipt service)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(alias = "_id")]
    pub id: ReceiptId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub store: String,
    #[serde(rename = "priceWithGST", default, with = "price_text")]
    pub price_with_gst: Option<Decimal>,
    #[serde(default, with = "calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_tag")]
    pub purpose: Option<Purpose>,
    #[serde(default, deserialize_with = "optional_tag")]
    pub person: Option<Person>,
    #[serde(rename = "imageURL", default, deserialize_with = "text_or_empty")]
    pub image_url: String,
}

impl Receipt {
    pub fn price_label(&self) -> String {
        self.price_with_gst.map(format_price).unwrap_or_default()
    }

    pub fn purpose_label(&self) -> &str {
        self.purpose.as_ref().map(Purpose::as_str).unwrap_or("")
    }

    pub fn person_label(&self) -> &str {
        self.person.as_ref().map(Person::as_str).unwrap_or("")
    }
}

/// Two decimal places, as shown on receipts
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price)
}

/// Parse a user-entered or stored price. Empty input means no price.
pub fn parse_price(raw: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Some)
}

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp (UTC date), or text starting
/// with `YYYY-MM-DD`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        })
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(T::from))
}

/// Prices travel as text; text or numbers are accepted
mod price_text {
    use super::{parse_price, TextOrNumber};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match price {
            Some(price) => serializer.serialize_str(&price.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    /// Unreadable prices decode as `None` rather than failing the whole list
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        let raw = match Option::<TextOrNumber>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(TextOrNumber::Text(text)) => text,
            Some(TextOrNumber::Number(number)) => number.to_string(),
        };
        Ok(parse_price(&raw).ok().flatten())
    }
}

mod calendar_date {
    use super::parse_calendar_date;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .as_deref()
            .and_then(parse_calendar_date))
    }
}
