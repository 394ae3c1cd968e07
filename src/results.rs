use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

/// One promotional brochure as listed on a shop page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrochureRecord {
    /// Brochure title as shown on the listing
    pub title: String,

    /// Absolute URL of the brochure thumbnail
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Url,

    /// Display name of the shop the brochure belongs to
    pub shop_name: String,

    /// First day the brochure is valid
    pub valid_from: NaiveDate,

    /// Last day the brochure is valid
    pub valid_to: NaiveDate,

    /// Local wall-clock time of extraction, whole seconds
    #[serde(rename = "parsed_time", with = "parsed_time_format")]
    pub parsed_at: NaiveDateTime,
}

impl BrochureRecord {
    /// Create a new brochure record
    pub fn new(
        title: String,
        thumbnail_url: Url,
        shop_name: String,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
        parsed_at: NaiveDateTime,
    ) -> Self {
        Self {
            title,
            thumbnail_url,
            shop_name,
            valid_from,
            valid_to,
            parsed_at,
        }
    }
}

/// A shop link taken from the catalog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    /// Link target as found in the markup, usually site-relative
    pub relative_url: String,

    /// Display text of the link
    pub name: String,
}

impl ShopEntry {
    pub fn new(relative_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            relative_url: relative_url.into(),
            name: name.into(),
        }
    }
}

/// Outcome of parsing a validity text; both ends absent when unparseable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A range with neither end set
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Both ends, if the range is usable for a record
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.from?, self.to?))
    }
}

mod parsed_time_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
