//! Turns raw visitor-log records into display-ready ones.
//!
//! Nothing in here fails: missing fields read as empty strings and a
//! timestamp that cannot be reconstructed is passed through as-is.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Visitee name used by the logs for the President.
const POTUS: &str = "Potus";

/// Replacement shown for [`POTUS`].
const THE_PRESIDENT: &str = "The President";

/// Visitee last name the logs use when there is no distinct last name.
const NO_LAST_NAME: &str = "And";

/// A visit record as returned by the visitor-log source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVisitRecord {
    /// Visitor given name.
    #[serde(default)]
    pub namefirst: Option<String>,
    /// Visitor middle initial.
    #[serde(default)]
    pub namemid: Option<String>,
    /// Visitor family name.
    #[serde(default)]
    pub namelast: Option<String>,
    /// Given name of the person visited.
    #[serde(default)]
    pub visitee_namefirst: Option<String>,
    /// Family name of the person visited.
    #[serde(default)]
    pub visitee_namelast: Option<String>,
    /// Free-text description of the visit.
    #[serde(default)]
    pub description: Option<String>,
    /// Last entry timestamp, `M/D/YY[ H:MM]`.
    #[serde(default)]
    pub lastentrydate: Option<String>,
}

/// A visit record ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedVisitRecord {
    /// Composed visitor name.
    pub visitor_name: String,
    /// Composed visitee name, with sentinel values relabeled.
    pub visited_name: String,
    /// Lower-cased description.
    pub description: String,
    /// Reconstructed last entry date, or the raw value if it did not parse.
    pub lastentry_date: String,
}

/// Record normalizer holding the compiled timestamp pattern.
#[derive(Clone, Debug)]
pub struct RecordNormalizer {
    date_pattern: Regex,
}

impl RecordNormalizer {
    /// Create a new normalizer.
    ///
    /// # Errors
    /// Returns an error if the timestamp pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Numbers are not zero padded, time of day is optional
            date_pattern: Regex::new(
                r"^(?P<month>\d+)/(?P<day>\d+)/(?P<year>\d+)(?: (?P<hour>\d+):(?P<minute>\d+))?",
            )?,
        })
    }

    /// Normalize every record, preserving order.
    #[must_use]
    pub fn normalize_all(&self, records: &[RawVisitRecord]) -> Vec<NormalizedVisitRecord> {
        records.iter().map(|record| self.normalize(record)).collect()
    }

    /// Normalize one record.
    #[must_use]
    pub fn normalize(&self, record: &RawVisitRecord) -> NormalizedVisitRecord {
        let raw_date = field(&record.lastentrydate);
        let lastentry_date = self.reconstruct_date(raw_date).unwrap_or_else(|| {
            tracing::debug!("Keeping unparsed last entry date: {raw_date:?}");
            raw_date.to_string()
        });

        NormalizedVisitRecord {
            visitor_name: visitor_name(
                field(&record.namefirst),
                field(&record.namemid),
                field(&record.namelast),
            ),
            visited_name: visited_name(
                field(&record.visitee_namefirst),
                field(&record.visitee_namelast),
            ),
            description: field(&record.description).to_lowercase(),
            lastentry_date,
        }
    }

    /// Rebuild `M/D/YY[ H:MM]` as `M-D-YYYY[ H:MM AM|PM]`.
    ///
    /// Years below 2000 get 2000 added, so two-digit years land in
    /// 2000-2099. A four-digit year before 2000 is shifted too.
    /// Returns `None` when the text does not match or names an impossible
    /// date or time.
    #[must_use]
    pub fn reconstruct_date(&self, raw: &str) -> Option<String> {
        let caps = self.date_pattern.captures(raw)?;

        let month: u32 = caps.name("month")?.as_str().parse().ok()?;
        let day: u32 = caps.name("day")?.as_str().parse().ok()?;
        let mut year: i32 = caps.name("year")?.as_str().parse().ok()?;
        if year < 2000 {
            year += 2000;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        match (caps.name("hour"), caps.name("minute")) {
            (Some(hour), Some(minute)) => {
                let at = date.and_hms_opt(
                    hour.as_str().parse().ok()?,
                    minute.as_str().parse().ok()?,
                    0,
                )?;
                Some(at.format("%-m-%-d-%Y %-I:%M %p").to_string())
            }
            _ => Some(date.format("%-m-%-d-%Y").to_string()),
        }
    }
}

/// Visitor display name: `First [M.] Last`.
#[must_use]
pub fn visitor_name(first: &str, middle: &str, last: &str) -> String {
    let mut name = capwords(first);
    if !middle.is_empty() {
        name.push(' ');
        name.push_str(middle);
        name.push('.');
    }
    name.push(' ');
    name.push_str(&capwords(last));
    name
}

/// Visitee display name, dropping the `And` artifact and relabeling POTUS.
#[must_use]
pub fn visited_name(first: &str, last: &str) -> String {
    let mut name = capwords(first);
    let last = capwords(last);
    if last != NO_LAST_NAME {
        name.push(' ');
        name.push_str(&last);
    }

    if name.trim().eq_ignore_ascii_case(POTUS) {
        return THE_PRESIDENT.to_string();
    }
    name
}

/// Capitalize each whitespace-separated word and join with single spaces.
#[must_use]
pub fn capwords(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character and lower-case the rest.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
