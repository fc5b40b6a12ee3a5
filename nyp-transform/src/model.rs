//! Typed records for the NYP performance-history archive and the edge tables
//! derived from it
//!
//! Archive fields are optional in practice. Every field carries a default
//! so that absent or `null` values decode to an empty list or `None` instead
//! of failing the record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Work identifier used when a work carries no `ID`
pub const UNKNOWN_WORK_ID: &str = "N/A";

/// Interval marker for non-musical placeholders
pub const INTERMISSION: &str = "Intermission";

/// One concert program
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProgramRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub concerts: Vec<Concert>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub works: Vec<WorkRecord>,
}

impl ProgramRecord {
    /// Representative date of the program
    ///
    /// Only the first concert counts. A timestamp is cut at the first `T`;
    /// an empty result means the program has no usable date.
    pub fn concert_date(&self) -> Option<&str> {
        let raw = self.concerts.first()?.date.as_deref()?;
        let date = raw.split('T').next().unwrap_or(raw);
        if date.is_empty() {
            None
        } else {
            Some(date)
        }
    }
}

/// One performance of a program
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Concert {
    #[serde(rename = "Date", alias = "date", default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
}

/// One musical work within a program
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkRecord {
    #[serde(rename = "ID", alias = "id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// `"Intermission"` marks a placeholder entry
    #[serde(rename = "interval", default, deserialize_with = "lenient_string")]
    pub interval_kind: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub soloists: Vec<Soloist>,
}

impl WorkRecord {
    pub fn is_intermission(&self) -> bool {
        self.interval_kind.as_deref() == Some(INTERMISSION)
    }

    /// Identifier, or [`UNKNOWN_WORK_ID`] when absent
    pub fn work_id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_WORK_ID)
    }

    /// Trimmed, non-empty soloist names in listing order (duplicates kept)
    pub fn soloist_names(&self) -> Vec<&str> {
        self.soloists
            .iter()
            .filter_map(|s| s.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Performer credited on a work
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Soloist {
    #[serde(rename = "soloistName", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// One co-appearance of two soloists on a work
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RawEdgeObservation {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "WorkID")]
    pub work_id: String,
}

/// Weighted collaboration edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AggregatedEdge {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Weight")]
    pub weight: u64,
}

impl AggregatedEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// `null` decodes like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through, numbers keep their JSON text, anything else is `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn program(value: Value) -> ProgramRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_concert_date_truncates_timestamp() {
        let p = program(json!({"concerts": [{"Date": "2020-01-05T00:00:00Z"}]}));
        assert_eq!(p.concert_date(), Some("2020-01-05"));
    }

    #[test]
    fn test_concert_date_without_time_part() {
        let p = program(json!({"concerts": [{"Date": "1842-12-07"}]}));
        assert_eq!(p.concert_date(), Some("1842-12-07"));
    }

    #[test]
    fn test_only_first_concert_counts() {
        let p = program(json!({"concerts": [{"Venue": "Hall"}, {"Date": "1900-01-01T00:00:00Z"}]}));
        assert_eq!(p.concert_date(), None);
    }

    #[test]
    fn test_unusable_dates() {
        assert_eq!(program(json!({})).concert_date(), None);
        assert_eq!(program(json!({"concerts": []})).concert_date(), None);
        assert_eq!(program(json!({"concerts": [{"Date": ""}]})).concert_date(), None);
        assert_eq!(program(json!({"concerts": [{"Date": "T10:00"}]})).concert_date(), None);
        assert_eq!(program(json!({"concerts": [{"Date": null}]})).concert_date(), None);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let p = program(json!({"concerts": null, "works": [{"soloists": null}]}));
        assert!(p.concerts.is_empty());
        assert_eq!(p.works.len(), 1);
        assert!(p.works[0].soloists.is_empty());
        assert_eq!(p.works[0].work_id(), UNKNOWN_WORK_ID);
        assert!(!p.works[0].is_intermission());
    }

    #[test]
    fn test_numeric_id_kept_as_text() {
        let p = program(json!({"works": [{"ID": 52446}]}));
        assert_eq!(p.works[0].work_id(), "52446");
    }

    #[test]
    fn test_intermission_detection() {
        let p = program(json!({"works": [{"interval": "Intermission"}, {"interval": "Pause"}]}));
        assert!(p.works[0].is_intermission());
        assert!(!p.works[1].is_intermission());
    }

    #[test]
    fn test_soloist_names_trimmed_and_filtered() {
        let p = program(json!({"works": [{"soloists": [
            {"soloistName": "  Alice "},
            {"soloistRoles": "Piano"},
            {"soloistName": ""},
            {"soloistName": "   "},
            {"soloistName": "Bob"},
            {"soloistName": "Alice"}
        ]}]}));
        assert_eq!(p.works[0].soloist_names(), vec!["Alice", "Bob", "Alice"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let p = program(json!({
            "id": "38e072a7-8fc9-4f9a-8eac-3957905c0002",
            "programID": "3853",
            "orchestra": "New York Philharmonic",
            "season": "1842-43",
            "concerts": [{"eventType": "Subscription Season", "Date": "1842-12-07T05:00:00Z", "Venue": "Apollo Rooms"}],
            "works": [{"ID": "52446*", "composerName": "Beethoven", "conductorName": "Hill, Ureli Corelli", "soloists": []}]
        }));
        assert_eq!(p.concert_date(), Some("1842-12-07"));
        assert_eq!(p.works[0].work_id(), "52446*");
    }
}
