//! Twin profile and the persisted record built from it.
//!
//! The persisted document keeps one casing throughout: the partition field
//! is `countryId`, the same name the `save_twin_info` tool accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details of a Twin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone_number: String,
}

/// A stored Twin document.
///
/// `id` is the profile email and `country_id` is the partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinRecord {
    /// Unique id within the partition (the profile email).
    pub id: String,
    /// Partition key.
    pub country_id: String,
    /// Contact details.
    pub profile: TwinProfile,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub last_modified: DateTime<Utc>,
}

impl TwinRecord {
    /// Builds a record keyed by the profile email, stamped with `now`.
    pub fn new(profile: TwinProfile, country_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: profile.email.clone(),
            country_id: country_id.into(),
            profile,
            created_at: now,
            last_modified: now,
        }
    }

    /// Returns the partition key value.
    pub fn partition_key(&self) -> &str {
        &self.country_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> TwinProfile {
        TwinProfile {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            telephone_number: "+44-20-0000".into(),
        }
    }

    #[test]
    fn record_is_keyed_by_email() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let rec = TwinRecord::new(profile(), "UK", now);
        assert_eq!(rec.id, "ada@example.com");
        assert_eq!(rec.partition_key(), "UK");
        assert_eq!(rec.created_at, rec.last_modified);
    }

    #[test]
    fn record_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(TwinRecord::new(profile(), "UK", now)).unwrap();
        assert_eq!(json["countryId"], "UK");
        assert_eq!(json["profile"]["firstName"], "Ada");
        assert_eq!(json["profile"]["telephoneNumber"], "+44-20-0000");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("CountryID").is_none());
    }
}
