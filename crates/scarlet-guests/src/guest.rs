//! Guest record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Host;

/// A single guest on the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    /// Unique, never reused identifier.
    pub id: u64,
    /// Trimmed display name.
    pub name: String,
    /// Host who invited this guest.
    pub invited_by: Host,
    /// Whether the guest has paid.
    pub is_paid: bool,
    /// Whether the guest confirmed attendance.
    pub is_confirmed: bool,
    /// When the record was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_shape() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap();
        let guest = GuestRecord {
            id: 7,
            name: "Ana Silva".into(),
            invited_by: Host::Diogo,
            is_paid: true,
            is_confirmed: false,
            created_at: at,
            updated_at: at,
        };

        let value = serde_json::to_value(&guest).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["invitedBy"], "Diogo");
        assert_eq!(value["isPaid"], true);
        assert_eq!(value["isConfirmed"], false);
        assert_eq!(value["createdAt"], "2026-03-01T18:30:00Z");
    }
}
