use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Pipeline stage of a lead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "lead_status")]
pub enum LeadStatus {
    #[default]
    Pending,
    Interested,
    Active,
    Success,
    Cancel,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::Pending,
        LeadStatus::Interested,
        LeadStatus::Active,
        LeadStatus::Success,
        LeadStatus::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "Pending",
            LeadStatus::Interested => "Interested",
            LeadStatus::Active => "Active",
            LeadStatus::Success => "Success",
            LeadStatus::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown lead status: {}", s))
    }
}

/// Lead row joined with the assignee and creator usernames.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Lead {
    #[serde(rename = "LeadID")]
    pub id: Uuid,
    pub name: String,
    pub contact_info: String,
    pub status: LeadStatus,
    pub notes: Option<String>,
    #[serde(rename = "AssignedUserID")]
    pub assigned_user_id: Option<Uuid>,
    #[serde(rename = "CreatedByID")]
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
}

impl Lead {
    /// Sales users only see leads they own or created.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.assigned_user_id == Some(user_id) || self.created_by_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(assigned: Option<Uuid>, creator: Uuid) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: "Bob Co".into(),
            contact_info: "555-0100".into(),
            status: LeadStatus::default(),
            notes: None,
            assigned_user_id: assigned,
            created_by_id: creator,
            created_at: Utc::now(),
            assigned_to: None,
            created_by: None,
        }
    }

    #[test]
    fn status_set_is_closed() {
        assert_eq!("Active".parse::<LeadStatus>(), Ok(LeadStatus::Active));
        assert!("Won".parse::<LeadStatus>().is_err());
        assert!(serde_json::from_str::<LeadStatus>("\"Lost\"").is_err());
        assert_eq!(LeadStatus::default(), LeadStatus::Pending);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let value = serde_json::to_value(lead(None, Uuid::new_v4())).unwrap();
        assert_eq!(value["Status"], "Pending");
        assert_eq!(value["ContactInfo"], "555-0100");
        assert!(value["AssignedTo"].is_null());
        assert!(value.get("LeadID").is_some());
        assert!(value.get("AssignedUserID").is_some());
    }

    #[test]
    fn visibility_covers_assignee_and_creator() {
        let owner = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let l = lead(Some(owner), creator);
        assert!(l.is_visible_to(owner));
        assert!(l.is_visible_to(creator));
        assert!(!l.is_visible_to(stranger));
    }
}
