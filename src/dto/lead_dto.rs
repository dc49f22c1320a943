use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::lead::LeadStatus;
use crate::utils::validation::non_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLeadPayload {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[validate(custom(function = "non_blank"))]
    pub contact_info: String,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "AssignedUserID")]
    pub assigned_user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLeadDetailsPayload {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[validate(custom(function = "non_blank"))]
    pub contact_info: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLeadStatusPayload {
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignLeadPayload {
    #[serde(default, rename = "AssignedUserID")]
    pub assigned_user_id: Option<String>,
}

impl AssignLeadPayload {
    pub fn assignee(&self) -> Result<Option<Uuid>> {
        parse_assignee(self.assigned_user_id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadResponse {
    pub message: String,
    pub lead_id: Uuid,
}

/// Lead payload handed to the service once the API boundary is done with it.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub contact_info: String,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub assigned_user_id: Option<Uuid>,
}

impl CreateLeadPayload {
    pub fn into_new_lead(self) -> Result<NewLead> {
        let assigned_user_id = parse_assignee(self.assigned_user_id.as_deref())?;
        Ok(NewLead {
            name: self.name.trim().to_string(),
            contact_info: self.contact_info.trim().to_string(),
            status: self.status.unwrap_or_default(),
            notes: normalize_notes(self.notes),
            assigned_user_id,
        })
    }
}

/// An absent or empty assignee means "unassigned".
pub fn parse_assignee(raw: Option<&str>) -> Result<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| Error::BadRequest(format!("Invalid AssignedUserID: {}", value))),
    }
}

pub fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_assignee_means_unassigned() {
        assert_eq!(parse_assignee(None).unwrap(), None);
        assert_eq!(parse_assignee(Some("")).unwrap(), None);
        assert_eq!(parse_assignee(Some("   ")).unwrap(), None);
        let id = Uuid::new_v4();
        assert_eq!(parse_assignee(Some(&id.to_string())).unwrap(), Some(id));
        assert!(matches!(parse_assignee(Some("42")), Err(Error::BadRequest(_))));
    }

    #[test]
    fn create_defaults_status_to_pending() {
        let payload: CreateLeadPayload =
            serde_json::from_str(r#"{"Name":"Bob Co","ContactInfo":"555-0100"}"#).unwrap();
        let lead = payload.into_new_lead().unwrap();
        assert_eq!(lead.status, LeadStatus::Pending);
        assert_eq!(lead.assigned_user_id, None);
        assert_eq!(lead.notes, None);
    }

    #[test]
    fn unknown_status_does_not_deserialize() {
        let parsed = serde_json::from_str::<UpdateLeadStatusPayload>(r#"{"Status":"Won"}"#);
        assert!(parsed.is_err());
        let parsed: UpdateLeadStatusPayload =
            serde_json::from_str(r#"{"Status":"Success"}"#).unwrap();
        assert_eq!(parsed.status, LeadStatus::Success);
    }

    #[test]
    fn assign_payload_accepts_null_and_empty() {
        let null: AssignLeadPayload = serde_json::from_str(r#"{"AssignedUserID":null}"#).unwrap();
        assert_eq!(null.assignee().unwrap(), None);
        let empty: AssignLeadPayload = serde_json::from_str(r#"{"AssignedUserID":""}"#).unwrap();
        assert_eq!(empty.assignee().unwrap(), None);
    }
}
