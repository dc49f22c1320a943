use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::utils::validation::non_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTaskPayload {
    #[validate(custom(function = "non_blank"))]
    pub description: String,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
}

/// Accepts `null`, `""`, `YYYY-MM-DD` or an RFC 3339 timestamp.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid DueDate: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_formats() {
        let p: CreateTaskPayload =
            serde_json::from_str(r#"{"Description":"Call","DueDate":"2024-05-01"}"#).unwrap();
        assert_eq!(p.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));

        let p: CreateTaskPayload = serde_json::from_str(
            r#"{"Description":"Call","DueDate":"2024-05-01T09:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(p.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));

        let p: CreateTaskPayload =
            serde_json::from_str(r#"{"Description":"Call","DueDate":""}"#).unwrap();
        assert_eq!(p.due_date, None);

        let p: CreateTaskPayload = serde_json::from_str(r#"{"Description":"Call"}"#).unwrap();
        assert_eq!(p.due_date, None);

        assert!(serde_json::from_str::<CreateTaskPayload>(
            r#"{"Description":"Call","DueDate":"tomorrow"}"#
        )
        .is_err());
    }
}
