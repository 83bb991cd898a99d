use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// POST, COMMENT, USER or MESSAGE
    #[validate(length(min = 1, max = 16))]
    pub entity_type: String,

    #[validate(length(min = 1, max = 64))]
    pub entity_id: String,

    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFlagRequest {
    /// PENDING, VALID or INVALID
    #[validate(length(min = 1, max = 16))]
    pub status: String,
}

/// `?status=` filter on the flag list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagFilterQuery {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_camel_case() {
        let request: ReportRequest = serde_json::from_str(
            r#"{"entityType":"POST","entityId":"abc","reason":"spam links"}"#,
        )
        .unwrap();
        assert_eq!(request.entity_type, "POST");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_report_request_rejects_empty_id() {
        let request = ReportRequest {
            entity_type: "POST".into(),
            entity_id: String::new(),
            reason: "spam".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("entity_id"));
    }
}
