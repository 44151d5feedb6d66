use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_ALERT_KEYWORD: &str = "Software Developer";
pub const DEFAULT_ALERT_LOCATION: &str = "India";

/// A daily job-alert subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSubscription {
    pub keyword: String,
    pub location: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl AlertSubscription {
    /// An email is required; blank keyword/location fall back to defaults.
    pub fn new(
        keyword: &str,
        location: &str,
        email: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        let or = |value: &str, default: &str| {
            let value = value.trim();
            let chosen = if value.is_empty() { default } else { value };
            chosen.to_string()
        };
        Ok(Self {
            keyword: or(keyword, DEFAULT_ALERT_KEYWORD),
            location: or(location, DEFAULT_ALERT_LOCATION),
            email: email.to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_email_required() {
        let err = AlertSubscription::new("Rust", "Pune", " ", noon()).unwrap_err();
        assert_eq!(err, ValidationError::MissingEmail);
    }

    #[test]
    fn test_defaults_for_blank_keyword_and_location() {
        let alert = AlertSubscription::new("", "  ", "dev@example.com", noon()).unwrap();
        assert_eq!(alert.keyword, DEFAULT_ALERT_KEYWORD);
        assert_eq!(alert.location, DEFAULT_ALERT_LOCATION);
    }

    #[test]
    fn test_created_at_serializes_as_rfc3339() {
        let alert = AlertSubscription::new("Data Scientist", "Mumbai", "a@b.co", noon()).unwrap();
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
        assert_eq!(json["keyword"], "Data Scientist");
    }
}
