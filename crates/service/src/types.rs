use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reply to the OAuth initiation call. Consumed immediately by handing the
/// URL to the operator's browser; nothing about it is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRequest {
    #[serde(rename = "authUrl")]
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub profile: Profile,
}

/// Identity bundle returned alongside the access token. The provider spells
/// the name fields either plainly or with its `localized` prefix; anything
/// else it sends is kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "firstName", alias = "localizedFirstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "localizedLastName", default)]
    pub last_name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Parameters for one start attempt. Built fresh every time; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct JobRequest {
    pub access_token: String,
    pub keyword: String,
    pub email: String,
    pub password: String,
}

impl JobRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.access_token.is_empty() {
            missing.push("access_token");
        }
        if self.keyword.is_empty() {
            missing.push("keyword");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        missing
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StartReply {
    pub started: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StopReply {
    pub stopped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_accepts_plain_field_names() {
        let profile: Profile = serde_json::from_str(r#"{"firstName":"A","lastName":"B"}"#)
            .expect("parse profile");
        assert_eq!(profile.first_name, "A");
        assert_eq!(profile.last_name, "B");
        assert_eq!(profile.display_name(), "A B");
    }

    #[test]
    fn profile_accepts_localized_field_names() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":"x1","localizedFirstName":"Ada","localizedLastName":"Lovelace"}"#,
        )
        .expect("parse profile");
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.last_name, "Lovelace");
        assert!(profile.extra.contains_key("id"));
    }

    #[test]
    fn job_request_reports_every_empty_field() {
        let request = JobRequest {
            access_token: "t1".to_string(),
            keyword: String::new(),
            email: "op@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(request.missing_fields(), vec!["keyword", "password"]);
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn job_request_serializes_wire_names() {
        let request = JobRequest {
            access_token: "t1".to_string(),
            keyword: "web development".to_string(),
            email: "op@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(value["access_token"], "t1");
        assert_eq!(value["keyword"], "web development");
    }
}
