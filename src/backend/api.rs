//! JSON bodies exchanged with the hosted functions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::store::PumpkinRow;

/// Body of `validate-pumpkin`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitRequest {
    pub image_data: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<PumpkinRow>,
    /// Submissions left for this client after this one
    pub remaining: usize,
}

/// The part of a `validate-pumpkin` success body the app reads.
///
/// The stored row in `data` is left undecoded so a hosted table with extra
/// or nullable columns can't turn a stored pumpkin into a failed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub remaining: usize,
}

impl From<SubmitResponse> for SubmitReceipt {
    fn from(response: SubmitResponse) -> Self {
        Self {
            remaining: response.remaining,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// Make the pumpkin visible in the garden
    Approve,
    /// Delete the pumpkin
    Reject,
}

impl ModerationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

impl FromStr for ModerationAction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ModerationAction::Approve),
            "reject" => Ok(ModerationAction::Reject),
            _ => Err(ApiError::InvalidAction),
        }
    }
}

/// Body of `moderate-pumpkin`.
///
/// `action` stays a string so an unknown action is a rule rejection rather
/// than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModerationRequest {
    pub action: String,
    pub pumpkin_id: Option<i64>,
    pub admin_password: String,
}

impl ModerationRequest {
    pub fn new(action: ModerationAction, pumpkin_id: i64, admin_password: impl Into<String>) -> Self {
        Self {
            action: action.as_str().to_string(),
            pumpkin_id: Some(pumpkin_id),
            admin_password: admin_password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<PumpkinRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A pumpkin as the garden and the admin list see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: i64,
    pub img: String,
}

impl From<PumpkinRow> for GalleryItem {
    fn from(row: PumpkinRow) -> Self {
        Self { id: row.id, img: row.img }
    }
}

/// Where a request came from, as reported by the forwarding proxy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    /// Raw `x-forwarded-for` header
    pub forwarded_for: Option<String>,
    /// Raw `x-real-ip` header
    pub real_ip: Option<String>,
}

impl Origin {
    pub const UNKNOWN_IP: &'static str = "unknown";

    /// First forwarded address, then the real-ip header, then "unknown"
    pub fn client_ip(&self) -> String {
        let forwarded = self
            .forwarded_for
            .as_deref()
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        forwarded
            .or_else(|| self.real_ip.as_deref().map(str::trim).filter(|ip| !ip.is_empty()))
            .unwrap_or(Self::UNKNOWN_IP)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_uses_camel_case() {
        let json = serde_json::to_value(SubmitRequest {
            image_data: "data:image/png;base64,".into(),
            user_id: "0123456789".into(),
        })
        .unwrap();
        assert_eq!(json["imageData"], "data:image/png;base64,");
        assert_eq!(json["userId"], "0123456789");
    }

    #[test]
    fn test_receipt_ignores_row_columns() {
        let body = r#"{"success":true,"data":[{"id":7,"img":null,"visible":false,"extra":{"a":1}}],"remaining":3}"#;
        let receipt: SubmitReceipt = serde_json::from_str(body).unwrap();
        assert_eq!(receipt, SubmitReceipt { remaining: 3 });
        assert!(serde_json::from_str::<SubmitResponse>(body).is_err());
    }

    #[test]
    fn test_moderation_request_parses_missing_fields() {
        let request: ModerationRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(request.pumpkin_id, None);
        assert_eq!(request.admin_password, "");
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("approve".parse::<ModerationAction>().unwrap(), ModerationAction::Approve);
        assert_eq!("reject".parse::<ModerationAction>().unwrap(), ModerationAction::Reject);
        assert!(matches!("archive".parse::<ModerationAction>(), Err(ApiError::InvalidAction)));
    }

    #[test]
    fn test_client_ip_prefers_first_forwarded() {
        let origin = Origin {
            forwarded_for: Some("203.0.113.7, 10.0.0.1".into()),
            real_ip: Some("10.0.0.2".into()),
        };
        assert_eq!(origin.client_ip(), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back() {
        let origin = Origin {
            forwarded_for: None,
            real_ip: Some("10.0.0.2".into()),
        };
        assert_eq!(origin.client_ip(), "10.0.0.2");
        assert_eq!(Origin::default().client_ip(), "unknown");
    }
}
