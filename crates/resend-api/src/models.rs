//! Request DTOs for the Resend HTTP API.
//!
//! Optional fields are skipped during serialization so an unset option never
//! reaches the wire as `null`. Field names follow the service's snake_case
//! JSON contract.

use serde::{Deserialize, Serialize};

/// Name/value pair attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key.
    pub name: String,
    /// Tag value; may itself contain `=`.
    pub value: String,
}

/// Body for `POST /emails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SendEmailRequest {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// HTML body.
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Plain text body.
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Carbon-copy recipients.
    pub cc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Blind carbon-copy recipients.
    pub bcc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Reply-to addresses.
    pub reply_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Scheduled delivery time (ISO 8601 or natural language).
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Custom tags.
    pub tags: Option<Vec<Tag>>,
}

/// Body for `PATCH /emails/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateEmailRequest {
    /// New scheduled delivery time.
    pub scheduled_at: String,
}

/// Body for `POST /domains`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDomainRequest {
    /// Domain name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Sending region (`us-east-1`, `eu-west-1`, `sa-east-1`).
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Track opens.
    pub open_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Track clicks.
    pub click_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// TLS mode (`enforced` or `opportunistic`).
    pub tls: Option<String>,
}

/// Body for `PATCH /domains/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Track opens.
    pub open_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Track clicks.
    pub click_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// TLS mode.
    pub tls: Option<String>,
}

/// Body for `POST /api-keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateApiKeyRequest {
    /// Display name for the key.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// `full_access` or `sending_access`.
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Restrict a sending key to a single domain.
    pub domain_id: Option<String>,
}

/// Body for `POST /audiences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAudienceRequest {
    /// Audience name.
    pub name: String,
}

/// Body for `POST /audiences/{audience_id}/contacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateContactRequest {
    /// Contact email address.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// First name.
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Last name.
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Subscription flag.
    pub unsubscribed: Option<bool>,
}

/// Body for `PATCH /audiences/{audience_id}/contacts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// First name.
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Last name.
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Subscription flag; `Some(false)` re-subscribes the contact.
    pub unsubscribed: Option<bool>,
}

/// Body for `POST /broadcasts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateBroadcastRequest {
    /// Target audience.
    pub audience_id: String,
    /// Sender address.
    pub from: String,
    /// Subject line.
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// HTML body.
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Plain text body.
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Internal broadcast name.
    pub name: Option<String>,
}

/// Body for `PATCH /broadcasts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateBroadcastRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Sender address.
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Subject line.
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// HTML body.
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Plain text body.
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Internal broadcast name.
    pub name: Option<String>,
}

/// Body for `POST /broadcasts/{id}/send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SendBroadcastRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Deliver later instead of immediately.
    pub scheduled_at: Option<String>,
}
