use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::validate_not_blank;
use crate::models::users::User;

/// A user's signed acceptance of a document. One per user and document.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Acknowledgement {
    pub document_id: String,
    pub user_id: String,
    pub user_name: String,
    pub acknowledged_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub signature: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AcknowledgeRequest {
    /// Captured signature data, kept as given.
    #[validate(custom = "validate_not_blank")]
    pub signature: String,
}

/// Who has accepted a document and which employees still have to.
#[derive(Debug, Serialize)]
pub struct AcceptanceStatus {
    pub document_id: String,
    pub title: String,
    pub accepted: Vec<Acknowledgement>,
    pub pending: Vec<User>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReminderOutcome {
    pub document_id: String,
    pub recipients: Vec<String>,
}
