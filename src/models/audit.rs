use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Uploaded,
    Viewed,
    Edited,
    Approved,
    Rejected,
    Deleted,
    ApprovalRequested,
    NotificationResent,
    Acknowledged,
    AcknowledgementReminded,
}

#[derive(Debug, Serialize, Clone)]
pub struct AuditEntry {
    pub id: String,
    pub document_id: String,
    pub action: AuditAction,
    pub actor: String,
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
