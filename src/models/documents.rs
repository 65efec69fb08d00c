use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::core::{format_relative_time, validate_not_blank, validate_title};
use crate::models::users::{Role, User};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Public,
    Department,
    Private,
}

impl Default for AccessType {
    fn default() -> Self {
        Self::Department
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Public,
    Internal,
    Confidential,
    HighlyConfidential,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Confidential => "confidential",
            Self::HighlyConfidential => "highly_confidential",
        }
    }
}

impl std::str::FromStr for SecurityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "confidential" => Ok(Self::Confidential),
            "highly_confidential" => Ok(Self::HighlyConfidential),
            other => Err(format!("Invalid security level: {}", other)),
        }
    }
}

impl std::str::FromStr for AccessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "department" => Ok(Self::Department),
            "private" => Ok(Self::Private),
            other => Err(format!("Invalid access type: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub department: String,
    pub file_type: String,
    pub file_size: u64,
    pub tags: Vec<String>,
    pub collaborators: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_feedback: Option<String>,
    pub access_type: AccessType,
    pub security_level: Option<SecurityLevel>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notify_all_after_approval: bool,
}

impl Document {
    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.map_or(false, |expiry| expiry < now)
    }

    /// Rendering hint for the content pane. Never used to refuse a request.
    pub fn content_visible_to(&self, viewer: &User) -> bool {
        match (viewer.role, self.security_level) {
            (Role::Admin, _) => true,
            (_, None | Some(SecurityLevel::Public) | Some(SecurityLevel::Internal)) => true,
            (Role::Manager, Some(SecurityLevel::Confidential)) => true,
            _ => false,
        }
    }
}

/// One document in an upload batch. Anything left out gets filled in on insert.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default)]
pub struct NewDocument {
    pub id: Option<String>,
    #[validate(custom = "validate_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub department: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub collaborators: Vec<String>,
    pub uploaded_by: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub access_type: AccessType,
    pub security_level: Option<SecurityLevel>,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notify_all_after_approval: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UploadBatch {
    #[validate(length(min = 1, max = 50))]
    pub documents: Vec<NewDocument>,
}

// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, Default)]
pub struct DocumentPatch {
    #[validate(custom = "validate_title")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub department: Option<String>,
    pub access_type: Option<AccessType>,
    #[serde(default, deserialize_with = "double_option")]
    pub security_level: Option<Option<SecurityLevel>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<DateTime<Utc>>>,
    pub notify_all_after_approval: Option<bool>,
    /// Comma separated, like the tag input box.
    pub add_tags: Option<String>,
    #[serde(default)]
    pub remove_tags: Vec<String>,
    #[serde(default)]
    pub add_collaborators: Vec<String>,
    #[serde(default)]
    pub remove_collaborators: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectRequest {
    #[validate(custom = "validate_not_blank")]
    pub feedback: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkRequest {
    #[validate(length(min = 1))]
    pub document_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkRejectRequest {
    #[validate(length(min = 1))]
    pub document_ids: Vec<String>,
    #[validate(custom = "validate_not_blank")]
    pub feedback: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BulkOutcome {
    pub affected: usize,
    pub notified: usize,
    pub missing_ids: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NotificationOutcome {
    pub documents: usize,
    pub recipients: Vec<String>,
    pub missing_ids: Vec<String>,
}

/// A document as one viewer sees it in a listing.
#[derive(Debug, Serialize, Clone)]
pub struct DocumentCard {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub department: String,
    pub file_type: String,
    pub file_size: u64,
    pub tags: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_relative: String,
    pub last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    pub access_type: AccessType,
    pub security_level: Option<SecurityLevel>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub can_approve: bool,
    pub can_delete: bool,
}

impl DocumentCard {
    pub fn project(document: &Document, viewer: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            description: document.description.clone(),
            doc_type: document.doc_type.clone(),
            department: document.department.clone(),
            file_type: document.file_type.clone(),
            file_size: document.file_size,
            tags: document.tags.clone(),
            uploaded_by: document.uploaded_by.clone(),
            uploaded_at: document.uploaded_at,
            uploaded_relative: format_relative_time(document.uploaded_at, now),
            last_modified: document.last_modified,
            approval_status: (!viewer.is_employee()).then_some(document.approval_status),
            access_type: document.access_type,
            security_level: document.security_level,
            expiry_date: document.expiry_date,
            is_expired: document.is_expired(now),
            can_approve: !viewer.is_employee() && document.is_pending(),
            can_delete: viewer.is_admin(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub card: DocumentCard,
    pub collaborators: Vec<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_feedback: Option<String>,
    pub notify_all_after_approval: bool,
    pub can_view_content: bool,
    pub show_history: bool,
}

impl DocumentDetail {
    pub fn project(document: &Document, viewer: &User, now: DateTime<Utc>) -> Self {
        Self {
            card: DocumentCard::project(document, viewer, now),
            collaborators: document.collaborators.clone(),
            approved_by: document.approved_by.clone(),
            approved_at: document.approved_at,
            rejection_feedback: document.rejection_feedback.clone(),
            notify_all_after_approval: document.notify_all_after_approval,
            can_view_content: document.content_visible_to(viewer),
            show_history: viewer.is_admin(),
        }
    }
}
