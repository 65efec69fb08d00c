use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::days_since;
use crate::models::documents::{AccessType, ApprovalStatus, Document};
use crate::models::users::User;

pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Serialize, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub departments: usize,
    pub recent_uploads: usize,
    pub recent_approvals: usize,
    pub my_department: usize,
    pub public: usize,
}

/// Dashboard counters over an already visible set of documents.
pub fn compute_stats(visible: &[&Document], viewer: &User, now: DateTime<Utc>) -> DocumentStats {
    let mut stats = DocumentStats {
        total: visible.len(),
        ..DocumentStats::default()
    };
    let mut departments: Vec<&str> = Vec::new();

    for doc in visible {
        match doc.approval_status {
            ApprovalStatus::Pending => stats.pending += 1,
            ApprovalStatus::Approved => stats.approved += 1,
            ApprovalStatus::Rejected => stats.rejected += 1,
        }
        if !departments.contains(&doc.department.as_str()) {
            departments.push(&doc.department);
        }
        if days_since(doc.uploaded_at, now) <= RECENT_WINDOW_DAYS {
            stats.recent_uploads += 1;
        }
        if doc.approval_status == ApprovalStatus::Approved
            && doc
                .approved_at
                .map_or(false, |at| days_since(at, now) <= RECENT_WINDOW_DAYS)
        {
            stats.recent_approvals += 1;
        }
        if doc.department == viewer.department {
            stats.my_department += 1;
        }
        if doc.access_type == AccessType::Public {
            stats.public += 1;
        }
    }

    stats.departments = departments.len();
    stats
}
