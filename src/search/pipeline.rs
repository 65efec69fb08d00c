use std::cmp::Ordering;

use crate::models::documents::{Document, SecurityLevel};
use crate::models::search::{Facet, SearchFilters, SortField, SortOrder};
use crate::models::users::{Role, User};

/// Everything that decides which documents a viewer sees, and in what order.
#[derive(Debug, Clone, Copy)]
pub struct PipelineRequest<'a> {
    pub viewer: &'a User,
    pub bulk_mode: bool,
    pub query: &'a str,
    pub filters: &'a SearchFilters,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Role gate, then query and facet matching, then a stable sort.
pub fn visible_documents<'d>(documents: &'d [Document], request: &PipelineRequest<'_>) -> Vec<&'d Document> {
    let pending_only = request.bulk_mode && request.viewer.role == Role::Manager;
    let query = request.query.to_lowercase();

    let mut visible: Vec<&Document> = documents
        .iter()
        .filter(|doc| !pending_only || doc.is_pending())
        .filter(|doc| matches_query(doc, &query) && matches_filters(doc, request.filters))
        .collect();

    sort_documents(&mut visible, request.sort_by, request.sort_order);
    visible
}

/// `query` must already be lower-cased. An empty query matches everything.
pub fn matches_query(document: &Document, query: &str) -> bool {
    query.is_empty()
        || document.title.to_lowercase().contains(query)
        || document.description.to_lowercase().contains(query)
        || document.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

pub fn matches_filters(document: &Document, filters: &SearchFilters) -> bool {
    // date_range never excludes anything
    filters.department.admits(&document.department)
        && filters.doc_type.admits(&document.doc_type)
        && filters.file_type.admits(&document.file_type)
        && filters.status.admits(document.approval_status.as_str())
        && matches_security_level(document, &filters.security_level)
}

// Accepts display spellings such as "Highly Confidential".
fn matches_security_level(document: &Document, facet: &Facet) -> bool {
    match facet {
        Facet::All => true,
        Facet::Only(raw) => match (raw.parse::<SecurityLevel>(), document.security_level) {
            (Ok(wanted), Some(level)) => wanted == level,
            (Ok(SecurityLevel::Internal), None) => true,
            _ => false,
        },
    }
}

pub fn sort_documents(documents: &mut [&Document], sort_by: SortField, sort_order: SortOrder) {
    documents.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Document, b: &Document, sort_by: SortField) -> Ordering {
    match sort_by {
        SortField::Department => compare_text(&a.department, &b.department),
        SortField::FileType => compare_text(&a.file_type, &b.file_type),
        SortField::Date => a.uploaded_at.cmp(&b.uploaded_at),
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Type => compare_text(&a.doc_type, &b.doc_type),
    }
}

/// Case-insensitive, with byte order breaking ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
