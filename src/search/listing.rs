use chrono::{DateTime, Utc};
use serde::Serialize;

use super::grouping::{group_by_department, DepartmentGroup};
use super::pipeline::{visible_documents, PipelineRequest};
use crate::models::departments::Department;
use crate::models::documents::{Document, DocumentCard};
use crate::models::pagination::{PaginationMeta, PaginationQuery};
use crate::models::users::Role;

/// Admins browse department folders; everyone else gets one flat list.
#[derive(Debug, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum DocumentListing {
    Grouped {
        total: usize,
        groups: Vec<DepartmentGroup<DocumentCard>>,
    },
    Flat {
        total: usize,
        documents: Vec<DocumentCard>,
    },
}

pub fn build_listing(
    documents: &[Document],
    departments: &[Department],
    request: &PipelineRequest<'_>,
    pagination: &PaginationQuery,
    now: DateTime<Utc>,
) -> (DocumentListing, Option<PaginationMeta>) {
    let visible = visible_documents(documents, request);
    let viewer = request.viewer;
    let total = visible.len();

    match viewer.role {
        Role::Admin => {
            let groups = group_by_department(&visible, departments)
                .into_iter()
                .map(|group| group.map(|doc| DocumentCard::project(doc, viewer, now)))
                .collect();
            (DocumentListing::Grouped { total, groups }, None)
        }
        Role::Manager | Role::Employee => {
            let documents = visible
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .map(|doc| DocumentCard::project(doc, viewer, now))
                .collect();
            let meta = PaginationMeta::new(pagination.page, pagination.per_page, total);
            (DocumentListing::Flat { total, documents }, Some(meta))
        }
    }
}
