use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Directory;
use crate::core::generate_id;
use crate::models::acknowledgements::Acknowledgement;
use crate::models::audit::{AuditAction, AuditEntry};
use crate::models::departments::Department;
use crate::models::documents::Document;

/// Process-local state of the service. Lost on restart.
#[derive(Debug)]
pub struct DocumentStore {
    directory: Directory,
    state: RwLock<StoreState>,
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    /// Newest uploads first.
    pub(crate) documents: Vec<Document>,
    pub(crate) departments: Vec<Department>,
    pub(crate) audit: Vec<AuditEntry>,
    pub(crate) acknowledgements: Vec<Acknowledgement>,
}

impl StoreState {
    pub(crate) fn position(&self, document_id: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.id == document_id)
    }

    pub(crate) fn record(
        &mut self,
        document_id: &str,
        action: AuditAction,
        actor: &str,
        at: DateTime<Utc>,
        details: Option<String>,
    ) {
        self.audit.push(AuditEntry {
            id: generate_id(),
            document_id: document_id.to_string(),
            action,
            actor: actor.to_string(),
            at,
            details,
        });
    }
}

impl DocumentStore {
    pub fn new(directory: Directory, departments: Vec<Department>) -> Self {
        Self::with_documents(directory, departments, Vec::new())
    }

    pub fn with_documents(
        directory: Directory,
        departments: Vec<Department>,
        documents: Vec<Document>,
    ) -> Self {
        Self {
            directory,
            state: RwLock::new(StoreState {
                documents,
                departments,
                audit: Vec::new(),
                acknowledgements: Vec::new(),
            }),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().await
    }

    /// Runs `f` against the current documents and departments under one read lock.
    pub async fn with_snapshot<R>(&self, f: impl FnOnce(&[Document], &[Department]) -> R) -> R {
        let state = self.read().await;
        f(&state.documents, &state.departments)
    }
}
