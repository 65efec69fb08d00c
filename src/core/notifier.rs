use crate::core::config::NotificationConfig;
use crate::models::documents::Document;
use crate::models::users::{Role, User};

/// Stands in for mail delivery: every notification becomes a log event.
#[derive(Debug, Clone)]
pub struct Notifier {
    fallback_approver_email: String,
}

impl Notifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            fallback_approver_email: config.fallback_approver_email,
        }
    }

    /// First manager of the document's department, else the fallback address.
    pub fn approver_email_for(&self, document: &Document, directory: &[User]) -> String {
        directory
            .iter()
            .find(|u| u.role == Role::Manager && u.department == document.department)
            .map(|u| u.email.clone())
            .unwrap_or_else(|| self.fallback_approver_email.clone())
    }

    /// One recipient per document, in document order.
    pub fn request_approval(&self, documents: &[Document], directory: &[User], resend: bool) -> Vec<String> {
        let recipients: Vec<String> = documents
            .iter()
            .map(|doc| self.approver_email_for(doc, directory))
            .collect();

        tracing::info!(
            documents = documents.len(),
            recipients = ?recipients,
            resend,
            "approval notification sent"
        );

        recipients
    }

    pub fn notify_rejection(&self, document: &Document, actor: &User, feedback: &str) {
        tracing::info!(
            document_id = %document.id,
            title = %document.title,
            uploader = %document.uploaded_by,
            rejected_by = %actor.name,
            feedback,
            "rejection feedback sent to uploader"
        );
    }

    /// Announces approved documents flagged for an organisation-wide notice.
    pub fn broadcast_approval(&self, documents: &[&Document]) -> usize {
        if documents.is_empty() {
            return 0;
        }
        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        tracing::info!(
            documents = documents.len(),
            document_ids = ?ids,
            "approval broadcast sent to all employees"
        );
        documents.len()
    }

    /// Nudges users who have not accepted a document yet.
    pub fn remind_acknowledgement(&self, document_id: &str, title: &str, pending: &[User]) -> Vec<String> {
        let recipients: Vec<String> = pending.iter().map(|u| u.email.clone()).collect();
        if !recipients.is_empty() {
            tracing::info!(
                document_id,
                title,
                recipients = ?recipients,
                "acknowledgement reminder sent"
            );
        }
        recipients
    }
}
