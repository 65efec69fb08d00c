pub mod acknowledgements;
pub mod audit;
pub mod departments;
pub mod documents;
mod store;
pub mod users;

pub use store::DocumentStore;
pub use users::Directory;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Document {0} was not found")]
    DocumentNotFound(String),
    #[error("A document with id {0} already exists")]
    DuplicateDocument(String),
    #[error("Department {0} already exists")]
    DuplicateDepartment(String),
    #[error("Unknown collaborator: {0}")]
    UnknownCollaborator(String),
    #[error("Department name must not be blank")]
    BlankDepartmentName,
}
