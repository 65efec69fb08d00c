use super::{DocumentStore, StoreError};
use crate::core::generate_id;
use crate::models::departments::Department;
use crate::models::users::User;

/// Known departments with their live document counts.
pub async fn fetch_departments(store: &DocumentStore) -> Vec<Department> {
    store
        .with_snapshot(|documents, departments| {
            departments
                .iter()
                .map(|dept| Department {
                    document_count: documents.iter().filter(|d| d.department == dept.name).count(),
                    ..dept.clone()
                })
                .collect()
        })
        .await
}

pub async fn insert_department(
    store: &DocumentStore,
    name: &str,
    color: &str,
    actor: &User,
) -> Result<Department, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::BlankDepartmentName);
    }

    let mut state = store.write().await;
    let folded = name.to_lowercase();
    if state
        .departments
        .iter()
        .any(|d| d.name.to_lowercase() == folded)
    {
        return Err(StoreError::DuplicateDepartment(name.to_string()));
    }

    let department = Department {
        id: generate_id(),
        name: name.to_string(),
        color: color.to_uppercase(),
        document_count: 0,
    };
    state.departments.push(department.clone());

    tracing::info!(department = %department.name, actor = %actor.name, "department added");
    Ok(department)
}
