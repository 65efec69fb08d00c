use serde::Serialize;

use crate::models::departments::Department;
use crate::models::documents::Document;

#[derive(Debug, Serialize)]
pub struct DepartmentGroup<T> {
    pub department: Department,
    pub documents: Vec<T>,
}

/// Groups documents by department name. Groups appear in the order their
/// first document does; unconfigured names get a fallback record.
pub fn group_by_department<'d>(
    documents: &[&'d Document],
    departments: &[Department],
) -> Vec<DepartmentGroup<&'d Document>> {
    let mut groups: Vec<(String, Vec<&'d Document>)> = Vec::new();
    for &document in documents {
        match groups.iter_mut().find(|(name, _)| *name == document.department) {
            Some((_, members)) => members.push(document),
            None => groups.push((document.department.clone(), vec![document])),
        }
    }

    groups
        .into_iter()
        .map(|(name, members)| DepartmentGroup {
            department: departments
                .iter()
                .find(|d| d.name == name)
                .cloned()
                .unwrap_or_else(|| Department::fallback(&name, members.len())),
            documents: members,
        })
        .collect()
}

impl<T> DepartmentGroup<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> DepartmentGroup<U> {
        DepartmentGroup {
            department: self.department,
            documents: self.documents.into_iter().map(f).collect(),
        }
    }
}
