use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::validate_hex_color;

/// Color given to departments that only exist as a label on documents.
pub const FALLBACK_DEPARTMENT_COLOR: &str = "#6B7280";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub document_count: usize,
}

impl Department {
    /// Stand-in record for a department name that is not configured.
    pub fn fallback(name: &str, document_count: usize) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            color: FALLBACK_DEPARTMENT_COLOR.to_string(),
            document_count,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewDepartmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_hex_color")]
    pub color: String,
}
