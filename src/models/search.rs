use serde::{Deserialize, Serialize};

pub const ALL: &str = "All";

/// A filter value: the `All` wildcard or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => expected == value,
        }
    }
}

impl From<String> for Facet {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Facet::All
        } else {
            Facet::Only(trimmed.to_string())
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Facet::from(value.to_string())
    }
}

impl From<Facet> for String {
    fn from(facet: Facet) -> Self {
        match facet {
            Facet::All => ALL.to_string(),
            Facet::Only(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub department: Facet,
    #[serde(rename = "type", default)]
    pub doc_type: Facet,
    #[serde(default)]
    pub file_type: Facet,
    /// Accepted and echoed back, but it never excludes a document.
    #[serde(default)]
    pub date_range: Facet,
    /// Approval status in its wire spelling, e.g. `pending`.
    #[serde(default)]
    pub status: Facet,
    /// `internal` also admits documents that carry no level.
    #[serde(default)]
    pub security_level: Facet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Department,
    FileType,
    #[default]
    Date,
    Title,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub department: Facet,
    #[serde(rename = "type", default)]
    pub doc_type: Facet,
    #[serde(default)]
    pub file_type: Facet,
    #[serde(default)]
    pub date_range: Facet,
    #[serde(default)]
    pub status: Facet,
    #[serde(default)]
    pub security_level: Facet,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub bulk_mode: bool,
}

impl DocumentQuery {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            department: self.department.clone(),
            doc_type: self.doc_type.clone(),
            file_type: self.file_type.clone(),
            date_range: self.date_range.clone(),
            status: self.status.clone(),
            security_level: self.security_level.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Document,
    Tag,
    Department,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    pub kind: SuggestionKind,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub priority: u8,
}
