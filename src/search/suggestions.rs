use crate::models::departments::Department;
use crate::models::documents::Document;
use crate::models::search::{Suggestion, SuggestionKind};

const MAX_DOCUMENTS: usize = 5;
const MAX_TAGS: usize = 4;
const MAX_DEPARTMENTS: usize = 3;
const MAX_SUGGESTIONS: usize = 8;

/// Relevance of a document for the typed text; 0 means no match.
pub fn score_document(document: &Document, query: &str) -> u32 {
    let title = document.title.to_lowercase();
    let mut score = 0;
    if title.contains(query) {
        score += 10;
    }
    if document.description.to_lowercase().contains(query) {
        score += 5;
    }
    if document.tags.iter().any(|t| t.to_lowercase().contains(query)) {
        score += 7;
    }
    if title.starts_with(query) {
        score += 5;
    }
    score
}

/// Type-ahead suggestions: best documents, then tags, then departments.
pub fn suggest(documents: &[Document], departments: &[Department], query: &str) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &Document)> = documents
        .iter()
        .map(|doc| (score_document(doc, &query), doc))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let document_suggestions = scored.into_iter().take(MAX_DOCUMENTS).map(|(_, doc)| Suggestion {
        id: format!("doc-{}", doc.id),
        text: doc.title.clone(),
        kind: SuggestionKind::Document,
        category: "Documents".to_string(),
        count: None,
        priority: 9,
    });

    let mut tags: Vec<&str> = Vec::new();
    for tag in documents.iter().flat_map(|d| d.tags.iter()) {
        if !tags.contains(&tag.as_str()) {
            tags.push(tag);
        }
    }
    let tag_suggestions = tags
        .into_iter()
        .filter(|tag| tag.to_lowercase().contains(&query))
        .take(MAX_TAGS)
        .map(|tag| Suggestion {
            id: format!("tag-{}", tag),
            text: tag.to_string(),
            kind: SuggestionKind::Tag,
            category: "Tags".to_string(),
            count: Some(documents.iter().filter(|d| d.tags.iter().any(|t| t == tag)).count()),
            priority: 8,
        });

    let department_suggestions = departments
        .iter()
        .filter(|dept| dept.name.to_lowercase().contains(&query))
        .take(MAX_DEPARTMENTS)
        .map(|dept| Suggestion {
            id: format!("dept-{}", dept.name),
            text: dept.name.clone(),
            kind: SuggestionKind::Department,
            category: "Departments".to_string(),
            count: Some(documents.iter().filter(|d| d.department == dept.name).count()),
            priority: 7,
        });

    let mut suggestions: Vec<Suggestion> = document_suggestions
        .chain(tag_suggestions)
        .chain(department_suggestions)
        .collect();
    suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
