use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;
use validator::ValidationError;

pub const MAX_TITLE_GRAPHEMES: usize = 200;

pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// "Just now", "5 hours ago", "2 days ago", "3 weeks ago".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();

    fn plural(count: i64, unit: &str) -> String {
        format!("{} {}{} ago", count, unit, if count > 1 { "s" } else { "" })
    }

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        plural(hours, "hour")
    } else if hours < 168 {
        plural(hours / 24, "day")
    } else {
        plural(hours / 168, "week")
    }
}

/// Whole days elapsed between `then` and `now`, rounded down.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// Splits the comma separated tag input, dropping blanks and repeats.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Lower-case extension of an uploaded file name, or an empty string.
pub fn file_type_from_name(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(validation_error("blank", "Title is required"));
    }
    if trimmed.graphemes(true).count() > MAX_TITLE_GRAPHEMES {
        return Err(validation_error("too_long", "Title is too long"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "Value must not be blank"));
    }
    Ok(())
}

pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value.chars().skip(1).all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(validation_error("color", "Color must look like #RRGGBB"))
    }
}
