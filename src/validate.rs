use crate::errors::ApiError;

/// Characters a category path segment may contain. Commas survive so several
/// categories can be passed through as one opaque string, and percent/space
/// survive URL-encoded spaces.
fn is_allowed_category_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | '_' | ' ' | '%' | '-')
}

/// Check a category path segment before any upstream call is made.
pub fn validate_category(category: &str) -> Result<(), ApiError> {
    if category.is_empty() {
        return Err(ApiError::InvalidInput("category must not be empty".into()));
    }
    if !category.chars().all(is_allowed_category_char) {
        return Err(ApiError::InvalidInput(
            "category contains unsupported characters".into(),
        ));
    }
    Ok(())
}

/// Check the `query` search parameter. Returns the trimmed term that goes
/// upstream.
pub fn validate_query(query: Option<&str>) -> Result<String, ApiError> {
    let raw = query.ok_or(ApiError::MissingParameter)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::EmptyParameter);
    }
    Ok(trimmed.to_string())
}
