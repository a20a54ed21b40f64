use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use application::transfer::CreateOrUpdateBookDto;

const TITLE_MAX: usize = 200;
const AUTHOR_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

/// Body for POST /books and PUT /books/:id. Fields absent from the JSON
/// decode as empty strings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateOrUpdateBookRequest {
    #[validate(custom = "validate_title")]
    title: String,
    #[validate(custom = "validate_author")]
    author: String,
    #[validate(custom = "validate_description")]
    description: String,
}

impl CreateOrUpdateBookRequest {
    /// Create-path validation; update bodies are not field-validated.
    pub fn validate_for_create(&self) -> Result<(), String> {
        self.validate().map_err(|errors| validation_messages(&errors))
    }

    pub fn into_dto(self) -> CreateOrUpdateBookDto {
        CreateOrUpdateBookDto {
            title: self.title,
            author: self.author,
            description: self.description,
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    required_with_max(title, TITLE_MAX)
}

fn validate_author(author: &str) -> Result<(), ValidationError> {
    required_with_max(author, AUTHOR_MAX)
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ValidationError::new("max"));
    }
    Ok(())
}

fn required_with_max(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new("max"));
    }
    Ok(())
}

/// `"<Field> failed on '<rule>'"` per violation, fields in declaration
/// order, joined with `"; "`.
fn validation_messages(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut messages = Vec::new();
    for field in ["title", "author", "description"] {
        if let Some(list) = field_errors.get(field) {
            for error in list.iter() {
                messages.push(format!("{} failed on '{}'", field_label(field), error.code));
            }
        }
    }
    messages.join("; ")
}

fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Query for GET /books. Values that are missing, unparseable, or out of
/// range fall back instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetAllRequest {
    page: Option<String>,
    limit: Option<String>,
}

impl GetAllRequest {
    pub fn page(&self) -> i64 {
        match parsed(&self.page) {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        }
    }

    /// Values below 1 reset to the default; values above 100 clamp to 100.
    pub fn limit(&self) -> i64 {
        match parsed(&self.limit) {
            Some(limit) if limit > MAX_LIMIT => MAX_LIMIT,
            Some(limit) if limit >= 1 => limit,
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

fn parsed(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod test {
    use super::{CreateOrUpdateBookRequest, GetAllRequest};

    fn query(page: Option<&str>, limit: Option<&str>) -> GetAllRequest {
        GetAllRequest {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    fn body(title: &str, author: &str, description: &str) -> CreateOrUpdateBookRequest {
        CreateOrUpdateBookRequest {
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let req = query(None, None);
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn unparseable_params_fall_back_to_defaults() {
        let req = query(Some("abc"), Some("abc"));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn page_below_one_resets() {
        assert_eq!(query(Some("0"), None).page(), 1);
        assert_eq!(query(Some("-3"), None).page(), 1);
    }

    #[test]
    fn limit_below_one_resets_to_default() {
        assert_eq!(query(None, Some("0")).limit(), 10);
        assert_eq!(query(None, Some("-1")).limit(), 10);
    }

    #[test]
    fn limit_above_hundred_clamps() {
        assert_eq!(query(None, Some("101")).limit(), 100);
        assert_eq!(query(None, Some("100")).limit(), 100);
        assert_eq!(query(None, Some("1")).limit(), 1);
    }

    #[test]
    fn offset_is_zero_based_page_times_limit() {
        assert_eq!(query(Some("3"), Some("10")).offset(), 20);
        assert_eq!(query(Some("2"), Some("55")).offset(), 55);
    }

    #[test]
    fn empty_title_fails_on_required() {
        let error = body("", "JK Rowling", "").validate_for_create().unwrap_err();
        assert_eq!(error, "Title failed on 'required'");
    }

    #[test]
    fn violations_list_every_field_in_order() {
        let error = body("", "", "").validate_for_create().unwrap_err();
        assert_eq!(error, "Title failed on 'required'; Author failed on 'required'");
    }

    #[test]
    fn over_length_fields_fail_on_max() {
        let error = body(&"a".repeat(201), "JK Rowling", "")
            .validate_for_create()
            .unwrap_err();
        assert_eq!(error, "Title failed on 'max'");

        let error = body("Harry Potter", &"a".repeat(101), "")
            .validate_for_create()
            .unwrap_err();
        assert_eq!(error, "Author failed on 'max'");

        let error = body("Harry Potter", "JK Rowling", &"a".repeat(501))
            .validate_for_create()
            .unwrap_err();
        assert_eq!(error, "Description failed on 'max'");
    }

    #[test]
    fn boundary_lengths_pass() {
        let req = body(&"a".repeat(200), &"a".repeat(100), &"a".repeat(500));
        assert!(req.validate_for_create().is_ok());
    }

    #[test]
    fn empty_description_passes() {
        assert!(body("Harry Potter", "JK Rowling", "").validate_for_create().is_ok());
    }

    #[test]
    fn absent_body_fields_decode_as_empty() {
        let req: CreateOrUpdateBookRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.author.is_empty());
        assert!(req.description.is_empty());
    }
}
