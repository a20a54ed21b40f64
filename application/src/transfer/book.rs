/// Book fields handed down from the HTTP layer. On the update path an
/// empty string means "leave the stored value unchanged".
#[derive(Debug, Clone, Default)]
pub struct CreateOrUpdateBookDto {
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Result of `create_or_update`: either a new row was inserted, carrying
/// the engine-assigned id, or an existing row was rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(i64),
    Updated,
}
