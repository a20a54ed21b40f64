use serde::{Deserialize, Serialize};

/// Persisted book record. `id` is assigned by the database on insert and
/// never changes afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Book fields before the database has assigned an id.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
}
