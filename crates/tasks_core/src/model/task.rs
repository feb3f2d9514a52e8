use time::OffsetDateTime;
use time::macros::datetime;

/// Timestamp a task falls back to when its stored `CreatedAt` cannot be parsed.
pub const ZERO_TIMESTAMP: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub is_completed: bool,
}

impl Task {
    pub fn new(id: u64, description: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            description: description.into(),
            created_at,
            is_completed: false,
        }
    }
}
