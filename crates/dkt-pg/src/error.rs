/// Failure of a repository operation.
///
/// Unique-key collisions are split out so callers can answer 409 instead
/// of a generic internal error.
#[derive(Debug)]
pub enum StoreError {
    Duplicate,
    Database(tokio_postgres::Error),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.code() {
            Some(code) if *code == tokio_postgres::error::SqlState::UNIQUE_VIOLATION => {
                Self::Duplicate
            }
            _ => Self::Database(e),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "duplicate key"),
            Self::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Duplicate => None,
            Self::Database(e) => Some(e),
        }
    }
}
