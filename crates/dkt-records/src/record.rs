use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_auth::Account;
use dkt_auth::ApiError;
use dkt_auth::FieldError;
use dkt_auth::Owned;
use dkt_core::ID;
use dkt_core::Unique;
use dkt_pg::PgErr;
use dkt_pg::Schema;

/// An owner-scoped practice record that can be listed, fetched, created,
/// replaced and deleted over HTTP.
pub trait Record: Unique + Owned + Clone + serde::Serialize + 'static {
    /// Singular noun used in `"{kind} not found"`.
    const KIND: &'static str;
    /// Mount point of the collection.
    const PATH: &'static str;
    /// Create payload.
    type Draft: serde::de::DeserializeOwned + 'static;
    /// Validates a draft and stamps it with its owner.
    fn draft(owner: ID<Account>, draft: Self::Draft) -> Result<Self, ApiError>;
    /// Replacement for `prior` built from a fresh draft: keeps the id, the
    /// owner and the creation time, bumps the update time.
    fn succeed(self, prior: &Self) -> Self;
    /// Case this record hangs off, if any. Creating such a record requires
    /// authorization on the parent.
    fn parent(&self) -> Option<ID<Case>> {
        None
    }
}

/// Row mapping for the PostgreSQL store.
#[allow(async_fn_in_trait)]
pub trait Table: Schema + Sized {
    /// `SELECT .. WHERE id = $1`
    const FETCH: &'static str;
    /// `SELECT .. WHERE ($1::uuid IS NULL OR user_id = $1)`
    const LIST: &'static str;
    /// `DELETE .. WHERE id = $1`
    const DELETE: &'static str;
    fn decode(row: &tokio_postgres::Row) -> Self;
    async fn insert(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr>;
    /// Rewrites every mutable column of the row keyed by `self.id`.
    async fn update(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr>;
}

/// Required free-text field: trimmed, non-empty.
pub(crate) fn required(errors: &mut Vec<FieldError>, field: &'static str, value: &str, message: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, message));
    }
    value.to_string()
}

/// Optional free-text field: blank collapses to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Typed field carried as text, so a bad value is reported against its
/// field instead of failing the whole body. Blank means absent.
pub(crate) fn parsed<T, E>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    message: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    let value = value.map(str::trim).filter(|s| !s.is_empty())?;
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Required reference to the parent case.
pub(crate) fn case_ref(errors: &mut Vec<FieldError>, value: Option<&str>) -> Option<ID<Case>> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => {
            errors.push(FieldError::new("caseId", "Case is required"));
            None
        }
        some => parsed(errors, "caseId", some, "Invalid case id", |s| s.parse::<ID<Case>>()),
    }
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
pub(crate) fn timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|e| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
                .map_err(|_| e)
        })
}

pub(crate) fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    match errors.is_empty() {
        true => Ok(()),
        false => Err(ApiError::Validation(errors)),
    }
}
