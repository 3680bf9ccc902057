use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_auth::Account;
use dkt_auth::ApiError;
use dkt_auth::FieldError;
use dkt_auth::Owned;
use dkt_core::ID;
use dkt_core::Unique;

/// A court appearance scheduled under a case.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hearing {
    pub id: ID<Hearing>,
    pub user_id: ID<Account>,
    pub case_id: ID<Case>,
    pub title: String,
    pub date: DateTime<Utc>,
    pub status: HearingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HearingDraft {
    pub case_id: Option<String>,
    pub title: String,
    pub date: Option<String>,
    pub status: Option<String>,
}

impl Unique for Hearing {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Owned for Hearing {
    fn owner(&self) -> ID<Account> {
        self.user_id
    }
}

impl Record for Hearing {
    const KIND: &'static str = "Hearing";
    const PATH: &'static str = "/api/hearings";
    type Draft = HearingDraft;
    fn draft(owner: ID<Account>, draft: HearingDraft) -> Result<Self, ApiError> {
        let mut errors = Vec::new();
        let case_id = case_ref(&mut errors, draft.case_id.as_deref());
        let title = required(&mut errors, "title", &draft.title, "Title is required");
        let date = match draft.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.push(FieldError::new("date", "Date is required"));
                None
            }
            some => parsed(&mut errors, "date", some, "Invalid date format", timestamp),
        };
        let status = parsed(&mut errors, "status", draft.status.as_deref(), "Invalid hearing status", |s| {
            HearingStatus::try_from(s)
        });
        match (case_id, date) {
            (Some(case_id), Some(date)) if errors.is_empty() => {
                let now = Utc::now();
                Ok(Self {
                    id: ID::default(),
                    user_id: owner,
                    case_id,
                    title,
                    date,
                    status: status.unwrap_or_default(),
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
    fn succeed(self, prior: &Self) -> Self {
        Self {
            id: prior.id,
            user_id: prior.user_id,
            created_at: prior.created_at,
            ..self
        }
    }
    fn parent(&self) -> Option<ID<Case>> {
        Some(self.case_id)
    }
}

mod schema {
    use super::*;
    use dkt_pg::*;

    const COLUMNS: &str = "id, user_id, case_id, title, date, status, created_at, updated_at";

    impl Schema for Hearing {
        fn name() -> &'static str {
            HEARINGS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                HEARINGS,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    case_id     UUID NOT NULL REFERENCES ",
                CASES,
                "(id) ON DELETE CASCADE,
                    title       VARCHAR(255) NOT NULL,
                    date        TIMESTAMPTZ NOT NULL,
                    status      VARCHAR(16) NOT NULL DEFAULT 'SCHEDULED',
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_hearings_user ON ",
                HEARINGS,
                " (user_id);
                 CREATE INDEX IF NOT EXISTS idx_hearings_case ON ",
                HEARINGS,
                " (case_id);
                 CREATE INDEX IF NOT EXISTS idx_hearings_date ON ",
                HEARINGS,
                " (date);"
            )
        }
    }

    impl Table for Hearing {
        const FETCH: &'static str = const_format::concatcp!("SELECT ", COLUMNS, " FROM ", HEARINGS, " WHERE id = $1");
        const LIST: &'static str = const_format::concatcp!(
            "SELECT ",
            COLUMNS,
            " FROM ",
            HEARINGS,
            " WHERE ($1::uuid IS NULL OR user_id = $1) ORDER BY date"
        );
        const DELETE: &'static str = const_format::concatcp!("DELETE FROM ", HEARINGS, " WHERE id = $1");
        fn decode(row: &tokio_postgres::Row) -> Self {
            let status = row.get::<_, String>(5);
            Self {
                id: ID::from(row.get::<_, uuid::Uuid>(0)),
                user_id: ID::from(row.get::<_, uuid::Uuid>(1)),
                case_id: ID::from(row.get::<_, uuid::Uuid>(2)),
                title: row.get(3),
                date: row.get(4),
                status: HearingStatus::try_from(status.as_str())
                    .inspect_err(|e| log::warn!("{} on hearing {}", e, row.get::<_, uuid::Uuid>(0)))
                    .unwrap_or_default(),
                created_at: row.get(6),
                updated_at: row.get(7),
            }
        }
        async fn insert(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr> {
            client
                .execute(
                    const_format::concatcp!(
                        "INSERT INTO ",
                        HEARINGS,
                        " (",
                        COLUMNS,
                        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
                    ),
                    &[
                        &self.id.inner(),
                        &self.user_id.inner(),
                        &self.case_id.inner(),
                        &self.title,
                        &self.date,
                        &self.status.as_str(),
                        &self.created_at,
                        &self.updated_at,
                    ],
                )
                .await
        }
        async fn update(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr> {
            client
                .execute(
                    const_format::concatcp!(
                        "UPDATE ",
                        HEARINGS,
                        " SET case_id = $2, title = $3, date = $4, status = $5, updated_at = $6 WHERE id = $1"
                    ),
                    &[
                        &self.id.inner(),
                        &self.case_id.inner(),
                        &self.title,
                        &self.date,
                        &self.status.as_str(),
                        &self.updated_at,
                    ],
                )
                .await
        }
    }
}
