use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_auth::Account;
use dkt_auth::ApiError;
use dkt_auth::Owned;
use dkt_core::ID;
use dkt_core::Unique;

/// A legal matter handled by one practitioner.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: ID<Case>,
    pub user_id: ID<Account>,
    pub title: String,
    pub case_number: Option<String>,
    pub court: Option<String>,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseDraft {
    pub title: String,
    pub case_number: Option<String>,
    pub court: Option<String>,
    pub status: Option<String>,
}

impl Unique for Case {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Owned for Case {
    fn owner(&self) -> ID<Account> {
        self.user_id
    }
}

impl Record for Case {
    const KIND: &'static str = "Case";
    const PATH: &'static str = "/api/cases";
    type Draft = CaseDraft;
    fn draft(owner: ID<Account>, draft: CaseDraft) -> Result<Self, ApiError> {
        let mut errors = Vec::new();
        let title = required(&mut errors, "title", &draft.title, "Title is required");
        let status = parsed(&mut errors, "status", draft.status.as_deref(), "Invalid case status", |s| {
            CaseStatus::try_from(s)
        });
        finish(errors)?;
        let now = Utc::now();
        Ok(Self {
            id: ID::default(),
            user_id: owner,
            title,
            case_number: optional(draft.case_number),
            court: optional(draft.court),
            status: status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
    fn succeed(self, prior: &Self) -> Self {
        Self {
            id: prior.id,
            user_id: prior.user_id,
            created_at: prior.created_at,
            ..self
        }
    }
}

mod schema {
    use super::*;
    use dkt_pg::*;

    const COLUMNS: &str = "id, user_id, title, case_number, court, status, created_at, updated_at";

    impl Schema for Case {
        fn name() -> &'static str {
            CASES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                CASES,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    title       VARCHAR(255) NOT NULL,
                    case_number VARCHAR(64),
                    court       VARCHAR(255),
                    status      VARCHAR(16) NOT NULL DEFAULT 'ACTIVE',
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_cases_user ON ",
                CASES,
                " (user_id);"
            )
        }
    }

    impl Table for Case {
        const FETCH: &'static str = const_format::concatcp!("SELECT ", COLUMNS, " FROM ", CASES, " WHERE id = $1");
        const LIST: &'static str = const_format::concatcp!(
            "SELECT ",
            COLUMNS,
            " FROM ",
            CASES,
            " WHERE ($1::uuid IS NULL OR user_id = $1) ORDER BY created_at DESC"
        );
        const DELETE: &'static str = const_format::concatcp!("DELETE FROM ", CASES, " WHERE id = $1");
        fn decode(row: &tokio_postgres::Row) -> Self {
            let status = row.get::<_, String>(5);
            Self {
                id: ID::from(row.get::<_, uuid::Uuid>(0)),
                user_id: ID::from(row.get::<_, uuid::Uuid>(1)),
                title: row.get(2),
                case_number: row.get(3),
                court: row.get(4),
                status: CaseStatus::try_from(status.as_str())
                    .inspect_err(|e| log::warn!("{} on case {}", e, row.get::<_, uuid::Uuid>(0)))
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
                        CASES,
                        " (",
                        COLUMNS,
                        ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
                    ),
                    &[
                        &self.id.inner(),
                        &self.user_id.inner(),
                        &self.title,
                        &self.case_number,
                        &self.court,
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
                        CASES,
                        " SET title = $2, case_number = $3, court = $4, status = $5, updated_at = $6 WHERE id = $1"
                    ),
                    &[
                        &self.id.inner(),
                        &self.title,
                        &self.case_number,
                        &self.court,
                        &self.status.as_str(),
                        &self.updated_at,
                    ],
                )
                .await
        }
    }
}
