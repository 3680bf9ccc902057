use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_auth::Account;
use dkt_auth::ApiError;
use dkt_auth::Owned;
use dkt_core::ID;
use dkt_core::Unique;

/// Metadata for a file filed under a case. The bytes live elsewhere.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: ID<Document>,
    pub user_id: ID<Account>,
    pub case_id: ID<Case>,
    pub title: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentDraft {
    pub case_id: Option<String>,
    pub title: String,
    pub file_url: String,
}

impl Unique for Document {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Owned for Document {
    fn owner(&self) -> ID<Account> {
        self.user_id
    }
}

impl Record for Document {
    const KIND: &'static str = "Document";
    const PATH: &'static str = "/api/documents";
    type Draft = DocumentDraft;
    fn draft(owner: ID<Account>, draft: DocumentDraft) -> Result<Self, ApiError> {
        let mut errors = Vec::new();
        let case_id = case_ref(&mut errors, draft.case_id.as_deref());
        let title = required(&mut errors, "title", &draft.title, "Title is required");
        let file_url = required(&mut errors, "fileUrl", &draft.file_url, "File URL is required");
        match case_id {
            Some(case_id) if errors.is_empty() => {
                let now = Utc::now();
                Ok(Self {
                    id: ID::default(),
                    user_id: owner,
                    case_id,
                    title,
                    file_url,
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

    const COLUMNS: &str = "id, user_id, case_id, title, file_url, created_at, updated_at";

    impl Schema for Document {
        fn name() -> &'static str {
            DOCUMENTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                DOCUMENTS,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    case_id     UUID NOT NULL REFERENCES ",
                CASES,
                "(id) ON DELETE CASCADE,
                    title       VARCHAR(255) NOT NULL,
                    file_url    TEXT NOT NULL,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_documents_user ON ",
                DOCUMENTS,
                " (user_id);
                 CREATE INDEX IF NOT EXISTS idx_documents_case ON ",
                DOCUMENTS,
                " (case_id);"
            )
        }
    }

    impl Table for Document {
        const FETCH: &'static str = const_format::concatcp!("SELECT ", COLUMNS, " FROM ", DOCUMENTS, " WHERE id = $1");
        const LIST: &'static str = const_format::concatcp!(
            "SELECT ",
            COLUMNS,
            " FROM ",
            DOCUMENTS,
            " WHERE ($1::uuid IS NULL OR user_id = $1) ORDER BY created_at DESC"
        );
        const DELETE: &'static str = const_format::concatcp!("DELETE FROM ", DOCUMENTS, " WHERE id = $1");
        fn decode(row: &tokio_postgres::Row) -> Self {
            Self {
                id: ID::from(row.get::<_, uuid::Uuid>(0)),
                user_id: ID::from(row.get::<_, uuid::Uuid>(1)),
                case_id: ID::from(row.get::<_, uuid::Uuid>(2)),
                title: row.get(3),
                file_url: row.get(4),
                created_at: row.get(5),
                updated_at: row.get(6),
            }
        }
        async fn insert(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr> {
            client
                .execute(
                    const_format::concatcp!(
                        "INSERT INTO ",
                        DOCUMENTS,
                        " (",
                        COLUMNS,
                        ") VALUES ($1, $2, $3, $4, $5, $6, $7)"
                    ),
                    &[
                        &self.id.inner(),
                        &self.user_id.inner(),
                        &self.case_id.inner(),
                        &self.title,
                        &self.file_url,
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
                        DOCUMENTS,
                        " SET case_id = $2, title = $3, file_url = $4, updated_at = $5 WHERE id = $1"
                    ),
                    &[
                        &self.id.inner(),
                        &self.case_id.inner(),
                        &self.title,
                        &self.file_url,
                        &self.updated_at,
                    ],
                )
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dkt_auth::FieldError;

    #[test]
    fn draft_requires_case_and_url() {
        let draft = DocumentDraft {
            title: "Retainer".into(),
            ..Default::default()
        };
        let err = Document::draft(ID::default(), draft).unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.iter().map(|f| f.field).collect::<Vec<_>>(), ["caseId", "fileUrl"]);
    }

    #[test]
    fn malformed_case_id_is_a_field_error() {
        let draft = DocumentDraft {
            case_id: Some("case-42".into()),
            title: "Retainer".into(),
            file_url: "https://files.example.com/r.pdf".into(),
        };
        let Err(ApiError::Validation(fields)) = Document::draft(ID::default(), draft) else {
            panic!("expected validation error");
        };
        assert_eq!(fields, vec![FieldError::new("caseId", "Invalid case id")]);
    }
}
