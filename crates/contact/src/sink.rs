use portfolio_shared::contact::ContactSubmission;

/// A submission that passed server-side validation and was assigned an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedSubmission {
    pub id: String,
    pub created_at: i64,
    pub submission: ContactSubmission,
}

/// Destination for accepted submissions (store or relay).
///
/// Called exactly once per accepted submission. An error means the submission
/// was not taken and must be reported to the sender as a failure.
#[async_trait::async_trait]
pub trait ContactSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn accept(&self, accepted: &AcceptedSubmission) -> anyhow::Result<()>;
}

#[cfg(feature = "full")]
mod sqlite {
    use portfolio_db::table::ContactSubmission as ContactSubmissionTable;
    use sea_query::{Query, SqliteQueryBuilder};
    use sea_query_sqlx::SqlxBinder;
    use sqlx::SqlitePool;

    use super::{AcceptedSubmission, ContactSink};

    /// Persists submissions in the `contact_submission` table.
    #[derive(Clone)]
    pub struct SqliteSink(pub SqlitePool);

    #[async_trait::async_trait]
    impl ContactSink for SqliteSink {
        fn name(&self) -> &'static str {
            "database"
        }

        async fn accept(&self, accepted: &AcceptedSubmission) -> anyhow::Result<()> {
            let statment = Query::insert()
                .into_table(ContactSubmissionTable::Table)
                .columns([
                    ContactSubmissionTable::Id,
                    ContactSubmissionTable::Name,
                    ContactSubmissionTable::Email,
                    ContactSubmissionTable::Subject,
                    ContactSubmissionTable::Message,
                    ContactSubmissionTable::CreatedAt,
                ])
                .values_panic([
                    accepted.id.to_owned().into(),
                    accepted.submission.name().to_owned().into(),
                    accepted.submission.email().to_owned().into(),
                    accepted.submission.subject().to_owned().into(),
                    accepted.submission.message().to_owned().into(),
                    accepted.created_at.into(),
                ])
                .to_owned();

            let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&self.0).await?;

            Ok(())
        }
    }
}

#[cfg(feature = "full")]
pub use sqlite::SqliteSink;
