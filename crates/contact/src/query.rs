use portfolio_db::table::ContactSubmission as ContactSubmissionTable;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Default, Serialize, FromRow, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: i64,
}

const COLUMNS: [ContactSubmissionTable; 6] = [
    ContactSubmissionTable::Id,
    ContactSubmissionTable::Name,
    ContactSubmissionTable::Email,
    ContactSubmissionTable::Subject,
    ContactSubmissionTable::Message,
    ContactSubmissionTable::CreatedAt,
];

pub async fn find_submission(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> anyhow::Result<Option<StoredSubmission>> {
    let statment = Query::select()
        .columns(COLUMNS)
        .from(ContactSubmissionTable::Table)
        .and_where(Expr::col(ContactSubmissionTable::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, StoredSubmission, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Most recent first.
pub async fn list_submissions(
    pool: &SqlitePool,
    limit: u64,
) -> anyhow::Result<Vec<StoredSubmission>> {
    let statment = Query::select()
        .columns(COLUMNS)
        .from(ContactSubmissionTable::Table)
        .order_by(ContactSubmissionTable::CreatedAt, Order::Desc)
        .order_by(ContactSubmissionTable::Id, Order::Desc)
        .limit(limit)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, StoredSubmission, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
