#![allow(dead_code)]

use std::{
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use portfolio::{AppState, routes::CONTACT_BODY_LIMIT};
use portfolio_contact::{AcceptedSubmission, ContactSink, SqliteSink};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestState {
    pub pool: SqlitePool,
    pub app: Router,
    _dir: TempDir,
}

/// Migrated file-backed database with the router wired to the SQLite sink
pub async fn setup_test_state() -> anyhow::Result<TestState> {
    let dir = TempDir::new()?;
    let path = dir.child("portfolio.db");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    portfolio::db::migrate(&pool).await?;

    let sink = Arc::new(SqliteSink(pool.clone()));
    let app = app_with_sink(sink, pool.clone());

    Ok(TestState {
        pool,
        app,
        _dir: dir,
    })
}

pub fn app_with_sink(sink: Arc<dyn ContactSink>, pool: SqlitePool) -> Router {
    let state = AppState {
        contact_command: portfolio_contact::Command::new(sink),
    };

    portfolio::router(state, pool)
}

pub async fn post_contact(
    app: &Router,
    body: impl Into<Body>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), CONTACT_BODY_LIMIT).await?;

    Ok((status, serde_json::from_slice(&bytes)?))
}

/// Counts calls and optionally fails every one of them.
#[derive(Default)]
pub struct CountingSink {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl CountingSink {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContactSink for CountingSink {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn accept(&self, _accepted: &AcceptedSubmission) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            anyhow::bail!("relay unavailable");
        }

        Ok(())
    }
}
