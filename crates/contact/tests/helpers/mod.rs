use std::{
    path::PathBuf,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use portfolio_contact::{AcceptedSubmission, ContactSink};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    portfolio_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

/// Counts calls and optionally fails every one of them.
#[derive(Default)]
pub struct CountingSink {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[allow(dead_code)]
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
