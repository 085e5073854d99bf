pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

use std::sync::Arc;

pub use config::Config;
pub use routes::{AppState, router};

use config::SinkKind;
use portfolio_contact::{ContactSink, SqliteSink};
use portfolio_notification::{EmailService, EmailSink};

/// Build the contact command with the sink selected by `contact.sink`
pub fn contact_command(
    config: &Config,
    pool: sqlx::SqlitePool,
) -> anyhow::Result<portfolio_contact::Command> {
    let sink: Arc<dyn ContactSink> = match config.contact.sink {
        SinkKind::Database => Arc::new(SqliteSink(pool)),
        SinkKind::Email => {
            let service = EmailService::new(&config.email)?;
            Arc::new(EmailSink::new(service, &config.email.contact_address))
        }
    };

    tracing::info!(sink = sink.name(), "Contact sink selected");

    Ok(portfolio_contact::Command::new(sink).with_confirmation(&config.contact.confirmation))
}
