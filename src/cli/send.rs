use std::time::Duration;

use anyhow::Result;
use portfolio_client::{HttpTransport, SubmissionController, SubmitOutcome, TracingNotifier};
use portfolio_shared::contact::ContactInput;

use crate::config::Config;

#[derive(Debug, clap::Args)]
pub struct SendArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,

    /// Server base URL (overrides `client.base_url`)
    #[arg(long)]
    pub url: Option<String>,
}

/// Submit one message through the client controller against a running server
pub async fn send(config: &Config, args: SendArgs) -> Result<()> {
    let base_url = args.url.unwrap_or(config.client.base_url.to_owned());
    let transport = HttpTransport::new(&base_url, Duration::from_secs(config.client.timeout_secs))?;
    let controller = SubmissionController::new(transport, TracingNotifier);

    controller
        .fill(ContactInput::new(
            args.name,
            args.email,
            args.subject,
            args.message,
        ))
        .await;

    match controller.submit().await {
        SubmitOutcome::Sent(response) => {
            println!("{}", response.message);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => Err(portfolio_shared::Error::Validate(errors).into()),
        SubmitOutcome::Failed(err) => Err(err.into()),
        SubmitOutcome::Ignored => anyhow::bail!("a submission is already in flight"),
    }
}
