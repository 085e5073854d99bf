use std::sync::Arc;

use portfolio_shared::contact::{self, ContactInput};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{AcceptedSubmission, ContactSink};

pub const DEFAULT_CONFIRMATION: &str = "Thanks, {name}! Your message has been received.";

/// What the sender gets back once the submission is taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: String,
    pub message: String,
}

#[derive(Clone)]
pub struct Command {
    sink: Arc<dyn ContactSink>,
    confirmation: String,
}

impl Command {
    pub fn new(sink: Arc<dyn ContactSink>) -> Self {
        Self {
            sink,
            confirmation: DEFAULT_CONFIRMATION.to_owned(),
        }
    }

    /// Confirmation shown to the sender, `{name}` is replaced by their name.
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = confirmation.into();
        self
    }

    /// Re-validates the candidate and hands it to the sink once.
    #[tracing::instrument(skip_all, fields(sink = self.sink.name(), id = tracing::field::Empty))]
    pub async fn submit_form(&self, input: ContactInput) -> portfolio_shared::Result<SubmitReceipt> {
        let submission = match contact::validate(&input) {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!(errors = %contact::describe(&errors), "Contact submission rejected");

                return Err(errors.into());
            }
        };

        let message = self.confirmation.replace("{name}", submission.name());
        let accepted = AcceptedSubmission {
            id: Ulid::new().to_string(),
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
            submission,
        };

        tracing::Span::current().record("id", accepted.id.as_str());

        if let Err(err) = self.sink.accept(&accepted).await {
            tracing::error!(error = %err, "Contact sink failed");

            return Err(err.into());
        }

        tracing::info!("Contact submission accepted");

        Ok(SubmitReceipt {
            id: accepted.id,
            message,
        })
    }
}
