use lettre::{Message, message::Mailbox};
use portfolio_contact::{AcceptedSubmission, ContactSink};

use crate::EmailService;

/// Relays accepted submissions to the site owner's inbox.
#[derive(Clone)]
pub struct EmailSink {
    service: EmailService,
    to: String,
}

impl EmailSink {
    pub fn new(service: EmailService, to: impl Into<String>) -> Self {
        Self {
            service,
            to: to.into(),
        }
    }

    fn message(&self, accepted: &AcceptedSubmission) -> anyhow::Result<Message> {
        let submission = &accepted.submission;
        let reply_to = Mailbox::new(
            Some(submission.name().to_owned()),
            submission.email().parse()?,
        );

        self.service.plain_message(
            &self.to,
            Some(reply_to),
            format!("[Portfolio] {}", submission.subject()),
            format!(
                r#"
Reference: {}
Name: {}
Email: {}
Subject: {}
Message: {}
            "#,
                accepted.id,
                submission.name(),
                submission.email(),
                submission.subject(),
                submission.message()
            ),
        )
    }
}

#[async_trait::async_trait]
impl ContactSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn accept(&self, accepted: &AcceptedSubmission) -> anyhow::Result<()> {
        let message = self.message(accepted)?;
        self.service.send(message).await
    }
}
