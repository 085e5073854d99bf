use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::Router;
use portfolio_client::{
    FAILURE_TITLE, HttpTransport, Notification, Notifier, Phase, SUCCESS_TITLE, Severity,
    SubmissionController, SubmitOutcome,
};
use portfolio_shared::contact::{ContactInput, Field};

mod helpers;

#[derive(Default)]
struct RecordingNotifier(Mutex<Vec<Notification>>);

impl RecordingNotifier {
    fn taken(&self) -> Vec<Notification> {
        self.0.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.0.lock() {
            notifications.push(notification);
        }
    }
}

async fn spawn_server(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn test_form_round_trip_against_server() -> anyhow::Result<()> {
    let state = helpers::setup_test_state().await?;
    let base_url = spawn_server(state.app.clone()).await?;

    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        HttpTransport::new(&base_url, Duration::from_secs(5))?,
        notifier.clone(),
    );

    controller
        .fill(ContactInput::new("Ada", "ada@example.com", "Hello", "Hi there"))
        .await;
    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Sent(_)), "{outcome:?}");
    assert_eq!(controller.phase().await, Phase::Idle);
    assert_eq!(controller.form().await, ContactInput::default());
    assert_eq!(
        notifier.taken(),
        vec![Notification::success(
            SUCCESS_TITLE,
            "Thanks, Ada! Your message has been received."
        )]
    );

    let stored = portfolio_contact::list_submissions(&state.pool, 10).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ada");

    Ok(())
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() -> anyhow::Result<()> {
    let state = helpers::setup_test_state().await?;
    let base_url = spawn_server(state.app.clone()).await?;

    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        HttpTransport::new(&base_url, Duration::from_secs(5))?,
        notifier.clone(),
    );

    controller
        .fill(ContactInput::new("Bob", "bob@", "Q", "?"))
        .await;
    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(
        controller
            .field_errors()
            .await
            .iter()
            .map(|e| e.field)
            .collect::<Vec<_>>(),
        vec![Field::Email]
    );
    assert!(notifier.taken().is_empty());
    assert!(portfolio_contact::list_submissions(&state.pool, 10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_server_failure_keeps_form() -> anyhow::Result<()> {
    let state = helpers::setup_test_state().await?;
    let sink = Arc::new(helpers::CountingSink::failing());
    let base_url = spawn_server(helpers::app_with_sink(sink.clone(), state.pool.clone())).await?;

    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        HttpTransport::new(&base_url, Duration::from_secs(5))?,
        notifier.clone(),
    );

    let input = ContactInput::new("Ada", "ada@example.com", "Hello", "Hi there");
    controller.fill(input.clone()).await;
    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)), "{outcome:?}");
    assert_eq!(controller.form().await, input);
    assert_eq!(sink.calls(), 1);

    let notifications = notifier.taken();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].title, FAILURE_TITLE);

    Ok(())
}
