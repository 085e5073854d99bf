use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use portfolio_client::{HttpTransport, Transport, TransportError};
use portfolio_shared::contact::{
    ContactInput, ContactSubmission, ErrorResponse, Field, SubmitResponse, ValidationError,
    validate,
};

async fn spawn_server(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{addr}"))
}

fn ada() -> ContactSubmission {
    validate(&ContactInput::new(
        "Ada",
        "ada@example.com",
        "Hello",
        "Hi there",
    ))
    .unwrap()
}

#[tokio::test]
async fn test_success_response_is_parsed() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/api/contact",
        post(|Json(input): Json<ContactInput>| async move {
            (
                StatusCode::CREATED,
                Json(SubmitResponse {
                    message: format!("Thanks, {}!", input.name),
                }),
            )
        }),
    );
    let base_url = spawn_server(router).await?;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5))?;

    let response = transport.send(&ada()).await?;
    assert_eq!(response.message, "Thanks, Ada!");

    Ok(())
}

#[tokio::test]
async fn test_validation_rejection_carries_errors() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/api/contact",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    message: "Validation failed".to_owned(),
                    errors: vec![ValidationError::new(Field::Email, "invalid format")],
                }),
            )
        }),
    );
    let base_url = spawn_server(router).await?;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5))?;

    let err = transport.send(&ada()).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Rejected {
            status: 422,
            message: "Validation failed".to_owned(),
            errors: vec![ValidationError::new(Field::Email, "invalid format")],
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_opaque_error_page_is_rejected() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/api/contact",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let base_url = spawn_server(router).await?;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5))?;

    let err = transport.send(&ada()).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Rejected {
            status: 502,
            message: "Bad Gateway".to_owned(),
            errors: vec![],
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_success_status_with_garbage_is_not_a_success() -> anyhow::Result<()> {
    let router = Router::new().route("/api/contact", post(|| async { "ok" }));
    let base_url = spawn_server(router).await?;
    let transport = HttpTransport::new(&base_url, Duration::from_secs(5))?;

    let err = transport.send(&ada()).await.unwrap_err();
    assert!(matches!(err, TransportError::Rejected { status: 200, .. }));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_server() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let transport = HttpTransport::new(&format!("http://{addr}"), Duration::from_secs(2))?;

    let err = transport.send(&ada()).await.unwrap_err();
    assert!(matches!(err, TransportError::Unreachable { .. }), "{err:?}");

    Ok(())
}

#[tokio::test]
async fn test_slow_server_times_out_as_unreachable() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/api/contact",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (
                StatusCode::CREATED,
                Json(SubmitResponse {
                    message: "too late".to_owned(),
                }),
            )
        }),
    );
    let base_url = spawn_server(router).await?;
    let transport = HttpTransport::new(&base_url, Duration::from_millis(200))?;

    let err = transport.send(&ada()).await.unwrap_err();
    assert!(matches!(err, TransportError::Unreachable { .. }), "{err:?}");

    Ok(())
}

#[test]
fn test_endpoint_is_joined_to_base_url() -> anyhow::Result<()> {
    for (base_url, endpoint) in [
        (
            "https://portfolio.example.com",
            "https://portfolio.example.com/api/contact",
        ),
        (
            "https://portfolio.example.com/",
            "https://portfolio.example.com/api/contact",
        ),
        (
            "https://example.com/site",
            "https://example.com/site/api/contact",
        ),
        (
            "https://example.com/site/",
            "https://example.com/site/api/contact",
        ),
    ] {
        let transport = HttpTransport::new(base_url, Duration::from_secs(1))?;
        assert_eq!(transport.endpoint().as_str(), endpoint, "{base_url}");
    }

    Ok(())
}
