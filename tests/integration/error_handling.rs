//! Error handling: configuration, HTTP status, structure and transport failures

use crate::integration::fake_transport::ChunkedTransport;
use crate::integration::mock_server::{MockServerFixture, API_KEY};
use ai_translator::{Error, TranslateRequest, TranslatorBuilder};
use std::sync::Arc;

fn request() -> TranslateRequest<'static> {
    TranslateRequest::new("Hello", "en", "de")
}

#[tokio::test]
async fn test_missing_api_key_fails_before_network() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable().await;

    let translator = fixture.builder().api_key("  ").build().unwrap();
    let err = translator.translate(&request(), None).await.unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.context().unwrap().field_path.as_deref(), Some("apiKey"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_request_path_fails_before_network() {
    let transport = Arc::new(ChunkedTransport::ok(&[]));
    let translator = TranslatorBuilder::new()
        .api_key(API_KEY)
        .transport(transport.clone())
        .build()
        .unwrap();

    let mut on_update = |_: &str| {};
    let err = translator
        .translate(&request(), Some(&mut on_update))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.context().unwrap().field_path.as_deref(), Some("requestPath"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unsupported_scheme_is_configuration_error() {
    let transport = Arc::new(ChunkedTransport::ok(&[]));
    let translator = TranslatorBuilder::new()
        .api_key(API_KEY)
        .request_path("ftp://files.example.com/v1")
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = translator.translate(&request(), None).await.unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_reports_status_and_error_message() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(
            401,
            r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#,
        )
        .await;

    let err = fixture
        .translator()
        .translate(&request(), None)
        .await
        .unwrap_err();

    match err {
        Error::Api { status, details } => {
            assert_eq!(status, 401);
            assert!(details.contains("Invalid API key"), "details: {details}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_plain_text_body() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_text_response(500, "upstream exploded\n")
        .await;

    let err = fixture
        .translator()
        .translate(&request(), None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    match err {
        Error::Api { details, .. } => assert_eq!(details, "upstream exploded"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_payload_with_success_status() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(200, r#"{"error":"model overloaded"}"#)
        .await;

    let err = fixture
        .translator()
        .translate(&request(), None)
        .await
        .unwrap_err();

    match err {
        Error::Api { status, details } => {
            assert_eq!(status, 200);
            assert_eq!(details, "model overloaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_structure_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_json_response(200, r#"{"choices":[]}"#).await;

    let err = fixture
        .translator()
        .translate(&request(), None)
        .await
        .unwrap_err();

    match err {
        Error::Structure { payload, .. } => assert_eq!(payload, r#"{"choices":[]}"#),
        other => panic!("expected Structure error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_structure_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_text_response(200, "<html>gateway</html>").await;

    let err = fixture
        .translator()
        .translate(&request(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Structure { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let translator = TranslatorBuilder::new()
        .api_key(API_KEY)
        .request_path("http://127.0.0.1:1/v1")
        .timeout_secs(5)
        .build()
        .unwrap();

    let err = translator.translate(&request(), None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}
