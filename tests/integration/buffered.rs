//! Buffered (non-streaming) translations against a mock endpoint

use crate::integration::fake_transport::ChunkedTransport;
use crate::integration::mock_server::{completion, MockServerFixture, API_KEY, CHAT_PATH};
use ai_translator::{TranslateRequest, TranslatorBuilder, TranslatorConfig};
use mockito::Matcher;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

#[tokio::test]
async fn test_buffered_translation_strips_tags() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .match_header("content-type", "application/json")
            .match_header("x-request-id", Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "stream": false,
                "temperature": 0.1,
                "top_p": 0.99,
                "messages": [
                    {"role": "system", "content": "Translate from German to English."},
                    {"role": "user", "content": "Guten Morgen"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("  <think>easy one</think>Good morning\n"))
            .expect(1)
            .create_async()
            .await
    };

    let translator = fixture.translator();
    let text = translator
        .translate(&TranslateRequest::new("Guten Morgen", "de", "en"), None)
        .await
        .unwrap();

    assert_eq!(text, "Good morning");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_full_endpoint_is_not_extended_twice() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_json_response(200, &completion("ok")).await;

    let translator = fixture
        .builder()
        .request_path(format!("{}{}", fixture.base_url, CHAT_PATH))
        .build()
        .unwrap();
    let text = translator
        .translate(&TranslateRequest::new("x", "en", "fr"), None)
        .await
        .unwrap();

    assert_eq!(text, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stream_enabled_without_callback_falls_back_to_buffered() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_body(Matcher::PartialJson(json!({ "stream": false })))
            .with_status(200)
            .with_body(completion("Bonjour"))
            .expect(1)
            .create_async()
            .await
    };

    let translator = fixture.builder().use_stream(true).build().unwrap();
    let text = translator
        .translate(&TranslateRequest::new("Hello", "en", "fr"), None)
        .await
        .unwrap();

    assert_eq!(text, "Bonjour");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_callback_ignored_when_streaming_disabled() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_json_response(200, &completion("Hallo")).await;

    let translator = fixture.builder().use_stream(false).build().unwrap();
    let mut updates = Vec::new();
    let mut on_update = |s: &str| updates.push(s.to_string());
    let text = translator
        .translate(&TranslateRequest::new("Hello", "en", "de"), Some(&mut on_update))
        .await
        .unwrap();

    assert_eq!(text, "Hallo");
    assert!(updates.is_empty());
}

#[tokio::test]
async fn test_invalid_parameters_fall_back_to_defaults() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_body(Matcher::PartialJson(json!({
                "temperature": 0.1,
                "top_p": 0.99
            })))
            .with_status(200)
            .with_body(completion("fine"))
            .expect(1)
            .create_async()
            .await
    };

    let translator = fixture.builder().parameters("{temperature: oops").build().unwrap();
    let text = translator
        .translate(&TranslateRequest::new("x", "en", "ja"), None)
        .await
        .unwrap();

    assert_eq!(text, "fine");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_custom_parameters_cannot_override_messages() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "temperature": 0.7,
                "max_tokens": 64,
                "stream": false,
                "messages": [
                    {"role": "system", "content": "Translate from English to Japanese."},
                    {"role": "user", "content": "cat"}
                ]
            })))
            .with_status(200)
            .with_body(completion("猫"))
            .expect(1)
            .create_async()
            .await
    };

    let translator = fixture
        .builder()
        .parameters(r#"{"temperature": 0.7, "max_tokens": 64, "model": "other", "messages": []}"#)
        .build()
        .unwrap();
    let text = translator
        .translate(&TranslateRequest::new("cat", "en", "ja"), None)
        .await
        .unwrap();

    assert_eq!(text, "猫");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_language_map_and_detect_placeholder() {
    let transport = Arc::new(ChunkedTransport::ok(&[&completion("done")]));
    let translator = TranslatorBuilder::new()
        .api_key(API_KEY)
        .request_path("api.example.com/v1")
        .prompts("$detect → $to", "[$from] $text")
        .language("xx", "Klingon")
        .transport(transport.clone())
        .build()
        .unwrap();

    let request = TranslateRequest::new("nuqneH", "auto", "xx").with_detect("de");
    translator.translate(&request, None).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.url.as_str(), "https://api.example.com/v1/chat/completions");
    assert!(!sent.stream);
    assert_eq!(sent.body["messages"][0]["content"], json!("German → Klingon"));
    assert_eq!(sent.body["messages"][1]["content"], json!("[Auto] nuqneH"));
}

#[tokio::test]
async fn test_blank_host_remove_tag_still_strips_think_blocks() {
    let options: HashMap<String, String> = [
        ("apiKey", API_KEY),
        ("requestPath", "api.example.com/v1"),
        ("removeTag", ""),
        ("use_stream", "false"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let transport = Arc::new(ChunkedTransport::ok(&[&completion("<think>x</think>Hi")]));
    let translator = TranslatorBuilder::new()
        .config(TranslatorConfig::from_options(&options))
        .transport(transport)
        .build()
        .unwrap();

    let text = translator
        .translate(&TranslateRequest::new("Hallo", "de", "en"), None)
        .await
        .unwrap();
    assert_eq!(text, "Hi");
}
