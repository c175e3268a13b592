use base64::Engine as _;
use livedebate_core::error::DebateError;
use livedebate_core::{AudioEncoding, SpeechSynthesizer, SynthesisRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn synthesis_happy_path_decodes_audio_content() {
    let server = MockServer::start().await;
    let encoded = base64::engine::general_purpose::STANDARD.encode([1_u8, 2, 3, 4]);

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("\"text\":\"hello\""))
        .and(body_string_contains("\"languageCode\":\"en-US\""))
        .and(body_string_contains("\"name\":\"en-US-Standard-A\""))
        .and(body_string_contains("\"audioEncoding\":\"MP3\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": encoded
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SynthesisRequest::new("hello").with_voice("en-US-Standard-A");
    let bytes = SpeechSynthesizer::with_base_url(server.uri())
        .synthesize_with_token("tok", &request)
        .await
        .expect("synthesis should succeed");

    assert_eq!(bytes, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn synthesis_sends_tuning_fields_when_set() {
    let server = MockServer::start().await;
    let encoded = base64::engine::general_purpose::STANDARD.encode([0_u8]);

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(body_string_contains("\"speakingRate\":0.75"))
        .and(body_string_contains("\"pitch\":2.5"))
        .and(body_string_contains("\"audioEncoding\":\"OGG_OPUS\""))
        .and(body_string_contains("\"languageCode\":\"de-DE\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": encoded
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SynthesisRequest::new("hallo")
        .with_voice("de-DE-Wavenet-C")
        .with_speaking_rate(0.75)
        .with_pitch(2.5)
        .with_encoding(AudioEncoding::OggOpus);

    SpeechSynthesizer::with_base_url(server.uri())
        .synthesize_with_token("tok", &request)
        .await
        .expect("synthesis should succeed");
}

#[tokio::test]
async fn synthesis_explicit_language_overrides_inference() {
    let server = MockServer::start().await;
    let encoded = base64::engine::general_purpose::STANDARD.encode([0_u8]);

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .and(body_string_contains("\"languageCode\":\"en-GB\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": encoded
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SynthesisRequest::new("hello")
        .with_voice("en-US-Standard-A")
        .with_language("en-GB");

    SpeechSynthesizer::with_base_url(server.uri())
        .synthesize_with_token("tok", &request)
        .await
        .expect("synthesis should succeed");
}

#[tokio::test]
async fn synthesis_rejection_is_opaque() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .expect(1)
        .mount(&server)
        .await;

    let err = SpeechSynthesizer::with_base_url(server.uri())
        .synthesize_with_token("tok", &SynthesisRequest::new("hello"))
        .await
        .expect_err("rejection should fail");

    assert!(matches!(err, DebateError::Synthesis));
    assert_eq!(err.to_string(), "Speech synthesis failed");
}

#[tokio::test]
async fn synthesis_malformed_payload_is_opaque() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text:synthesize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": "///not-base64///"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = SpeechSynthesizer::with_base_url(server.uri())
        .synthesize_with_token("tok", &SynthesisRequest::new("hello"))
        .await
        .expect_err("bad payload should fail");

    assert!(matches!(err, DebateError::Synthesis));
}
