//! Integration tests for `KakaoProvider` using wiremock HTTP mocks.

use std::time::Duration;

use okssang_core::ProviderKind;
use okssang_geocode::{FailureKind, GeocodeError, HttpTransport, KakaoProvider, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_provider(server: &MockServer) -> KakaoProvider {
    let transport = HttpTransport::new("okssang-test/0.1", RetryPolicy::with_attempts(1, 0))
        .expect("failed to build test transport");
    KakaoProvider::new(
        "kakao-key",
        Duration::from_secs(5),
        &format!("{}/v2/local/search/address.json", server.uri()),
        transport,
    )
    .expect("failed to build test provider")
}

#[tokio::test]
async fn first_document_is_returned_with_road_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .and(query_param("query", "세종대로 110"))
        .and(header("authorization", "KakaoAK kakao-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 1 },
            "documents": [{
                "address_name": "서울 중구 태평로1가 31",
                "x": "126.978388",
                "y": "37.566610",
                "road_address": { "address_name": "서울 중구 세종대로 110" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_provider(&server)
        .geocode(" 세종대로 110 ")
        .await
        .unwrap()
        .expect("address should resolve");

    assert_eq!(result.provider(), ProviderKind::Kakao);
    assert_eq!(result.input_address(), "세종대로 110");
    assert_eq!(result.normalized_address(), "서울 중구 세종대로 110");
    assert!((result.point().lat() - 37.566_610).abs() < 1e-12);
    assert!((result.point().lon() - 126.978_388).abs() < 1e-12);
    assert!(result.extra()["raw"]["documents"].is_array());
}

#[tokio::test]
async fn lot_address_is_used_when_road_address_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "address_name": "서울 중구 태평로1가 31",
                "x": 126.978388,
                "y": 37.566610,
                "road_address": null
            }]
        })))
        .mount(&server)
        .await;

    let result = test_provider(&server)
        .geocode("태평로1가 31")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.normalized_address(), "서울 중구 태평로1가 31");
}

#[tokio::test]
async fn empty_documents_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&server)
        .await;

    let result = test_provider(&server).geocode("없는 주소").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn unauthorized_is_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey"
        })))
        .mount(&server)
        .await;

    let err = test_provider(&server).geocode("세종대로 110").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::UpstreamStatus { status: 401, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_provider(&server).geocode("세종대로 110").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::MalformedResponse);
}
