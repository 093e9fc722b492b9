use serde_json::json;

use super::*;
use crate::transport::RetryPolicy;

fn provider(domain: Option<&str>, retry_without_domain: bool) -> VworldProvider {
    let transport = HttpTransport::new("okssang-test/0.1", RetryPolicy::default())
        .expect("transport construction should not fail");
    let mut config = VworldConfig::new("test-key");
    config.domain = domain.map(str::to_owned);
    config.retry_without_domain = retry_without_domain;
    VworldProvider::new(config, transport).expect("provider construction should not fail")
}

fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn normalize_domain_strips_scheme_and_path() {
    let identity = normalize_domain("https://okssang.example.com/app").unwrap();
    assert_eq!(identity.domain, "okssang.example.com");
    assert_eq!(identity.referer, "https://okssang.example.com/");
}

#[test]
fn normalize_domain_keeps_port() {
    let identity = normalize_domain("http://localhost:8501").unwrap();
    assert_eq!(identity.domain, "localhost:8501");
    assert_eq!(identity.referer, "http://localhost:8501/");
}

#[test]
fn normalize_domain_accepts_bare_host() {
    let identity = normalize_domain(" okssang.example.com/ ").unwrap();
    assert_eq!(identity.domain, "okssang.example.com");
    assert_eq!(identity.referer, "https://okssang.example.com/");
}

#[test]
fn normalize_domain_rejects_blank() {
    assert!(normalize_domain("   ").is_none());
    assert!(normalize_domain("/").is_none());
}

#[test]
fn no_domain_means_single_variant() {
    let p = provider(None, true);
    assert_eq!(p.variants(), vec![RequestVariant::WITHOUT_DOMAIN]);
}

#[test]
fn domain_means_with_then_without() {
    let p = provider(Some("okssang.example.com"), true);
    assert_eq!(
        p.variants(),
        vec![RequestVariant::WITH_DOMAIN, RequestVariant::WITHOUT_DOMAIN]
    );
}

#[test]
fn disabled_fallback_keeps_only_domain_variant() {
    let p = provider(Some("okssang.example.com"), false);
    assert_eq!(p.variants(), vec![RequestVariant::WITH_DOMAIN]);
}

#[test]
fn build_params_has_required_fields() {
    let p = provider(None, true);
    let params = p.build_params("세종대로 110", RequestVariant::WITHOUT_DOMAIN);
    assert_eq!(param(&params, "service"), Some("address"));
    assert_eq!(param(&params, "request"), Some("getcoord"));
    assert_eq!(param(&params, "format"), Some("json"));
    assert_eq!(param(&params, "crs"), Some("EPSG:4326"));
    assert_eq!(param(&params, "type"), Some("ROAD"));
    assert_eq!(param(&params, "address"), Some("세종대로 110"));
    assert_eq!(param(&params, "key"), Some("test-key"));
    assert_eq!(param(&params, "domain"), None);
    assert_eq!(param(&params, "refine"), None);
}

#[test]
fn build_params_includes_domain_only_for_domain_variant() {
    let p = provider(Some("https://okssang.example.com"), true);
    let with = p.build_params("a", RequestVariant::WITH_DOMAIN);
    let without = p.build_params("a", RequestVariant::WITHOUT_DOMAIN);
    assert_eq!(param(&with, "domain"), Some("okssang.example.com"));
    assert_eq!(param(&without, "domain"), None);
}

#[test]
fn extended_params_are_opt_in() {
    let transport = HttpTransport::new("okssang-test/0.1", RetryPolicy::default()).unwrap();
    let mut config = VworldConfig::new("test-key");
    config.extended_params = true;
    let p = VworldProvider::new(config, transport).unwrap();
    let params = p.build_params("a", RequestVariant::WITHOUT_DOMAIN);
    assert_eq!(param(&params, "version"), Some("2.0"));
    assert_eq!(param(&params, "refine"), Some("true"));
    assert_eq!(param(&params, "simple"), Some("false"));
}

#[test]
fn referer_header_follows_variant() {
    let p = provider(Some("okssang.example.com"), true);
    let with = p.build_headers(RequestVariant::WITH_DOMAIN);
    let without = p.build_headers(RequestVariant::WITHOUT_DOMAIN);
    assert_eq!(
        with.get(REFERER).and_then(|v| v.to_str().ok()),
        Some("https://okssang.example.com/")
    );
    assert!(without.get(REFERER).is_none());
}

#[test]
fn invalid_base_url_is_rejected() {
    let transport = HttpTransport::new("okssang-test/0.1", RetryPolicy::default()).unwrap();
    let mut config = VworldConfig::new("test-key");
    config.base_url = "not a url".to_owned();
    let err = VworldProvider::new(config, transport).unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}

#[test]
fn debug_output_hides_api_key() {
    let p = provider(None, true);
    assert!(!format!("{p:?}").contains("test-key"));
    assert!(!format!("{:?}", VworldConfig::new("test-key")).contains("test-key"));
}

#[test]
fn parse_response_swaps_x_y_into_lat_lon() {
    let data = json!({
        "response": {
            "status": "OK",
            "result": { "crs": "EPSG:4326", "point": { "x": "126.9780", "y": "37.5665" } },
            "refined": { "text": "서울특별시 중구 세종대로 110 (태평로1가)" }
        }
    });
    let ParsedResponse::Hit(hit) = parse_response(data).unwrap() else {
        panic!("expected a hit");
    };
    assert!((hit.point.lat() - 37.5665).abs() < 1e-12);
    assert!((hit.point.lon() - 126.9780).abs() < 1e-12);
    assert_eq!(
        hit.refined.as_deref(),
        Some("서울특별시 중구 세종대로 110 (태평로1가)")
    );
}

#[test]
fn parse_response_accepts_numeric_coordinates() {
    let data = json!({
        "response": { "status": "OK", "result": { "point": { "x": 127.0, "y": 37.5 } } }
    });
    let ParsedResponse::Hit(hit) = parse_response(data).unwrap() else {
        panic!("expected a hit");
    };
    assert!((hit.point.lon() - 127.0).abs() < 1e-12);
    assert!(hit.refined.is_none());
}

#[test]
fn parse_response_reports_not_found() {
    let data = json!({
        "response": { "status": "NOT_FOUND", "error": { "text": "no result" } }
    });
    assert_eq!(
        parse_response(data).unwrap(),
        ParsedResponse::NotOk {
            status: "NOT_FOUND".to_owned(),
            detail: Some("no result".to_owned()),
        }
    );
}

#[test]
fn parse_response_without_envelope_is_an_error() {
    let err = parse_response(json!({ "error": "Bad Gateway from proxy" })).unwrap_err();
    assert!(err.contains("response.status"), "got: {err}");
}

#[test]
fn parse_response_with_non_object_body_is_an_error() {
    assert!(parse_response(json!([])).is_err());
}

#[test]
fn parse_response_with_non_string_status_is_an_error() {
    assert!(parse_response(json!({ "response": { "status": 200 } })).is_err());
}

#[test]
fn parse_response_rejects_unparseable_coordinates() {
    let data = json!({
        "response": { "status": "OK", "result": { "point": { "x": "east", "y": "37.5" } } }
    });
    let err = parse_response(data).unwrap_err();
    assert!(err.contains('x'), "got: {err}");
}

#[test]
fn parse_response_rejects_missing_point() {
    let data = json!({ "response": { "status": "OK", "result": {} } });
    assert!(parse_response(data).is_err());
}
