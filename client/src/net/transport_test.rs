use super::*;

// =============================================================
// ApiRequest builders
// =============================================================

#[test]
fn header_replaces_case_insensitively() {
    let req = ApiRequest::get("/x")
        .header("X-Trace", "a")
        .header("x-trace", "b");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header_value("X-TRACE"), Some("b"));
}

#[test]
fn suppress_auth_redirect_sets_sentinel() {
    let req = ApiRequest::get("/auth/perfil");
    assert!(!req.is_auth_redirect_suppressed());
    let req = req.suppress_auth_redirect();
    assert!(req.is_auth_redirect_suppressed());
    assert_eq!(req.header_value(SKIP_AUTH_REDIRECT_HEADER), Some("true"));
}

#[test]
fn form_body_keeps_field_order() {
    let req = ApiRequest::post("/auth/login").form(&[("username", "ana@x.test"), ("password", "pw")]);
    assert_eq!(
        req.body,
        Some(RequestBody::Form(vec![
            ("username".to_owned(), "ana@x.test".to_owned()),
            ("password".to_owned(), "pw".to_owned()),
        ]))
    );
}

#[test]
fn query_stringifies_values() {
    let req = ApiRequest::get("/publico/disponibilidad")
        .query("servicioId", 3)
        .query("fecha", "2025-03-01");
    assert_eq!(req.query, vec![
        ("servicioId".to_owned(), "3".to_owned()),
        ("fecha".to_owned(), "2025-03-01".to_owned()),
    ]);
}

#[test]
fn only_get_is_non_mutating() {
    assert!(!Method::Get.is_mutating());
    for method in [Method::Post, Method::Put, Method::Patch, Method::Delete] {
        assert!(method.is_mutating(), "{method} should mutate");
    }
}

// =============================================================
// RawResponse decoding
// =============================================================

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Item {
    id: i64,
}

#[test]
fn data_unwraps_envelope() {
    let resp = RawResponse::new(200, r#"{"exito":true,"mensaje":"ok","datos":{"id":4}}"#);
    assert_eq!(resp.data::<Item>().unwrap(), Item { id: 4 });
}

#[test]
fn data_accepts_bare_payload() {
    let resp = RawResponse::new(200, r#"[{"id":1},{"id":2}]"#);
    assert_eq!(resp.data::<Vec<Item>>().unwrap().len(), 2);
}

#[test]
fn data_rejects_failed_envelope() {
    let resp = RawResponse::new(200, r#"{"exito":false,"mensaje":"Empresa inactiva"}"#);
    match resp.data::<Item>() {
        Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Empresa inactiva"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn data_of_empty_body_is_unit() {
    let resp = RawResponse::new(204, "");
    resp.data::<()>().unwrap();
}

#[test]
fn message_reads_mensaje() {
    let resp = RawResponse::new(401, r#"{"exito":false,"mensaje":"No autenticado"}"#);
    assert_eq!(resp.message().as_deref(), Some("No autenticado"));
    assert_eq!(RawResponse::new(500, "boom").message(), None);
}

// =============================================================
// find_cookie
// =============================================================

#[test]
fn find_cookie_picks_named_pair() {
    let header = "JSESSIONID=abc; XSRF-TOKEN=tok-1";
    assert_eq!(find_cookie(header, "XSRF-TOKEN").as_deref(), Some("tok-1"));
    assert_eq!(find_cookie(header, "JSESSIONID").as_deref(), Some("abc"));
    assert_eq!(find_cookie(header, "missing"), None);
}
