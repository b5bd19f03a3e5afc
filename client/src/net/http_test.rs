use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use super::*;
use crate::config::{CSRF_HEADER, CsrfScope};
use crate::net::test_helpers::ScriptedTransport;
use crate::net::transport::Method;

fn client() -> HttpClient<ScriptedTransport> {
    HttpClient::new(ScriptedTransport::new(), CsrfPolicy::default())
}

fn counting_hook(http: &HttpClient<ScriptedTransport>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    http.on_unauthorized(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    count
}

// =============================================================
// CSRF request interceptor
// =============================================================

#[tokio::test]
async fn csrf_token_attached_to_protected_write() {
    let http = client();
    http.transport().set_cookie("XSRF-TOKEN", "tok-1");
    http.transport()
        .reply(Method::Post, "/dueno/servicios", 201, serde_json::json!({"id": 1}));

    http.execute(ApiRequest::post("/dueno/servicios")).await.unwrap();

    let sent = http.transport().sent();
    assert_eq!(sent[0].header_value(CSRF_HEADER), Some("tok-1"));
}

#[tokio::test]
async fn csrf_token_attached_to_reads_by_default() {
    let http = client();
    http.transport().set_cookie("XSRF-TOKEN", "tok-2");
    http.transport()
        .reply(Method::Get, "/dueno/servicios", 200, serde_json::json!([]));

    http.execute(ApiRequest::get("/dueno/servicios")).await.unwrap();

    assert_eq!(http.transport().sent()[0].header_value(CSRF_HEADER), Some("tok-2"));
}

#[tokio::test]
async fn csrf_skipped_for_reads_in_mutating_scope() {
    let http = HttpClient::new(
        ScriptedTransport::new(),
        CsrfPolicy { scope: CsrfScope::MutatingOnly, ..CsrfPolicy::default() },
    );
    http.transport().set_cookie("XSRF-TOKEN", "tok-3");
    http.transport()
        .reply(Method::Get, "/dueno/servicios", 200, serde_json::json!([]));

    http.execute(ApiRequest::get("/dueno/servicios")).await.unwrap();

    assert_eq!(http.transport().sent()[0].header_value(CSRF_HEADER), None);
}

#[tokio::test]
async fn csrf_never_sent_to_exempt_paths() {
    let http = client();
    http.transport().set_cookie("XSRF-TOKEN", "tok-4");
    http.transport()
        .reply(Method::Post, "/auth/login", 200, serde_json::json!({"exito": true}))
        .reply(Method::Post, "/publico/empresa/acme/turnos", 200, serde_json::json!({"exito": true}));

    http.execute(ApiRequest::post("/auth/login")).await.unwrap();
    http.execute(ApiRequest::post("/publico/empresa/acme/turnos"))
        .await
        .unwrap();

    for req in http.transport().sent() {
        assert_eq!(req.header_value(CSRF_HEADER), None, "{} should be exempt", req.path);
    }
}

#[tokio::test]
async fn missing_csrf_token_does_not_block_write() {
    let http = client();
    http.transport()
        .reply(Method::Delete, "/profesional/bloqueos/9", 403, serde_json::json!({"exito": false}));

    let err = http
        .execute(ApiRequest::delete("/profesional/bloqueos/9"))
        .await
        .unwrap_err();

    assert_eq!(http.transport().sent().len(), 1);
    assert_eq!(err.status(), Some(403));
}

// =============================================================
// Unauthorized response interceptor
// =============================================================

#[tokio::test]
async fn unauthorized_runs_hooks_and_propagates() {
    let http = client();
    let fired = counting_hook(&http);
    http.transport().reply(
        Method::Get,
        "/dueno/servicios",
        401,
        serde_json::json!({"exito": false, "mensaje": "No autenticado"}),
    );

    let err = http
        .execute(ApiRequest::get("/dueno/servicios"))
        .await
        .unwrap_err();

    match err {
        ApiError::Unauthorized { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("No autenticado"));
        }
        other => panic!("expected unauthorized, got {other:?}"),
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(http.unauthorized_cleanup_done());
}

#[tokio::test]
async fn suppressed_unauthorized_resolves_with_response() {
    let http = client();
    let fired = counting_hook(&http);
    http.transport()
        .reply(Method::Get, "/auth/perfil", 401, serde_json::json!({"exito": false}));

    let resp = http
        .execute(ApiRequest::get("/auth/perfil").suppress_auth_redirect())
        .await
        .unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!http.unauthorized_cleanup_done());
}

#[tokio::test]
async fn concurrent_unauthorized_cleans_up_once() {
    let http = client();
    let fired = counting_hook(&http);
    http.transport()
        .reply(Method::Get, "/dueno/servicios", 401, serde_json::json!({}))
        .reply(Method::Get, "/profesional/bloqueos", 401, serde_json::json!({}));

    let (a, b) = tokio::join!(
        http.execute(ApiRequest::get("/dueno/servicios")),
        http.execute(ApiRequest::get("/profesional/bloqueos")),
    );

    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn forbidden_counts_as_unauthorized() {
    let http = client();
    let fired = counting_hook(&http);
    http.transport()
        .reply(Method::Get, "/admin/empresas", 403, serde_json::json!({"mensaje": "Acceso denegado"}));

    let err = http
        .execute(ApiRequest::get("/admin/empresas"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn other_failures_do_not_touch_session() {
    let http = client();
    let fired = counting_hook(&http);
    http.transport().reply(
        Method::Post,
        "/dueno/servicios",
        400,
        serde_json::json!({"exito": false, "mensaje": "Nombre requerido"}),
    );

    let err = http
        .execute(ApiRequest::post("/dueno/servicios"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert!(err.to_string().contains("Nombre requerido"));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_surfaces_as_transport_error() {
    let http = client();
    http.transport()
        .fail(Method::Get, "/auth/perfil", "connection refused");

    let err = http
        .execute(ApiRequest::get("/auth/perfil"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(ref msg) if msg == "connection refused"));
}

// =============================================================
// fetch / send_unit
// =============================================================

#[tokio::test]
async fn send_unit_honors_failed_envelope() {
    let http = client();
    http.transport().reply(
        Method::Put,
        "/admin/empresas/3/activar",
        200,
        serde_json::json!({"exito": false, "mensaje": "Empresa no encontrada"}),
    );

    let err = http
        .send_unit(ApiRequest::put("/admin/empresas/3/activar"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "Empresa no encontrada"));
}
