use super::*;
use crate::net::test_helpers::{ScriptedTransport, staff_profile};
use crate::net::transport::Method;
use crate::net::types::Role;

fn session() -> Session<ScriptedTransport> {
    Session::new(ScriptedTransport::new(), &ClientConfig::default())
}

fn bound_customer() -> CustomerSession {
    CustomerSession { id: Some(9), tenant_id: Some(5), tenant_slug: Some("acme".into()), ..CustomerSession::default() }
}

#[tokio::test]
async fn unauthorized_response_clears_both_stores() {
    let s = session();
    s.http()
        .transport()
        .reply(Method::Post, "/auth/login", 200, staff_profile("DUENO"))
        .reply(Method::Get, "/dueno/servicios", 401, serde_json::json!({}));
    s.login("ana@turnos.test", "pw").await.unwrap();
    s.customers().set_customer(bound_customer());

    let err = crate::net::services::list(s.http()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!s.auth().is_authenticated());
    assert!(!s.customers().is_authenticated());
}

#[tokio::test]
async fn cleanup_fires_once_per_client() {
    let s = session();
    s.http()
        .transport()
        .reply(Method::Get, "/dueno/servicios", 401, serde_json::json!({}));

    let _ = crate::net::services::list(s.http()).await;
    s.customers().set_customer(bound_customer());
    let _ = crate::net::services::list(s.http()).await;

    assert!(s.customers().is_authenticated(), "second 401 must not clean up again");
}

#[tokio::test]
async fn login_falls_back_to_profile_probe() {
    let s = session();
    s.http()
        .transport()
        .reply(Method::Post, "/auth/login", 200, serde_json::json!({"exito": true, "mensaje": "ok"}))
        .reply(Method::Get, "/auth/perfil", 200, staff_profile("SUPER_ADMIN"));

    let user = s.login("ana@turnos.test", "pw").await.unwrap();

    assert_eq!(user.role, Role::SuperAdmin);
    assert_eq!(s.auth().role(), Some(Role::SuperAdmin));
}

#[tokio::test]
async fn failed_login_leaves_store_empty() {
    let s = session();
    s.http()
        .transport()
        .reply(Method::Post, "/auth/login", 401, serde_json::json!({"exito": false}));

    assert!(s.login("ana@turnos.test", "bad").await.is_err());
    assert!(!s.auth().is_authenticated());
    assert!(!s.http().unauthorized_cleanup_done());
}

#[tokio::test]
async fn logout_clears_even_when_backend_fails() {
    let s = session();
    s.auth().set_user(StaffUser {
        id: 1,
        name: "Ana".into(),
        surname: String::new(),
        email: "ana@turnos.test".into(),
        role: Role::Dueno,
    });
    s.http()
        .transport()
        .fail(Method::Post, "/auth/logout", "offline");

    assert!(s.logout().await.is_err());
    assert!(!s.auth().is_authenticated());
}

#[tokio::test]
async fn customer_login_binds_session_to_slug() {
    let s = session();
    s.http().transport().reply(
        Method::Post,
        "/publico/empresa/acme/login-cliente",
        200,
        serde_json::json!({"exito": true, "datos": {"id": 9, "telefono": "1155", "empresaId": 5}}),
    );

    s.login_customer("acme", "1155", "pw").await.unwrap();

    assert!(s.customers().is_authenticated_for("acme"));
}

#[tokio::test]
async fn navigate_after_login_lands_on_role_page() {
    let s = session();
    s.http()
        .transport()
        .reply(Method::Post, "/auth/login", 200, staff_profile("PROFESIONAL"));
    s.login("ana@turnos.test", "pw").await.unwrap();

    let outcome = s.navigate("/login").await.unwrap();

    assert!(matches!(outcome, NavigationOutcome::Arrived(ref r) if r.path == "/profesional"));
}
