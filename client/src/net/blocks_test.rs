use super::*;
use crate::config::CsrfPolicy;
use crate::net::test_helpers::ScriptedTransport;
use crate::net::transport::{Method, RequestBody};

fn client() -> HttpClient<ScriptedTransport> {
    HttpClient::new(ScriptedTransport::new(), CsrfPolicy::default())
}

fn block_request() -> BlockRequest {
    BlockRequest { start: "2025-03-10".into(), end: Some("2025-03-12".into()), reason: None }
}

#[tokio::test]
async fn conflict_report_decoded() {
    let http = client();
    http.transport().reply(
        Method::Post,
        "/profesional/bloqueos/verificar-conflictos",
        200,
        serde_json::json!({"exito": true, "datos": {
            "tieneConflictos": true,
            "cantidadConflictos": 1,
            "turnosConflictivos": [{
                "turnoId": 31, "fecha": "2025-03-11", "horaInicio": "10:00", "horaFin": "10:30",
                "clienteNombre": "Leo", "clienteTelefono": "1155", "servicioNombre": "Corte", "estado": "CONFIRMADO"
            }],
            "mensaje": "1 turno afectado"
        }}),
    );

    let report = check_conflicts(&http, &block_request()).await.unwrap();

    assert!(report.has_conflicts);
    assert_eq!(report.bookings[0].booking_id, 31);
}

#[tokio::test]
async fn suggested_slots_default_to_thirty_days() {
    let http = client();
    http.transport().reply(
        Method::Get,
        "/profesional/bloqueos/slots-sugeridos/31",
        200,
        serde_json::json!({"exito": true, "datos": []}),
    );

    suggested_slots(&http, 31, None).await.unwrap();

    let sent = http.transport().sent();
    assert_eq!(sent[0].query, vec![("diasABuscar".to_owned(), "30".to_owned())]);
}

#[tokio::test]
async fn resolution_request_shape() {
    let http = client();
    http.transport().reply(
        Method::Post,
        "/profesional/bloqueos/con-resolucion",
        200,
        serde_json::json!({"exito": true, "datos": {
            "id": 8, "profesionalId": 2, "fechaInicio": "2025-03-10", "fechaFin": "2025-03-12", "activo": true
        }}),
    );
    let req = ResolvedBlockRequest { block: block_request(), action: ConflictAction::CancelFuture, reschedules: vec![] };

    let block = create_with_resolution(&http, &req).await.unwrap();

    assert_eq!(block.id, 8);
    let Some(RequestBody::Json(body)) = &http.transport().sent()[0].body else {
        panic!("expected json body");
    };
    assert_eq!(body["accion"], "CANCELAR_FUTUROS");
    assert_eq!(body["bloqueo"]["fechaFin"], "2025-03-12");
    assert!(body.get("reprogramaciones").is_none());
}
