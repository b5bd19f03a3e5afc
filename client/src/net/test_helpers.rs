//! Scripted in-memory transport for pipeline, store, and guard tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::error::ApiError;
use super::transport::{ApiRequest, Method, RawResponse, Transport};

enum Reply {
    Response(RawResponse),
    Fail(String),
}

/// Replies are queued per `(method, path)`; the last queued reply repeats.
/// Unscripted calls answer 404. Every `send` yields once so joined futures
/// interleave the way concurrent browser requests do.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    sent: Mutex<Vec<ApiRequest>>,
    cookies: Mutex<HashMap<String, String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.push(method, path, Reply::Response(RawResponse::new(status, body.to_string())))
    }

    pub(crate) fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Reply::Response(RawResponse::new(status, body)))
    }

    pub(crate) fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(method, path, Reply::Fail(message.to_owned()))
    }

    pub(crate) fn set_cookie(&self, name: &str, value: &str) {
        self.cookies
            .lock()
            .unwrap()
            .insert(name.to_owned(), value.to_owned());
    }

    pub(crate) fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_paths(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let mut replies = self.replies.lock().unwrap();
        let Some(queue) = replies.get_mut(&(request.method, request.path.clone())) else {
            return Ok(RawResponse::new(404, r#"{"exito":false,"mensaje":"not scripted"}"#));
        };
        let reply = if queue.len() > 1 { queue.pop_front() } else { None };
        let reply = reply.as_ref().or(queue.front());
        match reply {
            Some(Reply::Response(resp)) => Ok(resp.clone()),
            Some(Reply::Fail(msg)) => Err(ApiError::Transport(msg.clone())),
            None => Ok(RawResponse::new(404, "")),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        tokio::task::yield_now().await;
        self.next_reply(request)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.lock().unwrap().get(name).cloned()
    }
}

/// Staff profile envelope as `/auth/perfil` returns it.
pub(crate) fn staff_profile(role: &str) -> serde_json::Value {
    serde_json::json!({
        "exito": true,
        "mensaje": "ok",
        "datos": { "id": 1, "nombre": "Ana", "apellido": "Paz", "email": "ana@turnos.test", "rol": role }
    })
}

/// Envelope for a public tenant record.
pub(crate) fn public_tenant(id: i64, slug: &str) -> serde_json::Value {
    serde_json::json!({ "exito": true, "mensaje": "ok", "datos": { "id": id, "slug": slug } })
}
