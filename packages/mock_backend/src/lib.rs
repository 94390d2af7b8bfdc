#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-process stand-in for the AIGIS backend.
//!
//! Serves canned responses from an Actix-Web server bound to an ephemeral
//! localhost port and records every request it receives. Must be started
//! from inside an Actix runtime (e.g. an `#[actix_rt::test]`).
//!
//! ```ignore
//! let backend = MockBackend::builder()
//!     .post("/gen_report", 200, r#""static/report_123.pdf""#)
//!     .start()?;
//! let config = ApiConfig::new(&backend.base_url())?;
//! ```
//!
//! Requests to routes that were not registered get an empty `404`.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, StatusCode};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

/// A request received by the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method (e.g. `"POST"`).
    pub method: String,
    /// Request path (e.g. `"/analyze"`).
    pub path: String,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Raw request body.
    pub body: String,
}

/// A canned response for one method/path pair.
#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
}

struct MockState {
    routes: Vec<Route>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    fn route(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| &r.method == method && r.path == path)
    }
}

/// Builder for a [`MockBackend`].
#[derive(Debug, Default)]
pub struct MockBackendBuilder {
    routes: Vec<Route>,
}

impl MockBackendBuilder {
    /// Answers `POST {path}` with the given status and body.
    #[must_use]
    pub fn post(self, path: &str, status: u16, body: &str) -> Self {
        self.route(Method::POST, path, status, body)
    }

    /// Answers `GET {path}` with the given status and body.
    #[must_use]
    pub fn get(self, path: &str, status: u16, body: &str) -> Self {
        self.route(Method::GET, path, status, body)
    }

    fn route(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status)
            .unwrap_or_else(|e| panic!("Invalid mock status {status}: {e}"));
        self.routes.push(Route {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    /// Binds to `127.0.0.1` on an ephemeral port and starts serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub fn start(self) -> std::io::Result<MockBackend> {
        let state = Arc::new(MockState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let data = web::Data::from(Arc::clone(&state));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(dispatch))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))?;

        let addr = server.addrs().first().copied().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no bound address")
        })?;

        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        log::debug!("Mock backend listening on {addr}");

        Ok(MockBackend {
            addr,
            state,
            handle,
        })
    }
}

/// A running mock backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: ServerHandle,
}

impl MockBackend {
    /// Starts describing a new mock backend.
    #[must_use]
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    /// Base URL of the server, with a trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for `path`, in arrival order.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Stops the server and waits for it to shut down.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn dispatch(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    state.record(RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        content_type: req
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match state.route(req.method(), req.path()) {
        Some(route) => HttpResponse::build(route.status)
            .content_type("text/plain; charset=utf-8")
            .body(route.body.clone()),
        None => HttpResponse::NotFound().finish(),
    }
}
