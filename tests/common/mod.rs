//! Local stand-in for the random-user service used by integration tests.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::{Value, json};

use client_roster::repository::RandomUserRepository;

#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    /// Serves exactly the requested number of valid users.
    Healthy,
    /// Serves five more users than requested.
    Oversized,
    /// Every third user lacks an email.
    Malformed,
    /// Answers with HTTP 500.
    ServerError,
    /// Answers 200 with an `error` field instead of results.
    ErrorField,
    /// Fails the given number of requests with HTTP 503, then behaves.
    FailFirst(usize),
}

struct StubState {
    behavior: Behavior,
    hits: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct StubParams {
    page: Option<u32>,
    results: Option<usize>,
    seed: Option<String>,
}

pub fn user(page: u32, index: usize) -> Value {
    json!({
        "gender": "female",
        "name": { "title": "Ms", "first": format!("Ana{index}"), "last": "Ortiz" },
        "location": { "city": "Porto", "country": "Portugal" },
        "email": format!("ana{index}.ortiz@example.com"),
        "login": { "uuid": format!("u{page}-{index}"), "username": format!("ana{index}") },
        "phone": "(555) 123-4567",
        "picture": {
            "large": format!("https://img.test/large/{page}-{index}.jpg"),
            "medium": format!("https://img.test/med/{page}-{index}.jpg"),
            "thumbnail": format!("https://img.test/thumb/{page}-{index}.jpg")
        },
        "nat": "PT"
    })
}

fn page_body(params: &StubParams, count: usize, malformed: bool) -> Value {
    let page = params.page.unwrap_or(1);
    let results: Vec<Value> = (0..count)
        .map(|index| {
            let mut record = user(page, index);
            if malformed && index % 3 == 0 {
                if let Some(object) = record.as_object_mut() {
                    object.remove("email");
                }
            }
            record
        })
        .collect();

    // like the live service, `info.results` counts the records of this page
    json!({
        "info": {
            "seed": params.seed.clone().unwrap_or_default(),
            "results": results.len(),
            "page": page,
            "version": "1.4"
        },
        "results": results
    })
}

async fn serve(params: web::Query<StubParams>, state: web::Data<StubState>) -> HttpResponse {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    let requested = params.results.unwrap_or(1);

    match state.behavior {
        Behavior::Healthy => HttpResponse::Ok().json(page_body(&params, requested, false)),
        Behavior::Oversized => HttpResponse::Ok().json(page_body(&params, requested + 5, false)),
        Behavior::Malformed => HttpResponse::Ok().json(page_body(&params, requested, true)),
        Behavior::ServerError => HttpResponse::InternalServerError().body("boom"),
        Behavior::ErrorField => {
            HttpResponse::Ok().json(json!({ "error": "Uh oh, something has gone wrong." }))
        }
        Behavior::FailFirst(failures) if hit < failures => {
            HttpResponse::ServiceUnavailable().body("try later")
        }
        Behavior::FailFirst(_) => HttpResponse::Ok().json(page_body(&params, requested, false)),
    }
}

pub struct StubSource {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    handle: ServerHandle,
}

impl StubSource {
    /// Starts the stub on an ephemeral local port.
    pub fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let hits = Arc::new(AtomicUsize::new(0));

        let state = web::Data::new(StubState {
            behavior,
            hits: hits.clone(),
        });
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/api/", web::get().to(serve))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen on stub socket")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self { addr, hits, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn repository(&self) -> RandomUserRepository {
        RandomUserRepository::new(self.url(), "test-seed", Duration::from_secs(5))
            .expect("build repository")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Address on which nothing is listening.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}/api/")
}
