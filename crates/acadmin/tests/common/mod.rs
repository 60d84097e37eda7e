//! In-process mock of the academic-records API for integration tests.
//!
//! Serves the same endpoint surface the client targets: generic CRUD per
//! collection, the class-section relations endpoint, active-flag filters,
//! and the nested lookups. Failure responses use the envelope shape
//! `{message, errors?}`.

// not every test binary touches every helper
#![allow(dead_code)]

use acadmin::{AdminApi, ApiClient, ApiConfig};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dashmap::DashMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

const COLLECTIONS: [&str; 6] = [
    "subjects",
    "instructors",
    "rooms",
    "class-sections",
    "students",
    "enrollments",
];

pub struct Store {
    next_id: AtomicI64,
    tables: DashMap<String, DashMap<i64, Value>>,
    fail_deletes: AtomicBool,
}

impl Store {
    fn new() -> Self {
        let tables = DashMap::new();
        for name in COLLECTIONS {
            tables.insert(name.to_string(), DashMap::new());
        }
        Self {
            next_id: AtomicI64::new(1),
            tables,
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Makes every DELETE fail with a 500 envelope until cleared.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn records(&self, resource: &str) -> Option<Vec<Value>> {
        let table = self.tables.get(resource)?;
        let mut records: Vec<Value> = table.iter().map(|e| e.value().clone()).collect();
        records.sort_by_key(|r| r["id"].as_i64());
        Some(records)
    }

    fn lookup(&self, resource: &str, id: i64) -> Option<Value> {
        self.tables.get(resource)?.get(&id).map(|e| e.value().clone())
    }
}

fn singular(resource: &str) -> &'static str {
    match resource {
        "subjects" => "subject",
        "instructors" => "instructor",
        "rooms" => "room",
        "class-sections" => "class section",
        "students" => "student",
        "enrollments" => "enrollment",
        _ => "record",
    }
}

fn not_found(resource: &str, id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} {} not found", singular(resource), id) })),
    )
        .into_response()
}

fn unknown_collection() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "unknown collection" })),
    )
        .into_response()
}

async fn list(
    State(store): State<Arc<Store>>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(mut records) = store.records(&resource) else {
        return unknown_collection();
    };
    if let Some(active) = params.get("active").and_then(|v| v.parse::<bool>().ok()) {
        records.retain(|r| r["active"].as_bool() == Some(active));
    }
    Json(records).into_response()
}

async fn create(
    State(store): State<Arc<Store>>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let Some(table) = store.tables.get(&resource) else {
        return unknown_collection();
    };
    let id = store.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    table.insert(id, body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn fetch(State(store): State<Arc<Store>>, Path((resource, id)): Path<(String, i64)>) -> Response {
    match store.lookup(&resource, id) {
        Some(record) => Json(record).into_response(),
        None => not_found(&resource, id),
    }
}

async fn update(
    State(store): State<Arc<Store>>,
    Path((resource, id)): Path<(String, i64)>,
    Json(mut body): Json<Value>,
) -> Response {
    let Some(table) = store.tables.get(&resource) else {
        return unknown_collection();
    };
    if !table.contains_key(&id) {
        return not_found(&resource, id);
    }
    body["id"] = json!(id);
    table.insert(id, body.clone());
    Json(body).into_response()
}

async fn remove(
    State(store): State<Arc<Store>>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    if store.fail_deletes.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "delete rejected" })),
        )
            .into_response();
    }
    let Some(table) = store.tables.get(&resource) else {
        return unknown_collection();
    };
    match table.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&resource, id),
    }
}

async fn list_relations(State(store): State<Arc<Store>>) -> Response {
    let sections = store.records("class-sections").unwrap_or_default();
    let enriched: Vec<Value> = sections
        .into_iter()
        .map(|mut section| {
            let embed = |section: &mut Value, key: &str, table: &str, fk: &str| {
                if let Some(id) = section[fk].as_i64() {
                    if let Some(related) = store.lookup(table, id) {
                        section[key] = related;
                    }
                }
            };
            embed(&mut section, "subject", "subjects", "subjectId");
            embed(&mut section, "instructor", "instructors", "instructorId");
            embed(&mut section, "room", "rooms", "roomId");
            section
        })
        .collect();
    Json(enriched).into_response()
}

async fn subjects_by_name(State(store): State<Arc<Store>>, Path(name): Path<String>) -> Response {
    let mut records = store.records("subjects").unwrap_or_default();
    records.retain(|r| {
        r["name"]
            .as_str()
            .is_some_and(|n| n.eq_ignore_ascii_case(&name))
    });
    Json(records).into_response()
}

async fn by_registration(store: Arc<Store>, resource: &str, code: String) -> Response {
    let mut records = store.records(resource).unwrap_or_default();
    records.retain(|r| r["registrationCode"].as_str() == Some(code.as_str()));
    Json(records).into_response()
}

async fn instructors_by_registration(
    State(store): State<Arc<Store>>,
    Path(code): Path<String>,
) -> Response {
    by_registration(store, "instructors", code).await
}

async fn students_by_registration(
    State(store): State<Arc<Store>>,
    Path(code): Path<String>,
) -> Response {
    by_registration(store, "students", code).await
}

async fn rooms_by_capacity(State(store): State<Arc<Store>>, Path(min): Path<u32>) -> Response {
    let mut records = store.records("rooms").unwrap_or_default();
    records.retain(|r| r["capacity"].as_u64().is_some_and(|c| c >= u64::from(min)));
    Json(records).into_response()
}

fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/api/class-sections/relations", get(list_relations))
        .route("/api/subjects/name/:name", get(subjects_by_name))
        .route(
            "/api/instructors/registration/:code",
            get(instructors_by_registration),
        )
        .route(
            "/api/students/registration/:code",
            get(students_by_registration),
        )
        .route("/api/rooms/capacity/:min", get(rooms_by_capacity))
        .route("/api/:resource", get(list).post(create))
        .route(
            "/api/:resource/:id",
            get(fetch).put(update).delete(remove),
        )
        .with_state(store)
}

pub struct MockApi {
    pub addr: SocketAddr,
    pub store: Arc<Store>,
}

impl MockApi {
    /// Binds an ephemeral port and serves the mock API on it.
    pub async fn spawn() -> MockApi {
        acadmin::init_tracing();
        let store = Arc::new(Store::new());
        let app = router(Arc::clone(&store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        MockApi { addr, store }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::default().with_base_url(format!("http://{}/api", self.addr))
    }

    /// An [`AdminApi`] pointed at this mock.
    pub fn admin(&self) -> AdminApi {
        let client = ApiClient::with_config(self.config()).unwrap();
        AdminApi::new(Arc::new(client))
    }
}

/// An [`AdminApi`] pointed at a port nothing listens on, for asserting that
/// an operation never reaches the network.
pub fn unroutable_admin() -> AdminApi {
    let config = ApiConfig::default().with_base_url("http://127.0.0.1:9/api");
    AdminApi::new(Arc::new(ApiClient::with_config(config).unwrap()))
}
