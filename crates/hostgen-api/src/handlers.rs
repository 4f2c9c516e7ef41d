//! REST API handlers.
//!
//! Each handler reads/writes via `StateStore` or the allocator and returns
//! JSON responses. Failures carry an `{"error": ...}` body.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::error;

use hostgen_alloc::AllocationError;
use hostgen_core::AllocationRequest;
use hostgen_state::{HostnameFilter, NewHostname, StateError};

use crate::ApiState;
use crate::wire::*;

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
}

fn internal_error(context: &str, err: &dyn std::fmt::Display) -> axum::response::Response {
    error!(error = %err, "{context}");
    error_response(context, StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

fn allocation_error(err: AllocationError) -> axum::response::Response {
    match err {
        AllocationError::Exhausted { .. } => {
            error!(error = %err, "hostname allocation exhausted");
            error_response(&err.to_string(), StatusCode::SERVICE_UNAVAILABLE).into_response()
        }
        other => internal_error("Failed to generate hostname", &other),
    }
}

// ── Connectivity ───────────────────────────────────────────────

/// GET /api/test
pub async fn test_connection(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.ping() {
        Ok(()) => Json(ConnectionStatus {
            connected: true,
            message: "Database connection successful!".to_string(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "database connection error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ConnectionStatus {
                    connected: false,
                    message: "Database connection failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ── Reads ──────────────────────────────────────────────────────

/// GET /api/hostname/exists/:hostname
pub async fn hostname_exists(
    State(state): State<ApiState>,
    Path(hostname): Path<String>,
) -> impl IntoResponse {
    match state.store.hostname_exists(&hostname) {
        Ok(exists) => Json(ExistsResponse { exists }).into_response(),
        Err(e) => internal_error("Failed to check hostname", &e),
    }
}

/// GET /api/hostname/count
pub async fn count_hostnames(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.count_hostnames() {
        Ok(total) => Json(CountResponse { total }).into_response(),
        Err(e) => internal_error("Failed to count hostnames", &e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// GET /api/hostname/all
pub async fn list_hostnames(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    match state.store.list_hostnames(query.limit) {
        Ok(hostnames) => Json(HostnamesResponse { hostnames }).into_response(),
        Err(e) => internal_error("Failed to fetch hostnames", &e),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub prefix: Option<String>,
    pub environment: Option<String>,
    pub server_function: Option<String>,
}

impl From<FilterQuery> for HostnameFilter {
    fn from(query: FilterQuery) -> Self {
        // Empty query parameters do not constrain the result.
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        HostnameFilter {
            prefix: non_empty(query.prefix),
            environment: non_empty(query.environment),
            server_function: non_empty(query.server_function),
        }
    }
}

/// GET /api/hostname/filter?prefix=&environment=&serverFunction=
pub async fn filter_hostnames(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    match state.store.filter_hostnames(&query.into()) {
        Ok(hostnames) => Json(HostnamesResponse { hostnames }).into_response(),
        Err(e) => internal_error("Failed to filter hostnames", &e),
    }
}

// ── Writes ─────────────────────────────────────────────────────

/// POST /api/hostname/save
pub async fn save_hostname(
    State(state): State<ApiState>,
    Json(new): Json<NewHostname>,
) -> impl IntoResponse {
    match state.store.save_hostname(new) {
        Ok(hostname) => Json(RecordResponse { hostname }).into_response(),
        Err(e @ StateError::Conflict(_)) => {
            error_response(&e.to_string(), StatusCode::CONFLICT).into_response()
        }
        Err(e) => internal_error("Failed to save hostname", &e),
    }
}

// ── Allocation ─────────────────────────────────────────────────

/// POST /api/hostname/generate
pub async fn generate_hostname(
    State(state): State<ApiState>,
    Json(request): Json<AllocationRequest>,
) -> impl IntoResponse {
    match state.allocator.allocate(&request).await {
        Ok(hostname) => Json(GeneratedResponse { hostname }).into_response(),
        Err(e) => allocation_error(e),
    }
}

/// POST /api/hostname/register
pub async fn register_hostname(
    State(state): State<ApiState>,
    Json(body): Json<RegisterRequest>,
) -> impl IntoResponse {
    match state
        .allocator
        .allocate_and_register(&body.request, body.details)
        .await
    {
        Ok(hostname) => (StatusCode::CREATED, Json(RecordResponse { hostname })).into_response(),
        Err(e) => allocation_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Response;
    use hostgen_alloc::AllocatorConfig;
    use hostgen_state::StateStore;
    use http_body_util::BodyExt;

    fn test_state() -> ApiState {
        let store = StateStore::open_in_memory().unwrap();
        let config = AllocatorConfig {
            offline_fallback_enabled: false,
            ..AllocatorConfig::default()
        };
        ApiState::new(store, config)
    }

    fn new_hostname(hostname: &str, environment: &str, server_function: &str) -> NewHostname {
        NewHostname {
            code: "001".to_string(),
            hostname: hostname.to_string(),
            domain: "pactual.net".to_string(),
            os: "Red Hat 8".to_string(),
            environment: environment.to_string(),
            server_function: server_function.to_string(),
            node: "0".to_string(),
            status: "ACTIVE".to_string(),
            ..Default::default()
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_connection_ok() {
        let resp = test_connection(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let status: ConnectionStatus = body_json(resp).await;
        assert!(status.connected);
    }

    #[tokio::test]
    async fn exists_reflects_store() {
        let state = test_state();
        state
            .store
            .save_hostname(new_hostname("L12345PSQL0", "P", "SQL"))
            .unwrap();

        let resp = hostname_exists(State(state.clone()), Path("L12345PSQL0".to_string()))
            .await
            .into_response();
        let body: ExistsResponse = body_json(resp).await;
        assert!(body.exists);

        let resp = hostname_exists(State(state), Path("L99999PSQL0".to_string()))
            .await
            .into_response();
        let body: ExistsResponse = body_json(resp).await;
        assert!(!body.exists);
    }

    #[tokio::test]
    async fn count_and_list() {
        let state = test_state();
        state.store.save_hostname(new_hostname("L10000PSQL0", "P", "SQL")).unwrap();
        state.store.save_hostname(new_hostname("L10001PSQL0", "P", "SQL")).unwrap();

        let resp = count_hostnames(State(state.clone())).await.into_response();
        let body: CountResponse = body_json(resp).await;
        assert_eq!(body.total, 2);

        let resp = list_hostnames(State(state), Query(ListQuery { limit: Some(1) }))
            .await
            .into_response();
        let body: HostnamesResponse = body_json(resp).await;
        assert_eq!(body.hostnames.len(), 1);
        assert_eq!(body.hostnames[0].hostname, "L10001PSQL0");
    }

    #[tokio::test]
    async fn filter_ignores_empty_parameters() {
        let state = test_state();
        state.store.save_hostname(new_hostname("L10000PSQL0", "P", "SQL")).unwrap();
        state.store.save_hostname(new_hostname("L10000DSQL0", "D", "SQL")).unwrap();

        let query = FilterQuery {
            prefix: Some("L".to_string()),
            environment: Some(String::new()),
            server_function: Some("SQL".to_string()),
        };
        let resp = filter_hostnames(State(state), Query(query)).await.into_response();
        let body: HostnamesResponse = body_json(resp).await;
        assert_eq!(body.hostnames.len(), 2);
    }

    #[tokio::test]
    async fn save_then_duplicate_conflicts() {
        let state = test_state();
        let resp = save_hostname(
            State(state.clone()),
            Json(new_hostname("W10000PAPP0", "P", "APP")),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: RecordResponse = body_json(resp).await;
        assert_eq!(body.hostname.id, 1);

        let resp = save_hostname(State(state), Json(new_hostname("W10000PAPP0", "P", "APP")))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn generate_does_not_write() {
        let state = test_state();
        state.store.save_hostname(new_hostname("W10000PAPP0", "P", "APP")).unwrap();

        let request = AllocationRequest::new("Windows Server 2022", "P", "APP");
        let resp = generate_hostname(State(state.clone()), Json(request))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: GeneratedResponse = body_json(resp).await;
        assert_eq!(body.hostname, "W10001PAPP0");
        assert_eq!(state.store.count_hostnames().unwrap(), 1);
    }

    #[tokio::test]
    async fn register_writes_record() {
        let state = test_state();
        let body = RegisterRequest {
            request: AllocationRequest::new("solaris 10", "T", "ORA").with_node("1"),
            details: NewHostname {
                site: "RJ".to_string(),
                ..Default::default()
            },
        };
        let resp = register_hostname(State(state.clone()), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: RecordResponse = body_json(resp).await;
        assert!(body.hostname.hostname.starts_with('S'));
        assert!(body.hostname.hostname.ends_with("TORA1"));
        assert_eq!(body.hostname.site, "RJ");
        assert!(state.store.hostname_exists(&body.hostname.hostname).unwrap());
    }
}
