//! hostgen-api — REST API for the hostname portal.
//!
//! Provides axum route handlers over the hostname store and the allocator.
//! Response bodies keep the shapes the portal frontend already consumes.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/test` | Store connectivity check |
//! | GET | `/api/hostname/exists/{hostname}` | Whether a hostname is stored |
//! | GET | `/api/hostname/count` | Number of stored hostnames |
//! | GET | `/api/hostname/all` | All records, newest first |
//! | GET | `/api/hostname/filter` | Records by prefix / environment / function |
//! | POST | `/api/hostname/save` | Store a record |
//! | POST | `/api/hostname/generate` | Allocate a hostname (no write) |
//! | POST | `/api/hostname/register` | Allocate and store atomically |

pub mod handlers;
pub mod wire;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use hostgen_alloc::{Allocator, AllocatorConfig};
use hostgen_state::StateStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: StateStore,
    pub allocator: Arc<Allocator<StateStore>>,
}

impl ApiState {
    pub fn new(store: StateStore, config: AllocatorConfig) -> Self {
        let allocator = Arc::new(Allocator::new(store.clone(), config));
        Self { store, allocator }
    }
}

/// Build the complete API router.
pub fn build_router(store: StateStore, config: AllocatorConfig) -> Router {
    let state = ApiState::new(store, config);

    let hostname_routes = Router::new()
        .route("/exists/{hostname}", get(handlers::hostname_exists))
        .route("/count", get(handlers::count_hostnames))
        .route("/all", get(handlers::list_hostnames))
        .route("/filter", get(handlers::filter_hostnames))
        .route("/save", post(handlers::save_hostname))
        .route("/generate", post(handlers::generate_hostname))
        .route("/register", post(handlers::register_hostname));

    let api_routes = Router::new()
        .route("/test", get(handlers::test_connection))
        .nest("/hostname", hostname_routes);

    Router::new().nest("/api", api_routes).with_state(state)
}
