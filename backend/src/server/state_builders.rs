//! Builders for the HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};

use super::ServerConfig;

/// Select the user store adapter and wrap it in the HTTP state.
///
/// Uses [`DieselUserRepository`] when a pool is configured, otherwise an
/// [`InMemoryUserRepository`] sharing the server clock.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            HttpState::for_repository(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None => {
            info!("no database configured; using in-memory user store");
            HttpState::for_repository(Arc::new(InMemoryUserRepository::new(
                config.clock.clone(),
            )))
        }
    };
    web::Data::new(state)
}
