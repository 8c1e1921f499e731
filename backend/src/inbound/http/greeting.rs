//! Greeting endpoint.
//!
//! ```text
//! GET /api/hello
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Version reported by the greeting endpoint.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Greeting payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    #[schema(example = "Welcome to the user registry")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Greet the caller with the server time and API version.
#[utoipa::path(
    get,
    path = "/api/hello",
    tags = ["greeting"],
    responses((status = 200, description = "Greeting", body = HelloResponse)),
    operation_id = "hello"
)]
#[get("/hello")]
pub async fn hello(clock: web::Data<dyn Clock>) -> web::Json<HelloResponse> {
    web::Json(HelloResponse {
        message: "Welcome to the user registry".to_owned(),
        timestamp: clock.utc(),
        version: API_VERSION.to_owned(),
    })
}
