//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod greeting;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api` scope with every REST handler and the extractor error
/// handlers that turn malformed input into `invalid_request` envelopes.
///
/// The caller registers [`state::HttpState`] and a `mockable::Clock` as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user_by_username)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(greeting::hello)
        .service(health::status)
}
