//! User registry backend library.
//!
//! The crate is laid out as a hexagon: [`domain`] owns the `User` aggregate,
//! the ports, and the user service; [`inbound`] adapts HTTP requests onto the
//! driving ports; [`outbound`] implements the driven store port.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
