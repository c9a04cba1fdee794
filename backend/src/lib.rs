//! Analogy backend library: domain, adapters and HTTP surface.
//!
//! The binary in `main.rs` only loads settings and wires these modules
//! together; everything testable lives here.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
