//! Server module: REST handlers, routing and the `ServerBuilder`

pub mod builder;
pub mod handlers;
pub mod links;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use links::ResourceLinks;
pub use router::build_api_routes;
