//! HTTP surface for coinplan: one analysis route plus static assets.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
