// Interface adapters layer: axum and reqwest glue around the use cases.

pub mod clients;
pub mod emitter;
pub mod handlers;
pub mod protocol;
pub mod response;
pub mod routes;
pub mod sink;
pub mod state;
