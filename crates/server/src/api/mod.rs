mod error;
mod handlers;
mod jobs;
mod middleware;
mod openapi;
mod routes;

pub use error::{ApiError, ErrorResponse};
pub use jobs::JobResponse;
pub use middleware::AuthUser;
pub use openapi::{load_openapi_document, render_openapi_document};
pub use routes::create_router;
