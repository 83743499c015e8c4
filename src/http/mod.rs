// HTTP module - thin API route layer
//
// Routes proxy between uploaded audio, the analysis core, and the
// configured generation provider. No state survives a request.

mod routes;

pub use routes::{build_router, run_http_server, ApiState};
