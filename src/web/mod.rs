//! Dashboard presentation: template rendering, HTTP serving and the
//! best-effort browser launch.
pub mod browser;
pub mod errors;
pub mod server;
pub mod template;
