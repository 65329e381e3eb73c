pub mod config;
pub mod http;
pub mod serve;

pub use http::create_router;
