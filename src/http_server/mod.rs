pub mod app;
pub mod error;
pub mod http_routes;
pub mod middleware;
pub mod render;
pub mod state;
pub mod views;
