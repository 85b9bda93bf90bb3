pub mod config;
pub mod docker;
pub mod handlers;
pub mod render;
pub mod routes;
