pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod inbox;
pub mod logger;
pub mod models;
pub mod openapi;
pub mod portfolio;
pub mod routes;
