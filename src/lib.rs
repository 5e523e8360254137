pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod planner;
pub mod report;
pub mod routes;
pub mod templates;
