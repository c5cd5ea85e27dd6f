pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod firebase;
pub mod form;
pub mod models;
pub mod state;
pub mod store;
