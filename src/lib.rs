pub mod app;
pub mod capture;
pub mod client;
pub mod error;
pub mod models;
pub mod permissions;
pub mod present;
pub mod speech;
pub mod state;
