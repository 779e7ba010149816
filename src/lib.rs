pub mod dashboard;
pub mod server;
pub mod version;
pub mod web;
