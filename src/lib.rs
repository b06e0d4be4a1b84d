pub mod config;
pub mod engine;
pub mod model;
pub mod output;
pub mod report;
pub mod server;
