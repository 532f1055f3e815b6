pub mod api;
pub mod api_docs;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod seed;
pub mod server;
pub mod services;
pub mod utils;
