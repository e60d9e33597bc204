pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod lookup;
pub mod observability;
pub mod routes;
pub mod state;
pub mod types;
