pub mod client;
pub mod config;
pub mod contact;
pub mod db;
pub mod email;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
