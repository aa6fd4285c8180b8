pub mod cache;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod forms;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
