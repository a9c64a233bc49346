pub mod api;
pub mod balance;
pub mod commands;
pub mod config;
pub mod db;
pub mod discord;
pub mod models;
pub mod store;
pub mod utils;
pub mod validator;
