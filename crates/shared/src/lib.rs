pub mod config;
pub mod controller;
pub mod filter;
pub mod geo;
pub mod markers;
pub mod models;
pub mod viewport;
