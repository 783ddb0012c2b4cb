pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod repo;
pub mod store;
