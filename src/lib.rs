pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod review;
pub mod status;
pub mod store;
