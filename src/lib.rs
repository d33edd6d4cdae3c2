pub mod error;
pub mod validation;
pub mod config;
pub mod model;
pub mod db;
pub mod api;
pub mod planner;
pub mod session;
pub mod cli;
