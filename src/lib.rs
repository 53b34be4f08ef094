pub mod api;
pub mod backend;
pub mod config;
pub mod domain;
pub mod logging;
pub mod terminal;
