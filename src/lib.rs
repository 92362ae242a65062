pub mod cli;
pub mod config;
pub mod display;
pub mod export;
pub mod logging;
