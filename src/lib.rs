pub mod accounting;
pub mod config;
pub mod data;
pub mod shell;
