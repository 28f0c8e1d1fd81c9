pub mod commands;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod email;
pub mod error;
pub mod settings;
pub mod startup;
pub mod utils;
pub mod view;

mod shutdown;
