pub mod components;
pub mod config;
pub mod error;
pub mod rendering;
pub mod utils;
