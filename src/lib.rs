pub mod config;
pub mod constants;
pub mod error;
pub mod html;
pub mod logging;
pub mod pipeline;
pub mod types;
