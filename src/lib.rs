pub mod config;
pub mod engine;
pub mod error;
pub mod menubar;
pub mod preview;
pub mod renderer;
pub mod types;

pub use error::{Error, Result};
