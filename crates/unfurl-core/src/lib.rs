pub mod config;
pub mod logging;

pub mod cache;
pub mod document;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod icon;
pub mod origin;
pub mod overrides;
pub mod theme;

pub use handler::{Handled, Resolution, Unfurler};
