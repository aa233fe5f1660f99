//! CLI command handlers, one per file.

mod config;
mod inspect;
mod resolve;
mod serve;

pub use config::run_config;
pub use inspect::run_inspect;
pub use resolve::run_resolve;
pub use serve::run_serve;

#[cfg(test)]
pub use serve::router;
