#![forbid(unsafe_code)]

//! Warehouse Runtime
//!
//! Wraps the warehouse engine with configuration loading, command parsing,
//! interactive sessions and state comparison.
//!
//! No simulation logic lives here. All of it is delegated to the engine.

pub mod command;
pub mod config;
pub mod drift;
pub mod logging;
pub mod session;
