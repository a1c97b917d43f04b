//! Backend layer
//!
//! Owns everything that does I/O: the REST provider and the async runtime
//! the core services run on, the config file, and the log file. The UI
//! only sees [`BackendEvent`]s.

mod config_store;
mod data_service;
mod logging;

pub use config_store::{config_path, load_config};
pub use data_service::{Backend, BackendEvent};
pub use logging::init_logging;
