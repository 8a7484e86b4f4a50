//! `earbudtracker` - An in-memory lost-and-found tracker for wireless earbuds
//!
//! This library provides the record store, the recency index, and the
//! interactive menu that drives them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod recency;
pub mod record;
pub mod shell;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recency::{MostRecent, RecencyIndex, RecordLookup};
pub use record::{Record, RecordId, Status};
pub use shell::Shell;
pub use store::{RecordStore, SearchFilter, StoreStats};
