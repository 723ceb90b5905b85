//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     .env → config → validate → logging → HTTP client → pipeline
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → flag set → loop stops between features → partial export → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - An interrupted run still writes the CSV for what was matched

pub mod shutdown;

pub use shutdown::Shutdown;
