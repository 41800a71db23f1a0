//! Domain types shared across the region sales dashboard.
//!
//! Holds the typed sales record model, the derived view shapes, the common
//! error type, number formatting helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{Result, SalesError};
