//! Error types for the Sphinx search driver.

mod sphinx_error;

pub use sphinx_error::SphinxError;
