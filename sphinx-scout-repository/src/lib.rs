//! # Sphinx Scout Repository
//!
//! This crate provides the traits and implementations for delegating
//! full-text search to a Sphinx or Manticore daemon over SphinxQL. It
//! includes definitions for errors, interfaces, the SphinxQL statement layer,
//! a MySQL-protocol client and the `SphinxEngine` facade.

pub mod config;
pub mod engine;
pub mod errors;
pub mod interfaces;
pub mod mapper;
pub mod sphinxql;

pub use config::EngineConfig;
pub use engine::SphinxEngine;
pub use errors::SphinxError;
pub use interfaces::{HydrationSource, Searchable, SphinxQlExecutor};
pub use sphinxql::{escape_match, MySqlSphinxClient, Statement};
