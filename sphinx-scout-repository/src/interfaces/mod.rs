//! Interface definitions for the Sphinx search driver.
//!
//! These traits are the seams of the engine: the query-execution client, the
//! records being indexed, and the store that hydrates search hits back into
//! records. Each can be swapped for a test double.

mod hydration_source;
mod query_executor;
mod searchable;

pub use hydration_source::HydrationSource;
pub use query_executor::SphinxQlExecutor;
pub use searchable::Searchable;
