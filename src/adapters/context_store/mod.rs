//! User context store adapters.
//!
//! - `InMemoryUserContextStore` - Process-local map with per-user locking

mod in_memory;

pub use in_memory::InMemoryUserContextStore;
