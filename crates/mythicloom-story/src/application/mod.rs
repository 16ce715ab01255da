//! Application layer: command/query handlers and the shared engine store.

pub mod command_handlers;
pub mod query_handlers;
pub mod store;
