//! Mythicloom Core — shared domain abstractions.
//!
//! This crate defines the time, identity, command and error types that the
//! story context and the API layer depend on. It contains no infrastructure
//! code.

pub mod clock;
pub mod command;
pub mod error;
pub mod id;
