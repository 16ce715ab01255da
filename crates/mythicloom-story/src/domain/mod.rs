//! Domain layer: records, commands and the story engine aggregate.

pub mod aggregates;
pub mod commands;
pub mod records;
pub mod values;
