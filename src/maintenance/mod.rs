//! Background maintenance tasks.

pub mod cleanup;
