//! Tabular projection of skeleton diff trees.

pub mod table;
