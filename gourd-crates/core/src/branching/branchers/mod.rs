//! Provides several implementations of [`Brancher`]s.

pub mod independent_variable_value_brancher;
pub mod real_split_brancher;
pub mod sequential_brancher;
pub mod set_element_brancher;

#[cfg(doc)]
use super::Brancher;
