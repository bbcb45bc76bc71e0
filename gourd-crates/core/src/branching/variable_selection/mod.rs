//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is the [`VariableSelector::select_variable`] method.
//!
//! Features implementations of commonly used variable selectors such as [`InputOrder`],
//! [`FirstFail`] and [`DomOverWeightedDegree`].

mod dom_over_weighted_degree;
mod first_fail;
mod input_order;
mod variable_selector;

pub use dom_over_weighted_degree::DomOverWeightedDegree;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use variable_selector::VariableSelector;
