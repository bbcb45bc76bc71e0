//! Provides the [`ValueSelector`] trait which is required for value selectors to implement; the
//! main method in this trait is [`ValueSelector::select_value`], which splits the domain of the
//! selected variable into the alternatives of a [`ChoicePoint`].
//!
//! Features implementations of commonly used value selectors such as [`InDomainMin`],
//! [`InDomainMax`], [`InDomainSplit`] and [`InDomainEnumerate`].

mod in_domain_enumerate;
mod in_domain_max;
mod in_domain_min;
mod in_domain_split;
mod value_selector;

pub use in_domain_enumerate::InDomainEnumerate;
pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use in_domain_split::InDomainSplit;
pub use value_selector::ValueSelector;

#[cfg(doc)]
use crate::branching::ChoicePoint;
