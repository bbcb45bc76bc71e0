//! A [`Brancher`] for real variables.

use log::warn;

use crate::branching::Brancher;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::propagation::ReadDomains;
use crate::variables::RealVariable;

/// Bisects the first real variable (in input order) whose interval can still be split, first
/// exploring the lower half.
///
/// An interval is split at its midpoint as long as both halves differ from the interval by more
/// than the precision; narrower intervals are considered fixed.
#[derive(Debug, Clone)]
pub struct RealSplitBrancher {
    reals: Vec<RealVariable>,
}

impl RealSplitBrancher {
    pub fn new(reals: &[RealVariable]) -> Self {
        if reals.is_empty() {
            warn!("The RealSplitBrancher was not provided with any variables");
        }
        RealSplitBrancher {
            reals: reals.to_vec(),
        }
    }
}

impl Brancher for RealSplitBrancher {
    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint> {
        self.reals.iter().find_map(|&real| {
            let domain = context.real_domain(real);
            if domain.width() <= 2.0 * domain.precision() {
                return None;
            }

            let mid = domain.mid();
            Some(ChoicePoint::new(vec![
                real.upper_bound_predicate(mid),
                real.lower_bound_predicate(mid),
            ]))
        })
    }
}
