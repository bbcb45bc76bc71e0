use std::fmt::Display;

use super::DomainChange;
use super::DomainEvent;
use super::EmptyDomain;

/// The domain of a real variable: the closed interval `[lower, upper]`.
///
/// Comparisons use the `precision` tolerance instead of exact equality. A bound is only
/// tightened when the new bound improves it by more than the precision, which guarantees that
/// propagation over real variables reaches a fixed point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealDomain {
    lower: f64,
    upper: f64,
    precision: f64,
}

impl RealDomain {
    /// Panics if the bounds are not finite and ordered, or if the precision is not positive.
    pub fn new(lower: f64, upper: f64, precision: f64) -> RealDomain {
        assert!(
            lower.is_finite() && upper.is_finite() && lower <= upper,
            "invalid real bounds [{lower}, {upper}]"
        );
        assert!(precision > 0.0 && precision.is_finite());

        RealDomain {
            lower,
            upper,
            precision,
        }
    }

    pub fn min(&self) -> f64 {
        self.lower
    }

    pub fn max(&self) -> f64 {
        self.upper
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// The midpoint of the interval.
    pub fn mid(&self) -> f64 {
        self.lower + (self.upper - self.lower) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// An interval no wider than the precision is considered a single value.
    pub fn is_singleton(&self) -> bool {
        self.width() <= self.precision
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower - self.precision <= value && value <= self.upper + self.precision
    }

    /// The number of precision-sized steps in the interval, at least one.
    pub fn num_steps(&self) -> u64 {
        ((self.width() / self.precision).ceil() as u64).max(1)
    }

    /// Tightens the lower bound to `value`.
    pub fn set_min(&mut self, value: f64) -> Result<DomainChange, EmptyDomain> {
        if value > self.upper + self.precision {
            return Err(EmptyDomain);
        }
        if value - self.lower <= self.precision {
            return Ok(DomainChange::empty());
        }

        let was_singleton = self.is_singleton();
        self.lower = value.min(self.upper);

        Ok(self.change(DomainEvent::LowerBound, was_singleton))
    }

    /// Tightens the upper bound to `value`.
    pub fn set_max(&mut self, value: f64) -> Result<DomainChange, EmptyDomain> {
        if value < self.lower - self.precision {
            return Err(EmptyDomain);
        }
        if self.upper - value <= self.precision {
            return Ok(DomainChange::empty());
        }

        let was_singleton = self.is_singleton();
        self.upper = value.max(self.lower);

        Ok(self.change(DomainEvent::UpperBound, was_singleton))
    }

    fn change(&self, event: DomainEvent, was_singleton: bool) -> DomainChange {
        let mut change = DomainChange::only(event);
        if !was_singleton && self.is_singleton() {
            let _ = change.insert(DomainEvent::Assign);
        }
        change
    }
}

impl Display for RealDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insignificant_tightening_is_ignored() {
        let mut domain = RealDomain::new(0.0, 1.0, 0.01);

        assert!(domain.set_min(0.005).expect("feasible").is_empty());
        assert_eq!(0.0, domain.min());
    }

    #[test]
    fn significant_tightening_is_applied() {
        let mut domain = RealDomain::new(0.0, 1.0, 0.01);

        let change = domain.set_max(0.5).expect("feasible");

        assert_eq!(DomainChange::only(DomainEvent::UpperBound), change);
        assert_eq!(0.5, domain.max());
    }

    #[test]
    fn crossing_within_the_precision_collapses_the_interval() {
        let mut domain = RealDomain::new(0.0, 1.0, 0.01);

        let change = domain.set_min(1.005).expect("within tolerance");

        assert!(change.contains(DomainEvent::Assign));
        assert_eq!(1.0, domain.min());
        assert!(domain.is_singleton());
    }

    #[test]
    fn crossing_beyond_the_precision_fails() {
        let mut domain = RealDomain::new(0.0, 1.0, 0.01);

        assert_eq!(Err(EmptyDomain), domain.set_min(1.5));
        assert_eq!(Err(EmptyDomain), domain.set_max(-0.5));
    }

    #[test]
    fn contains_uses_the_tolerance() {
        let domain = RealDomain::new(0.0, 1.0, 0.01);

        assert!(domain.contains(1.005));
        assert!(!domain.contains(1.02));
    }
}
