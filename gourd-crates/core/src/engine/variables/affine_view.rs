use enumset::EnumSet;
use num::integer::div_floor;

use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::cp::Assignments;
use crate::engine::cp::Watchers;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;

/// The integer variable `scale * inner + offset`, stored as the domain of `inner`.
///
/// A view never introduces a variable or a propagator. Every query is answered from the inner
/// domain and every tightening is translated back to it, rounding towards the values which are
/// images of the inner domain.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

/// A bound on the inner variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InnerBound {
    AtLeast(i32),
    AtMost(i32),
}

impl<Inner> AffineView<Inner> {
    /// # Panics
    /// If `scale` is zero, as such a view has no inverse.
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "a view with scale 0 cannot be inverted");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    fn is_negated(&self) -> bool {
        self.scale < 0
    }

    fn image(&self, inner_value: i32) -> i32 {
        self.scale * inner_value + self.offset
    }

    /// The inner value mapping to `value`, if there is one.
    fn preimage(&self, value: i32) -> Option<i32> {
        let shifted = value - self.offset;
        (shifted % self.scale == 0).then(|| shifted / self.scale)
    }

    /// `ceil((value - offset) / scale)`
    fn preimage_rounded_up(&self, value: i32) -> i32 {
        -div_floor(self.offset - value, self.scale)
    }

    /// `floor((value - offset) / scale)`
    fn preimage_rounded_down(&self, value: i32) -> i32 {
        div_floor(value - self.offset, self.scale)
    }

    /// The inner bound equivalent to `self >= value`.
    fn at_least(&self, value: i32) -> InnerBound {
        if self.is_negated() {
            InnerBound::AtMost(self.preimage_rounded_down(value))
        } else {
            InnerBound::AtLeast(self.preimage_rounded_up(value))
        }
    }

    /// The inner bound equivalent to `self <= value`.
    fn at_most(&self, value: i32) -> InnerBound {
        if self.is_negated() {
            InnerBound::AtLeast(self.preimage_rounded_up(value))
        } else {
            InnerBound::AtMost(self.preimage_rounded_down(value))
        }
    }

    /// Negation exchanges the roles of the two bounds.
    fn translate_event(&self, event: DomainEvent) -> DomainEvent {
        match event {
            DomainEvent::LowerBound if self.is_negated() => DomainEvent::UpperBound,
            DomainEvent::UpperBound if self.is_negated() => DomainEvent::LowerBound,
            event => event,
        }
    }
}

impl<Inner: IntegerVariable> AffineView<Inner> {
    fn tighten(&self, assignments: &mut Assignments, bound: InnerBound) -> Result<(), EmptyDomain> {
        match bound {
            InnerBound::AtLeast(value) => self.inner.set_lower_bound(assignments, value),
            InnerBound::AtMost(value) => self.inner.set_upper_bound(assignments, value),
        }
    }
}

impl<Inner: PredicateConstructor<Value = i32>> AffineView<Inner> {
    fn bound_predicate(&self, bound: InnerBound) -> Predicate {
        match bound {
            InnerBound::AtLeast(value) => self.inner.lower_bound_predicate(value),
            InnerBound::AtMost(value) => self.inner.upper_bound_predicate(value),
        }
    }
}

impl<Inner> IntegerVariable for AffineView<Inner>
where
    Inner: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        let inner = if self.is_negated() {
            self.inner.upper_bound(assignments)
        } else {
            self.inner.lower_bound(assignments)
        };
        self.image(inner)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        let inner = if self.is_negated() {
            self.inner.lower_bound(assignments)
        } else {
            self.inner.upper_bound(assignments)
        };
        self.image(inner)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        self.preimage(value)
            .is_some_and(|inner| self.inner.contains(assignments, inner))
    }

    fn size(&self, assignments: &Assignments) -> u64 {
        self.inner.size(assignments)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignments)
            .map(|inner| self.image(inner))
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        match self.preimage(value) {
            Some(inner) => self.inner.remove(assignments, inner),
            None => Ok(()),
        }
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.tighten(assignments, self.at_least(value))
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.tighten(assignments, self.at_most(value))
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        let inner_events = events
            .iter()
            .map(|event| self.translate_event(event))
            .collect();
        self.inner.watch_all(watchers, inner_events);
    }

    fn unpack_event(&self, event: DomainEvent) -> DomainEvent {
        self.translate_event(self.inner.unpack_event(event))
    }
}

impl<Inner> TransformableVariable<AffineView<Inner>> for AffineView<Inner>
where
    Inner: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<Inner> {
        // c * (a * x + b) = (c * a) * x + c * b
        AffineView::new(self.inner.clone(), self.scale * scale, self.offset * scale)
    }

    fn offset(&self, offset: i32) -> AffineView<Inner> {
        AffineView::new(self.inner.clone(), self.scale, self.offset + offset)
    }
}

impl<Inner: std::fmt::Debug> std::fmt::Debug for AffineView<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scale {
            1 => write!(f, "{:?}", self.inner)?,
            -1 => write!(f, "-{:?}", self.inner)?,
            scale => write!(f, "{scale}*{:?}", self.inner)?,
        }

        if self.offset != 0 {
            write!(f, "{:+}", self.offset)?;
        }
        Ok(())
    }
}

impl<Inner: PredicateConstructor<Value = i32>> PredicateConstructor for AffineView<Inner> {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        self.bound_predicate(self.at_least(bound))
    }

    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        self.bound_predicate(self.at_most(bound))
    }

    fn equality_predicate(&self, value: i32) -> Predicate {
        self.preimage(value)
            .map_or(Predicate::False, |inner| self.inner.equality_predicate(inner))
    }

    fn disequality_predicate(&self, value: i32) -> Predicate {
        self.preimage(value)
            .map_or(Predicate::True, |inner| self.inner.disequality_predicate(inner))
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}
