use enumset::enum_set;
use enumset::EnumSet;

use crate::engine::domains::DomainEvent;

/// A set of [`DomainEvent`]s a propagator subscribes to for one of its variables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Lower and upper bound tightening (but not other value removal).
    pub const BOUNDS: DomainEvents =
        DomainEvents::create(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    /// Every change to an integer domain.
    pub const ANY_INT: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    /// Only lower bound tightening.
    pub const LOWER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::LowerBound));
    /// Only upper bound tightening.
    pub const UPPER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::UpperBound));
    /// Only the domain collapsing to a single value.
    pub const ASSIGN: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::Assign));
    /// Every change to a set domain.
    pub const ANY_SET: DomainEvents =
        DomainEvents::create(enum_set!(DomainEvent::GlbChange | DomainEvent::LubChange));
    /// Only growth of the glb of a set domain.
    pub const GLB: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::GlbChange));
    /// Only shrinking of the lub of a set domain.
    pub const LUB: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::LubChange));

    pub(crate) const fn create(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
