use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to an integer domain that propagators can subscribe to.
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    /// The domain collapsed to a single value.
    Assign,
    /// The lower bound increased.
    LowerBound,
    /// The upper bound decreased.
    UpperBound,
    /// At least one value left the domain. This includes values removed by a bound change.
    Removal,
}

/// The set of [`DomainEvent`]s a propagator registers for on one variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Lower and upper bound tightening.
    pub const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    /// Every change to the domain.
    pub const ANY_INT: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Removal
    ));
    pub const LOWER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::UpperBound));
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));
    /// Removal of a value, or the domain becoming fixed.
    pub const REMOVAL_OR_ASSIGN: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::Removal | DomainEvent::Assign));

    pub const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }

    pub fn union(self, other: DomainEvents) -> DomainEvents {
        DomainEvents {
            events: self.events | other.events,
        }
    }
}
