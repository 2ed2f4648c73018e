use enumset::EnumSet;

use crate::basic_types::Trail;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::engine::notifications::DomainEvent;
use crate::engine::variables::DomainId;
use crate::fpsched_assert_extreme;
use crate::fpsched_assert_moderate;
use crate::fpsched_assert_simple;
use crate::predicates::Predicate;
use crate::predicates::PredicateType;

/// The bound store: the current domain of every integer variable, together with an undo log so
/// that domains can be restored when search backtracks.
///
/// Domains only ever shrink through [`Assignments::post_predicate`]. The bounds of a domain are
/// always values which are in the domain.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<TrailEntry>,
    /// Changes which have not yet been dispatched to propagators.
    events: Vec<(DomainId, EnumSet<DomainEvent>)>,
}

/// Raised when a change would leave a domain without values. The domain is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    /// Values strictly between the bounds which have been removed.
    holes: HashSet<i32>,
}

impl IntegerDomain {
    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && !self.holes.contains(&value)
    }
}

#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    predicate: Predicate,
    old_lower_bound: i32,
    old_upper_bound: i32,
    /// Set when the change punched a hole in the domain rather than moving a bound.
    removed_value: Option<i32>,
}

impl Assignments {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        fpsched_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create an empty domain [{lower_bound}, {upper_bound}]"
        );

        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes: HashSet::default(),
        })
    }

    /// Creates a variable whose domain is exactly `values`.
    pub(crate) fn create_new_integer_variable_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        fpsched_assert_simple!(!values.is_empty(), "cannot create an empty domain");

        values.sort_unstable();
        values.dedup();

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let holes = values
            .windows(2)
            .flat_map(|pair| (pair[0] + 1)..pair[1])
            .collect();

        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes,
        })
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    /// Iterates the values of the domain in increasing order.
    #[cfg(test)]
    pub(crate) fn get_domain_iterator(
        &self,
        domain_id: DomainId,
    ) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(move |value| domain.contains(*value))
    }

    #[cfg(test)]
    pub(crate) fn get_domain_size(&self, domain_id: DomainId) -> usize {
        let domain = &self.domains[domain_id];
        let span = (domain.upper_bound as i64 - domain.lower_bound as i64 + 1) as usize;
        span - domain
            .holes
            .iter()
            .filter(|hole| domain.lower_bound < **hole && **hole < domain.upper_bound)
            .count()
    }

    /// Returns `Some(true)` if the predicate holds for every value in the domain, `Some(false)`
    /// if it holds for none, and `None` otherwise.
    pub(crate) fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        let domain_id = predicate.get_domain();
        let value = predicate.get_right_hand_side();
        let lower_bound = self.get_lower_bound(domain_id);
        let upper_bound = self.get_upper_bound(domain_id);

        match predicate.get_predicate_type() {
            PredicateType::LowerBound => {
                if lower_bound >= value {
                    Some(true)
                } else if upper_bound < value {
                    Some(false)
                } else {
                    None
                }
            }
            PredicateType::UpperBound => {
                if upper_bound <= value {
                    Some(true)
                } else if lower_bound > value {
                    Some(false)
                } else {
                    None
                }
            }
            PredicateType::Equal => {
                if !self.is_value_in_domain(domain_id, value) {
                    Some(false)
                } else if lower_bound == upper_bound {
                    Some(true)
                } else {
                    None
                }
            }
            PredicateType::NotEqual => {
                if !self.is_value_in_domain(domain_id, value) {
                    Some(true)
                } else if lower_bound == upper_bound {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }

    /// Narrows the domain so that `predicate` holds.
    ///
    /// Returns `Ok(true)` if the domain changed, `Ok(false)` if the predicate already held, and
    /// [`EmptyDomain`] if no value of the domain satisfies it. In the last case the domain is not
    /// modified.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        let domain_id = predicate.get_domain();
        let value = predicate.get_right_hand_side();
        let domain = &self.domains[domain_id];

        let old_lower_bound = domain.lower_bound;
        let old_upper_bound = domain.upper_bound;
        let mut new_lower_bound = old_lower_bound;
        let mut new_upper_bound = old_upper_bound;
        let mut removed_value = None;

        match predicate.get_predicate_type() {
            PredicateType::LowerBound => {
                if value <= old_lower_bound {
                    return Ok(false);
                }
                new_lower_bound = value;
            }
            PredicateType::UpperBound => {
                if value >= old_upper_bound {
                    return Ok(false);
                }
                new_upper_bound = value;
            }
            PredicateType::Equal => {
                if !domain.contains(value) {
                    return Err(EmptyDomain);
                }
                if old_lower_bound == old_upper_bound {
                    return Ok(false);
                }
                new_lower_bound = value;
                new_upper_bound = value;
            }
            PredicateType::NotEqual => {
                if !domain.contains(value) {
                    return Ok(false);
                }
                if value == old_lower_bound {
                    new_lower_bound = value.saturating_add(1);
                } else if value == old_upper_bound {
                    new_upper_bound = value.saturating_sub(1);
                } else {
                    removed_value = Some(value);
                }
            }
        }

        // Bounds are kept on values that are in the domain.
        while new_lower_bound <= new_upper_bound && domain.holes.contains(&new_lower_bound) {
            new_lower_bound += 1;
        }
        while new_lower_bound <= new_upper_bound && domain.holes.contains(&new_upper_bound) {
            new_upper_bound -= 1;
        }

        if new_lower_bound > new_upper_bound {
            return Err(EmptyDomain);
        }

        self.trail.push(TrailEntry {
            predicate,
            old_lower_bound,
            old_upper_bound,
            removed_value,
        });

        let domain = &mut self.domains[domain_id];
        domain.lower_bound = new_lower_bound;
        domain.upper_bound = new_upper_bound;
        if let Some(value) = removed_value {
            let _ = domain.holes.insert(value);
        }

        let mut events = EnumSet::only(DomainEvent::Removal);
        if new_lower_bound > old_lower_bound {
            events |= DomainEvent::LowerBound;
        }
        if new_upper_bound < old_upper_bound {
            events |= DomainEvent::UpperBound;
        }
        if new_lower_bound == new_upper_bound && old_lower_bound != old_upper_bound {
            events |= DomainEvent::Assign;
        }
        self.events.push((domain_id, events));

        fpsched_assert_extreme!(
            self.domains[domain_id].contains(new_lower_bound)
                && self.domains[domain_id].contains(new_upper_bound)
        );

        Ok(true)
    }

    /// Takes the changes made since the last call, in the order in which they happened.
    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainId, EnumSet<DomainEvent>)> + '_ {
        self.events.drain(..)
    }

    pub(crate) fn discard_domain_events(&mut self) {
        self.events.clear();
    }

    /// Restores every domain to how it was when `checkpoint` was the current checkpoint.
    ///
    /// Pending events are discarded since they describe changes which no longer exist.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        fpsched_assert_moderate!(checkpoint < self.get_checkpoint());

        self.events.clear();

        for entry in self.trail.synchronise(checkpoint) {
            let domain = &mut self.domains[entry.predicate.get_domain()];
            domain.lower_bound = entry.old_lower_bound;
            domain.upper_bound = entry.old_upper_bound;
            if let Some(value) = entry.removed_value {
                let _ = domain.holes.remove(&value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn removing_a_bound_skips_existing_holes() {
        let mut assignments = Assignments::default();
        let x = assignments.create_new_integer_variable_sparse(vec![1, 3, 4, 7]);

        assert_eq!(assignments.get_domain_size(x), 4);
        assert_eq!(assignments.post_predicate(predicate!(x != 1)), Ok(true));
        assert_eq!(assignments.get_lower_bound(x), 3);

        assert_eq!(assignments.post_predicate(predicate!(x <= 6)), Ok(true));
        assert_eq!(assignments.get_upper_bound(x), 4);
        assert_eq!(assignments.get_domain_iterator(x).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn posting_an_entailed_predicate_does_nothing() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        assert_eq!(assignments.post_predicate(predicate!(x >= 0)), Ok(false));
        assert_eq!(assignments.post_predicate(predicate!(x != 11)), Ok(false));
        assert_eq!(assignments.drain_domain_events().count(), 0);
    }

    #[test]
    fn emptying_a_domain_leaves_it_untouched() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        assert_eq!(assignments.post_predicate(predicate!(x >= 11)), Err(EmptyDomain));
        assert_eq!(assignments.post_predicate(predicate!(x == 12)), Err(EmptyDomain));
        assert_eq!(assignments.get_lower_bound(x), 0);
        assert_eq!(assignments.get_upper_bound(x), 10);
    }

    #[test]
    fn events_describe_the_change() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        let _ = assignments.post_predicate(predicate!(x != 5));
        let _ = assignments.post_predicate(predicate!(x <= 6));
        let _ = assignments.post_predicate(predicate!(x >= 6));

        let events: Vec<_> = assignments.drain_domain_events().collect();
        assert_eq!(
            events,
            vec![
                (x, EnumSet::only(DomainEvent::Removal)),
                (x, DomainEvent::Removal | DomainEvent::UpperBound),
                (x, DomainEvent::Removal | DomainEvent::LowerBound | DomainEvent::Assign),
            ]
        );
    }

    #[test]
    fn synchronise_restores_bounds_and_holes() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        let _ = assignments.post_predicate(predicate!(x <= 8));
        assignments.new_checkpoint();
        let _ = assignments.post_predicate(predicate!(x != 4));
        let _ = assignments.post_predicate(predicate!(x >= 3));
        assert!(!assignments.is_value_in_domain(x, 4));

        assignments.synchronise(0);

        assert!(assignments.is_value_in_domain(x, 4));
        assert_eq!(assignments.get_lower_bound(x), 0);
        assert_eq!(assignments.get_upper_bound(x), 8);
        assert_eq!(assignments.get_checkpoint(), 0);
    }

    #[test]
    fn evaluate_predicate_is_three_valued() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(2, 6);

        assert_eq!(assignments.evaluate_predicate(predicate!(x >= 2)), Some(true));
        assert_eq!(assignments.evaluate_predicate(predicate!(x >= 7)), Some(false));
        assert_eq!(assignments.evaluate_predicate(predicate!(x == 4)), None);
        assert_eq!(assignments.evaluate_predicate(predicate!(x == 9)), Some(false));
        assert_eq!(assignments.evaluate_predicate(predicate!(x != 9)), Some(true));
    }
}
