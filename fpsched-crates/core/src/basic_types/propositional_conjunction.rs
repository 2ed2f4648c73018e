use std::ops::Deref;

use itertools::Itertools;

use crate::predicates::Predicate;

/// A conjunction of [`Predicate`]s, e.g. `[x >= 5] /\ [y <= 10]`. Conflicts use it to describe
/// the partial assignment which cannot be extended to a solution.
#[derive(Clone, Default, Eq)]
pub struct PropositionalConjunction {
    predicates: Vec<Predicate>,
}

impl PropositionalConjunction {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        PropositionalConjunction { predicates }
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn as_slice(&self) -> &[Predicate] {
        &self.predicates
    }
}

impl Deref for PropositionalConjunction {
    type Target = [Predicate];

    fn deref(&self) -> &Self::Target {
        &self.predicates
    }
}

impl Extend<Predicate> for PropositionalConjunction {
    fn extend<T: IntoIterator<Item = Predicate>>(&mut self, iter: T) {
        self.predicates.extend(iter);
    }
}

impl IntoIterator for PropositionalConjunction {
    type Item = Predicate;
    type IntoIter = std::vec::IntoIter<Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.into_iter()
    }
}

impl FromIterator<Predicate> for PropositionalConjunction {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        PropositionalConjunction {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Predicate>> for PropositionalConjunction {
    fn from(predicates: Vec<Predicate>) -> Self {
        PropositionalConjunction { predicates }
    }
}

impl From<Predicate> for PropositionalConjunction {
    fn from(predicate: Predicate) -> Self {
        PropositionalConjunction {
            predicates: vec![predicate],
        }
    }
}

/// Two conjunctions are equal when they contain the same predicates, regardless of order.
impl PartialEq for PropositionalConjunction {
    fn eq(&self, other: &Self) -> bool {
        self.predicates.len() == other.predicates.len()
            && self
                .predicates
                .iter()
                .all(|predicate| other.predicates.contains(predicate))
    }
}

impl std::fmt::Display for PropositionalConjunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.predicates.is_empty() {
            write!(f, "{{empty}}")
        } else {
            write!(f, "{}", self.predicates.iter().join(" /\\ "))
        }
    }
}

impl std::fmt::Debug for PropositionalConjunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
