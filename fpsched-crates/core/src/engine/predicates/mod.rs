pub(crate) mod predicate;
mod predicate_constructor;

pub use predicate::Predicate;
pub use predicate::PredicateType;
pub use predicate_constructor::PredicateConstructor;
