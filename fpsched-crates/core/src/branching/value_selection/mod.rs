//! Selection of the value a chosen variable is fixed to.
mod in_domain_max;
mod in_domain_min;
mod value_selector;

pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use value_selector::ValueSelector;
