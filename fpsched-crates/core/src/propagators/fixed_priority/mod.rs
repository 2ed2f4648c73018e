//! Response-time analysis for fixed-priority preemptive schedulers.
//!
//! Every task has an execution variable naming the scheduler it is mapped to, a blocking time,
//! a duration, and a response time. The [`FixedPrioritySchedulabilityPropagator`] for one
//! scheduler bounds the response times of the tasks mapped to it and detects task sets which
//! cannot meet those bounds.
mod interference;
mod options;
mod response_time;
mod schedulability;

pub use interference::InterferenceModel;
pub use options::*;
pub use response_time::*;
pub use schedulability::*;
