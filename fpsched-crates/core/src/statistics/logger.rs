use std::fmt::Display;

use itertools::Itertools;

use super::sink::write_statistic;

/// Names the statistics of one component. A logger for
/// `["FixedPrioritySchedulability", "number", "0"]` writes the counter `num_tightenings` as
/// `FixedPrioritySchedulability_number_0_num_tightenings`.
#[derive(Debug, Clone)]
pub struct StatisticLogger {
    scope: String,
}

impl StatisticLogger {
    pub fn new(scope: impl IntoIterator<Item = impl Display>) -> Self {
        StatisticLogger {
            scope: scope.into_iter().join("_"),
        }
    }

    /// Writes `value` as the statistic `{scope}_{name}`.
    pub fn counter(&self, name: &str, value: impl Display) {
        write_statistic(format_args!("{}_{name}", self.scope), value);
    }
}

#[cfg(test)]
mod tests {
    use super::StatisticLogger;

    #[test]
    fn scope_segments_are_separated_by_underscores() {
        let logger = StatisticLogger::new(["FixedPrioritySchedulability", "number", "3"]);
        assert_eq!(logger.scope, "FixedPrioritySchedulability_number_3");
    }
}
