use log::trace;

use crate::fpsched_assert_moderate;

/// The demand of a task which can preempt the task under analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interferer {
    /// The worst-case execution time of one job.
    pub duration: i64,
    /// The minimum inter-arrival time of jobs; strictly positive.
    pub period: i64,
}

/// The outcome of the busy-window iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseTime {
    /// The least fixed point of the recurrence.
    Converged { value: i64, iterations: u32 },
    /// An iterate exceeded the ceiling; the task cannot meet it.
    Unschedulable { exceeded_at: i64, iterations: u32 },
}

impl ResponseTime {
    pub fn iterations(&self) -> u32 {
        match self {
            ResponseTime::Converged { iterations, .. }
            | ResponseTime::Unschedulable { iterations, .. } => *iterations,
        }
    }

    pub fn converged_value(&self) -> Option<i64> {
        match self {
            ResponseTime::Converged { value, .. } => Some(*value),
            ResponseTime::Unschedulable { .. } => None,
        }
    }
}

/// Computes the worst-case response time of a task under fixed-priority preemptive scheduling
/// as the least fixed point of
///
/// ```text
/// rt(0)   = blocking + duration
/// rt(k+1) = blocking + duration + sum_j interferer_j.duration * (floor(rt(k) / interferer_j.period) + 1)
/// ```
///
/// The iterates never decrease, so the search is cut off as soon as one exceeds `ceiling` and
/// [`ResponseTime::Unschedulable`] is returned. All inputs are expected to be non-negative and
/// periods strictly positive; arithmetic saturates instead of overflowing.
pub fn response_time_bound(
    blocking: i64,
    duration: i64,
    interferers: &[Interferer],
    ceiling: i64,
) -> ResponseTime {
    let own_demand = blocking.saturating_add(duration);

    let mut response_time = own_demand;
    let mut iterations = 0;

    loop {
        if response_time > ceiling {
            return ResponseTime::Unschedulable {
                exceeded_at: response_time,
                iterations,
            };
        }

        iterations += 1;
        let next = interferers.iter().fold(own_demand, |demand, interferer| {
            let releases = response_time / interferer.period + 1;
            demand.saturating_add(interferer.duration.saturating_mul(releases))
        });
        trace!("busy window iterate {iterations}: {response_time} -> {next}");

        if next == response_time {
            return ResponseTime::Converged {
                value: response_time,
                iterations,
            };
        }

        fpsched_assert_moderate!(
            next > response_time,
            "the busy-window iterates never decrease, but went from {response_time} to {next}"
        );
        response_time = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "the busy-window iterates never decrease")]
    fn negative_interferer_demand_is_rejected() {
        let _ = response_time_bound(
            0,
            4,
            &[Interferer {
                duration: -2,
                period: 5,
            }],
            100,
        );
    }

    #[test]
    fn no_interferers_converges_in_one_iteration() {
        assert_eq!(
            response_time_bound(3, 4, &[], 100),
            ResponseTime::Converged {
                value: 7,
                iterations: 1
            }
        );
    }

    #[test]
    fn two_task_example() {
        // 4 -> 6 -> 8 -> 8
        let result = response_time_bound(
            0,
            4,
            &[Interferer {
                duration: 2,
                period: 5,
            }],
            100,
        );

        assert_eq!(
            result,
            ResponseTime::Converged {
                value: 8,
                iterations: 3
            }
        );
    }

    #[test]
    fn textbook_task_set() {
        // Periods 7, 12 and 20 with costs 3, 3 and 5 in rate-monotonic order.
        // 5 -> 11 -> 14 -> 20 -> 20
        let interferers = [
            Interferer {
                duration: 3,
                period: 7,
            },
            Interferer {
                duration: 3,
                period: 12,
            },
        ];

        assert_eq!(
            response_time_bound(0, 5, &interferers, 20),
            ResponseTime::Converged {
                value: 20,
                iterations: 4
            }
        );
        assert_eq!(
            response_time_bound(0, 3, &interferers[..1], 12).converged_value(),
            Some(6)
        );
    }

    #[test]
    fn exceeding_the_ceiling_is_unschedulable() {
        // Utilisation 4/5 + 2/5 > 1, the iteration diverges.
        let result = response_time_bound(
            0,
            4,
            &[Interferer {
                duration: 2,
                period: 5,
            }],
            5,
        );

        assert!(matches!(
            result,
            ResponseTime::Unschedulable { exceeded_at, .. } if exceeded_at > 5
        ));
    }

    #[test]
    fn own_demand_above_ceiling_fails_immediately() {
        assert_eq!(
            response_time_bound(2, 4, &[], 5),
            ResponseTime::Unschedulable {
                exceeded_at: 6,
                iterations: 0
            }
        );
    }

    #[test]
    fn fixed_point_equal_to_ceiling_is_accepted() {
        assert_eq!(
            response_time_bound(0, 4, &[], 4).converged_value(),
            Some(4)
        );
    }
}
