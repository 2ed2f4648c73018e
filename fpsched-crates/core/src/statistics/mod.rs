//! Counters of the solver, the engine and every propagator, written as `{prefix} {name}={value}`
//! lines once [`configure_statistic_logging`] has been called.
mod logger;
mod sink;

pub use logger::StatisticLogger;
pub use sink::configure_statistic_logging;
pub(crate) use sink::is_statistic_logging_enabled;
pub(crate) use sink::write_closing_line;

/// A group of counters which writes each of them through a [`StatisticLogger`].
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

/// Declares a struct of counters starting at zero, whose [`Statistic`] implementation writes
/// every counter under its field name.
///
/// # Example
/// ```rust
/// # use fpsched_core::create_statistics_struct;
/// create_statistics_struct!(Statistics {
///     number_of_calls: usize
/// });
///
/// let statistics = Statistics::default();
///
/// assert_eq!(statistics.number_of_calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$doc:meta])* $name:ident { $($(#[$field_doc:meta])* $field:ident : $type:ty),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Default, Debug, Copy, Clone)]
        pub(crate) struct $name {
            $($(#[$field_doc])* pub(crate) $field: $type,)+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $(statistic_logger.counter(stringify!($field), self.$field);)+
            }
        }
    };
}
