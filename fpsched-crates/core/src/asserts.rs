//! Internal consistency checks whose cost is tied to a level. Without `debug-checks` only the
//! cheap checks run.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const FPSCHED_ASSERT_LEVEL_DEFINITION: u8 = FPSCHED_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const FPSCHED_ASSERT_LEVEL_DEFINITION: u8 = FPSCHED_ASSERT_ADVANCED;

pub const FPSCHED_ASSERT_SIMPLE: u8 = 1;
pub const FPSCHED_ASSERT_MODERATE: u8 = 2;
pub const FPSCHED_ASSERT_ADVANCED: u8 = 3;
pub const FPSCHED_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! fpsched_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FPSCHED_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FPSCHED_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fpsched_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FPSCHED_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FPSCHED_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fpsched_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::FPSCHED_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FPSCHED_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fpsched_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::FPSCHED_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FPSCHED_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fpsched_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::FPSCHED_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FPSCHED_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
