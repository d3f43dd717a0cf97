//! Conditional tracing macros
//!
//! These wrap tracing calls so the crate builds without the `tracing`
//! feature. With the feature off every call expands to nothing.

/// Log at debug level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Log at debug level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Log at trace level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
macro_rules! trace_trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

/// Log at trace level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace_trace {
    ($($arg:tt)*) => {};
}
