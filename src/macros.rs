// Diagnostic events, compiled out unless the `tracing` feature is enabled.

macro_rules! trace_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!(target: "flex_buffer", $($arg)+);
        }
    };
}

macro_rules! debug_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!(target: "flex_buffer", $($arg)+);
        }
    };
}
