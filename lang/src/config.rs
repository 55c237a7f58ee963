use tracing::warn;

/// Environment variable overriding [`RuntimeConfig::max_trace_frames`].
pub const MAX_TRACE_FRAMES_ENV: &str = "SEQUIN_MAX_TRACE_FRAMES";

pub const DEFAULT_MAX_TRACE_FRAMES: usize = 64;

/// Read-only runtime settings shared by the error factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Upper bound on frames kept by the with-trace error path
    pub max_trace_frames: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_trace_frames: DEFAULT_MAX_TRACE_FRAMES,
        }
    }
}

impl RuntimeConfig {
    /// Load settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_TRACE_FRAMES_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(frames) => config.max_trace_frames = frames,
                Err(err) => warn!(
                    value = %raw,
                    error = %err,
                    "ignoring invalid {MAX_TRACE_FRAMES_ENV}"
                ),
            }
        }

        config
    }
}
