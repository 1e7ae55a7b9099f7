//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and
//! form controller as an `Arc<CoreConfig>`. Nothing in the core reads environment variables
//! while handling user actions; the binary reads them and hands the raw values to
//! [`CoreConfig::from_env_values`].

use crate::constants::{DEFAULT_FETCH_DELAY_MS, DEFAULT_SUBMIT_DELAY_MS, PAGE_SIZE};
use crate::{PatientError, PatientResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    fetch_delay: Duration,
    submit_delay: Duration,
    page_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            page_size: PAGE_SIZE,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `page_size` is zero.
    pub fn new(
        fetch_delay: Duration,
        submit_delay: Duration,
        page_size: usize,
    ) -> PatientResult<Self> {
        if page_size == 0 {
            return Err(PatientError::InvalidInput(
                "page_size must be at least 1".into(),
            ));
        }

        Ok(Self {
            fetch_delay,
            submit_delay,
            page_size,
        })
    }

    /// Zero-latency configuration, for tests and scripted runs.
    pub fn immediate() -> Self {
        Self {
            fetch_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            page_size: PAGE_SIZE,
        }
    }

    /// Build from raw environment values (`None` when a variable is unset).
    pub fn from_env_values(
        fetch_delay_ms: Option<String>,
        submit_delay_ms: Option<String>,
    ) -> PatientResult<Self> {
        Self::new(
            delay_from_env_value(fetch_delay_ms, DEFAULT_FETCH_DELAY_MS)?,
            delay_from_env_value(submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS)?,
            PAGE_SIZE,
        )
    }

    pub fn fetch_delay(&self) -> Duration {
        self.fetch_delay
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Parse a millisecond delay from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default_ms`.
pub fn delay_from_env_value(value: Option<String>, default_ms: u64) -> PatientResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let millis = match value {
        Some(v) => v.parse::<u64>().map_err(|e| {
            PatientError::InvalidInput(format!("invalid delay '{}' (milliseconds): {}", v, e))
        })?,
        None => default_ms,
    };

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_documented_latencies() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.fetch_delay(), Duration::from_millis(500));
        assert_eq!(cfg.submit_delay(), Duration::from_millis(1000));
        assert_eq!(cfg.page_size(), 5);
    }

    #[test]
    fn new_rejects_zero_page_size() {
        let err = CoreConfig::new(Duration::ZERO, Duration::ZERO, 0)
            .expect_err("zero page size should be rejected");
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }

    #[test]
    fn delay_falls_back_to_default_when_unset_or_blank() {
        assert_eq!(
            delay_from_env_value(None, 250).unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(
            delay_from_env_value(Some("   ".into()), 250).unwrap(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn delay_parses_trimmed_value() {
        assert_eq!(
            delay_from_env_value(Some(" 0 ".into()), 250).unwrap(),
            Duration::ZERO
        );
    }

    #[test]
    fn delay_rejects_non_numeric() {
        let err = delay_from_env_value(Some("soon".into()), 250).expect_err("should fail");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("soon")));
    }

    #[test]
    fn from_env_values_combines_both_delays() {
        let cfg = CoreConfig::from_env_values(Some("10".into()), None).unwrap();
        assert_eq!(cfg.fetch_delay(), Duration::from_millis(10));
        assert_eq!(cfg.submit_delay(), Duration::from_millis(1000));
    }
}
