//! Timing configuration for device commands and UI settling

use lazy_static::lazy_static;
use std::env;
use std::time::Duration;

/// Read a seconds value from the environment, falling back to `default`
///
/// Values that do not fit a [`Duration`] count as invalid.
fn env_secs(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v: &f64| Duration::try_from_secs_f64(*v).is_ok())
        .unwrap_or(default)
}

/// Convert seconds to a [`Duration`], saturating values too large to represent
pub(crate) fn secs_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// Timeout applied to every external device command
#[derive(Debug, Clone)]
pub struct CommandTimingConfig {
    pub command_timeout: f64,
}

impl CommandTimingConfig {
    pub fn timeout(&self) -> Duration {
        secs_duration(self.command_timeout)
    }
}

impl Default for CommandTimingConfig {
    fn default() -> Self {
        Self {
            command_timeout: env_secs("BUGGYCALC_COMMAND_TIMEOUT", 30.0),
        }
    }
}

/// Fixed settle delays inserted by the page object
#[derive(Debug, Clone)]
pub struct PageTimingConfig {
    pub launch_delay: f64,
    pub tap_delay: f64,
}

impl PageTimingConfig {
    /// A config with no settle delays at all
    pub fn immediate() -> Self {
        Self {
            launch_delay: 0.0,
            tap_delay: 0.0,
        }
    }
}

impl Default for PageTimingConfig {
    fn default() -> Self {
        Self {
            launch_delay: env_secs("BUGGYCALC_LAUNCH_DELAY", 2.0),
            tap_delay: env_secs("BUGGYCALC_TAP_DELAY", 0.5),
        }
    }
}

/// Master timing configuration
#[derive(Debug, Clone, Default)]
pub struct TimingConfig {
    pub command: CommandTimingConfig,
    pub page: PageTimingConfig,
}

lazy_static! {
    /// Global timing configuration instance
    pub static ref TIMING_CONFIG: TimingConfig = TimingConfig::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_secs_falls_back_on_garbage() {
        env::set_var("BUGGYCALC_TEST_GARBAGE_DELAY", "soon");
        assert_eq!(env_secs("BUGGYCALC_TEST_GARBAGE_DELAY", 0.5), 0.5);
        env::set_var("BUGGYCALC_TEST_GARBAGE_DELAY", "-3");
        assert_eq!(env_secs("BUGGYCALC_TEST_GARBAGE_DELAY", 0.5), 0.5);
        env::remove_var("BUGGYCALC_TEST_GARBAGE_DELAY");
    }

    #[test]
    fn test_env_secs_falls_back_on_out_of_range() {
        env::set_var("BUGGYCALC_TEST_HUGE_DELAY", "1e20");
        assert_eq!(env_secs("BUGGYCALC_TEST_HUGE_DELAY", 30.0), 30.0);
        env::set_var("BUGGYCALC_TEST_HUGE_DELAY", "inf");
        assert_eq!(env_secs("BUGGYCALC_TEST_HUGE_DELAY", 30.0), 30.0);
        env::set_var("BUGGYCALC_TEST_HUGE_DELAY", "NaN");
        assert_eq!(env_secs("BUGGYCALC_TEST_HUGE_DELAY", 30.0), 30.0);
        env::remove_var("BUGGYCALC_TEST_HUGE_DELAY");
    }

    #[test]
    fn test_oversized_timeout_saturates() {
        let config = CommandTimingConfig {
            command_timeout: 1e20,
        };
        assert_eq!(config.timeout(), Duration::MAX);
        assert_eq!(secs_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_env_secs_reads_override() {
        env::set_var("BUGGYCALC_TEST_OVERRIDE_DELAY", "1.25");
        assert_eq!(env_secs("BUGGYCALC_TEST_OVERRIDE_DELAY", 0.5), 1.25);
        env::remove_var("BUGGYCALC_TEST_OVERRIDE_DELAY");
    }

    #[test]
    fn test_unset_variable_uses_default() {
        assert_eq!(env_secs("BUGGYCALC_TEST_NEVER_SET", 30.0), 30.0);
    }

    #[test]
    fn test_command_timeout_duration() {
        let config = CommandTimingConfig {
            command_timeout: 30.0,
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_immediate_has_no_delays() {
        let page = PageTimingConfig::immediate();
        assert_eq!(page.launch_delay, 0.0);
        assert_eq!(page.tap_delay, 0.0);
    }
}
