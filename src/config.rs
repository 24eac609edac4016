use std::env;
use std::time::Duration;

use crate::summary::TieBreak;

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub tie_break: TieBreak,
    pub tick_rate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            tick_rate: Duration::from_millis(250),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("SCORELINE_TIE_BREAK").ok(),
            env::var("SCORELINE_TICK_MS").ok(),
        )
    }

    fn from_vars(tie_break: Option<String>, tick_ms: Option<String>) -> Self {
        let tie_break = match tie_break {
            Some(val) if val.eq_ignore_ascii_case("stable") => TieBreak::Stable,
            _ => TieBreak::Kickoff,
        };
        let tick_ms = tick_ms
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            tie_break,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::AppConfig;
    use crate::summary::TieBreak;

    #[test]
    fn defaults_rank_by_kickoff_at_a_quarter_second_tick() {
        let config = AppConfig::default();
        assert_eq!(config.tie_break, TieBreak::Kickoff);
        assert_eq!(config.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn stable_tie_break_is_recognized_case_insensitively() {
        let config = AppConfig::from_vars(Some("Stable".to_string()), None);
        assert_eq!(config.tie_break, TieBreak::Stable);
        let config = AppConfig::from_vars(Some("STABLE".to_string()), None);
        assert_eq!(config.tie_break, TieBreak::Stable);
    }

    #[test]
    fn unknown_tie_break_values_fall_back_to_kickoff() {
        let config = AppConfig::from_vars(Some("newest".to_string()), None);
        assert_eq!(config.tie_break, TieBreak::Kickoff);
        assert_eq!(config.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn tick_rate_is_floored_and_survives_garbage() {
        let config = AppConfig::from_vars(None, Some("10".to_string()));
        assert_eq!(config.tick_rate, Duration::from_millis(50));
        let config = AppConfig::from_vars(None, Some("400".to_string()));
        assert_eq!(config.tick_rate, Duration::from_millis(400));
        let config = AppConfig::from_vars(None, Some("fast".to_string()));
        assert_eq!(config.tick_rate, Duration::from_millis(250));
    }
}
