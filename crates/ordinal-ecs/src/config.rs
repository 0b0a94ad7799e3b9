use ordinal_core::TimeConfig;
use serde::{Deserialize, Serialize};

/// Which stages run each frame and how frame time is measured.
///
/// ```toml
/// stages = [0, 1, 2]
///
/// [time]
/// time_scale = 1.0
/// max_delta_time = 0.25
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Stage ids dispatched each frame, in order
    pub stages: Vec<i32>,
    /// Frame clock configuration
    pub time: TimeConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            stages: vec![0],
            time: TimeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScheduleConfig::default();
        assert_eq!(config.stages, vec![0]);
        assert_eq!(config.time, TimeConfig::default());
    }

    #[test]
    fn parse_full() {
        let config = toml::from_str::<ScheduleConfig>(
            r#"
            stages = [0, 2, 1]

            [time]
            time_scale = 0.5
            max_delta_time = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.stages, vec![0, 2, 1]);
        assert_eq!(config.time.time_scale, 0.5);
        assert_eq!(config.time.max_delta_time, 0.1);
    }

    #[test]
    fn parse_partial_uses_defaults() {
        let config = toml::from_str::<ScheduleConfig>("[time]\ntime_scale = 2.0\n").unwrap();
        assert_eq!(config.stages, vec![0]);
        assert_eq!(config.time.time_scale, 2.0);
        assert_eq!(config.time.max_delta_time, 0.25);
    }

    #[test]
    fn parse_error() {
        assert!(toml::from_str::<ScheduleConfig>("stages = \"all\"").is_err());
    }
}
