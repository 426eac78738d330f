use std::num::NonZeroUsize;
use std::str::FromStr;
use tracing::warn;

/// League points awarded per match result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsConfig {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 0,
            loss: 0,
        }
    }
}

/// Runtime configuration for the league engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bind_addr: String,
    pub points: PointsConfig,
    pub event_capacity: usize,
    /// JSON file of leagues and teams loaded into the registry at startup
    pub registry_file: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            points: PointsConfig::default(),
            event_capacity: 100,
            registry_file: None,
        }
    }
}

impl EngineConfig {
    /// Reads `LEAGUE_*` variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys keep
    /// their defaults; unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("LEAGUE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            points: PointsConfig {
                win: parse_or(&lookup, "LEAGUE_WIN_POINTS", defaults.points.win),
                draw: parse_or(&lookup, "LEAGUE_DRAW_POINTS", defaults.points.draw),
                loss: parse_or(&lookup, "LEAGUE_LOSS_POINTS", defaults.points.loss),
            },
            // broadcast channels need room for at least one event
            event_capacity: parse_or(
                &lookup,
                "LEAGUE_EVENT_CAPACITY",
                NonZeroUsize::new(defaults.event_capacity).unwrap_or(NonZeroUsize::MIN),
            )
            .get(),
            registry_file: lookup("LEAGUE_REGISTRY_FILE").filter(|path| !path.is_empty()),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, default = ?default, "Ignoring unparseable config value");
                default
            }
        },
        None => default,
    }
}
