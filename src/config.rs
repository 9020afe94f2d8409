use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the dataset when no path is passed on the
/// command line.
pub const DATA_ENV_VAR: &str = "HALL_OF_FAME_DATA";

const DEFAULT_DATA_PATH: &str = "data/hall_of_fame_data.csv";

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Tunables of the chart and its walkthrough.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Dataset loaded at start-up.
    pub data_path: PathBuf,
    /// How long each category stays on screen during the walkthrough.
    pub walkthrough_interval: Duration,
    /// Duration of the grow-in animation after every redraw.
    pub transition: Duration,
    /// Bar width as a fraction of one year slot.
    pub bar_width: f64,
    /// The negative axis always extends at least this far.
    pub min_negative_extent: f64,
    /// Label every n-th year on the x axis.
    pub year_tick_stride: i32,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            walkthrough_interval: Duration::from_secs(3),
            transition: Duration::from_secs(1),
            bar_width: 0.7,
            min_negative_extent: 10.0,
            year_tick_stride: 2,
            window_size: [1200.0, 700.0],
            min_window_size: [700.0, 400.0],
        }
    }
}

impl ChartConfig {
    /// Default configuration with the dataset path taken from the first
    /// command-line argument, then `HALL_OF_FAME_DATA`.
    pub fn from_env() -> Self {
        let arg = std::env::args_os().nth(1);
        let env = std::env::var_os(DATA_ENV_VAR);
        Self {
            data_path: resolve_data_path(arg, env),
            ..Self::default()
        }
    }
}

fn resolve_data_path(
    arg: Option<std::ffi::OsString>,
    env: Option<std::ffi::OsString>,
) -> PathBuf {
    arg.or(env)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.walkthrough_interval, Duration::from_secs(3));
        assert_eq!(config.transition, Duration::from_secs(1));
        assert_eq!(config.bar_width, 0.7);
        assert_eq!(config.data_path, PathBuf::from("data/hall_of_fame_data.csv"));
    }

    #[test]
    fn test_resolve_data_path_precedence() {
        assert_eq!(
            resolve_data_path(Some("a.csv".into()), Some("b.csv".into())),
            PathBuf::from("a.csv")
        );
        assert_eq!(resolve_data_path(None, Some("b.csv".into())), PathBuf::from("b.csv"));
        assert_eq!(resolve_data_path(None, None), PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(
            resolve_data_path(None, Some("".into())),
            PathBuf::from(DEFAULT_DATA_PATH)
        );
    }
}
