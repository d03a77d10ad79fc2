use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Log verbosity given on the command line
///
/// Accepts a level name (`debug`, `info`, `warning`, `critical`, ...) or the
/// numeric logging levels 10/20/30/40/50, where lower means more output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity(LevelFilter);

impl Verbosity {
    pub const TRACE: Self = Self(LevelFilter::TRACE);
    pub const DEBUG: Self = Self(LevelFilter::DEBUG);
    pub const INFO: Self = Self(LevelFilter::INFO);
    pub const WARN: Self = Self(LevelFilter::WARN);
    pub const ERROR: Self = Self(LevelFilter::ERROR);

    pub fn level(&self) -> LevelFilter {
        self.0
    }

    /// Whether full error chains should be shown
    pub fn is_detailed(&self) -> bool {
        self.0 >= LevelFilter::DEBUG
    }

    fn from_number(value: i64) -> Self {
        match value {
            i64::MIN..=9 => Self::TRACE,
            10..=19 => Self::DEBUG,
            20..=29 => Self::INFO,
            30..=39 => Self::WARN,
            _ => Self::ERROR,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::WARN
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i64>() {
            return Ok(Self::from_number(value));
        }

        match s.to_ascii_lowercase().as_str() {
            "trace" | "notset" => Ok(Self::TRACE),
            "debug" => Ok(Self::DEBUG),
            "info" => Ok(Self::INFO),
            "warn" | "warning" => Ok(Self::WARN),
            "error" | "critical" | "fatal" => Ok(Self::ERROR),
            other => Err(format!("unknown verbosity level '{}'", other)),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
