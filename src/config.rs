use std::fmt::{Display, Formatter};
use std::time::Duration;

use static_assertions::const_assert;

use crate::basic::GridDim;

pub const DEFAULT_GRID_WIDTH: isize = 32;
pub const DEFAULT_GRID_HEIGHT: isize = 20;
pub const DEFAULT_START_LEN: usize = 5;
pub const DEFAULT_START_SPEED_MS: u64 = 300;
pub const DEFAULT_MIN_SPEED_MS: u64 = 50;
pub const DEFAULT_GROWTH_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_GROWTH_INCREMENT: usize = 2;
pub const DEFAULT_ACCELERATION_MS: u64 = 5;

/// Smallest playable board side; anything below leaves no room to turn
pub const MIN_GRID_SIDE: isize = 8;

const_assert!(DEFAULT_START_SPEED_MS >= DEFAULT_MIN_SPEED_MS);
const_assert!(DEFAULT_MIN_SPEED_MS > 0);
const_assert!(DEFAULT_GRID_WIDTH >= MIN_GRID_SIDE && DEFAULT_GRID_HEIGHT >= MIN_GRID_SIDE);

#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub grid_width: isize,
    pub grid_height: isize,
    pub start_len: usize,
    /// Time per cell at the start of a run
    pub start_speed: Duration,
    /// Time per cell the snake can never get below
    pub min_speed: Duration,
    /// How often the snake passively grows and speeds up
    pub growth_interval: Duration,
    /// Cells added per growth tick
    pub growth_increment: usize,
    /// Per-cell time shaved off per growth tick
    pub acceleration: Duration,
    /// Item placement seed, random when `None`
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            start_len: DEFAULT_START_LEN,
            start_speed: Duration::from_millis(DEFAULT_START_SPEED_MS),
            min_speed: Duration::from_millis(DEFAULT_MIN_SPEED_MS),
            growth_interval: Duration::from_millis(DEFAULT_GROWTH_INTERVAL_MS),
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            acceleration: Duration::from_millis(DEFAULT_ACCELERATION_MS),
            seed: None,
        }
    }
}

// builder
impl Config {
    pub fn grid(mut self, width: isize, height: isize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn start_len(mut self, len: usize) -> Self {
        self.start_len = len;
        self
    }

    pub fn start_speed(mut self, speed: Duration) -> Self {
        self.start_speed = speed;
        self
    }

    pub fn min_speed(mut self, speed: Duration) -> Self {
        self.min_speed = speed;
        self
    }

    pub fn growth_interval(mut self, interval: Duration) -> Self {
        self.growth_interval = interval;
        self
    }

    pub fn growth_increment(mut self, increment: usize) -> Self {
        self.growth_increment = increment;
        self
    }

    pub fn acceleration(mut self, by: Duration) -> Self {
        self.acceleration = by;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Config {
    pub fn grid_dim(&self) -> GridDim {
        GridDim { x: self.grid_width, y: self.grid_height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.start_len == 0 {
            return Err(ConfigError::ZeroStartLength);
        }
        if self.min_speed.is_zero() || self.start_speed < self.min_speed {
            return Err(ConfigError::BadSpeed {
                start: self.start_speed,
                min: self.min_speed,
            });
        }
        if self.growth_interval.is_zero() {
            return Err(ConfigError::ZeroGrowthInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    GridTooSmall { width: isize, height: isize },
    ZeroStartLength,
    BadSpeed { start: Duration, min: Duration },
    ZeroGrowthInterval,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ConfigError::*;
        match self {
            GridTooSmall { width, height } => write!(
                f,
                "grid {}x{} is smaller than the minimum side of {}",
                width, height, MIN_GRID_SIDE
            ),
            ZeroStartLength => write!(f, "starting length must be at least 1"),
            BadSpeed { start, min } => write!(
                f,
                "start speed {:?} must be no faster than the floor {:?}, and the floor nonzero",
                start, min
            ),
            ZeroGrowthInterval => write!(f, "growth interval must be nonzero"),
        }
    }
}

#[test]
fn test_default_config_is_valid() {
    assert_eq!(Config::default().validate(), Ok(()));
}

#[test]
fn test_validation_catches_bad_values() {
    let base = Config::default();

    assert!(matches!(
        base.grid(4, 20).validate(),
        Err(ConfigError::GridTooSmall { width: 4, height: 20 })
    ));
    assert!(matches!(
        base.grid(32, 7).validate(),
        Err(ConfigError::GridTooSmall { .. })
    ));
    assert!(matches!(
        base.start_len(0).validate(),
        Err(ConfigError::ZeroStartLength)
    ));
    assert!(matches!(
        base.min_speed(Duration::ZERO).validate(),
        Err(ConfigError::BadSpeed { .. })
    ));
    assert!(matches!(
        base.start_speed(Duration::from_millis(10))
            .min_speed(Duration::from_millis(20))
            .validate(),
        Err(ConfigError::BadSpeed { .. })
    ));
    assert!(matches!(
        base.growth_interval(Duration::ZERO).validate(),
        Err(ConfigError::ZeroGrowthInterval)
    ));
}

#[test]
fn test_setters_chain() {
    let config = Config::default()
        .grid(12, 8)
        .start_len(3)
        .start_speed(Duration::from_millis(100))
        .min_speed(Duration::from_millis(10))
        .seed(Some(7));
    assert_eq!(config.grid_dim(), GridDim { x: 12, y: 8 });
    assert_eq!(config.start_len, 3);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.validate(), Ok(()));
}
