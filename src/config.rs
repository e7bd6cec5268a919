use crate::error::Error;
use crate::reversal::DEFAULT_MIN_REVERSAL_DURATION;

use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// no camera calibration available
pub const DEFAULT_LENGTH_PER_PIXEL: f64 = 0.01;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shortest backward run reported as a reversal (s)
    pub min_reversal_duration: f64,
    /// Pixel-to-length factor handed to the loader and recorded with every track
    pub length_per_pixel: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_reversal_duration: DEFAULT_MIN_REVERSAL_DURATION,
            length_per_pixel: DEFAULT_LENGTH_PER_PIXEL,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, Error> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.min_reversal_duration.is_finite() || self.min_reversal_duration < 0.0 {
            return Err(Error::Config(format!(
                "min_reversal_duration must be a non-negative number of seconds, got {}",
                self.min_reversal_duration
            )));
        }

        if !self.length_per_pixel.is_finite() || self.length_per_pixel <= 0.0 {
            return Err(Error::Config(format!(
                "length_per_pixel must be positive, got {}",
                self.length_per_pixel
            )));
        }

        Ok(())
    }
}
