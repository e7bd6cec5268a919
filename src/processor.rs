use crate::error::TrackError;
use crate::reversal::{self, Reversal, DEFAULT_MIN_REVERSAL_DURATION};
use crate::track::{Track, TrackOutcome, TrackResult};
use crate::velocity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProcessor {
    min_reversal_duration: f64,
}

impl Default for TrackProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_REVERSAL_DURATION)
    }
}

impl TrackProcessor {
    pub fn new(min_reversal_duration: f64) -> Self {
        Self {
            min_reversal_duration,
        }
    }

    #[inline]
    pub fn min_reversal_duration(&self) -> f64 {
        self.min_reversal_duration
    }

    pub fn try_process(&self, track: &Track) -> Result<TrackResult, TrackError> {
        track.frames.validate()?;

        let velocity = velocity::project(&track.frames);
        let reversals: Vec<Reversal> = reversal::segment(&velocity, self.min_reversal_duration);

        Ok(TrackResult {
            track_id: track.track_id,
            velocity,
            elapsed_time: track.frames.elapsed_time.clone(),
            position: track.frames.position.clone(),
            reversals,
        })
    }

    pub fn process(&self, track: &Track) -> TrackOutcome {
        match self.try_process(track) {
            Ok(res) => TrackOutcome::Processed(res),
            Err(error) => TrackOutcome::Failed {
                track_id: track.track_id,
                error,
            },
        }
    }
}
