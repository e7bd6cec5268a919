use crate::velocity::SignedVelocitySeries;

use serde_derive::{Deserialize, Serialize};

pub const DEFAULT_MIN_REVERSAL_DURATION: f64 = 3.0;

/// A maximal run of strictly negative signed velocity lasting at least the threshold.
/// `end_index` is exclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Reversal {
    pub start_time: f64,
    pub end_time: f64,
    pub start_index: usize,
    pub end_index: usize,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Outside,
    InRun { start_index: usize, start_time: f64 },
}

#[derive(Debug)]
struct Segmenter {
    min_duration: f64,
    state: State,
    reversals: Vec<Reversal>,
}

impl Segmenter {
    fn new(min_duration: f64) -> Self {
        Self {
            min_duration,
            state: State::Outside,
            reversals: Vec::new(),
        }
    }

    // `negative` is false for the closing sentinel past the last sample
    fn step(&mut self, index: usize, time: f64, negative: bool) {
        self.state = match (self.state, negative) {
            (State::Outside, true) => State::InRun {
                start_index: index,
                start_time: time,
            },
            (State::InRun { start_index, start_time }, false) => {
                let duration = time - start_time;

                if duration >= self.min_duration {
                    self.reversals.push(Reversal {
                        start_time,
                        end_time: time,
                        start_index,
                        end_index: index,
                        duration,
                    });
                }

                State::Outside
            }
            (state, _) => state,
        };
    }
}

/// Extracts reversals from a signed velocity series. A run still open at the end of the series
/// is closed at the track's last frame (`end_index == series.len()`, `end_time == series.end_time`).
pub fn segment(series: &SignedVelocitySeries, min_duration: f64) -> Vec<Reversal> {
    let mut segmenter = Segmenter::new(min_duration);

    let samples = series
        .iter()
        .enumerate()
        .map(|(i, (t, v))| (i, t, v < 0.0))
        .chain(std::iter::once((series.len(), series.end_time, false)));

    for (index, time, negative) in samples {
        segmenter.step(index, time, negative);
    }

    segmenter.reversals
}
