use crate::track::{TrackId, TrackOutcome};

use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrackState {
    Ok,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackStatus {
    #[serde(rename = "track_num")]
    pub track_id: TrackId,
    pub status: TrackState,
    pub reversals: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Finalized batch rollup. Duration statistics are `None` when no reversal was found.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_tracks: usize,
    pub tracks_processed: usize,
    pub tracks_with_reversals: usize,
    pub total_reversals: usize,
    pub reversal_durations: Vec<f64>,
    pub avg_reversal_duration: Option<f64>,
    pub min_reversal_duration: Option<f64>,
    pub max_reversal_duration: Option<f64>,
    pub tracks: Vec<TrackStatus>,
}

impl BatchSummary {
    #[inline]
    pub fn tracks_failed(&self) -> usize {
        self.total_tracks.saturating_sub(self.tracks_processed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchAggregator {
    total_tracks: usize,
    tracks_processed: usize,
    tracks_with_reversals: usize,
    total_reversals: usize,
    reversal_durations: Vec<f64>,
    tracks: Vec<TrackStatus>,
}

impl BatchAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: &TrackOutcome) {
        self.total_tracks += 1;

        let status = match outcome {
            TrackOutcome::Processed(res) => {
                self.tracks_processed += 1;
                self.total_reversals += res.reversals.len();

                if res.has_reversals() {
                    self.tracks_with_reversals += 1;
                }

                self.reversal_durations
                    .extend(res.reversals.iter().map(|r| r.duration));

                TrackStatus {
                    track_id: res.track_id,
                    status: TrackState::Ok,
                    reversals: res.reversals.len(),
                    error: None,
                }
            }

            TrackOutcome::Failed { track_id, error } => TrackStatus {
                track_id: *track_id,
                status: TrackState::Failed,
                reversals: 0,
                error: Some(error.to_string()),
            },
        };

        self.tracks.push(status);
    }

    #[inline]
    pub fn total_tracks(&self) -> usize {
        self.total_tracks
    }

    #[inline]
    pub fn reversal_durations(&self) -> &[f64] {
        &self.reversal_durations
    }

    pub fn finalize(self) -> BatchSummary {
        let durations = &self.reversal_durations;

        let (avg, min, max) = if durations.is_empty() {
            (None, None, None)
        } else {
            let sum: f64 = durations.iter().sum();
            let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
            let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            (Some(sum / durations.len() as f64), Some(min), Some(max))
        };

        BatchSummary {
            total_tracks: self.total_tracks,
            tracks_processed: self.tracks_processed,
            tracks_with_reversals: self.tracks_with_reversals,
            total_reversals: self.total_reversals,
            reversal_durations: self.reversal_durations,
            avg_reversal_duration: avg,
            min_reversal_duration: min,
            max_reversal_duration: max,
            tracks: self.tracks,
        }
    }
}

impl Extend<TrackOutcome> for BatchAggregator {
    fn extend<I: IntoIterator<Item = TrackOutcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.push(&outcome);
        }
    }
}
