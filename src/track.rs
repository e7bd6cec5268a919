use crate::error::TrackError;
use crate::frame::KinematicsFrame;
use crate::reversal::Reversal;
use crate::velocity::SignedVelocitySeries;

use nalgebra as na;

pub type TrackId = u32;

#[derive(Debug, Clone)]
pub struct Track {
    pub track_id: TrackId,
    pub frames: KinematicsFrame,
}

impl Track {
    pub fn new(track_id: TrackId, frames: KinematicsFrame) -> Self {
        Self { track_id, frames }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackResult {
    pub track_id: TrackId,
    pub velocity: SignedVelocitySeries,

    // per frame, kept for persistence; position is scale-corrected
    pub elapsed_time: Vec<f64>,
    pub position: Vec<na::Point2<f64>>,

    // chronological, non-overlapping
    pub reversals: Vec<Reversal>,
}

impl TrackResult {
    #[inline]
    pub fn has_reversals(&self) -> bool {
        !self.reversals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    Processed(TrackResult),
    Failed { track_id: TrackId, error: TrackError },
}

impl TrackOutcome {
    #[inline]
    pub fn track_id(&self) -> TrackId {
        match self {
            TrackOutcome::Processed(res) => res.track_id,
            TrackOutcome::Failed { track_id, .. } => *track_id,
        }
    }

    #[inline]
    pub fn result(&self) -> Option<&TrackResult> {
        match self {
            TrackOutcome::Processed(res) => Some(res),
            TrackOutcome::Failed { .. } => None,
        }
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, TrackOutcome::Failed { .. })
    }
}
