pub mod batch;
pub mod config;
pub mod error;
pub mod frame;
pub mod processor;
pub mod record;
pub mod reversal;
pub mod summary;
pub mod track;
pub mod velocity;

pub use batch::run_batch;
pub use config::Config;
pub use frame::KinematicsFrame;
pub use processor::TrackProcessor;
pub use record::{BatchMetadata, JsonLinesSink, TrackRecord};
pub use reversal::Reversal;
pub use summary::{BatchAggregator, BatchSummary};
pub use track::{Track, TrackId, TrackOutcome, TrackResult};
pub use velocity::SignedVelocitySeries;

use error::TrackError;
use std::fmt;

pub trait Scalar: num_traits::ToPrimitive + Copy + fmt::Debug + 'static {}

impl<T> Scalar for T where T: num_traits::ToPrimitive + Copy + fmt::Debug + 'static {}

/// Supplies the tracks of one experiment, already scale-corrected.
pub trait TrackSource {
    fn track_ids(&self) -> Vec<TrackId>;

    fn load(&mut self, track_id: TrackId) -> Result<Track, TrackError>;
}

pub trait TrackSink {
    fn persist(&mut self, record: &TrackRecord<'_>) -> Result<(), TrackError>;
}

impl<K: TrackSink + ?Sized> TrackSink for &mut K {
    #[inline]
    fn persist(&mut self, record: &TrackRecord<'_>) -> Result<(), TrackError> {
        (**self).persist(record)
    }
}
