use crate::config::Config;
use crate::error::Error;
use crate::processor::TrackProcessor;
use crate::record::{BatchMetadata, TrackRecord};
use crate::summary::{BatchAggregator, BatchSummary};
use crate::track::{TrackId, TrackOutcome};
use crate::{TrackSink, TrackSource};

use tracing::{debug, info, warn};

fn run_track<S: TrackSource, K: TrackSink>(
    processor: &TrackProcessor,
    metadata: &BatchMetadata,
    source: &mut S,
    sink: &mut K,
    track_id: TrackId,
) -> TrackOutcome {
    let track = match source.load(track_id) {
        Ok(track) => track,
        Err(error) => return TrackOutcome::Failed { track_id, error },
    };

    let outcome = processor.process(&track);

    if let TrackOutcome::Processed(res) = &outcome {
        debug!(
            track_id,
            frames = track.frames.len(),
            reversals = res.reversals.len(),
            "track processed"
        );

        if let Err(error) = sink.persist(&TrackRecord::new(res, metadata)) {
            return TrackOutcome::Failed { track_id, error };
        }
    }

    outcome
}

/// Processes every track the source selects, strictly in order, and returns the finalized
/// summary. Per-track failures are logged and folded; only an empty selection is fatal.
pub fn run_batch<S: TrackSource, K: TrackSink>(
    config: &Config,
    metadata: &BatchMetadata,
    source: &mut S,
    sink: &mut K,
) -> Result<BatchSummary, Error> {
    config.validate()?;

    let track_ids = source.track_ids();
    if track_ids.is_empty() {
        return Err(Error::NoTracks);
    }

    info!(
        tracks = track_ids.len(),
        min_reversal_duration = config.min_reversal_duration,
        "starting reversal batch"
    );

    let processor = TrackProcessor::new(config.min_reversal_duration);
    let mut aggregator = BatchAggregator::new();

    for track_id in track_ids {
        let outcome = run_track(&processor, metadata, source, sink, track_id);

        if let TrackOutcome::Failed { error, .. } = &outcome {
            warn!(track_id, %error, "track failed, continuing");
        }

        aggregator.push(&outcome);
    }

    let summary = aggregator.finalize();

    info!(
        attempted = summary.total_tracks,
        processed = summary.tracks_processed,
        with_reversals = summary.tracks_with_reversals,
        reversals = summary.total_reversals,
        "reversal batch complete"
    );

    Ok(summary)
}
