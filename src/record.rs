use crate::error::TrackError;
use crate::reversal::Reversal;
use crate::track::{TrackId, TrackResult};
use crate::TrackSink;

use chrono::{DateTime, Utc};
use serde_derive::Serialize;
use std::io::Write;

/// Attached to every persisted track as-is; nothing here feeds the computation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchMetadata {
    pub batch_timestamp: DateTime<Utc>,
    #[serde(rename = "lengthPerPixel")]
    pub length_per_pixel: f64,
    #[serde(rename = "eset_name", skip_serializing_if = "Option::is_none")]
    pub experiment: Option<String>,
}

impl BatchMetadata {
    pub fn new(length_per_pixel: f64) -> Self {
        Self {
            batch_timestamp: Utc::now(),
            length_per_pixel,
            experiment: None,
        }
    }

    pub fn with_experiment<S: Into<String>>(mut self, name: S) -> Self {
        self.experiment = Some(name.into());
        self
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TrackRecord<'a> {
    pub track_num: TrackId,
    #[serde(flatten)]
    pub metadata: &'a BatchMetadata,
    pub eti: &'a [f64],
    pub times: &'a [f64],
    #[serde(rename = "SpeedRunVel")]
    pub speed_run_vel: &'a [f64],
    pub xpos: Vec<f64>,
    pub ypos: Vec<f64>,
    pub reversals: &'a [Reversal],
}

impl<'a> TrackRecord<'a> {
    pub fn new(result: &'a TrackResult, metadata: &'a BatchMetadata) -> Self {
        Self {
            track_num: result.track_id,
            metadata,
            eti: &result.elapsed_time,
            times: &result.velocity.sample_time,
            speed_run_vel: &result.velocity.signed_velocity,
            xpos: result.position.iter().map(|p| p.x).collect(),
            ypos: result.position.iter().map(|p| p.y).collect(),
            reversals: &result.reversals,
        }
    }
}

// one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TrackSink for JsonLinesSink<W> {
    fn persist(&mut self, record: &TrackRecord<'_>) -> Result<(), TrackError> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|err| TrackError::Persist(err.to_string()))?;

        self.writer
            .write_all(b"\n")
            .map_err(|err| TrackError::Persist(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::velocity::SignedVelocitySeries;

    use nalgebra as na;

    #[test]
    fn json_lines_layout() {
        let result = TrackResult {
            track_id: 12,
            velocity: SignedVelocitySeries::new(vec![0.0, 1.0], vec![0.5, -0.5], 2.5),
            elapsed_time: vec![0.0, 1.0, 2.5],
            position: vec![
                na::Point2::new(0.0, 1.0),
                na::Point2::new(0.5, 1.0),
                na::Point2::new(0.0, 1.0),
            ],
            reversals: vec![],
        };
        let metadata = BatchMetadata::new(0.02).with_experiment("eset_a");

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.persist(&TrackRecord::new(&result, &metadata)).unwrap();
        sink.persist(&TrackRecord::new(&result, &metadata)).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["track_num"], 12);
        assert_eq!(value["eset_name"], "eset_a");
        assert_eq!(value["lengthPerPixel"], 0.02);
        assert_eq!(value["SpeedRunVel"][1], -0.5);
        assert_eq!(value["xpos"].as_array().unwrap().len(), 3);
        assert_eq!(value["times"].as_array().unwrap().len(), 2);
        assert_eq!(value["eti"].as_array().unwrap().len(), 3);
        assert_eq!(value["eti"][2], 2.5);
        assert!(value["batch_timestamp"].is_string());
    }
}
