use crate::frame::KinematicsFrame;

use nalgebra as na;
use serde_derive::Serialize;

/// `sample_time[i]` is the earlier endpoint of interval `i`; the timestamp of the last frame has
/// no sample of its own and is kept in `end_time`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SignedVelocitySeries {
    pub sample_time: Vec<f64>,
    pub signed_velocity: Vec<f64>,
    pub end_time: f64,
}

impl SignedVelocitySeries {
    pub fn new(sample_time: Vec<f64>, signed_velocity: Vec<f64>, end_time: f64) -> Self {
        debug_assert_eq!(sample_time.len(), signed_velocity.len());

        Self {
            sample_time,
            signed_velocity,
            end_time,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.signed_velocity.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signed_velocity.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sample_time
            .iter()
            .copied()
            .zip(self.signed_velocity.iter().copied())
    }
}

#[inline]
fn unit_or_zero(v: na::Vector2<f64>) -> na::Vector2<f64> {
    let norm = v.norm();

    if norm == 0.0 {
        na::Vector2::zeros()
    } else {
        v / norm
    }
}

/// Signed velocity of a single frame pair: speed scaled by the cosine between the motion and
/// the body axis taken at the earlier frame. Degenerate pairs (no displacement, clock not
/// advancing, no heading) yield 0.
pub fn signed_velocity(
    from: na::Point2<f64>,
    to: na::Point2<f64>,
    dt: f64,
    heading: na::Vector2<f64>,
) -> f64 {
    let delta = to - from;
    let distance = delta.norm();

    if distance == 0.0 || dt <= 0.0 {
        return 0.0;
    }

    let speed = distance / dt;
    let direction = delta / distance;

    speed * direction.dot(&unit_or_zero(heading))
}

/// Projects a whole track. Fewer than two frames give an empty series; arrays of unequal
/// length are cut to the shortest one.
pub fn project(frames: &KinematicsFrame) -> SignedVelocitySeries {
    let n = frames
        .len()
        .min(frames.position.len())
        .min(frames.head_point.len())
        .min(frames.mid_point.len());

    if n < 2 {
        return SignedVelocitySeries::new(
            vec![],
            vec![],
            frames.elapsed_time.last().copied().unwrap_or_default(),
        );
    }

    let signed_velocity = (0..n - 1)
        .map(|i| {
            signed_velocity(
                frames.position[i],
                frames.position[i + 1],
                frames.elapsed_time[i + 1] - frames.elapsed_time[i],
                frames.heading(i),
            )
        })
        .collect();

    SignedVelocitySeries::new(
        frames.elapsed_time[..n - 1].to_vec(),
        signed_velocity,
        frames.elapsed_time[n - 1],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> na::Point2<f64> {
        na::Point2::new(x, y)
    }

    fn track(times: &[f64], xs: &[(f64, f64)], heading: (f64, f64)) -> KinematicsFrame {
        let position: Vec<_> = xs.iter().map(|&(x, y)| pt(x, y)).collect();

        KinematicsFrame {
            elapsed_time: times.to_vec(),
            head_point: position
                .iter()
                .map(|p| *p + na::Vector2::new(heading.0, heading.1))
                .collect(),
            mid_point: position.clone(),
            position,
        }
    }

    #[test]
    fn aligned_and_reversed_motion() {
        let heading = na::Vector2::new(2.0, 0.0);

        assert!((signed_velocity(pt(0., 0.), pt(3., 0.), 1.5, heading) - 2.0).abs() < 1e-12);
        assert!((signed_velocity(pt(0., 0.), pt(-3., 0.), 1.5, heading) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_and_oblique_motion() {
        let heading = na::Vector2::new(0.0, 5.0);

        assert!(signed_velocity(pt(0., 0.), pt(1., 0.), 1.0, heading).abs() < 1e-12);

        // 45 degrees off the axis: speed sqrt(2), cosine 1/sqrt(2)
        let v = signed_velocity(pt(0., 0.), pt(1., 1.), 1.0, heading);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_pairs_are_zero() {
        let heading = na::Vector2::new(1.0, 0.0);

        assert_eq!(signed_velocity(pt(1., 1.), pt(1., 1.), 1.0, heading), 0.0);
        assert_eq!(signed_velocity(pt(0., 0.), pt(-1., 0.), 0.0, heading), 0.0);
        assert_eq!(signed_velocity(pt(0., 0.), pt(-1., 0.), -0.5, heading), 0.0);
        assert_eq!(
            signed_velocity(pt(0., 0.), pt(-1., 0.), 1.0, na::Vector2::zeros()),
            0.0
        );
    }

    #[test]
    fn series_drops_last_timestamp() {
        let frames = track(
            &[0.0, 0.5, 1.5, 2.0],
            &[(0., 0.), (1., 0.), (1., 0.), (0., 2.)],
            (1.0, 0.0),
        );
        let series = project(&frames);

        assert_eq!(series.len(), 3);
        assert_eq!(series.sample_time, vec![0.0, 0.5, 1.5]);
        assert_eq!(series.end_time, 2.0);
        assert!((series.signed_velocity[0] - 2.0).abs() < 1e-12);
        assert_eq!(series.signed_velocity[1], 0.0);
        assert!(series.signed_velocity[2] < 0.0);
    }

    #[test]
    fn velocity_bounded_by_speed() {
        let times: Vec<f64> = (0..20).map(|i| i as f64 * 0.25).collect();
        let xs: Vec<(f64, f64)> = (0..20)
            .map(|i| {
                let a = i as f64 * 0.7;
                (a.cos() * (1.0 + i as f64), a.sin() * (2.0 + i as f64))
            })
            .collect();
        let frames = track(&times, &xs, (0.3, -1.2));
        let series = project(&frames);

        assert_eq!(series.len(), frames.len() - 1);

        for i in 0..series.len() {
            let dist = na::distance(&frames.position[i], &frames.position[i + 1]);
            let speed = dist / (times[i + 1] - times[i]);
            assert!(series.signed_velocity[i].abs() <= speed + 1e-9);
        }
    }

    #[test]
    fn uneven_arrays_use_common_prefix() {
        let mut frames = track(
            &[0.0, 1.0, 2.0, 3.0],
            &[(0., 0.), (1., 0.), (2., 0.), (3., 0.)],
            (1.0, 0.0),
        );
        frames.head_point.truncate(3);
        frames.mid_point.truncate(2);

        let series = project(&frames);

        assert_eq!(series.len(), 1);
        assert_eq!(series.end_time, 1.0);
        assert!((series.signed_velocity[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_frame_is_empty() {
        let frames = track(&[3.0], &[(0., 0.)], (1.0, 0.0));
        let series = project(&frames);

        assert!(series.is_empty());
        assert_eq!(series.end_time, 3.0);
    }
}
