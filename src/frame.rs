use crate::error::TrackError;
use crate::Scalar;

use nalgebra as na;
use ndarray::prelude::*;

pub const MIN_FRAMES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KinematicsFrame {
    pub elapsed_time: Vec<f64>, // in seconds
    pub position: Vec<na::Point2<f64>>,
    pub head_point: Vec<na::Point2<f64>>,
    pub mid_point: Vec<na::Point2<f64>>,
}

impl KinematicsFrame {
    /// Builds a frame sequence from loader columns: `times` is N, the point arrays are Nx2
    /// in pixels and get multiplied by `length_per_pixel`.
    pub fn from_arrays<A: Scalar>(
        times: ArrayView1<'_, A>,
        positions: ArrayView2<'_, A>,
        heads: ArrayView2<'_, A>,
        mids: ArrayView2<'_, A>,
        length_per_pixel: f64,
    ) -> Result<Self, TrackError> {
        let n = times.len();

        let elapsed_time = times
            .iter()
            .enumerate()
            .map(|(index, t)| {
                t.to_f64().ok_or(TrackError::Conversion {
                    name: "elapsed_time",
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            elapsed_time,
            position: points("position", positions, n, length_per_pixel)?,
            head_point: points("head_point", heads, n, length_per_pixel)?,
            mid_point: points("mid_point", mids, n, length_per_pixel)?,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elapsed_time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elapsed_time.is_empty()
    }

    #[inline]
    pub fn heading(&self, i: usize) -> na::Vector2<f64> {
        self.head_point[i] - self.mid_point[i]
    }

    /// Checks that the four arrays agree in length, hold at least [`MIN_FRAMES`] samples and
    /// contain only finite values.
    pub fn validate(&self) -> Result<(), TrackError> {
        let n = self.len();

        for (name, len) in [
            ("position", self.position.len()),
            ("head_point", self.head_point.len()),
            ("mid_point", self.mid_point.len()),
        ] {
            if len != n {
                return Err(TrackError::LengthMismatch {
                    name,
                    expected: n,
                    actual: len,
                });
            }
        }

        if n < MIN_FRAMES {
            return Err(TrackError::InsufficientFrames(n));
        }

        if let Some(index) = self.elapsed_time.iter().position(|t| !t.is_finite()) {
            return Err(TrackError::NonFinite {
                name: "elapsed_time",
                index,
            });
        }

        for (name, pts) in [
            ("position", &self.position),
            ("head_point", &self.head_point),
            ("mid_point", &self.mid_point),
        ] {
            if let Some(index) = pts
                .iter()
                .position(|p| !(p.x.is_finite() && p.y.is_finite()))
            {
                return Err(TrackError::NonFinite { name, index });
            }
        }

        Ok(())
    }
}

fn points<A: Scalar>(
    name: &'static str,
    view: ArrayView2<'_, A>,
    n: usize,
    scale: f64,
) -> Result<Vec<na::Point2<f64>>, TrackError> {
    if view.ncols() != 2 {
        return Err(TrackError::BadShape {
            name,
            rows: view.nrows(),
            cols: view.ncols(),
        });
    }

    if view.nrows() != n {
        return Err(TrackError::LengthMismatch {
            name,
            expected: n,
            actual: view.nrows(),
        });
    }

    view.outer_iter()
        .enumerate()
        .map(|(index, row)| {
            let x = row[0].to_f64();
            let y = row[1].to_f64();

            match (x, y) {
                (Some(x), Some(y)) => Ok(na::Point2::new(x * scale, y * scale)),
                _ => Err(TrackError::Conversion { name, index }),
            }
        })
        .collect()
}
