use geo_types::Coord;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fence::Fence;
use crate::utils::interpolate_along;

/// What to do when jittering a sample keeps landing outside the fence.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JitterPolicy {
    pub max_attempts: usize,
    /// Drop the sample entirely (the default), or fall back to the
    /// un-jittered point when that one is inside.
    pub drop_on_failure: bool,
}

impl Default for JitterPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            drop_on_failure: true,
        }
    }
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, margin: f64) -> f64 {
    if margin > 0.0 {
        rng.random_range(-margin..=margin)
    } else {
        0.0
    }
}

fn jitter<R: Rng + ?Sized>(
    point: Coord<f64>,
    error_margin: f64,
    fence: &Fence,
    policy: &JitterPolicy,
    rng: &mut R,
) -> Option<Coord<f64>> {
    for _ in 0..policy.max_attempts {
        let candidate = Coord {
            x: point.x + random_offset(rng, error_margin),
            y: point.y + random_offset(rng, error_margin),
        };
        if fence.contains(candidate) {
            return Some(candidate);
        }
    }
    if !policy.drop_on_failure && fence.contains(point) {
        return Some(point);
    }
    None
}

/// Places `num_points` samples evenly along the first `target_distance`
/// degrees of `path`, each nudged by up to `error_margin` on both axes.
/// Samples that cannot be placed inside the fence are skipped, so the result
/// may be shorter than `num_points`. The whole sequence comes back reversed
/// half of the time.
pub fn resample_with_jitter<R: Rng + ?Sized>(
    path: &[Coord<f64>],
    target_distance: f64,
    num_points: usize,
    error_margin: f64,
    fence: &Fence,
    policy: &JitterPolicy,
    rng: &mut R,
) -> Vec<Coord<f64>> {
    let interval = if num_points == 0 {
        0.0
    } else {
        target_distance / num_points as f64
    };
    let error_margin = error_margin.abs();

    let mut points = Vec::new();
    let mut dropped = 0;
    for i in 0..num_points {
        let Some(point) = interpolate_along(path, interval * i as f64) else {
            continue;
        };
        match jitter(point, error_margin, fence, policy, rng) {
            Some(point) => points.push(point),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!("dropped {dropped} of {num_points} samples that left the fence");
    }

    if rng.random_bool(0.5) {
        points.reverse();
    }
    points
}
