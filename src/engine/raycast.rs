//! Two-phase grid raycaster.
//!
//! A ray is resolved by two independent 1-D sweeps:
//!
//! * **horizontal phase** – hops from one horizontal grid line (row
//!   boundary) to the next;
//! * **vertical phase** – hops between vertical grid lines (column
//!   boundaries).
//!
//! Each phase tests at most [`DEPTH_OF_FIELD`] lines, so a cast is O(1)
//! regardless of the map. The nearer of the two phase hits wins.
//!
//! Distances are plain Euclidean; fisheye correction is the projector's job.

use glam::{DVec2, dvec2};
use log::trace;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::world::{PlayerState, TileMap, WALL};

/// Distance reported when no wall was found.
pub const NO_HIT: f64 = f64::INFINITY;

/// Grid lines examined per phase.
pub const DEPTH_OF_FIELD: u32 = 8;

/// Pulls the first up/left candidate line into the cell above/left of it.
const EDGE_NUDGE: f64 = 1e-4;

/// Which family of grid lines produced a hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Found while stepping across row boundaries.
    Horizontal,
    /// Found while stepping across column boundaries.
    Vertical,
}

/// Result of one sweep phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhaseHit {
    pub point: DVec2,
    /// Euclidean distance from the ray origin, or [`NO_HIT`].
    pub distance: f64,
}

impl PhaseHit {
    #[inline]
    fn miss(origin: DVec2) -> Self {
        Self {
            point: origin,
            distance: NO_HIT,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Closest wall along one ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Wall intersection; the ray origin when nothing was hit.
    pub point: DVec2,
    /// Straight-line distance to `point`, or [`NO_HIT`].
    pub distance: f64,
    pub orientation: Orientation,
    /// Absolute ray angle in `[0, 2π)`.
    pub angle: f64,
}

impl RayHit {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Stateless caster; only the search depth is configurable.
#[derive(Copy, Clone, Debug)]
pub struct Raycaster {
    depth_of_field: u32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::new(DEPTH_OF_FIELD)
    }
}

impl Raycaster {
    pub fn new(depth_of_field: u32) -> Self {
        Self { depth_of_field }
    }

    /// Cast one ray from the player's position at absolute `angle`.
    pub fn cast(&self, player: &PlayerState, map: &TileMap, angle: f64) -> RayHit {
        let angle = angle.rem_euclid(TAU);
        let origin = player.position();

        let h = self.horizontal_phase(origin, map, angle);
        let v = self.vertical_phase(origin, map, angle);

        // ties go to the horizontal phase
        let (best, orientation) = if v.distance < h.distance {
            (v, Orientation::Vertical)
        } else {
            (h, Orientation::Horizontal)
        };

        trace!(
            "ray {angle:.4}: h={:.3} v={:.3} -> {orientation:?} at {:?}",
            h.distance, v.distance, best.point
        );

        RayHit {
            point: best.point,
            distance: best.distance,
            orientation,
            angle,
        }
    }

    /// Sweep across horizontal grid lines (row boundaries).
    ///
    /// A perfectly horizontal ray (`angle == 0` or `π`) never crosses one.
    pub fn horizontal_phase(&self, origin: DVec2, map: &TileMap, angle: f64) -> PhaseHit {
        let angle = angle.rem_euclid(TAU);
        if angle == 0.0 || angle == PI {
            return PhaseHit::miss(origin);
        }

        let block = map.block_size();
        let row_top = (origin.y / block).floor() * block;
        let inv_tan = -1.0 / angle.tan();

        let (ray_y, step_y) = if angle > PI {
            // looking towards -Y
            (row_top - EDGE_NUDGE, -block)
        } else {
            (row_top + block, block)
        };
        let ray_x = (origin.y - ray_y) * inv_tan + origin.x;
        let step_x = -step_y * inv_tan;

        self.march(origin, map, dvec2(ray_x, ray_y), dvec2(step_x, step_y))
    }

    /// Sweep across vertical grid lines (column boundaries).
    ///
    /// A perfectly vertical ray (`angle == π/2` or `3π/2`) never crosses one.
    pub fn vertical_phase(&self, origin: DVec2, map: &TileMap, angle: f64) -> PhaseHit {
        let angle = angle.rem_euclid(TAU);
        if angle == FRAC_PI_2 || angle == 3.0 * FRAC_PI_2 {
            return PhaseHit::miss(origin);
        }

        let block = map.block_size();
        let col_left = (origin.x / block).floor() * block;
        let neg_tan = -angle.tan();

        let (ray_x, step_x) = if angle > FRAC_PI_2 && angle < 3.0 * FRAC_PI_2 {
            // looking towards -X
            (col_left - EDGE_NUDGE, -block)
        } else {
            (col_left + block, block)
        };
        let ray_y = (origin.x - ray_x) * neg_tan + origin.y;
        let step_y = -step_x * neg_tan;

        self.march(origin, map, dvec2(ray_x, ray_y), dvec2(step_x, step_y))
    }

    /// Walk grid-line candidates until a wall, the map edge, or the depth cap.
    ///
    /// Cell index 0 is never reported as a hit, even when it holds a wall;
    /// stepping simply continues past it.
    fn march(&self, origin: DVec2, map: &TileMap, mut ray: DVec2, step: DVec2) -> PhaseHit {
        let cells = map.cells();
        for _ in 0..self.depth_of_field {
            match map.cell_index(ray.x, ray.y) {
                None => break,
                Some(idx) if idx > 0 && cells[idx] == WALL => {
                    return PhaseHit {
                        point: ray,
                        distance: origin.distance(ray),
                    };
                }
                Some(_) => ray += step,
            }
        }
        PhaseHit::miss(origin)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
