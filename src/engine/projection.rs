use std::f64::consts::TAU;

use super::raycast::{Orientation, RayHit};

/// Tunables of the column projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// Scales projected height: `block_size * reference_line_unit / distance`.
    pub reference_line_unit: f64,
    /// Upper bound for a slice's height.
    pub max_slice_height: f64,
    /// Height of the view the slices are centred in.
    pub viewport_height: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            reference_line_unit: 320.0,
            max_slice_height: 320.0,
            viewport_height: 320.0,
        }
    }
}

/// Colour selector; the host picks the actual hue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorTag {
    /// Face hit by the vertical phase (lighter shade).
    Vertical,
    /// Face hit by the horizontal phase (darker shade).
    Horizontal,
}

impl From<Orientation> for ColorTag {
    fn from(o: Orientation) -> Self {
        match o {
            Orientation::Vertical => ColorTag::Vertical,
            Orientation::Horizontal => ColorTag::Horizontal,
        }
    }
}

/// One drawable wall column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallSlice {
    /// Column index in the view.
    pub screen_x: usize,
    /// Top edge, `viewport_height / 2 - height / 2`.
    pub top: f64,
    pub height: f64,
    pub color: ColorTag,
    /// Fisheye-corrected distance the height was derived from.
    pub distance: f64,
}

impl WallSlice {
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Project `distance` onto the view plane of a viewer facing `player_angle`.
///
/// The angle difference is wrapped into `[0, 2π)` before the cosine.
pub fn correct_fisheye(distance: f64, player_angle: f64, ray_angle: f64) -> f64 {
    let mut diff = player_angle - ray_angle;
    if diff < 0.0 {
        diff += TAU;
    }
    if diff >= TAU {
        diff -= TAU;
    }
    distance * diff.cos()
}

/// Turns ray hits into wall slices.
#[derive(Clone, Copy, Debug)]
pub struct FrameProjector {
    config: ProjectionConfig,
    block_size: f64,
}

impl FrameProjector {
    pub fn new(config: ProjectionConfig, block_size: f64) -> Self {
        Self { config, block_size }
    }

    #[inline]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Projected height for an already corrected distance, clamped.
    ///
    /// A non-positive distance (viewer touching the face) yields the maximum.
    pub fn slice_height(&self, corrected: f64) -> f64 {
        let max = self.config.max_slice_height;
        if corrected > 0.0 {
            (self.block_size * self.config.reference_line_unit / corrected).min(max)
        } else {
            max
        }
    }

    /// Slice for column `screen_x`, or `None` when the ray hit nothing.
    pub fn project(&self, screen_x: usize, hit: &RayHit, player_angle: f64) -> Option<WallSlice> {
        if !hit.is_hit() {
            return None;
        }
        let distance = correct_fisheye(hit.distance, player_angle, hit.angle);
        let height = self.slice_height(distance);
        Some(WallSlice {
            screen_x,
            top: self.config.viewport_height * 0.5 - height * 0.5,
            height,
            color: hit.orientation.into(),
            distance,
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
