//! Ray fan: which rays a frame casts.
//!
//! `SingleRay` casts exactly one ray along the facing direction. `Sweep`
//! casts one ray per screen column across the field of view; rays share
//! only read-only state, so the fan is computed with `rayon`.

use rayon::prelude::*;

use super::{
    projection::{FrameProjector, WallSlice},
    raycast::{RayHit, Raycaster},
};
use crate::world::{PlayerState, TileMap};

/// How many rays a frame casts, and where.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ViewMode {
    #[default]
    SingleRay,
    Sweep {
        columns: usize,
        /// Horizontal field of view in radians.
        fov: f64,
    },
}

impl ViewMode {
    #[inline]
    pub fn columns(&self) -> usize {
        match *self {
            ViewMode::SingleRay => 1,
            ViewMode::Sweep { columns, .. } => columns,
        }
    }

    /// Absolute angle of the ray for `column` (left to right).
    pub fn ray_angle(&self, player_angle: f64, column: usize) -> f64 {
        match *self {
            ViewMode::SingleRay => player_angle,
            ViewMode::Sweep { columns, fov } => {
                let step = fov / columns as f64;
                player_angle - fov * 0.5 + (column as f64 + 0.5) * step
            }
        }
    }
}

/// Cast every ray of `mode`, in column order.
pub fn cast_view(
    caster: &Raycaster,
    player: &PlayerState,
    map: &TileMap,
    mode: ViewMode,
) -> Vec<RayHit> {
    let angle = player.angle();
    match mode {
        ViewMode::SingleRay => vec![caster.cast(player, map, angle)],
        ViewMode::Sweep { columns, .. } => (0..columns)
            .into_par_iter()
            .map(|col| caster.cast(player, map, mode.ray_angle(angle, col)))
            .collect(),
    }
}

/// Project a column-ordered hit list; columns without a wall are skipped.
pub fn project_view(
    projector: &FrameProjector,
    hits: &[RayHit],
    player_angle: f64,
) -> Vec<WallSlice> {
    hits.par_iter()
        .enumerate()
        .filter_map(|(col, hit)| projector.project(col, hit, player_angle))
        .collect()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::projection::ProjectionConfig;
    use crate::level::reference_map;
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn default_mode_is_single_ray() {
        assert_eq!(ViewMode::default(), ViewMode::SingleRay);
        assert_eq!(ViewMode::default().columns(), 1);
    }

    #[test]
    fn single_ray_follows_facing() {
        let map = reference_map(64.0).unwrap();
        let player = PlayerState::centered_on(&map);
        let hits = cast_view(&Raycaster::default(), &player, &map, ViewMode::SingleRay);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].angle, player.angle());
    }

    #[test]
    fn sweep_is_symmetric_about_facing() {
        let mode = ViewMode::Sweep {
            columns: 60,
            fov: FRAC_PI_3,
        };
        let first = mode.ray_angle(1.0, 0);
        let last = mode.ray_angle(1.0, 59);
        assert!(((1.0 - first) - (last - 1.0)).abs() < 1e-12);
        assert!(first > 1.0 - FRAC_PI_3 * 0.5);
        assert!(last < 1.0 + FRAC_PI_3 * 0.5);
    }

    #[test]
    fn sweep_matches_sequential_casts() {
        let map = reference_map(64.0).unwrap();
        let mut player = PlayerState::centered_on(&map);
        player.turn_right();
        let mode = ViewMode::Sweep {
            columns: 32,
            fov: FRAC_PI_3,
        };
        let rc = Raycaster::default();
        let hits = cast_view(&rc, &player, &map, mode);
        assert_eq!(hits.len(), 32);
        for (col, hit) in hits.iter().enumerate() {
            let seq = rc.cast(&player, &map, mode.ray_angle(player.angle(), col));
            assert_eq!(*hit, seq);
        }
    }

    #[test]
    fn enclosed_view_fills_every_column() {
        let map = reference_map(64.0).unwrap();
        let player = PlayerState::centered_on(&map);
        let mode = ViewMode::Sweep {
            columns: 40,
            fov: FRAC_PI_3,
        };
        let hits = cast_view(&Raycaster::default(), &player, &map, mode);
        let projector = FrameProjector::new(ProjectionConfig::default(), 64.0);
        let slices = project_view(&projector, &hits, player.angle());
        assert_eq!(slices.len(), 40);
        for (col, s) in slices.iter().enumerate() {
            assert_eq!(s.screen_x, col);
        }
    }
}
