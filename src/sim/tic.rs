use log::debug;
use std::time::{Duration, Instant};

use super::input::{Intent, player_input};
use crate::{
    engine::{
        FrameProjector, ProjectionConfig, RayHit, Raycaster, ViewMode, WallSlice, cast_view,
        project_view,
    },
    world::{PlayerState, TileMap},
};

pub const SIM_FPS: u32 = 35;

/// Most tics run by one `pump`; longer stalls are dropped, not replayed.
const MAX_CATCH_UP: u32 = 8;

/// Converts wall-clock time into a count of fixed-rate tics.
pub struct TicRunner {
    last: Instant,
    tic: Duration,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new(SIM_FPS)
    }
}

impl TicRunner {
    pub fn new(rate: u32) -> Self {
        Self {
            last: Instant::now(),
            tic: Duration::from_micros(1_000_000 / rate.max(1) as u64),
        }
    }

    /// Number of tics due since the previous call.
    pub fn pump(&mut self) -> u32 {
        self.pump_at(Instant::now())
    }

    /// `pump` with an explicit clock reading.
    pub fn pump_at(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while now.saturating_duration_since(self.last) >= self.tic {
            self.last += self.tic;
            due += 1;
            if due == MAX_CATCH_UP {
                debug!("tic runner fell behind; resynchronising");
                self.last = now;
                break;
            }
        }
        due
    }
}

/// Output of one render pass.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// One hit per column, in column order.
    pub hits: Vec<RayHit>,
    /// Only columns that hit a wall.
    pub slices: Vec<WallSlice>,
}

/// Owns the game state and runs input → cast → project.
///
/// The map is read-only; only `step` mutates the player.
pub struct FrameDriver {
    map: TileMap,
    player: PlayerState,
    caster: Raycaster,
    projector: FrameProjector,
    mode: ViewMode,
}

impl FrameDriver {
    /// Driver with the player centred on `map`, facing +X.
    pub fn new(map: TileMap, config: ProjectionConfig, mode: ViewMode) -> Self {
        let player = PlayerState::centered_on(&map);
        Self::with_player(map, player, config, mode)
    }

    pub fn with_player(
        map: TileMap,
        player: PlayerState,
        config: ProjectionConfig,
        mode: ViewMode,
    ) -> Self {
        let projector = FrameProjector::new(config, map.block_size());
        Self {
            map,
            player,
            caster: Raycaster::default(),
            projector,
            mode,
        }
    }

    #[inline]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[inline]
    pub fn projection(&self) -> &ProjectionConfig {
        self.projector.config()
    }

    #[inline]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Advance one tic with the sampled input.
    pub fn step(&mut self, intent: Intent) {
        player_input(&mut self.player, intent);
    }

    /// Cast and project the current view.
    pub fn render(&self) -> Frame {
        let hits = cast_view(&self.caster, &self.player, &self.map, self.mode);
        let slices = project_view(&self.projector, &hits, self.player.angle());
        Frame { hits, slices }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ColorTag, Orientation};
    use crate::level::reference_map;
    use std::f64::consts::FRAC_PI_3;

    fn driver(mode: ViewMode) -> FrameDriver {
        FrameDriver::new(reference_map(64.0).unwrap(), ProjectionConfig::default(), mode)
    }

    #[test]
    fn reference_frame_sees_right_wall() {
        let d = driver(ViewMode::SingleRay);
        let frame = d.render();
        assert_eq!(frame.hits.len(), 1);
        assert_eq!(frame.hits[0].orientation, Orientation::Vertical);
        assert_eq!(frame.slices.len(), 1);
        let s = frame.slices[0];
        assert_eq!(s.screen_x, 0);
        assert_eq!(s.color, ColorTag::Vertical);
        assert!((s.distance - 192.0).abs() < 1e-9);
        assert!((s.height - 64.0 * 320.0 / 192.0).abs() < 1e-9);
    }

    #[test]
    fn stepping_closer_grows_slice() {
        let mut d = driver(ViewMode::SingleRay);
        let far = d.render().slices[0].height;
        for _ in 0..10 {
            d.step(Intent::FORWARD);
        }
        assert_eq!(d.player().position().x, 256.0 + 50.0);
        let near = d.render().slices[0].height;
        assert!(near > far);
    }

    #[test]
    fn sweep_mode_renders_all_columns() {
        let mut d = driver(ViewMode::SingleRay);
        d.set_mode(ViewMode::Sweep {
            columns: 64,
            fov: FRAC_PI_3,
        });
        let frame = d.render();
        assert_eq!(frame.hits.len(), 64);
        assert_eq!(frame.slices.len(), 64);
    }

    #[test]
    fn open_map_renders_nothing() {
        let map = TileMap::new(8, 8, 64.0, vec![0; 64]).unwrap();
        let d = FrameDriver::new(map, ProjectionConfig::default(), ViewMode::SingleRay);
        let frame = d.render();
        assert_eq!(frame.hits.len(), 1);
        assert!(frame.slices.is_empty());
    }

    #[test]
    fn tic_runner_counts_and_caps() {
        let mut t = TicRunner::new(10);
        let start = t.last;
        assert_eq!(t.pump_at(start), 0);
        assert_eq!(t.pump_at(start + Duration::from_millis(250)), 2);
        assert_eq!(t.pump_at(start + Duration::from_millis(310)), 1);
        // a long stall only yields the catch-up budget
        assert_eq!(t.pump_at(start + Duration::from_secs(60)), MAX_CATCH_UP);
        assert_eq!(t.pump_at(start + Duration::from_secs(60)), 0);
    }
}
