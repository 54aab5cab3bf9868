//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Each wall slice becomes a solid vertical strip; the two wall
//!   orientations get two shades of red.
//! * The top-down map is drawn with filled cells and Bresenham lines.
//! ---------------------------------------------------------------------------

use glam::DVec2;

use crate::{
    engine::{ColorTag, RayHit, WallSlice},
    renderer::{Renderer, Rgba, SliceView, Viewport},
    world::{PlayerState, TileMap, WALL},
};

/// Colours used by [`Software`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub clear: Rgba,
    pub ceiling: Rgba,
    pub floor: Rgba,
    pub wall_vertical: Rgba,
    pub wall_horizontal: Rgba,
    pub map_wall: Rgba,
    pub map_empty: Rgba,
    pub player: Rgba,
    pub ray: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            clear: 0x00_4C4C4C,
            ceiling: 0x00_1E1E46,
            floor: 0x00_282828,
            wall_vertical: 0x00_E50000,
            wall_horizontal: 0x00_B20000,
            map_wall: 0x00_FFFFFF,
            map_empty: 0x00_000000,
            player: 0x00_FFFF00,
            ray: 0x00_00FF00,
        }
    }
}

impl Palette {
    #[inline]
    pub fn wall(&self, tag: ColorTag) -> Rgba {
        match tag {
            ColorTag::Vertical => self.wall_vertical,
            ColorTag::Horizontal => self.wall_horizontal,
        }
    }
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl Software {
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pixel at (x, y) of the last frame, if inside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(self.palette.clear);
    }

    fn draw_backdrop(&mut self, area: Viewport) {
        let mid = area.y + area.h / 2;
        self.fill_rect(area.x, area.y, area.w, mid - area.y, self.palette.ceiling);
        self.fill_rect(area.x, mid, area.w, area.y + area.h - mid, self.palette.floor);
    }

    fn draw_slice(&mut self, slice: &WallSlice, view: &SliceView) {
        let area = view.area;
        if area.is_empty() || view.columns == 0 || view.viewport_height <= 0.0 {
            return;
        }

        /* horizontal strip of this column ------------------------------*/
        let strip = area.w as f64 / view.columns as f64;
        let x0 = area.x + (slice.screen_x as f64 * strip) as usize;
        let x1 = area.x + ((slice.screen_x + 1) as f64 * strip) as usize;

        /* slice space → pixel rows, clipped to the area ----------------*/
        let scale = area.h as f64 / view.viewport_height;
        let top = (slice.top * scale).max(0.0);
        let bottom = (slice.bottom() * scale).min(area.h as f64);
        if bottom <= top {
            return;
        }
        let y0 = area.y + top as usize;
        let y1 = area.y + bottom.ceil() as usize;

        let colour = self.palette.wall(slice.color);
        self.fill_rect(x0, y0, x1.max(x0 + 1) - x0, y1 - y0, colour);
    }

    fn draw_map(&mut self, map: &TileMap, player: &PlayerState, hits: &[RayHit], area: Viewport) {
        if area.is_empty() {
            return;
        }

        /* cells ----------------------------------------------------------*/
        let cell = (area.w / map.width()).min(area.h / map.height());
        if cell == 0 {
            return;
        }
        let gap = usize::from(cell > 4);
        for my in 0..map.height() {
            for mx in 0..map.width() {
                let colour = match map.cell(mx, my) {
                    Some(WALL) => self.palette.map_wall,
                    _ => self.palette.map_empty,
                };
                self.fill_rect(
                    area.x + mx * cell,
                    area.y + my * cell,
                    cell - gap,
                    cell - gap,
                    colour,
                );
            }
        }

        /* world → map pixels -------------------------------------------*/
        let scale = cell as f64 / map.block_size();
        let origin = DVec2::new(area.x as f64, area.y as f64);
        let to_px = |p: DVec2| {
            let q = origin + p * scale;
            (q.x.round() as i32, q.y.round() as i32)
        };

        let (px, py) = to_px(player.position());

        /* rays -----------------------------------------------------------*/
        for hit in hits.iter().filter(|h| h.is_hit()) {
            let (hx, hy) = to_px(hit.point);
            self.draw_line(px, py, hx, hy, self.palette.ray);
        }

        /* player: dot + heading -------------------------------------------*/
        let dot = (cell / 8).max(1) as i32;
        for dy in -dot..=dot {
            for dx in -dot..=dot {
                self.put(px + dx, py + dy, self.palette.player);
            }
        }
        let (tx, ty) = to_px(player.position() + player.delta() * 5.0);
        self.draw_line(px, py, tx, ty, self.palette.player);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── raster helpers ─────────────────────────────*/

impl Software {
    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, colour: Rgba) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            let base = row * self.width;
            self.scratch[base + x..base + x_end].fill(colour);
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Integer Bresenham line-drawing algorithm, clipped per pixel.
    fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
