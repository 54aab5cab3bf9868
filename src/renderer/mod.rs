//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It produces [`WallSlice`]s and ray hits and hands them to a type that
//! implements [`Renderer`]; the host only sees the finished buffer.
//!
//! A blanket-impl [`RendererExt`] adds `draw_frame` so call-sites stay short.

use crate::{
    engine::{RayHit, WallSlice},
    sim::{Frame, FrameDriver},
    world::{PlayerState, TileMap},
};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Screen rectangle in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Viewport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Where the first-person view and the optional top-down map go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub view: Viewport,
    pub map: Option<Viewport>,
}

impl ScreenLayout {
    /// Whole screen for the view.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            view: Viewport {
                x: 0,
                y: 0,
                w: width,
                h: height,
            },
            map: None,
        }
    }

    /// Square map on the left (at most half the width), view on the right.
    pub fn side_by_side(width: usize, height: usize) -> Self {
        let side = height.min(width / 2);
        Self {
            view: Viewport {
                x: side,
                y: 0,
                w: width - side,
                h: height,
            },
            map: Some(Viewport {
                x: 0,
                y: 0,
                w: side,
                h: side,
            }),
        }
    }
}

/// How slice coordinates map onto a view rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliceView {
    pub area: Viewport,
    /// Number of equal-width strips the area is split into.
    pub columns: usize,
    /// Slice-space height that corresponds to `area.h`.
    pub viewport_height: f64,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Paint ceiling and floor behind the walls of `area`.
    fn draw_backdrop(&mut self, area: Viewport);

    /// Rasterise one wall slice.
    fn draw_slice(&mut self, slice: &WallSlice, view: &SliceView);

    /// Top-down view: cells, player, heading, and one line per hit.
    fn draw_map(&mut self, map: &TileMap, player: &PlayerState, hits: &[RayHit], area: Viewport);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        layout: &ScreenLayout,
        driver: &FrameDriver,
        frame: &Frame,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);

        let view = SliceView {
            area: layout.view,
            columns: driver.mode().columns(),
            viewport_height: driver.projection().viewport_height,
        };
        self.draw_backdrop(view.area);
        for s in &frame.slices {
            self.draw_slice(s, &view);
        }

        if let Some(area) = layout.map {
            self.draw_map(driver.map(), driver.player(), &frame.hits, area);
        }

        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::{Palette, Software};
