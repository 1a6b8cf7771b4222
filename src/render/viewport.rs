// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Named split-screen regions.
//!
//! Each region maps the window size onto the rectangle handed to
//! `glViewport` and onto the effective size the projection's aspect ratio is
//! computed from. The rectangles keep the full-size width/height for the
//! offset regions (e.g. `Bottom` is `(0, h/2, w, h)`); the driver clips the
//! part that falls outside the window.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Viewport {
    #[default]
    Full,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Native viewport rectangle plus the dimensions used for the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRegion {
    /// `[x, y, width, height]` as passed to `glViewport`.
    pub rect: [i32; 4],
    /// `[width, height]` of the visible part.
    pub size: [i32; 2],
}

impl ViewportRegion {
    /// Width over height in whole numbers, truncated (800x600 is 1).
    /// `None` for a zero height.
    pub fn aspect(&self) -> Option<i32> {
        self.size[0].checked_div(self.size[1])
    }
}

impl Viewport {
    pub const ALL: [Viewport; 7] = [
        Viewport::Full,
        Viewport::Top,
        Viewport::Bottom,
        Viewport::TopLeft,
        Viewport::TopRight,
        Viewport::BottomLeft,
        Viewport::BottomRight,
    ];

    /// Looks the region up for a window of `[w, h]` pixels.
    pub fn region(self, window: [i32; 2]) -> ViewportRegion {
        let [w, h] = window;
        let (hw, hh) = (w / 2, h / 2);
        let (rect, size) = match self {
            Viewport::Full => ([0, 0, w, h], [w, h]),
            Viewport::Top => ([0, 0, w, hh], [w, hh]),
            Viewport::Bottom => ([0, hh, w, h], [w, hh]),
            Viewport::TopLeft => ([0, 0, hw, hh], [hw, hh]),
            Viewport::TopRight => ([hw, 0, w, hh], [hw, hh]),
            Viewport::BottomLeft => ([0, hh, hw, h], [hw, hh]),
            Viewport::BottomRight => ([hw, hh, w, h], [hw, hh]),
        };
        ViewportRegion { rect, size }
    }
}
