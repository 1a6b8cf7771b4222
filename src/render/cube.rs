// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Face table for an axis-aligned box centered at the origin.
//!
//! `size` holds half-extents. Each face lists its four corners in the
//! winding the quad is emitted with, and a visibility rule on the extents.
//! The rules are not symmetric: top, front and left look at two extents,
//! bottom, back and right at all three. A box that is flat on one axis
//! therefore keeps some faces and loses others.

use crate::vector::Components;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

/// Texture corners per face vertex, in emission order.
pub const FACE_TEX_COORDS: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

impl Face {
    /// Emission order; also the order of the per-face color list.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_visible(self, size: &[f64]) -> bool {
        let (x, y, z) = (size.x() > 0.0, size.y() > 0.0, size.z() > 0.0);
        match self {
            Face::Top => x && z,
            Face::Bottom => x && y && z,
            Face::Front => x && y,
            Face::Back => x && y && z,
            Face::Left => y && z,
            Face::Right => x && y && z,
        }
    }

    pub fn corners(self, size: &[f64]) -> [[f64; 3]; 4] {
        let (x, y, z) = (size.x(), size.y(), size.z());
        match self {
            Face::Top => [[x, y, -z], [-x, y, -z], [-x, y, z], [x, y, z]],
            Face::Bottom => [[x, -y, z], [-x, -y, z], [-x, -y, -z], [x, -y, -z]],
            Face::Front => [[x, y, z], [-x, y, z], [-x, -y, z], [x, -y, z]],
            Face::Back => [[-x, y, -z], [x, y, -z], [x, -y, -z], [-x, -y, -z]],
            Face::Left => [[-x, y, z], [-x, y, -z], [-x, -y, -z], [-x, -y, z]],
            Face::Right => [[x, y, -z], [x, y, z], [x, -y, z], [x, -y, -z]],
        }
    }

    pub fn visible(size: &[f64]) -> impl Iterator<Item = Face> + '_ {
        Face::ALL.into_iter().filter(move |f| f.is_visible(size))
    }
}
