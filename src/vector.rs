// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Positional accessors for plain numeric slices.
//!
//! Vectors and colors are not types here, just slices read by index:
//! 0 = X / Red, 1 = Y / Green, 2 = Z / Blue, 3 = Alpha.
//! A slice that is too short (or absent) yields the zero value of the
//! element type instead of panicking, so callers can pass `&[]` or `None`
//! wherever a coordinate is optional.

/// X/Y/Z access on a slice, with `T::default()` for missing components.
pub trait Components<T> {
    fn component(&self, idx: usize) -> T;

    fn x(&self) -> T {
        self.component(0)
    }

    fn y(&self) -> T {
        self.component(1)
    }

    fn z(&self) -> T {
        self.component(2)
    }
}

impl<T: Copy + Default> Components<T> for [T] {
    fn component(&self, idx: usize) -> T {
        self.get(idx).copied().unwrap_or_default()
    }
}

impl<T: Copy + Default> Components<T> for Option<&[T]> {
    fn component(&self, idx: usize) -> T {
        self.map_or_else(T::default, |v| v.component(idx))
    }
}

/// RGBA access on a byte slice, 0 for missing channels (alpha included).
pub trait Rgba {
    fn channel(&self, idx: usize) -> u8;

    fn red(&self) -> u8 {
        self.channel(0)
    }

    fn green(&self) -> u8 {
        self.channel(1)
    }

    fn blue(&self) -> u8 {
        self.channel(2)
    }

    fn alpha(&self) -> u8 {
        self.channel(3)
    }
}

impl Rgba for [u8] {
    fn channel(&self, idx: usize) -> u8 {
        self.get(idx).copied().unwrap_or(0)
    }
}

impl Rgba for Option<&[u8]> {
    fn channel(&self, idx: usize) -> u8 {
        self.map_or(0, |c| c.channel(idx))
    }
}

/// Euclidean distance between two 3D points; missing components count as 0.
///
/// d = √((x2-x1)² + (y2-y1)² + (z2-z1)²)
pub fn distance<T>(source: &[T], other: &[T]) -> f64
where
    T: Copy + Default + Into<f64>,
{
    let delta = |idx: usize| -> f64 {
        let from: f64 = source.component(idx).into();
        let to: f64 = other.component(idx).into();
        to - from
    };
    (0..3).map(|i| delta(i) * delta(i)).sum::<f64>().sqrt()
}
