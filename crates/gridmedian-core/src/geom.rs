//! Geometry primitives: [`Coord`] and [`Extents`].
//!
//! Both are generic over the number of axes `N`. Component 0 varies slowest,
//! so the derived lexicographic ordering of [`Coord`] is the row-major
//! enumeration order in 2-D `(row, col)` and layer-major order in 3-D
//! `(layer, row, col)`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// An N-dimensional integer coordinate.
///
/// Coordinates may lie outside any grid; bounds are a property of
/// [`Extents`], not of the coordinate itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord<const N: usize>(pub [i32; N]);

/// A 2-D coordinate `(row, col)`.
pub type Point = Coord<2>;

/// A 3-D coordinate `(layer, row, col)`.
pub type Voxel = Coord<3>;

impl<const N: usize> Coord<N> {
    /// The origin.
    pub const ZERO: Self = Self([0; N]);

    /// Create a coordinate from its components.
    #[inline]
    pub const fn from_array(components: [i32; N]) -> Self {
        Self(components)
    }

    /// The raw components, slowest axis first.
    #[inline]
    pub const fn components(self) -> [i32; N] {
        self.0
    }

    /// Component along `axis`.
    #[inline]
    pub const fn get(self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// All Chebyshev neighbours: every offset in `{-1, 0, 1}^N` except the
    /// zero offset, that is 8 cells in 2-D and 26 in 3-D.
    ///
    /// Offsets are produced in lexicographic order (first axis slowest,
    /// `-1` before `0` before `1`). Breadth-first searches rely on this
    /// order being fixed.
    #[inline]
    pub fn neighbors(self) -> NeighborIter<N> {
        NeighborIter {
            center: self,
            code: 0,
            total: 3usize.pow(N as u32),
        }
    }
}

impl Coord<2> {
    /// Create a 2-D coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self([row, col])
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.0[1]
    }
}

impl Coord<3> {
    /// Create a 3-D coordinate.
    #[inline]
    pub const fn new(layer: i32, row: i32, col: i32) -> Self {
        Self([layer, row, col])
    }

    #[inline]
    pub const fn layer(self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.0[2]
    }
}

// --- trait impls for Coord ---

impl<const N: usize> From<[i32; N]> for Coord<N> {
    fn from(components: [i32; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> fmt::Display for Coord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, c) in self.0.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> Add for Coord<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Self(out)
    }
}

impl<const N: usize> Sub for Coord<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o -= r;
        }
        Self(out)
    }
}

/// Iterator over the Chebyshev neighbours of a coordinate.
///
/// Created by [`Coord::neighbors`]. Each offset is decoded from a base-3
/// counter whose most significant digit drives axis 0.
#[derive(Debug, Clone)]
pub struct NeighborIter<const N: usize> {
    center: Coord<N>,
    code: usize,
    total: usize,
}

impl<const N: usize> Iterator for NeighborIter<N> {
    type Item = Coord<N>;

    fn next(&mut self) -> Option<Coord<N>> {
        while self.code < self.total {
            let code = self.code;
            self.code += 1;
            // All digits equal to 1 encodes the zero offset.
            if code == self.total / 2 {
                continue;
            }
            let mut rem = code;
            let mut out = self.center.0;
            for axis in (0..N).rev() {
                out[axis] += (rem % 3) as i32 - 1;
                rem /= 3;
            }
            return Some(Coord(out));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let mut remaining = self.total - self.code;
        if self.code <= self.total / 2 {
            remaining -= 1;
        }
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for NeighborIter<N> {}

// ---------------------------------------------------------------------------
// Extents
// ---------------------------------------------------------------------------

/// The per-axis sizes of a grid. Valid coordinates satisfy
/// `0 <= c[axis] < extents[axis]` on every axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extents<const N: usize>([i32; N]);

impl<const N: usize> Extents<N> {
    /// Create extents from per-axis sizes.
    ///
    /// # Panics
    ///
    /// Panics if `N == 0` or any size is not strictly positive.
    pub fn new(dims: [i32; N]) -> Self {
        assert!(N > 0, "grids need at least one axis");
        assert!(
            dims.iter().all(|&d| d > 0),
            "grid extents must be positive, got {dims:?}"
        );
        Self(dims)
    }

    /// Per-axis sizes, slowest axis first.
    #[inline]
    pub const fn dims(self) -> [i32; N] {
        self.0
    }

    /// Size along `axis`.
    #[inline]
    pub const fn dim(self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.0.iter().map(|&d| d as usize).product()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `c` lies inside the extents.
    #[inline]
    pub fn contains(self, c: Coord<N>) -> bool {
        c.0.iter().zip(self.0).all(|(&v, d)| v >= 0 && v < d)
    }

    /// Whether `c` is on the outer shell: some component is 0 or the last
    /// index of its axis.
    #[inline]
    pub fn is_boundary(self, c: Coord<N>) -> bool {
        c.0.iter().zip(self.0).any(|(&v, d)| v == 0 || v == d - 1)
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coord<N>) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let mut idx = 0usize;
        for axis in 0..N {
            idx = idx * self.0[axis] as usize + c.0[axis] as usize;
        }
        Some(idx)
    }

    /// Convert a flat index back to a coordinate.
    #[inline]
    pub fn coord(self, idx: usize) -> Coord<N> {
        debug_assert!(idx < self.len(), "flat index {idx} outside {self}");
        let mut rem = idx;
        let mut out = [0i32; N];
        for axis in (0..N).rev() {
            let d = self.0[axis] as usize;
            out[axis] = (rem % d) as i32;
            rem /= d;
        }
        Coord(out)
    }

    /// Iterate over every coordinate in row-major order.
    pub fn iter(self) -> ExtentsIter<N> {
        ExtentsIter {
            extents: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl<const N: usize> IntoIterator for Extents<N> {
    type Item = Coord<N>;
    type IntoIter = ExtentsIter<N>;

    fn into_iter(self) -> ExtentsIter<N> {
        self.iter()
    }
}

impl<const N: usize> fmt::Display for Extents<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (axis, d) in self.0.iter().enumerate() {
            if axis > 0 {
                write!(f, "x")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Row-major iterator over the coordinates of an [`Extents`].
#[derive(Debug, Clone)]
pub struct ExtentsIter<const N: usize> {
    extents: Extents<N>,
    next: usize,
    len: usize,
}

impl<const N: usize> Iterator for ExtentsIter<N> {
    type Item = Coord<N>;

    fn next(&mut self) -> Option<Coord<N>> {
        if self.next >= self.len {
            return None;
        }
        let c = self.extents.coord(self.next);
        self.next += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for ExtentsIter<N> {}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
fn components<E: serde::de::Error, const N: usize>(v: Vec<i32>) -> Result<[i32; N], E> {
    let len = v.len();
    v.try_into()
        .map_err(|_| E::invalid_length(len, &"one component per axis"))
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for Coord<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.0.as_slice(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for Coord<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = <Vec<i32> as serde::Deserialize>::deserialize(deserializer)?;
        components::<D::Error, N>(v).map(Coord)
    }
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for Extents<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.0.as_slice(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for Extents<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let v = <Vec<i32> as serde::Deserialize>::deserialize(deserializer)?;
        let dims = components::<D::Error, N>(v)?;
        if N == 0 || dims.iter().any(|&d| d <= 0) {
            return Err(D::Error::custom("grid extents must be positive"));
        }
        Ok(Extents(dims))
    }
}
