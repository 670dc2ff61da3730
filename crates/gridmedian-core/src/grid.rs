//! A dense N-dimensional grid of [`CellTag`] values.
//!
//! The grid is the single source of truth for maze topology. Its size is
//! fixed at construction; cells are stored in row-major order so that
//! every enumeration ([`Grid::iter`], [`Grid::cells_with_tag`], ...) is
//! deterministic.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::cell::CellTag;
use crate::geom::{Coord, Extents, Point};

/// A fixed-size grid of cell tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<const N: usize> {
    extents: Extents<N>,
    cells: Vec<CellTag>,
}

impl<const N: usize> Grid<N> {
    /// Create a grid where every cell is a wall.
    pub fn new(extents: Extents<N>) -> Self {
        Self::filled(extents, CellTag::Wall)
    }

    /// Create a grid where every cell carries `tag`.
    pub fn filled(extents: Extents<N>, tag: CellTag) -> Self {
        Self {
            extents,
            cells: vec![tag; extents.len()],
        }
    }

    /// The grid's extents.
    #[inline]
    pub fn extents(&self) -> Extents<N> {
        self.extents
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the grid contains the coordinate.
    #[inline]
    pub fn contains(&self, c: Coord<N>) -> bool {
        self.extents.contains(c)
    }

    /// Whether `c` lies on the outer shell of the grid.
    #[inline]
    pub fn is_boundary(&self, c: Coord<N>) -> bool {
        self.extents.is_boundary(c)
    }

    /// Get the cell at a coordinate, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord<N>) -> Option<CellTag> {
        self.extents.index(c).map(|i| self.cells[i])
    }

    /// Get the cell at a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of bounds.
    #[inline]
    pub fn cell_at(&self, c: Coord<N>) -> CellTag {
        self.cells[self.checked_index(c)]
    }

    /// Overwrite the cell at a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of bounds.
    #[inline]
    pub fn set_cell(&mut self, c: Coord<N>, tag: CellTag) {
        let i = self.checked_index(c);
        self.cells[i] = tag;
    }

    /// Whether a search may step onto `c`: in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, c: Coord<N>) -> bool {
        self.at(c).is_some_and(|t| !t.is_wall())
    }

    /// Assign every cell the value returned by `f`, visiting cells in
    /// row-major order.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Coord<N>, CellTag) -> CellTag) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(self.extents.coord(i), *cell);
        }
    }

    /// All coordinates carrying `tag`, in row-major order.
    pub fn cells_with_tag(&self, tag: CellTag) -> Vec<Coord<N>> {
        self.iter()
            .filter(|&(_, t)| t == tag)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn empty_cells(&self) -> Vec<Coord<N>> {
        self.cells_with_tag(CellTag::Empty)
    }

    pub fn target_cells(&self) -> Vec<Coord<N>> {
        self.cells_with_tag(CellTag::Target)
    }

    pub fn wall_cells(&self) -> Vec<Coord<N>> {
        self.cells_with_tag(CellTag::Wall)
    }

    /// Walls on the outer shell, in row-major order.
    pub fn boundary_wall_cells(&self) -> Vec<Coord<N>> {
        self.iter()
            .filter(|&(c, t)| t.is_wall() && self.is_boundary(c))
            .map(|(c, _)| c)
            .collect()
    }

    /// How many cells carry `tag`.
    pub fn count(&self, tag: CellTag) -> usize {
        self.cells.iter().filter(|&&t| t == tag).count()
    }

    /// Share of all cells that carry `tag`, in `[0, 1]`.
    pub fn fraction(&self, tag: CellTag) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.count(tag) as f64 / self.cells.len() as f64
    }

    /// All cell tags in row-major order.
    pub fn tags(&self) -> &[CellTag] {
        &self.cells
    }

    /// Iterate over `(Coord, CellTag)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord<N>, CellTag)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &t)| (self.extents.coord(i), t))
    }

    fn checked_index(&self, c: Coord<N>) -> usize {
        match self.extents.index(c) {
            Some(i) => i,
            None => panic!("coordinate {c} outside grid of extents {}", self.extents),
        }
    }
}

impl<const N: usize> Index<Coord<N>> for Grid<N> {
    type Output = CellTag;

    fn index(&self, c: Coord<N>) -> &CellTag {
        &self.cells[self.checked_index(c)]
    }
}

/// Renders one character per cell. Rows end with `'\n'` except the last.
/// Grids with three or more axes are printed as a sequence of 2-D slabs,
/// each headed by `Layer i:` and separated by a blank line.
impl<const N: usize> fmt::Display for Grid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.extents.dims();
        let cols = dims[N - 1] as usize;
        let slab = if N >= 2 { cols * dims[N - 2] as usize } else { cols };

        for (i, (c, tag)) in self.iter().enumerate() {
            if N > 2 && i % slab == 0 {
                if i > 0 {
                    write!(f, "\n\n")?;
                }
                write!(f, "Layer ")?;
                for axis in 0..N - 2 {
                    if axis > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", c.get(axis))?;
                }
                writeln!(f, ":")?;
            } else if i > 0 && i % cols == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", tag.to_char())?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a grid from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    /// The input has no cells.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseGridError::Empty => write!(f, "grid text has no cells"),
            ParseGridError::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line} is {found} cells wide, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for ParseGridError {}

/// Parses the 2-D rendering produced by `Display`: `'#'` wall, `' '` empty,
/// `'*'` target, anything else a mark. Lines are not trimmed, since trailing
/// spaces are empty cells; a single trailing newline is ignored.
impl FromStr for Grid<2> {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('\n').unwrap_or(s);
        if s.is_empty() {
            return Err(ParseGridError::Empty);
        }

        let mut cells = Vec::new();
        let mut width = None;
        let mut rows = 0;
        for (line, text) in s.split('\n').enumerate() {
            let before = cells.len();
            cells.extend(text.chars().map(CellTag::from_char));
            let found = cells.len() - before;
            match width {
                None if found == 0 => return Err(ParseGridError::Empty),
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseGridError::InconsistentWidth {
                        line,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let width = width.unwrap_or_default();
        let extents = Extents::new([rows as i32, width as i32]);
        debug_assert_eq!(extents.len(), cells.len());
        Ok(Grid { extents, cells })
    }
}

impl Grid<2> {
    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.extents.dim(0)
    }

    /// Number of columns.
    pub fn cols(&self) -> i32 {
        self.extents.dim(1)
    }

    /// Convenience accessor for `(row, col)` pairs.
    pub fn at_rc(&self, row: i32, col: i32) -> Option<CellTag> {
        self.at(Point::new(row, col))
    }
}
