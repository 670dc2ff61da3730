use std::fmt;

/// The content of one maze cell.
///
/// Only [`Wall`](CellTag::Wall) blocks movement. [`Mark`](CellTag::Mark) is
/// an annotation left for renderers; it is never a wall, even when its
/// character is `'#'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellTag {
    #[default]
    Wall,
    Empty,
    Target,
    Mark(char),
}

impl CellTag {
    pub const WALL_CHAR: char = '#';
    pub const EMPTY_CHAR: char = ' ';
    pub const TARGET_CHAR: char = '*';

    /// Whether the cell blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, CellTag::Wall)
    }

    /// Single printable character for this tag.
    pub const fn to_char(self) -> char {
        match self {
            CellTag::Wall => Self::WALL_CHAR,
            CellTag::Empty => Self::EMPTY_CHAR,
            CellTag::Target => Self::TARGET_CHAR,
            CellTag::Mark(ch) => ch,
        }
    }

    /// Inverse of [`to_char`](Self::to_char). Unknown characters become
    /// marks.
    pub const fn from_char(ch: char) -> Self {
        match ch {
            Self::WALL_CHAR => CellTag::Wall,
            Self::EMPTY_CHAR => CellTag::Empty,
            Self::TARGET_CHAR => CellTag::Target,
            other => CellTag::Mark(other),
        }
    }
}

impl From<char> for CellTag {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl From<CellTag> for char {
    fn from(tag: CellTag) -> Self {
        tag.to_char()
    }
}

impl fmt::Display for CellTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
