//! Grid map and cell coordinates.

use crate::error::{Result, SearchError};
use crate::model::Action;
use std::fmt;

/// A grid cell. `x` is the column, `y` the row.
///
/// Coordinates are signed so that applying an [`Action`] near the border
/// yields a representable (out-of-bounds) cell. Moves that leave the `i32`
/// range altogether yield `None` from [`offset`](Cell::offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Cell) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// The displacement that moves `self` onto `to`, or `None` when it does
    /// not fit in an [`Action`].
    pub fn step_to(&self, to: Cell) -> Option<Action> {
        Some(Action::new(
            to.x.checked_sub(self.x)?,
            to.y.checked_sub(self.y)?,
        ))
    }

    /// The cell reached by applying `action`, or `None` on coordinate overflow.
    pub fn offset(&self, action: Action) -> Option<Cell> {
        Some(Cell::new(
            self.x.checked_add(action.dx)?,
            self.y.checked_add(action.dy)?,
        ))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular obstacle map, stored row-major.
///
/// `blocked.len() == width * height` always holds; deserialization checks
/// it like the constructors do.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl Grid {
    /// An obstacle-free grid.
    ///
    /// # Errors
    /// Rejects sizes whose cell count overflows `usize` or whose coordinates
    /// do not fit in a [`Cell`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            blocked: vec![false; len],
        })
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        let fits = |n: usize| i32::try_from(n).is_ok();
        match width.checked_mul(height) {
            Some(len) if fits(width) && fits(height) => Ok(len),
            _ => Err(SearchError::InvalidConfig(format!(
                "grid of {width}x{height} cells is too large"
            ))),
        }
    }

    /// Builds a grid from rows of obstacle flags. Row 0 is `y = 0`.
    ///
    /// # Errors
    /// Rows of unequal width are rejected.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SearchError::InvalidConfig(format!(
                "grid row {y} has width {}, expected {width}",
                row.len()
            )));
        }
        Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            blocked: rows.iter().flatten().copied().collect(),
        })
    }

    /// Parses an ASCII map: `#` is an obstacle, any other character is free.
    ///
    /// The first line is `y = 0`. Blank lines are ignored.
    ///
    /// ```
    /// use u_pathsearch::grid::{Cell, Grid};
    ///
    /// let grid = Grid::parse("..#\n...").unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert!(grid.is_blocked(Cell::new(2, 0)));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Whether `cell` is an obstacle or outside the grid.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.blocked[i])
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Marks `cell` as an obstacle. Cells outside the grid are ignored.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        if let Some(i) = self.index(cell) {
            self.blocked[i] = blocked;
        }
    }

    /// Free 4-connected neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        [Action::RIGHT, Action::LEFT, Action::UP, Action::DOWN]
            .into_iter()
            .filter_map(move |a| cell.offset(a))
            .filter(move |c| self.is_free(*c))
    }

    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub(crate) fn len(&self) -> usize {
        self.blocked.len()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = SearchError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let len = Self::checked_len(repr.width, repr.height)?;
        if repr.blocked.len() != len {
            return Err(SearchError::InvalidConfig(format!(
                "grid of {}x{} needs {len} cells, got {}",
                repr.width,
                repr.height,
                repr.blocked.len()
            )));
        }
        Ok(Self {
            width: repr.width,
            height: repr.height,
            blocked: repr.blocked,
        })
    }
}
