//! Owned row-major 2D grid
//!
//! Positions are `(row, column)` pairs. Every accessor is bounds-checked;
//! out-of-range lookups return `None` instead of panicking.

use std::ops::{Index, IndexMut};

/// A rectangular grid of `T` stored in one `Vec`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Rows of different lengths were passed to [`Grid::from_rows`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaggedRow {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl<T: Clone> Grid<T> {
    /// A `width` × `height` grid with every cell set to `value`, or `None` when
    /// the cell count overflows `usize`
    pub fn filled(width: usize, height: usize, value: T) -> Option<Self> {
        let cells = width.checked_mul(height)?;
        Some(Self {
            width,
            height,
            cells: vec![value; cells],
        })
    }
}

impl<T> Grid<T> {
    /// Build a grid from rows, all of which must have the first row's length
    pub fn from_rows<I, R>(rows: I) -> Result<Self, RaggedRow>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (row, values) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(values);
            let found = cells.len() - before;
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Same shape, every cell passed through `f`
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, (row, column): (usize, usize)) -> Option<usize> {
        (row < self.height && column < self.width).then(|| row * self.width + column)
    }

    pub fn get(&self, position: (usize, usize)) -> Option<&T> {
        self.offset(position).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, position: (usize, usize)) -> Option<&mut T> {
        self.offset(position).map(move |i| &mut self.cells[i])
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.height).then(|| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, column: usize) -> impl Iterator<Item = &T> + '_ {
        let rows = if column < self.width { self.height } else { 0 };
        (0..rows).map(move |row| &self.cells[row * self.width + column])
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |column| (row, column)))
    }

    /// Every cell with its position, row-major
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// In-bounds cross neighbours of `position`: left, right, up, down
    pub fn neighbors(
        &self,
        (row, column): (usize, usize),
    ) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let (width, height) = (self.width, self.height);
        [
            (Some(row), column.checked_sub(1)),
            (Some(row), column.checked_add(1)),
            (row.checked_sub(1), Some(column)),
            (row.checked_add(1), Some(column)),
        ]
        .into_iter()
        .filter_map(move |candidate| match candidate {
            (Some(r), Some(c)) if r < height && c < width => Some((r, c)),
            _ => None,
        })
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, position: (usize, usize)) -> &T {
        match self.offset(position) {
            Some(i) => &self.cells[i],
            None => panic!(
                "position {:?} outside {}x{} grid",
                position, self.width, self.height
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, position: (usize, usize)) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.offset(position) {
            Some(i) => &mut self.cells[i],
            None => panic!("position {:?} outside {}x{} grid", position, width, height),
        }
    }
}
