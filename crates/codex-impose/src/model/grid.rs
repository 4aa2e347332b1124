//! Grid layout calculation
//!
//! This module handles the geometric layout of a regular grid of pagelets
//! on a page: cell dimensions, cell centers, traversal order and the lines
//! separating cells.

use crate::geometry::{Dimensions, Length, Point};

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Order in which cells are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridOrder {
    /// Fill a whole row before moving down to the next
    #[default]
    RowMajor,
    /// Fill a whole column before moving across to the next
    ColumnMajor,
}

/// Horizontal reading direction of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Shape and traversal of a grid of pagelets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub columns: usize,
    pub order: GridOrder,
    pub direction: ReadingDirection,
    /// Pagelets are turned a quarter turn inside their cells, so their
    /// width and height are swapped relative to the cell
    pub rotated: bool,
}

impl GridLayout {
    /// A row-major, left-to-right grid without rotation
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            order: GridOrder::RowMajor,
            direction: ReadingDirection::LeftToRight,
            rotated: false,
        }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// All cell positions in traversal order
    pub fn positions(&self) -> Vec<GridPosition> {
        let columns: Vec<usize> = match self.direction {
            ReadingDirection::LeftToRight => (0..self.columns).collect(),
            ReadingDirection::RightToLeft => (0..self.columns).rev().collect(),
        };

        match self.order {
            GridOrder::RowMajor => (0..self.rows)
                .flat_map(|row| columns.iter().map(move |&col| GridPosition::new(row, col)))
                .collect(),
            GridOrder::ColumnMajor => columns
                .iter()
                .flat_map(|&col| (0..self.rows).map(move |row| GridPosition::new(row, col)))
                .collect(),
        }
    }

    /// Size of one cell on a page of the given size
    pub fn cell_dimensions(&self, page: Dimensions) -> Dimensions {
        page.split(self.columns, self.rows)
    }

    /// Size of the pagelet held by one cell, swapped when rotated
    pub fn pagelet_dimensions(&self, page: Dimensions) -> Dimensions {
        let cell = self.cell_dimensions(page);
        if self.rotated { cell.swapped() } else { cell }
    }

    /// Center of a cell. Row 0 is at the top, so y is inverted.
    pub fn cell_center(&self, page: Dimensions, pos: GridPosition) -> Point {
        let cell = self.cell_dimensions(page);
        let x = cell.width() * (pos.col as f64 + 0.5);
        let y = page.height() - cell.height() * (pos.row as f64 + 0.5);
        Point::from_lengths(x, y)
    }

    /// Interior lines between cells as (from, to) pairs: vertical lines first
    pub fn interior_lines(&self, page: Dimensions) -> Vec<(Point, Point)> {
        let cell = self.cell_dimensions(page);
        let vertical = (1..self.columns).map(|col| {
            let x = cell.width() * col as f64;
            (
                Point::from_lengths(x, Length::ZERO),
                Point::from_lengths(x, page.height()),
            )
        });
        let horizontal = (1..self.rows).map(|row| {
            let y = cell.height() * row as f64;
            (
                Point::from_lengths(Length::ZERO, y),
                Point::from_lengths(page.width(), y),
            )
        });
        vertical.chain(horizontal).collect()
    }
}
