//! Uniform grid index over placed circles
//!
//! Buckets circle centers into square cells so a collision query only has to
//! visit circles that could possibly conflict. The query range is derived from
//! the largest radius ever inserted, so pruning never hides a real conflict.

use crate::spatial::registry::Placement;

/// Spatial hash of placed circles on a square canvas
#[derive(Clone, Debug)]
pub struct GridIndex {
    cell_size: u32,
    cells_per_side: usize,
    cells: Vec<Vec<Placement>>,
    max_radius: u32,
    len: usize,
}

impl GridIndex {
    /// Create an index covering `[0, canvas_size]` on both axes
    ///
    /// `cell_size` is usually the largest radius expected; it is clamped to at
    /// least one pixel.
    pub fn new(canvas_size: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let cells_per_side = (canvas_size / cell_size) as usize + 1;
        Self {
            cell_size,
            cells_per_side,
            cells: vec![Vec::new(); cells_per_side * cells_per_side],
            max_radius: 0,
            len: 0,
        }
    }

    /// Number of circles stored
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no circle is stored
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every circle, keeping the allocated cells
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.max_radius = 0;
        self.len = 0;
    }

    fn cell_coordinate(&self, value: i64) -> usize {
        let max = self.cells_per_side as i64 - 1;
        (value.div_euclid(i64::from(self.cell_size))).clamp(0, max) as usize
    }

    /// Store a placed circle
    pub fn insert(&mut self, placement: Placement) {
        let col = self.cell_coordinate(i64::from(placement.center[0]));
        let row = self.cell_coordinate(i64::from(placement.center[1]));
        if let Some(cell) = self.cells.get_mut(row * self.cells_per_side + col) {
            cell.push(placement);
            self.max_radius = self.max_radius.max(placement.radius);
            self.len += 1;
        }
    }

    /// Visit every stored circle whose center lies within `reach` pixels of `point`
    /// along both axes
    ///
    /// Circles in the clamped border cells are visited even when slightly out of
    /// reach; callers apply their own exact predicate.
    pub fn neighbors(&self, point: [i32; 2], reach: f64) -> impl Iterator<Item = &Placement> {
        let reach = reach.max(0.0).ceil() as i64;
        let x = i64::from(point[0]);
        let y = i64::from(point[1]);

        let col_start = self.cell_coordinate(x - reach);
        let col_end = self.cell_coordinate(x + reach);
        let row_start = self.cell_coordinate(y - reach);
        let row_end = self.cell_coordinate(y + reach);
        let per_side = self.cells_per_side;

        (row_start..=row_end)
            .flat_map(move |row| (col_start..=col_end).map(move |col| row * per_side + col))
            .filter_map(|index| self.cells.get(index))
            .flatten()
    }

    /// Largest radius inserted since the last clear
    pub const fn max_radius(&self) -> u32 {
        self.max_radius
    }
}
