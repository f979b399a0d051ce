//! The brick grid
//!
//! Bricks are stored row-major so that iteration order doubles as the
//! collision tie-break: lowest row first, then lowest column.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, boxes_overlap};
use crate::config::EngineConfig;
use crate::consts::MAX_BRICKS;

/// A destructible target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub alive: bool,
}

/// Grid placement parameters, copied out of the engine config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickLayout {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl BrickLayout {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            rows: config.brick_rows,
            columns: config.brick_columns,
            width: config.brick_width,
            height: config.brick_height,
            padding: config.brick_padding,
            offset_x: config.brick_offset_x,
            offset_y: config.brick_offset_y,
        }
    }

    /// Bounding box of the brick at (row, col)
    pub fn rect_at(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * (self.width + self.padding) + self.offset_x,
            row as f32 * (self.height + self.padding) + self.offset_y,
            self.width,
            self.height,
        )
    }
}

#[derive(Debug, Clone)]
pub struct BrickField {
    layout: BrickLayout,
    bricks: Vec<Brick>,
    remaining: usize,
}

impl BrickField {
    pub fn new(layout: BrickLayout) -> Self {
        let mut field = Self {
            layout,
            bricks: Vec::with_capacity(layout.rows.saturating_mul(layout.columns).min(MAX_BRICKS)),
            remaining: 0,
        };
        field.reset();
        field
    }

    /// Rebuild the full grid with every brick alive
    pub fn reset(&mut self) {
        self.bricks.clear();
        for row in 0..self.layout.rows {
            for col in 0..self.layout.columns {
                self.bricks.push(Brick {
                    row,
                    col,
                    rect: self.layout.rect_at(row, col),
                    alive: true,
                });
            }
        }
        self.remaining = self.bricks.len();
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining
    }

    /// Mark a brick dead. Returns whether it was alive before the call.
    pub fn kill_at(&mut self, row: usize, col: usize) -> bool {
        let Some(index) = self.index_of(row, col) else {
            return false;
        };
        let brick = &mut self.bricks[index];
        if !brick.alive {
            return false;
        }
        brick.alive = false;
        self.remaining -= 1;
        true
    }

    /// First alive brick (row-major) whose box overlaps the ball
    pub fn first_overlapping(&self, center: Vec2, radius: f32) -> Option<(usize, usize)> {
        self.bricks
            .iter()
            .find(|b| b.alive && boxes_overlap(center, radius, &b.rect))
            .map(|b| (b.row, b.col))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.index_of(row, col).map(|i| &self.bricks[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn as_slice(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn columns(&self) -> usize {
        self.layout.columns
    }

    pub fn total(&self) -> usize {
        self.bricks.len()
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.layout.rows && col < self.layout.columns)
            .then(|| row * self.layout.columns + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_field() -> BrickField {
        BrickField::new(BrickLayout::from_config(&EngineConfig::default()))
    }

    #[test]
    fn test_grid_geometry() {
        let field = default_field();
        assert_eq!(field.total(), 45);
        assert_eq!(field.remaining_count(), 45);

        let first = field.get(0, 0).expect("brick exists");
        assert_eq!(first.rect, Rect::new(46.0, 56.0, 72.0, 22.0));

        let last = field.get(4, 8).expect("brick exists");
        assert_eq!(last.rect, Rect::new(8.0 * 82.0 + 46.0, 4.0 * 32.0 + 56.0, 72.0, 22.0));
        assert!(field.get(5, 0).is_none());
        assert!(field.get(0, 9).is_none());
    }

    #[test]
    fn test_storage_is_row_major() {
        let field = default_field();
        let order: Vec<(usize, usize)> = field.iter().take(10).map(|b| (b.row, b.col)).collect();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[8], (0, 8));
        assert_eq!(order[9], (1, 0));
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut field = default_field();
        assert!(field.kill_at(2, 3));
        assert_eq!(field.remaining_count(), 44);
        assert!(!field.kill_at(2, 3));
        assert_eq!(field.remaining_count(), 44);
        assert!(!field.get(2, 3).expect("brick exists").alive);
    }

    #[test]
    fn test_kill_out_of_range_is_noop() {
        let mut field = default_field();
        assert!(!field.kill_at(99, 0));
        assert!(!field.kill_at(0, 99));
        assert_eq!(field.remaining_count(), 45);
    }

    #[test]
    fn test_reset_revives_everything() {
        let mut field = default_field();
        field.kill_at(0, 0);
        field.kill_at(4, 8);
        field.reset();
        assert_eq!(field.remaining_count(), 45);
        assert!(field.iter().all(|b| b.alive));
    }

    #[test]
    fn test_first_overlapping_prefers_lowest_row_then_column() {
        let field = default_field();
        // Ball straddling the gap between (0,0), (0,1), (1,0) and (1,1)
        let gap_center = Vec2::new(46.0 + 72.0 + 5.0, 56.0 + 22.0 + 5.0);
        assert_eq!(field.first_overlapping(gap_center, 10.0), Some((0, 0)));
    }

    #[test]
    fn test_first_overlapping_skips_dead_bricks() {
        let mut field = default_field();
        let gap_center = Vec2::new(46.0 + 72.0 + 5.0, 56.0 + 22.0 + 5.0);
        field.kill_at(0, 0);
        assert_eq!(field.first_overlapping(gap_center, 10.0), Some((0, 1)));
        field.kill_at(0, 1);
        assert_eq!(field.first_overlapping(gap_center, 10.0), Some((1, 0)));
    }

    #[test]
    fn test_huge_layout_does_not_overflow_capacity() {
        let layout = BrickLayout {
            rows: 0,
            columns: usize::MAX,
            ..BrickLayout::from_config(&EngineConfig::default())
        };
        let field = BrickField::new(layout);
        assert_eq!(field.total(), 0);
    }

    #[test]
    fn test_first_overlapping_misses_empty_space() {
        let field = default_field();
        assert_eq!(field.first_overlapping(Vec2::new(400.0, 400.0), 10.0), None);
    }
}
