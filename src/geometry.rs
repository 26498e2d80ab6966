//! Slot index <-> pixel coordinate math for the grid and tray regions.
//!
//! Slots form one linear sequence: `0..grid_count` is the grid, laid out
//! row-major, and `grid_count..grid_count + tray_count` is the tray, a single
//! row pinned to the bottom of the container.

use std::ops::{Add, Range, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Grid,
    Tray,
}

impl Region {
    pub fn other(self) -> Region {
        match self {
            Region::Grid => Region::Tray,
            Region::Tray => Region::Grid,
        }
    }
}

/// Everything needed to place a slot on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionLayout {
    pub column_count: usize,
    pub grid_count: usize,
    pub tray_count: usize,
    pub cell_size: f32,
    pub container_height: f32,
    pub tray_bottom_margin: f32,
}

impl RegionLayout {
    /// Builds a layout whose cells are `container_width / column_count` wide.
    pub fn new(
        container_width: f32,
        container_height: f32,
        column_count: usize,
        grid_count: usize,
        tray_count: usize,
        tray_bottom_margin: f32,
    ) -> Self {
        let column_count = column_count.max(1);
        Self {
            column_count,
            grid_count,
            tray_count,
            cell_size: cell_size_for(container_width, column_count),
            container_height,
            tray_bottom_margin,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.grid_count + self.tray_count
    }

    pub fn region_of(&self, slot: usize) -> Option<Region> {
        if slot < self.grid_count {
            Some(Region::Grid)
        } else if slot < self.slot_count() {
            Some(Region::Tray)
        } else {
            None
        }
    }

    pub fn region_range(&self, region: Region) -> Range<usize> {
        match region {
            Region::Grid => 0..self.grid_count,
            Region::Tray => self.grid_count..self.slot_count(),
        }
    }

    /// Last slot of `region`, or `None` when the region is empty.
    pub fn last_slot(&self, region: Region) -> Option<usize> {
        let range = self.region_range(region);
        if range.is_empty() {
            None
        } else {
            Some(range.end - 1)
        }
    }

    /// Top-left corner of `slot`. Slots past the tray are placed as if the
    /// tray continued to the right, so the caller must bound-check first when
    /// that matters.
    pub fn position_of(&self, slot: usize) -> Point {
        if slot < self.grid_count {
            let col = slot % self.column_count;
            let row = slot / self.column_count;
            Point::new(self.cell_size * col as f32, self.cell_size * row as f32)
        } else {
            Point::new(self.cell_size * (slot - self.grid_count) as f32, self.tray_top())
        }
    }

    /// Hit-test. Grid cells are scanned before tray cells and every bound is
    /// strict, so a point exactly on a cell edge hits nothing.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        (0..self.slot_count()).find(|&slot| self.cell_contains(slot, point))
    }

    pub fn cell_contains(&self, slot: usize, point: Point) -> bool {
        let origin = self.position_of(slot);
        point.x > origin.x
            && point.x < origin.x + self.cell_size
            && point.y > origin.y
            && point.y < origin.y + self.cell_size
    }

    pub fn cell_center(&self, slot: usize) -> Point {
        let half = self.cell_size * 0.5;
        self.position_of(slot) + Point::new(half, half)
    }

    /// Top-left corner that centres a cell on `pointer`.
    pub fn centered_on(&self, pointer: Point) -> Point {
        let half = self.cell_size * 0.5;
        pointer - Point::new(half, half)
    }

    fn tray_top(&self) -> f32 {
        self.container_height - self.cell_size - self.tray_bottom_margin
    }
}

pub fn cell_size_for(container_width: f32, column_count: usize) -> f32 {
    if !container_width.is_finite() || container_width <= 0.0 {
        return 0.0;
    }
    container_width / column_count.max(1) as f32
}
