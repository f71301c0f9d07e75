use std::time::Duration;

use crate::config::PickerConfig;

/// Inter-item and line spacing of the grid, in pixels
pub const ITEM_SPACING: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_size(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Square-cell flow layout with fixed spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub spacing: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            spacing: ITEM_SPACING,
        }
    }
}

impl GridLayout {
    pub fn columns(&self, orientation: Orientation, config: &PickerConfig) -> usize {
        let columns = match orientation {
            Orientation::Portrait => config.columns_portrait,
            Orientation::Landscape => config.columns_landscape,
        };
        columns.max(1)
    }

    /// Side of a square cell so that `columns` cells and their gaps fill `width`
    pub fn cell_side(&self, width: f32, columns: usize) -> f32 {
        let columns = columns.max(1) as f32;
        ((width - self.spacing * (columns - 1.0)) / columns).max(0.0)
    }

    /// Cell side for a viewport, picking the column count by orientation
    pub fn cell_side_for(&self, width: f32, height: f32, config: &PickerConfig) -> f32 {
        let columns = self.columns(Orientation::from_size(width, height), config);
        self.cell_side(width, columns)
    }
}

/// Scale-in animation played when a cell first appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAnimation {
    pub delay: Duration,
    pub duration: Duration,
}

impl CellAnimation {
    const DURATION: Duration = Duration::from_millis(300);
    const STAGGER: Duration = Duration::from_millis(10);

    pub fn entrance(index: usize) -> Self {
        Self {
            delay: Self::STAGGER * index as u32,
            duration: Self::DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::from_size(320.0, 480.0), Orientation::Portrait);
        assert_eq!(Orientation::from_size(480.0, 320.0), Orientation::Landscape);
        assert_eq!(Orientation::from_size(400.0, 400.0), Orientation::Portrait);
    }

    #[test]
    fn test_cell_side() {
        let layout = GridLayout::default();
        // (323 - 3) / 4
        assert_eq!(layout.cell_side(323.0, 4), 80.0);
        assert_eq!(layout.cell_side(100.0, 1), 100.0);
        assert_eq!(layout.cell_side(2.0, 7), 0.0);
        // zero columns behaves like one
        assert_eq!(layout.cell_side(50.0, 0), 50.0);
    }

    #[test]
    fn test_cells_and_gaps_fill_width() {
        let layout = GridLayout::default();
        let width = 375.0;
        let side = layout.cell_side(width, 4);
        let total = side * 4.0 + ITEM_SPACING * 3.0;
        assert!((total - width).abs() < 0.001);
    }

    #[test]
    fn test_columns_follow_orientation() {
        let config = PickerConfig::default();
        let layout = GridLayout::default();
        assert_eq!(layout.columns(Orientation::Portrait, &config), 4);
        assert_eq!(layout.columns(Orientation::Landscape, &config), 7);

        // (706 - 6) / 7
        assert_eq!(layout.cell_side_for(706.0, 300.0, &config), 100.0);
    }

    #[test]
    fn test_entrance_is_staggered() {
        assert_eq!(CellAnimation::entrance(0).delay, Duration::ZERO);
        assert_eq!(CellAnimation::entrance(12).delay, Duration::from_millis(120));
        assert_eq!(CellAnimation::entrance(3).duration, Duration::from_millis(300));
    }
}
