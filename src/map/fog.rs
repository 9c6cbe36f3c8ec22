use bracket_geometry::prelude::Point;

use super::{DIRECTIONS, Grid, RoomKind};

/// What the player can currently see of the grid; `None` cells are unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FogView {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<RoomKind>>,
}

impl FogView {
    fn hidden(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width * height).max(0) as usize],
        }
    }

    pub fn cell(&self, point: Point) -> Option<RoomKind> {
        if point.x < 0 || point.x >= self.width || point.y < 0 || point.y >= self.height {
            return None;
        }
        self.cells[(point.y * self.width + point.x) as usize]
    }

    pub fn is_revealed(&self, point: Point) -> bool {
        self.cell(point).is_some()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Floods outward from `origin` through orthogonal steps, `radius` steps deep.
///
/// Walls are revealed and do not stop the flood. Off-grid cells are skipped.
/// A cell is re-expanded only when it is reached with more radius left than before.
pub fn reveal(grid: &Grid, origin: Point, radius: u32) -> FogView {
    let mut view = FogView::hidden(grid.width, grid.height);
    let mut best_remaining: Vec<Option<u32>> = vec![None; view.cells.len()];
    let mut frontier = vec![(origin, radius)];

    while let Some((point, remaining)) = frontier.pop() {
        let Some(kind) = grid.room_at(point) else {
            continue;
        };
        let idx = (point.y * grid.width + point.x) as usize;
        if best_remaining[idx].is_some_and(|seen| seen >= remaining) {
            continue;
        }
        best_remaining[idx] = Some(remaining);
        view.cells[idx] = Some(kind);

        if remaining == 0 {
            continue;
        }
        for dir in DIRECTIONS {
            frontier.push((dir.step(point), remaining - 1));
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ORIGIN;

    #[test]
    fn radius_zero_shows_only_origin() {
        let grid = Grid::base_layout();
        let view = reveal(&grid, Point::new(2, 2), 0);
        assert_eq!(view.revealed_count(), 1);
        assert_eq!(view.cell(Point::new(2, 2)), Some(RoomKind::Empty));
    }

    #[test]
    fn radius_one_shows_orthogonal_neighbours() {
        let grid = Grid::base_layout();
        let view = reveal(&grid, Point::new(2, 2), 1);
        assert_eq!(view.revealed_count(), 5);
        for point in [
            Point::new(2, 1),
            Point::new(2, 3),
            Point::new(1, 2),
            Point::new(3, 2),
        ] {
            assert!(view.is_revealed(point));
        }
        assert!(!view.is_revealed(Point::new(1, 1)));
    }

    #[test]
    fn corner_reveal_is_clipped() {
        let grid = Grid::base_layout();
        let view = reveal(&grid, ORIGIN, 1);
        assert_eq!(view.revealed_count(), 3);
        assert!(view.is_revealed(Point::new(1, 0)));
        assert!(view.is_revealed(Point::new(0, 1)));
    }

    #[test]
    fn walls_are_revealed_and_flood_passes_through() {
        let grid = Grid::base_layout();
        let view = reveal(&grid, Point::new(1, 0), 2);
        assert_eq!(view.cell(Point::new(1, 1)), Some(RoomKind::Wall));
        assert!(view.is_revealed(Point::new(1, 2)));
    }

    #[test]
    fn off_grid_origin_reveals_nothing() {
        let grid = Grid::base_layout();
        assert_eq!(reveal(&grid, Point::new(-3, 9), 1).revealed_count(), 0);
    }

    #[test]
    fn large_radius_covers_the_grid() {
        let grid = Grid::base_layout();
        assert_eq!(reveal(&grid, ORIGIN, 12).revealed_count(), 25);
    }
}
