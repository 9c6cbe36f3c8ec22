use std::collections::VecDeque;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap, DistanceAlg};
use smallvec::SmallVec;

use super::{DIRECTIONS, Grid, RoomKind};

impl BaseMap for Grid {
    fn is_opaque(&self, _idx: usize) -> bool {
        false
    }

    fn get_available_exits(&self, idx: usize) -> SmallVec<[(usize, f32); 10]> {
        let mut exits = SmallVec::new();
        let point = self.index_to_point2d(idx);
        for dir in DIRECTIONS {
            let dest = dir.step(point);
            if self.is_open(dest) {
                exits.push((self.point2d_to_index(dest), 1.0));
            }
        }
        exits
    }

    fn get_pathing_distance(&self, idx1: usize, idx2: usize) -> f32 {
        let p1 = self.index_to_point2d(idx1);
        let p2 = self.index_to_point2d(idx2);
        DistanceAlg::Manhattan.distance2d(p1, p2)
    }
}

impl Algorithm2D for Grid {
    fn dimensions(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn in_bounds(&self, point: Point) -> bool {
        Grid::in_bounds(self, point)
    }
}

/// Breadth-first route from `start` to `goal`, both ends included.
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Option<Vec<Point>> {
    if !grid.is_open(start) || !grid.is_open(goal) {
        return None;
    }

    let start_idx = grid.point2d_to_index(start);
    let goal_idx = grid.point2d_to_index(goal);
    let mut came_from: Vec<Option<usize>> = vec![None; (grid.width * grid.height) as usize];
    let mut visited = vec![false; came_from.len()];
    let mut frontier = VecDeque::from([start_idx]);
    visited[start_idx] = true;

    while let Some(current) = frontier.pop_front() {
        if current == goal_idx {
            let mut path = vec![grid.index_to_point2d(current)];
            let mut cursor = current;
            while let Some(prev) = came_from[cursor] {
                path.push(grid.index_to_point2d(prev));
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (next, _) in grid.get_available_exits(current) {
            if !visited[next] {
                visited[next] = true;
                came_from[next] = Some(current);
                frontier.push_back(next);
            }
        }
    }

    None
}

/// Shortest route to any cell of `kind`. Equal lengths resolve to the
/// candidate that comes first in row-major order.
pub fn find_nearest_of_type(grid: &Grid, start: Point, kind: RoomKind) -> Option<Vec<Point>> {
    let mut best: Option<Vec<Point>> = None;
    for target in grid.points_of(kind) {
        if let Some(path) = find_path(grid, start, target) {
            if best.as_ref().is_none_or(|current| path.len() < current.len()) {
                best = Some(path);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ORIGIN;

    fn corridor() -> Grid {
        use RoomKind::{Empty as E, Wall as W};
        Grid::from_rows(&[
            vec![E, E, E, E, E],
            vec![W, W, W, W, E],
            vec![E, E, E, E, E],
            vec![E, W, W, W, W],
            vec![E, E, E, E, E],
        ])
        .unwrap()
    }

    #[test]
    fn follows_the_only_corridor() {
        let grid = corridor();
        let path = find_path(&grid, ORIGIN, Point::new(4, 4)).unwrap();
        assert_eq!(path.len(), 17);
        assert_eq!(path.first(), Some(&ORIGIN));
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
        for pair in path.windows(2) {
            let step = DistanceAlg::Manhattan.distance2d(pair[0], pair[1]);
            assert_eq!(step, 1.0);
            assert!(grid.is_open(pair[1]));
        }
    }

    #[test]
    fn open_grid_path_is_manhattan_length() {
        let grid = Grid::base_layout();
        let path = find_path(&grid, ORIGIN, Point::new(4, 4)).unwrap();
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn start_equal_to_goal_is_single_step() {
        let grid = Grid::base_layout();
        assert_eq!(find_path(&grid, ORIGIN, ORIGIN), Some(vec![ORIGIN]));
    }

    #[test]
    fn sealed_goal_has_no_path() {
        use RoomKind::{Empty as E, Wall as W};
        let grid = Grid::from_rows(&[
            vec![E, E, W, E, E],
            vec![E, E, W, E, E],
            vec![W, W, W, E, E],
            vec![E, E, E, E, E],
            vec![E, E, E, E, E],
        ])
        .unwrap();
        assert_eq!(find_path(&grid, ORIGIN, Point::new(4, 4)), None);
    }

    #[test]
    fn invalid_endpoints_have_no_path() {
        let grid = Grid::base_layout();
        assert_eq!(find_path(&grid, ORIGIN, Point::new(1, 1)), None);
        assert_eq!(find_path(&grid, Point::new(-1, 0), ORIGIN), None);
        assert_eq!(find_path(&grid, ORIGIN, Point::new(5, 5)), None);
    }

    #[test]
    fn nearest_of_type_picks_shortest() {
        let mut grid = Grid::base_layout();
        grid.set_room(Point::new(4, 4), RoomKind::Item);
        grid.set_room(Point::new(2, 0), RoomKind::Item);
        let path = find_nearest_of_type(&grid, ORIGIN, RoomKind::Item).unwrap();
        assert_eq!(path.last(), Some(&Point::new(2, 0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn nearest_tie_goes_to_row_major_first() {
        let mut grid = Grid::base_layout();
        grid.set_room(Point::new(0, 2), RoomKind::Item);
        grid.set_room(Point::new(2, 0), RoomKind::Item);
        let path = find_nearest_of_type(&grid, ORIGIN, RoomKind::Item).unwrap();
        assert_eq!(path.last(), Some(&Point::new(2, 0)));
    }

    #[test]
    fn nearest_of_missing_type_is_none() {
        let grid = Grid::base_layout();
        assert_eq!(find_nearest_of_type(&grid, ORIGIN, RoomKind::Mirror), None);
    }
}
