pub mod fog;
pub mod pathfinding;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GRID_WIDTH: i32 = 5;
pub const GRID_HEIGHT: i32 = 5;
pub const ORIGIN: Point = Point { x: 0, y: 0 };

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Wall,
    Empty,
    Memory,
    Demon,
    Item,
    Mirror,
    Therapist,
    LovedOne,
    Stranger,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Wall => "Wall",
            RoomKind::Empty => "Chamber of Shadows",
            RoomKind::Memory => "Memory Glade",
            RoomKind::Demon => "Den of Darkness",
            RoomKind::Item => "Haven of Light",
            RoomKind::Mirror => "Mirror of Truth",
            RoomKind::Therapist => "Therapist's Office",
            RoomKind::LovedOne => "Familiar Presence",
            RoomKind::Stranger => "Kindred Spirit",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            RoomKind::Wall => '#',
            RoomKind::Empty => '.',
            RoomKind::Memory => 'm',
            RoomKind::Demon => 'D',
            RoomKind::Item => '*',
            RoomKind::Mirror => 'M',
            RoomKind::Therapist | RoomKind::LovedOne | RoomKind::Stranger => 'N',
        }
    }

    pub fn is_open(&self) -> bool {
        *self != RoomKind::Wall
    }

    pub fn npc(&self) -> Option<NpcKind> {
        match self {
            RoomKind::Therapist => Some(NpcKind::Therapist),
            RoomKind::LovedOne => Some(NpcKind::LovedOne),
            RoomKind::Stranger => Some(NpcKind::Stranger),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Therapist,
    LovedOne,
    Stranger,
}

pub const NPC_KINDS: [NpcKind; 3] = [NpcKind::Therapist, NpcKind::LovedOne, NpcKind::Stranger];

impl NpcKind {
    pub fn room(self) -> RoomKind {
        match self {
            NpcKind::Therapist => RoomKind::Therapist,
            NpcKind::LovedOne => RoomKind::LovedOne,
            NpcKind::Stranger => RoomKind::Stranger,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NpcKind::Therapist => "therapist",
            NpcKind::LovedOne => "loved one",
            NpcKind::Stranger => "stranger",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::East => Point::new(1, 0),
            Direction::West => Point::new(-1, 0),
        }
    }

    pub fn step(self, from: Point) -> Point {
        let delta = self.delta();
        Point::new(from.x + delta.x, from.y + delta.y)
    }

    pub fn between(from: Point, to: Point) -> Option<Self> {
        DIRECTIONS
            .iter()
            .copied()
            .find(|dir| dir.step(from) == to)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "up",
            Direction::South => "down",
            Direction::East => "right",
            Direction::West => "left",
        }
    }
}

/// How many special rooms a generation pass places.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub items: usize,
    pub demons: usize,
    pub mirrors: usize,
    pub npcs: usize,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            items: 4,
            demons: 3,
            mirrors: 1,
            npcs: 3,
        }
    }
}

impl Placement {
    pub fn total(&self) -> usize {
        self.items + self.demons + self.mirrors + self.npcs
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("placement needs {required} open cells but the layout only has {available}")]
    NotEnoughCells { required: usize, available: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    rooms: Vec<RoomKind>,
}

impl Grid {
    pub fn filled(width: i32, height: i32, kind: RoomKind) -> Self {
        Self {
            width,
            height,
            rooms: vec![kind; (width * height) as usize],
        }
    }

    /// Open ring with four pillars; every open cell stays reachable from the origin.
    pub fn base_layout() -> Self {
        let mut grid = Self::filled(GRID_WIDTH, GRID_HEIGHT, RoomKind::Empty);
        for pillar in [
            Point::new(1, 1),
            Point::new(3, 1),
            Point::new(1, 3),
            Point::new(3, 3),
        ] {
            grid.set_room(pillar, RoomKind::Wall);
        }
        grid
    }

    pub fn from_rows(rows: &[Vec<RoomKind>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.len())?;
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width: width as i32,
            height: height as i32,
            rooms: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn rows(&self) -> Vec<Vec<RoomKind>> {
        self.rooms
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn room_at(&self, point: Point) -> Option<RoomKind> {
        self.idx(point).map(|idx| self.rooms[idx])
    }

    pub fn set_room(&mut self, point: Point, kind: RoomKind) {
        if let Some(idx) = self.idx(point) {
            self.rooms[idx] = kind;
        }
    }

    pub fn is_open(&self, point: Point) -> bool {
        self.room_at(point).is_some_and(|kind| kind.is_open())
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    pub fn open_points(&self) -> Vec<Point> {
        self.points().filter(|point| self.is_open(*point)).collect()
    }

    /// Cells of `kind` in row-major order.
    pub fn points_of(&self, kind: RoomKind) -> Vec<Point> {
        self.points()
            .filter(|point| self.room_at(*point) == Some(kind))
            .collect()
    }

    pub fn count_of(&self, kind: RoomKind) -> usize {
        self.rooms.iter().filter(|room| **room == kind).count()
    }
}

/// Scatters special rooms over the open cells of `base`, never on `reserved` cells.
pub fn generate(
    base: &Grid,
    reserved: &[Point],
    placement: &Placement,
    rng: &mut RandomNumberGenerator,
) -> Result<Grid, GenerationError> {
    let mut pool: Vec<Point> = base
        .open_points()
        .into_iter()
        .filter(|point| !reserved.contains(point))
        .collect();

    let required = placement.total();
    if pool.len() < required {
        return Err(GenerationError::NotEnoughCells {
            required,
            available: pool.len(),
        });
    }

    let mut grid = base.clone();
    for point in draw(&mut pool, placement.items, rng) {
        grid.set_room(point, RoomKind::Item);
    }
    for point in draw(&mut pool, placement.demons, rng) {
        grid.set_room(point, RoomKind::Demon);
    }
    for point in draw(&mut pool, placement.mirrors, rng) {
        grid.set_room(point, RoomKind::Mirror);
    }
    for (idx, point) in draw(&mut pool, placement.npcs, rng).into_iter().enumerate() {
        grid.set_room(point, NPC_KINDS[idx % NPC_KINDS.len()].room());
    }

    Ok(grid)
}

fn draw(pool: &mut Vec<Point>, count: usize, rng: &mut RandomNumberGenerator) -> Vec<Point> {
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let idx = rng.range(0, pool.len() as i32) as usize;
        picked.push(pool.swap_remove(idx));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn special_cells(grid: &Grid, kinds: &[RoomKind]) -> HashSet<Point> {
        kinds
            .iter()
            .flat_map(|kind| grid.points_of(*kind))
            .collect()
    }

    #[test]
    fn base_layout_has_four_pillars() {
        let grid = Grid::base_layout();
        assert_eq!(grid.count_of(RoomKind::Wall), 4);
        assert_eq!(grid.open_points().len(), 21);
        assert!(!grid.is_open(Point::new(1, 1)));
        assert!(grid.is_open(ORIGIN));
    }

    #[test]
    fn rejects_impossible_placement() {
        let mut rng = RandomNumberGenerator::seeded(7);
        let placement = Placement {
            items: 20,
            ..Placement::default()
        };
        let err = generate(&Grid::base_layout(), &[ORIGIN], &placement, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerationError::NotEnoughCells {
                required: 27,
                available: 20
            }
        );
    }

    #[test]
    fn npc_rooms_get_distinct_kinds() {
        let mut rng = RandomNumberGenerator::seeded(11);
        let grid = generate(&Grid::base_layout(), &[ORIGIN], &Placement::default(), &mut rng)
            .unwrap();
        for kind in NPC_KINDS {
            assert_eq!(grid.count_of(kind.room()), 1);
        }
    }

    #[test]
    fn rows_round_trip_through_from_rows() {
        let grid = Grid::base_layout();
        assert_eq!(Grid::from_rows(&grid.rows()), Some(grid));
        assert_eq!(Grid::from_rows(&[vec![RoomKind::Empty], vec![]]), None);
    }

    proptest! {
        #[test]
        fn placements_are_disjoint_and_open(seed in any::<u64>()) {
            let base = Grid::base_layout();
            let mut rng = RandomNumberGenerator::seeded(seed);
            let grid = generate(&base, &[ORIGIN], &Placement::default(), &mut rng).unwrap();

            prop_assert_eq!(grid.count_of(RoomKind::Item), 4);
            prop_assert_eq!(grid.count_of(RoomKind::Demon), 3);
            prop_assert_eq!(grid.count_of(RoomKind::Mirror), 1);
            let npcs = special_cells(&grid, &[RoomKind::Therapist, RoomKind::LovedOne, RoomKind::Stranger]);
            prop_assert_eq!(npcs.len(), 3);

            let specials = special_cells(
                &grid,
                &[
                    RoomKind::Item,
                    RoomKind::Demon,
                    RoomKind::Mirror,
                    RoomKind::Therapist,
                    RoomKind::LovedOne,
                    RoomKind::Stranger,
                ],
            );
            prop_assert_eq!(specials.len(), 11);
            for point in &specials {
                prop_assert!(base.is_open(*point));
            }
            prop_assert!(!specials.contains(&ORIGIN));
            prop_assert_eq!(grid.count_of(RoomKind::Wall), 4);
        }
    }
}
