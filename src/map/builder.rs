//! Maze construction and queries.
//!
//! The maze is parsed once at startup: immutable topology (walls, door,
//! tunnel, house geometry, scatter targets) plus the mutable food occupancy
//! that Pac-Man erodes over a level.

use std::collections::VecDeque;

use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::UVec2;
use pathfinding::prelude::bfs;
use tracing::debug;

use crate::constants::{BOARD_CELL_SIZE, ENERGIZER_POINTS, PELLET_POINTS, RAW_BOARD, TUNNEL_ROW};
use crate::error::GameResult;
use crate::map::direction::Direction;
use crate::map::parser::{parse_board, MapTile};
use crate::map::tile::Tile;

/// Pac-Man's seat. His collision box is placed half a tile to the right of
/// it, so his starting center tile is (14,26).
const PACMAN_SEAT: Tile = Tile::new(13, 26);

/// The four accessible corner tiles used by the flee-to-safe-corner behavior.
const CAPES: [Tile; 4] = [
    Tile::new(1, 4),
    Tile::new(26, 4),
    Tile::new(26, 32),
    Tile::new(1, 32),
];

/// The tile where the bonus fruit appears, below the house.
const BONUS_SEAT: Tile = Tile::new(13, 20);

/// A resting place inside (or just outside) the ghost house.
///
/// Actors parked on a bed straddle two tiles: they are placed half a tile to
/// the right of `tile`, centered on the seam between `tile` and its right
/// neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bed {
    pub tile: Tile,
    pub exit_dir: Direction,
}

impl Bed {
    /// Pixel position an actor's collision box takes when parked here.
    pub fn position(&self) -> glam::Vec2 {
        self.tile.position() + glam::Vec2::new(Tile::SIZE as f32 / 2.0, 0.0)
    }
}

/// The ghost house: door, beds and interior geometry.
#[derive(Debug, Clone)]
pub struct House {
    /// The two door tiles ghosts pass through.
    pub door: [Tile; 2],
    /// The seat just above the door. Blinky starts here; dead ghosts head
    /// here before descending.
    pub entry: Bed,
    /// Beds inside the house: Inky (left), Pinky (center), Clyde (right).
    pub inky_bed: Bed,
    pub pinky_bed: Bed,
    pub clyde_bed: Bed,
    /// Pixel x of the vertical seam ghosts align to when entering or leaving.
    pub center_x: f32,
    interior_min: Tile,
    interior_max: Tile,
}

impl House {
    fn from_door(door: [Tile; 2]) -> House {
        let bed_row = door[0].row + 2;
        House {
            door,
            entry: Bed {
                tile: Tile::new(door[0].col, door[0].row - 1),
                exit_dir: Direction::Left,
            },
            inky_bed: Bed {
                tile: Tile::new(door[0].col - 2, bed_row),
                exit_dir: Direction::Up,
            },
            pinky_bed: Bed {
                tile: Tile::new(door[0].col, bed_row),
                exit_dir: Direction::Down,
            },
            clyde_bed: Bed {
                tile: Tile::new(door[0].col + 2, bed_row),
                exit_dir: Direction::Up,
            },
            center_x: ((door[0].col + 1) * Tile::SIZE) as f32,
            interior_min: Tile::new(door[0].col - 2, door[0].row + 1),
            interior_max: Tile::new(door[1].col + 2, door[0].row + 3),
        }
    }

    /// Whether the tile lies inside the house (door excluded).
    pub fn contains(&self, tile: Tile) -> bool {
        tile.col >= self.interior_min.col
            && tile.col <= self.interior_max.col
            && tile.row >= self.interior_min.row
            && tile.row <= self.interior_max.row
    }

    /// Whether the tile is one of the two door tiles.
    pub fn is_door(&self, tile: Tile) -> bool {
        self.door.contains(&tile)
    }
}

bitflags! {
    /// Per-tile attribute bits: flood-fill reachability and current food
    /// occupancy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TileFlags: u8 {
        const ACCESSIBLE = 1 << 0;
        const FOOD = 1 << 1;
    }
}

/// Kind of food occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Food {
    Pellet,
    Energizer,
}

impl Food {
    pub const fn points(self) -> u32 {
        match self {
            Food::Pellet => PELLET_POINTS,
            Food::Energizer => ENERGIZER_POINTS,
        }
    }
}

/// The maze: static topology plus mutable food occupancy.
#[derive(Resource)]
pub struct Maze {
    size: UVec2,
    tiles: Vec<MapTile>,
    flags: Vec<TileFlags>,
    food_remaining: u32,
    food_eaten: u32,
    total_food: u32,
    pub tunnel_row: i32,
    pub house: House,
    pub pacman_seat: Bed,
    pub bonus_seat: Tile,
    /// Scatter targets, indexed Blinky, Pinky, Inky, Clyde. They lie in the
    /// HUD rows outside the walkable maze; ghosts chase them forever.
    pub scatter_targets: [Tile; 4],
    /// The four reachable corner tiles, clockwise from the upper left.
    pub capes: [Tile; 4],
}

impl Maze {
    /// Builds the standard arcade maze.
    pub fn new() -> GameResult<Maze> {
        Maze::from_board(RAW_BOARD)
    }

    /// Builds a maze from a raw character layout.
    ///
    /// Accessibility is derived by flood fill from Pac-Man's seat, so void
    /// tiles outside the maze band never count as walkable even though they
    /// parse as empty.
    pub fn from_board(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> GameResult<Maze> {
        let parsed = parse_board(raw_board)?;
        let size = parsed.size;
        let (width, height) = (size.x as i32, size.y as i32);

        let house = House::from_door(parsed.door);

        let mut flags = vec![TileFlags::empty(); parsed.tiles.len()];
        let mut total_food = 0u32;
        for (i, tile) in parsed.tiles.iter().enumerate() {
            if matches!(tile, MapTile::Pellet | MapTile::Energizer) {
                flags[i].insert(TileFlags::FOOD);
                total_food += 1;
            }
        }

        // Flood fill walkable tiles from Pac-Man's starting center tile.
        let start = PACMAN_SEAT.towards(Direction::Right, 1);
        let mut queue = VecDeque::from([start]);
        flags[(start.row * width + start.col) as usize].insert(TileFlags::ACCESSIBLE);
        while let Some(tile) = queue.pop_front() {
            for dir in Direction::DIRECTIONS {
                let mut next = tile.towards(dir, 1);
                if tile.row == TUNNEL_ROW {
                    if next.col < 0 {
                        next.col = width - 1;
                    } else if next.col >= width {
                        next.col = 0;
                    }
                }
                if next.col < 0 || next.col >= width || next.row < 0 || next.row >= height {
                    continue;
                }
                let index = (next.row * width + next.col) as usize;
                if flags[index].contains(TileFlags::ACCESSIBLE) || parsed.tiles[index] == MapTile::Wall {
                    continue;
                }
                flags[index].insert(TileFlags::ACCESSIBLE);
                queue.push_back(next);
            }
        }

        debug!(
            total_food,
            walkable = flags.iter().filter(|f| f.contains(TileFlags::ACCESSIBLE)).count(),
            "Maze built"
        );

        Ok(Maze {
            size,
            tiles: parsed.tiles,
            flags,
            food_remaining: total_food,
            food_eaten: 0,
            total_food,
            tunnel_row: TUNNEL_ROW,
            house,
            pacman_seat: Bed {
                tile: PACMAN_SEAT,
                exit_dir: Direction::Left,
            },
            bonus_seat: BONUS_SEAT,
            scatter_targets: [
                Tile::new(width - 3, 0),
                Tile::new(2, 0),
                Tile::new(width - 1, height - 1),
                Tile::new(0, height - 1),
            ],
            capes: CAPES,
        })
    }

    pub fn width(&self) -> i32 {
        self.size.x as i32
    }

    pub fn height(&self) -> i32 {
        self.size.y as i32
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.col >= 0 && tile.col < self.width() && tile.row >= 0 && tile.row < self.height()
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        self.contains(tile).then(|| (tile.row * self.width() + tile.col) as usize)
    }

    pub fn tile_at(&self, tile: Tile) -> MapTile {
        self.index(tile).map(|i| self.tiles[i]).unwrap_or(MapTile::Empty)
    }

    pub fn is_wall(&self, tile: Tile) -> bool {
        self.tile_at(tile) == MapTile::Wall
    }

    pub fn is_door(&self, tile: Tile) -> bool {
        self.house.is_door(tile)
    }

    /// Whether the tile lies in teleport space: on the tunnel row but outside
    /// the board, where only horizontal movement is possible.
    pub fn in_teleport_space(&self, tile: Tile) -> bool {
        tile.row == self.tunnel_row && (tile.col < 0 || tile.col >= self.width())
    }

    /// Whether the tile can be occupied at all: a flood-reachable walkway
    /// (door included; per-actor rules decide who may cross it) or teleport
    /// space. Walls, void and HUD rows are not accessible.
    pub fn is_accessible(&self, tile: Tile) -> bool {
        if self.in_teleport_space(tile) {
            return true;
        }
        self.index(tile)
            .map(|i| self.flags[i].contains(TileFlags::ACCESSIBLE))
            .unwrap_or(false)
    }

    /// The neighboring tile in the given direction, wrapping horizontally
    /// only along the tunnel row.
    pub fn neighbor(&self, tile: Tile, dir: Direction) -> Tile {
        let mut next = tile.towards(dir, 1);
        if tile.row == self.tunnel_row && self.contains(tile) {
            if next.col < 0 {
                next.col = self.width() - 1;
            } else if next.col >= self.width() {
                next.col = 0;
            }
        }
        next
    }

    /// Shortest path between two walkable tiles as an ordered tile sequence,
    /// both endpoints included.
    ///
    /// Breadth-first search over accessible non-door tiles; neighbor
    /// expansion follows the arcade decision order UP, LEFT, DOWN, RIGHT, so
    /// equal-length paths resolve the same way ghost steering does.
    pub fn find_path(&self, from: Tile, to: Tile) -> Option<Vec<Tile>> {
        let walkable = |tile: &Tile| self.is_accessible(*tile) && !self.is_door(*tile) && self.contains(*tile);
        if !walkable(&from) || !walkable(&to) {
            return None;
        }
        bfs(
            &from,
            |tile| {
                Direction::PRIORITY
                    .into_iter()
                    .map(|dir| self.neighbor(*tile, dir))
                    .filter(|next| walkable(next))
                    .collect::<Vec<_>>()
            },
            |tile| *tile == to,
        )
    }

    /// The food at a tile, if any remains there.
    pub fn food_at(&self, tile: Tile) -> Option<Food> {
        let index = self.index(tile)?;
        if !self.flags[index].contains(TileFlags::FOOD) {
            return None;
        }
        match self.tiles[index] {
            MapTile::Pellet => Some(Food::Pellet),
            MapTile::Energizer => Some(Food::Energizer),
            _ => None,
        }
    }

    pub fn has_food(&self, tile: Tile) -> bool {
        self.food_at(tile).is_some()
    }

    pub fn has_energizer(&self, tile: Tile) -> bool {
        self.food_at(tile) == Some(Food::Energizer)
    }

    /// Removes the food at a tile, returning what was eaten.
    pub fn eat_food_at(&mut self, tile: Tile) -> Option<Food> {
        let food = self.food_at(tile)?;
        let index = self.index(tile).expect("food implies a valid index");
        self.flags[index].remove(TileFlags::FOOD);
        self.food_remaining -= 1;
        self.food_eaten += 1;
        Some(food)
    }

    /// Removes every remaining plain pellet (cheat). Energizers stay.
    pub fn remove_all_pellets(&mut self) {
        for (index, tile) in self.tiles.iter().enumerate() {
            if *tile == MapTile::Pellet && self.flags[index].contains(TileFlags::FOOD) {
                self.flags[index].remove(TileFlags::FOOD);
                self.food_remaining -= 1;
                self.food_eaten += 1;
            }
        }
    }

    /// Restores the full food layout for a fresh level.
    pub fn reset_food(&mut self) {
        for (index, tile) in self.tiles.iter().enumerate() {
            self.flags[index].set(TileFlags::FOOD, matches!(tile, MapTile::Pellet | MapTile::Energizer));
        }
        self.food_remaining = self.total_food;
        self.food_eaten = 0;
    }

    pub fn food_remaining(&self) -> u32 {
        self.food_remaining
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    /// Iterates all tiles currently holding food.
    pub fn food_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.width();
        self.flags.iter().enumerate().filter_map(move |(index, flags)| {
            flags
                .contains(TileFlags::FOOD)
                .then(|| Tile::new(index as i32 % width, index as i32 / width))
        })
    }
}
