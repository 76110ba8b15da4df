//! Raw board parsing: turns the character layout into typed tiles.

use glam::UVec2;

use crate::constants::BOARD_CELL_SIZE;
use crate::error::ParseError;
use crate::map::tile::Tile;

/// An enum representing the different types of tiles on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty walkway tile (or void, if unreachable).
    Empty,
    /// A wall tile.
    Wall,
    /// A walkway tile holding a regular pellet.
    Pellet,
    /// A walkway tile holding an energizer.
    Energizer,
    /// A ghost house door tile.
    Door,
    /// A tunnel portal tile at the board edge.
    Tunnel,
}

/// The result of parsing a raw board layout.
pub struct ParsedBoard {
    pub tiles: Vec<MapTile>,
    pub size: UVec2,
    pub door: [Tile; 2],
    pub portals: [Tile; 2],
}

impl ParsedBoard {
    pub fn tile_at(&self, col: usize, row: usize) -> MapTile {
        self.tiles[row * self.size.x as usize + col]
    }
}

/// Parses a raw character board into typed tiles.
///
/// Fails on unknown characters, ragged rows, or a malformed door/tunnel.
pub fn parse_board(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> Result<ParsedBoard, ParseError> {
    let width = BOARD_CELL_SIZE.x as usize;
    let mut tiles = Vec::with_capacity(width * raw_board.len());
    let mut door = Vec::new();
    let mut portals = Vec::new();

    for (row, line) in raw_board.iter().enumerate() {
        if line.len() != width {
            return Err(ParseError::BadRowLength {
                row,
                len: line.len(),
                expected: width,
            });
        }
        for (col, c) in line.chars().enumerate() {
            let tile = match c {
                ' ' => MapTile::Empty,
                '#' => MapTile::Wall,
                '.' => MapTile::Pellet,
                'o' => MapTile::Energizer,
                '=' => {
                    door.push(Tile::new(col as i32, row as i32));
                    MapTile::Door
                }
                'T' => {
                    portals.push(Tile::new(col as i32, row as i32));
                    MapTile::Tunnel
                }
                other => return Err(ParseError::UnknownCharacter(other)),
            };
            tiles.push(tile);
        }
    }

    if door.len() != 2 {
        return Err(ParseError::InvalidDoorCount(door.len()));
    }
    if portals.len() != 2 {
        return Err(ParseError::InvalidPortalCount(portals.len()));
    }

    Ok(ParsedBoard {
        tiles,
        size: BOARD_CELL_SIZE,
        door: [door[0], door[1]],
        portals: [portals[0], portals[1]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_parse_default_board() {
        let parsed = parse_board(RAW_BOARD).unwrap();
        assert_eq!(parsed.size, BOARD_CELL_SIZE);
        assert_eq!(parsed.door, [Tile::new(13, 15), Tile::new(14, 15)]);
        assert_eq!(parsed.portals, [Tile::new(0, 17), Tile::new(27, 17)]);
        assert_eq!(parsed.tile_at(1, 6), MapTile::Energizer);
        assert_eq!(parsed.tile_at(13, 26), MapTile::Pellet);
        assert_eq!(parsed.tile_at(0, 3), MapTile::Wall);
        assert_eq!(parsed.tile_at(0, 0), MapTile::Empty);
    }

    #[test]
    fn test_unknown_character_rejected() {
        let mut board = RAW_BOARD;
        board[4] = "#...........X##............#";
        let result = parse_board(board).map(|_| ());
        assert_eq!(result, Err(ParseError::UnknownCharacter('X')));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut board = RAW_BOARD;
        board[5] = "#.####";
        let result = parse_board(board).map(|_| ());
        assert_eq!(
            result,
            Err(ParseError::BadRowLength {
                row: 5,
                len: 6,
                expected: 28
            })
        );
    }
}
