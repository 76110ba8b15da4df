//! This module contains all the constants used in the simulation.

use std::time::Duration;

use glam::UVec2;

/// The default tick rate of the simulation, matching the arcade cabinet.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: i32 = 8;
/// The size of the game board, in tiles. Three HUD rows sit above the maze
/// band and two below it, exactly like the arcade screen layout.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 36);

/// The row along which the tunnel teleport operates.
pub const TUNNEL_ROW: i32 = 17;

/// Converts a duration in seconds to ticks at the baseline tick rate.
///
/// Timings stay expressed in baseline ticks even when the clock frequency is
/// changed; running the clock faster speeds up the whole game, exactly like
/// overclocking the original board.
pub const fn sec(seconds: f32) -> u32 {
    (seconds * TICKS_PER_SECOND as f32) as u32
}

/// Baseline actor speed: the arcade moves a full-speed actor 80 pixels per
/// second at 60 Hz. Level tables scale this by per-actor fractions.
pub const BASE_SPEED: f32 = 80.0 / TICKS_PER_SECOND as f32;

/// Converts a relative speed fraction from the level table to pixels per tick.
pub fn speed(fraction: f32) -> f32 {
    fraction * BASE_SPEED
}

/// Points for a plain pellet.
pub const PELLET_POINTS: u32 = 10;
/// Points for an energizer.
pub const ENERGIZER_POINTS: u32 = 50;
/// Points for the first ghost killed by an energizer; doubles per kill.
pub const FIRST_GHOST_POINTS: u32 = 200;
/// Score at which the single extra life is granted.
pub const EXTRA_LIFE_SCORE: u32 = 10_000;
/// Number of lives at game start.
pub const INITIAL_LIVES: u32 = 3;

/// Pellet-eaten milestones at which the bonus fruit appears.
pub const BONUS_MILESTONES: [u32; 2] = [70, 170];
/// Ticks the bonus stays on screen after being eaten (score display).
pub const BONUS_CONSUMED_TICKS: u32 = sec(2.0);

/// Ticks Pac-Man pauses after swallowing a pellet.
pub const DIGEST_PELLET_TICKS: u32 = 1;
/// Ticks Pac-Man pauses after swallowing an energizer.
pub const DIGEST_ENERGIZER_TICKS: u32 = 3;

/// Remaining power ticks at which frightened ghosts start flashing.
pub const FRIGHT_FLASH_TICKS: u32 = sec(2.0);

/// Ticks a killed ghost stays in its dying pause (score number shown).
pub const GHOST_DYING_TICKS: u32 = sec(1.0);

/// The raw layout of the game board, as rows of characters.
///
/// `#` wall, `.` pellet, `o` energizer, `=` house door, `T` tunnel portal,
/// space for plain walkway (tiles outside the flood-filled maze band are
/// unreachable and treated as void).
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "                            ",
    "                            ",
    "                            ",
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "T     .   #      #   .     T",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##........  ......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
    "                            ",
    "                            ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 Hz = 16.67ms per tick
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_tile_size() {
        assert_eq!(TILE_SIZE, 8);
    }

    #[test]
    fn test_board_cell_size() {
        assert_eq!(BOARD_CELL_SIZE.x, 28);
        assert_eq!(BOARD_CELL_SIZE.y, 36);
    }

    #[test]
    fn test_sec_conversion() {
        assert_eq!(sec(1.0), 60);
        assert_eq!(sec(1.7), 102);
        assert_eq!(sec(0.0), 0);
    }

    #[test]
    fn test_base_speed() {
        // 80 px/s at 60 Hz
        assert!((BASE_SPEED - 4.0 / 3.0).abs() < 1e-6);
        assert!((speed(0.8) - 80.0 * 0.8 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        assert_eq!(RAW_BOARD.len(), 36);

        for row in RAW_BOARD.iter() {
            assert_eq!(row.len(), BOARD_CELL_SIZE.x as usize);
            assert_eq!(row.len(), 28);
        }
    }

    #[test]
    fn test_raw_board_boundaries() {
        // First and last maze rows should be all walls
        assert!(RAW_BOARD[3].chars().all(|c| c == '#'));
        assert!(RAW_BOARD[33].chars().all(|c| c == '#'));
    }

    #[test]
    fn test_raw_board_tunnel_row() {
        let tunnel_row = RAW_BOARD[TUNNEL_ROW as usize];
        assert_eq!(tunnel_row.chars().next().unwrap(), 'T');
        assert_eq!(tunnel_row.chars().last().unwrap(), 'T');
    }

    #[test]
    fn test_raw_board_energizers() {
        let mut energizers = Vec::new();
        for (row, line) in RAW_BOARD.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c == 'o' {
                    energizers.push((col, row));
                }
            }
        }
        assert_eq!(energizers, vec![(1, 6), (26, 6), (1, 26), (26, 26)]);
    }

    #[test]
    fn test_raw_board_food_total() {
        let pellets: usize = RAW_BOARD.iter().map(|r| r.chars().filter(|&c| c == '.').count()).sum();
        let energizers: usize = RAW_BOARD.iter().map(|r| r.chars().filter(|&c| c == 'o').count()).sum();
        assert_eq!(pellets, 240);
        assert_eq!(energizers, 4);
        assert_eq!(pellets + energizers, 244);
    }

    #[test]
    fn test_raw_board_house_door() {
        // The house door is two '=' tiles at (13,15) and (14,15)
        let door_row = RAW_BOARD[15];
        let doors: Vec<usize> = door_row.chars().enumerate().filter(|(_, c)| *c == '=').map(|(i, _)| i).collect();
        assert_eq!(doors, vec![13, 14]);
    }

    #[test]
    fn test_raw_board_start_row() {
        // Pac-Man's seat straddles (13,26)/(14,26) with a pellet under
        // (13,26), so the two foodless tiles sit at columns 14 and 15.
        let row = RAW_BOARD[26];
        assert_eq!(row.chars().nth(13).unwrap(), '.');
        assert_eq!(row.chars().nth(14).unwrap(), ' ');
        assert_eq!(row.chars().nth(15).unwrap(), ' ');
    }
}
