//! Per-level constants: the arcade difficulty table.
//!
//! One row per level from 1 to 21; levels beyond 21 clamp to the last row.
//! Speeds are fractions of the arcade baseline (80 px/s at 60 Hz).

use strum_macros::AsRefStr;
use tracing::warn;

/// Bonus fruit symbols in order of appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum BonusSymbol {
    Cherries,
    Strawberry,
    Peach,
    Apple,
    Grapes,
    Galaxian,
    Bell,
    Key,
}

/// One row of the difficulty table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub bonus_symbol: BonusSymbol,
    pub bonus_value: u32,
    pub pacman_speed: f32,
    pub pacman_power_speed: f32,
    pub ghost_speed: f32,
    pub ghost_fright_speed: f32,
    pub ghost_tunnel_speed: f32,
    /// Remaining-food threshold below which Blinky becomes "Cruise Elroy".
    pub elroy1_dots: u32,
    pub elroy1_speed: f32,
    /// Remaining-food threshold for the second Elroy stage.
    pub elroy2_dots: u32,
    pub elroy2_speed: f32,
    /// Seconds Pac-Man stays powerful after an energizer. Zero means
    /// energizers only reverse the ghosts.
    pub fright_seconds: u32,
    pub maze_flashes: u32,
}

use BonusSymbol::*;

#[rustfmt::skip]
const LEVELS: [LevelParams; 21] = [
    LevelParams { bonus_symbol: Cherries,   bonus_value: 100,  pacman_speed: 0.80, pacman_power_speed: 0.90, ghost_speed: 0.75, ghost_fright_speed: 0.50, ghost_tunnel_speed: 0.40, elroy1_dots: 20,  elroy1_speed: 0.80, elroy2_dots: 10, elroy2_speed: 0.85, fright_seconds: 6, maze_flashes: 5 },
    LevelParams { bonus_symbol: Strawberry, bonus_value: 300,  pacman_speed: 0.90, pacman_power_speed: 0.95, ghost_speed: 0.85, ghost_fright_speed: 0.55, ghost_tunnel_speed: 0.45, elroy1_dots: 30,  elroy1_speed: 0.90, elroy2_dots: 15, elroy2_speed: 0.95, fright_seconds: 5, maze_flashes: 5 },
    LevelParams { bonus_symbol: Peach,      bonus_value: 500,  pacman_speed: 0.90, pacman_power_speed: 0.95, ghost_speed: 0.85, ghost_fright_speed: 0.55, ghost_tunnel_speed: 0.45, elroy1_dots: 40,  elroy1_speed: 0.90, elroy2_dots: 20, elroy2_speed: 0.95, fright_seconds: 4, maze_flashes: 5 },
    LevelParams { bonus_symbol: Peach,      bonus_value: 500,  pacman_speed: 0.90, pacman_power_speed: 0.95, ghost_speed: 0.85, ghost_fright_speed: 0.55, ghost_tunnel_speed: 0.45, elroy1_dots: 40,  elroy1_speed: 0.90, elroy2_dots: 20, elroy2_speed: 0.95, fright_seconds: 3, maze_flashes: 5 },
    LevelParams { bonus_symbol: Apple,      bonus_value: 700,  pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 40,  elroy1_speed: 1.00, elroy2_dots: 20, elroy2_speed: 1.05, fright_seconds: 2, maze_flashes: 5 },
    LevelParams { bonus_symbol: Apple,      bonus_value: 700,  pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 50,  elroy1_speed: 1.00, elroy2_dots: 25, elroy2_speed: 1.05, fright_seconds: 5, maze_flashes: 5 },
    LevelParams { bonus_symbol: Grapes,     bonus_value: 1000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 50,  elroy1_speed: 1.00, elroy2_dots: 25, elroy2_speed: 1.05, fright_seconds: 2, maze_flashes: 5 },
    LevelParams { bonus_symbol: Grapes,     bonus_value: 1000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 50,  elroy1_speed: 1.00, elroy2_dots: 25, elroy2_speed: 1.05, fright_seconds: 2, maze_flashes: 5 },
    LevelParams { bonus_symbol: Galaxian,   bonus_value: 2000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 60,  elroy1_speed: 1.00, elroy2_dots: 30, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Galaxian,   bonus_value: 2000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 60,  elroy1_speed: 1.00, elroy2_dots: 30, elroy2_speed: 1.05, fright_seconds: 5, maze_flashes: 5 },
    LevelParams { bonus_symbol: Bell,       bonus_value: 3000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 60,  elroy1_speed: 1.00, elroy2_dots: 30, elroy2_speed: 1.05, fright_seconds: 2, maze_flashes: 5 },
    LevelParams { bonus_symbol: Bell,       bonus_value: 3000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 80,  elroy1_speed: 1.00, elroy2_dots: 40, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 80,  elroy1_speed: 1.00, elroy2_dots: 40, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 80,  elroy1_speed: 1.00, elroy2_dots: 40, elroy2_speed: 1.05, fright_seconds: 3, maze_flashes: 5 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 100, elroy1_speed: 1.00, elroy2_dots: 50, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 100, elroy1_speed: 1.00, elroy2_dots: 50, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 100, elroy1_speed: 1.00, elroy2_dots: 50, elroy2_speed: 1.05, fright_seconds: 0, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 100, elroy1_speed: 1.00, elroy2_dots: 50, elroy2_speed: 1.05, fright_seconds: 1, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 120, elroy1_speed: 1.00, elroy2_dots: 60, elroy2_speed: 1.05, fright_seconds: 0, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 1.00, pacman_power_speed: 1.00, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 120, elroy1_speed: 1.00, elroy2_dots: 60, elroy2_speed: 1.05, fright_seconds: 0, maze_flashes: 3 },
    LevelParams { bonus_symbol: Key,        bonus_value: 5000, pacman_speed: 0.90, pacman_power_speed: 0.90, ghost_speed: 0.95, ghost_fright_speed: 0.60, ghost_tunnel_speed: 0.50, elroy1_dots: 120, elroy1_speed: 1.00, elroy2_dots: 60, elroy2_speed: 1.05, fright_seconds: 0, maze_flashes: 3 },
];

/// Returns the difficulty row for a level number.
///
/// Level numbers start at 1; anything below is clamped up with a warning,
/// anything above 21 uses the level-21 row.
pub fn level_params(level: u32) -> &'static LevelParams {
    let level = if level < 1 {
        warn!(level, "Level below 1 requested, clamping");
        1
    } else {
        level
    };
    let index = (level as usize - 1).min(LEVELS.len() - 1);
    &LEVELS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_row() {
        let params = level_params(1);
        assert_eq!(params.bonus_symbol, BonusSymbol::Cherries);
        assert_eq!(params.bonus_value, 100);
        assert_eq!(params.pacman_speed, 0.80);
        assert_eq!(params.elroy1_dots, 20);
        assert_eq!(params.elroy2_dots, 10);
        assert_eq!(params.fright_seconds, 6);
        assert_eq!(params.maze_flashes, 5);
    }

    #[test]
    fn test_levels_clamp_at_21() {
        assert_eq!(level_params(21), level_params(100));
        assert_eq!(level_params(22), level_params(21));
        assert_ne!(level_params(20), level_params(21));
    }

    #[test]
    fn test_level_zero_clamps_up() {
        assert_eq!(level_params(0), level_params(1));
    }

    #[test]
    fn test_table_is_idempotent() {
        // Loading the same row twice yields identical constants.
        assert_eq!(level_params(7), level_params(7));
    }

    #[test]
    fn test_fright_vanishes_late() {
        assert_eq!(level_params(17).fright_seconds, 0);
        assert_eq!(level_params(19).fright_seconds, 0);
        assert!(level_params(14).fright_seconds > 0);
    }
}
