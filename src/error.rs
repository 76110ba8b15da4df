//! Centralized error types for the simulation core.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use crate::map::tile::Tile;

/// Main error type for the simulation.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur while building or running
/// the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Board parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),

    #[error("Board row {row} has {len} columns, expected {expected}")]
    BadRowLength { row: usize, len: usize, expected: usize },

    #[error("House door must have exactly 2 tiles, found {0}")]
    InvalidDoorCount(usize),

    #[error("Tunnel row must have exactly 2 portals, found {0}")]
    InvalidPortalCount(usize),
}

/// Errors related to maze queries.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("Tile out of bounds: {0}")]
    TileOutOfBounds(Tile),

    #[error("No path between {from} and {to}")]
    NoPath { from: Tile, to: Tile },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
