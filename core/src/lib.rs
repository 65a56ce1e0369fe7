#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Seafarer engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired world mutations, the world executes
//! them through its `apply` entry point and broadcasts [`Event`] values that
//! overlay owners react to. Positions, directions and the compact tile-key
//! codec live here so every crate agrees on how the map is addressed.

mod texture;
mod tile;

use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

pub use texture::{
    OverlayLayer, Placement, PlacementSink, TextureError, TextureKey, TextureLookup,
    UnknownTextureKey,
};
pub use tile::{DecodeError, HazardKind, ItemKind, TerrainKind, TileKey};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome aboard, Seafarer.";

/// Immutable two-dimensional integer vector.
///
/// Used both for tile positions inside a section and for section coordinates
/// inside the world grid. Every arithmetic operation yields a new value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PositionVector {
    x: i32,
    y: i32,
}

impl PositionVector {
    /// Vector located at the origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, increasing to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, increasing downward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Component-wise sum of two vectors.
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference of two vectors.
    #[must_use]
    pub const fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Canonical `"x,y"` key used to index sparse positional maps.
    #[must_use]
    pub fn serialized(&self) -> PositionKey {
        PositionKey(format!("{},{}", self.x, self.y))
    }
}

impl Add for PositionVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        PositionVector::add(self, other)
    }
}

impl Sub for PositionVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl fmt::Display for PositionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Serialized `"x,y"` form of a [`PositionVector`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionKey(String);

impl PositionKey {
    /// Borrows the textual key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PositionVector> for PositionKey {
    fn from(position: PositionVector) -> Self {
        position.serialized()
    }
}

/// Error raised when a string is not a valid `"x,y"` position key.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid \"x,y\" position key")]
pub struct PositionKeyError(String);

impl FromStr for PositionKey {
    type Err = PositionKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionKeyError(value.to_owned());
        let (x, y) = value.split_once(',').ok_or_else(invalid)?;
        let x: i32 = x.parse().map_err(|_| invalid())?;
        let y: i32 = y.parse().map_err(|_| invalid())?;
        Ok(PositionVector::new(x, y).serialized())
    }
}

/// Cardinal directions, declared in top, right, bottom, left order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing `y`.
    Up,
    /// Toward increasing `x`.
    Right,
    /// Toward increasing `y`.
    Down,
    /// Toward decreasing `x`.
    Left,
}

impl Direction {
    /// Every direction in top, right, bottom, left order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector pointing in this direction.
    #[must_use]
    pub const fn unit(self) -> PositionVector {
        match self {
            Self::Up => PositionVector::new(0, -1),
            Self::Right => PositionVector::new(1, 0),
            Self::Down => PositionVector::new(0, 1),
            Self::Left => PositionVector::new(-1, 0),
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

/// Physical buttons exposed by the player's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    /// Steer up.
    Up,
    /// Steer down.
    Down,
    /// Steer left.
    Left,
    /// Steer right.
    Right,
    /// Toggle the pause state.
    Pause,
}

impl ControllerButton {
    /// Every button in the order the controller updates them.
    pub const ALL: [ControllerButton; 5] = [
        ControllerButton::Up,
        ControllerButton::Down,
        ControllerButton::Left,
        ControllerButton::Right,
        ControllerButton::Pause,
    ];

    /// Direction steered by the button, or `None` for non-directional buttons.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Pause => None,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the world's cursor to the section at the provided grid coordinate.
    SetCurrentSection {
        /// Coordinate of the section that becomes active.
        coord: PositionVector,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a different section became active; overlays must rebuild.
    SectionChanged {
        /// Coordinate of the section that was active before the command.
        from: PositionVector,
        /// Coordinate of the section that is now active.
        to: PositionVector,
    },
}
