#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Seafarer.
//!
//! The world owns the grid of map sections loaded at startup and the cursor
//! naming the section the ship currently sails in. Sections never change once
//! loaded; the cursor moves only through [`apply`].

pub mod adjacency;
pub mod autotile;
pub mod levels;

use seafarer_core::{Command, DecodeError, Event, PositionVector, TileKey};
use serde::Deserialize;

/// Serialisable description of a whole level.
///
/// `sections` is indexed row-major: `sections[y][x]` is the section at grid
/// coordinate `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LevelData {
    /// Rows of sections composing the world grid.
    pub sections: Vec<Vec<SectionData>>,
}

impl LevelData {
    /// Parses a level from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, LevelError> {
        toml::from_str(contents).map_err(|error| LevelError::Parse(error.to_string()))
    }
}

/// Serialisable description of a single map section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SectionData {
    /// Tile rows, each listing whitespace-separated tile keys.
    pub rows: Vec<String>,
}

/// Reasons a level cannot be turned into a world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// The level text was not valid TOML or did not match the level schema.
    #[error("failed to parse level: {0}")]
    Parse(String),
    /// The level did not contain a single section.
    #[error("level contains no sections")]
    EmptyWorld,
    /// A row of the world grid held a different number of sections than the first row.
    #[error("world grid row {row} has {found} sections, expected {expected}")]
    RaggedWorld {
        /// Offending grid row.
        row: usize,
        /// Number of sections in the first row.
        expected: usize,
        /// Number of sections found in the offending row.
        found: usize,
    },
    /// A section did not contain any tiles.
    #[error("section {section} contains no tiles")]
    EmptySection {
        /// Grid coordinate of the section.
        section: PositionVector,
    },
    /// A section row held a different number of tiles than the first row.
    #[error("section {section} row {row} has {found} tiles, expected {expected}")]
    RaggedSection {
        /// Grid coordinate of the section.
        section: PositionVector,
        /// Offending tile row.
        row: usize,
        /// Number of tiles in the first row.
        expected: usize,
        /// Number of tiles found in the offending row.
        found: usize,
    },
    /// A tile key failed to decode.
    #[error("section {section} tile {position}: {source}")]
    Tile {
        /// Grid coordinate of the section.
        section: PositionVector,
        /// Position of the tile inside the section.
        position: PositionVector,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },
}

/// Rectangular grid of tiles loaded as one playable area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSection {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKey>,
}

impl MapSection {
    /// Builds a section from decoded tile rows.
    ///
    /// `section` only labels errors; it is not stored.
    pub fn new(section: PositionVector, rows: Vec<Vec<TileKey>>) -> Result<Self, LevelError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptySection { section });
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(LevelError::RaggedSection {
                    section,
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }

        Ok(Self {
            columns: to_u32(expected),
            rows: to_u32(rows.len()),
            tiles,
        })
    }

    /// Decodes a section from textual rows of whitespace-separated tile keys.
    pub fn parse<S>(section: PositionVector, rows: &[S]) -> Result<Self, LevelError>
    where
        S: AsRef<str>,
    {
        let mut decoded = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut tiles = Vec::new();
            for (x, raw) in row.as_ref().split_whitespace().enumerate() {
                let tile = TileKey::decode(raw).map_err(|source| LevelError::Tile {
                    section,
                    position: PositionVector::new(to_i32(x), to_i32(y)),
                    source,
                })?;
                tiles.push(tile);
            }
            decoded.push(tiles);
        }
        Self::new(section, decoded)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position addresses a tile of this section.
    #[must_use]
    pub fn contains(&self, position: PositionVector) -> bool {
        self.index(position).is_some()
    }

    /// Tile at the provided position, or `None` when it lies outside the section.
    #[must_use]
    pub fn tile(&self, position: PositionVector) -> Option<TileKey> {
        self.index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Iterates every tile in row-major order alongside its position.
    pub fn iter(&self) -> impl Iterator<Item = (PositionVector, TileKey)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = to_u32(index);
            let position = PositionVector::new(
                i32::try_from(index % columns).unwrap_or(i32::MAX),
                i32::try_from(index / columns).unwrap_or(i32::MAX),
            );
            (position, *tile)
        })
    }

    fn index(&self, position: PositionVector) -> Option<usize> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Rectangular grid of sections forming the explorable overworld.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    columns: u32,
    rows: u32,
    sections: Vec<MapSection>,
}

impl WorldGrid {
    /// Builds the grid from rows of sections.
    pub fn new(rows: Vec<Vec<MapSection>>) -> Result<Self, LevelError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyWorld);
        }

        let row_count = rows.len();
        let mut sections = Vec::with_capacity(expected * row_count);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(LevelError::RaggedWorld {
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }
            sections.extend(row);
        }

        Ok(Self {
            columns: to_u32(expected),
            rows: to_u32(row_count),
            sections,
        })
    }

    /// Number of section columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of section rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Section at the provided grid coordinate, or `None` outside the grid.
    #[must_use]
    pub fn section(&self, coord: PositionVector) -> Option<&MapSection> {
        let column = u32::try_from(coord.x()).ok()?;
        let row = u32::try_from(coord.y()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(row * self.columns + column).ok()?;
        self.sections.get(index)
    }
}

/// Represents the authoritative Seafarer world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: WorldGrid,
    current_section: PositionVector,
}

impl World {
    /// Creates a world over the provided grid with the cursor at the origin.
    #[must_use]
    pub fn new(grid: WorldGrid) -> Self {
        Self {
            banner: seafarer_core::WELCOME_BANNER,
            grid,
            current_section: PositionVector::ORIGIN,
        }
    }

    /// Decodes every section of the level and creates a world from them.
    pub fn from_level(level: &LevelData) -> Result<Self, LevelError> {
        let mut rows = Vec::with_capacity(level.sections.len());
        for (y, row) in level.sections.iter().enumerate() {
            let mut sections = Vec::with_capacity(row.len());
            for (x, data) in row.iter().enumerate() {
                let coord = PositionVector::new(to_i32(x), to_i32(y));
                sections.push(MapSection::parse(coord, &data.rows)?);
            }
            rows.push(sections);
        }

        let grid = WorldGrid::new(rows)?;
        tracing::debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            "world grid loaded"
        );
        Ok(Self::new(grid))
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetCurrentSection { coord } => {
            if world.grid.section(coord).is_none() {
                tracing::error!(%coord, "refusing to move the world cursor outside the grid");
                debug_assert!(false, "section {coord} lies outside the world grid");
                return;
            }

            let from = world.current_section;
            world.current_section = coord;
            tracing::debug!(%from, to = %coord, "active section changed");
            out_events.push(Event::SectionChanged { from, to: coord });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use seafarer_core::{Direction, PositionVector};

    use super::{
        adjacency::{self, NeighborTile},
        autotile::NeighborPattern,
        MapSection, World, WorldGrid,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the grid of sections.
    #[must_use]
    pub fn grid(world: &World) -> &WorldGrid {
        &world.grid
    }

    /// Section at the provided grid coordinate, if one exists.
    #[must_use]
    pub fn section(world: &World, coord: PositionVector) -> Option<&MapSection> {
        world.grid.section(coord)
    }

    /// Grid coordinate of the active section.
    #[must_use]
    pub fn current_section_coord(world: &World) -> PositionVector {
        world.current_section
    }

    /// The active section.
    #[must_use]
    pub fn current_section(world: &World) -> &MapSection {
        // `apply` never moves the cursor off the grid and the grid is never empty.
        world
            .grid
            .section(world.current_section)
            .unwrap_or_else(|| unreachable!("world cursor always addresses a section"))
    }

    /// Resolves the neighbour of `position` in the active section.
    #[must_use]
    pub fn neighbor(
        world: &World,
        position: PositionVector,
        direction: Direction,
    ) -> Option<NeighborTile> {
        adjacency::resolve_neighbor(&world.grid, world.current_section, position, direction)
    }

    /// Effective terrain surrounding `position` in the active section.
    #[must_use]
    pub fn neighbor_pattern(world: &World, position: PositionVector) -> NeighborPattern {
        adjacency::neighbor_pattern(&world.grid, world.current_section, position)
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
