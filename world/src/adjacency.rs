//! Neighbour resolution across section boundaries.

use seafarer_core::{Direction, PositionVector, TerrainKind, TileKey};

use crate::{autotile::NeighborPattern, MapSection, WorldGrid};

/// Whether resolving a neighbour stayed inside the section or crossed into another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionCrossing {
    /// The neighbour lies in the section that was queried.
    Same,
    /// The neighbour lies in the adjacent section of the world grid.
    Changed,
}

/// Tile reached by stepping one tile in a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborTile {
    /// Decoded tile at the destination.
    pub tile: TileKey,
    /// Destination position inside `section`.
    pub position: PositionVector,
    /// Grid coordinate of the section holding the destination.
    pub section: PositionVector,
    /// Whether the step crossed a section boundary.
    pub crossing: SectionCrossing,
}

/// Resolves the tile one step from `position` in `direction`.
///
/// Steps that leave the section continue into the adjacent section of the
/// grid, entering on the opposite edge. Returns `None` when no adjacent
/// section exists or the entry position lies outside it.
#[must_use]
pub fn resolve_neighbor(
    grid: &WorldGrid,
    section_coord: PositionVector,
    position: PositionVector,
    direction: Direction,
) -> Option<NeighborTile> {
    let section = grid.section(section_coord)?;
    let step = direction.unit();
    let neighbor = position + step;

    if let Some(tile) = section.tile(neighbor) {
        return Some(NeighborTile {
            tile,
            position: neighbor,
            section: section_coord,
            crossing: SectionCrossing::Same,
        });
    }

    let next_coord = section_coord + step;
    let next = grid.section(next_coord)?;
    let entry = entry_position(next, neighbor, step);
    let tile = next.tile(entry)?;

    Some(NeighborTile {
        tile,
        position: entry,
        section: next_coord,
        crossing: SectionCrossing::Changed,
    })
}

fn entry_position(
    section: &MapSection,
    neighbor: PositionVector,
    step: PositionVector,
) -> PositionVector {
    let x = entry_axis(neighbor.x(), step.x(), section.columns());
    let y = entry_axis(neighbor.y(), step.y(), section.rows());
    PositionVector::new(x, y)
}

fn entry_axis(coordinate: i32, step: i32, extent: u32) -> i32 {
    match step.signum() {
        -1 => i32::try_from(extent).unwrap_or(i32::MAX) - 1,
        1 => 0,
        _ => coordinate,
    }
}

/// Terrain assumed for a neighbour lookup; anything unresolvable is water.
#[must_use]
pub fn effective_terrain(tile: Option<TileKey>) -> TerrainKind {
    tile.map_or(TerrainKind::Water, |tile| tile.terrain())
}

/// Collects the effective terrain around `position` in top, right, bottom, left order.
#[must_use]
pub fn neighbor_pattern(
    grid: &WorldGrid,
    section_coord: PositionVector,
    position: PositionVector,
) -> NeighborPattern {
    let terrain = |direction| {
        effective_terrain(
            resolve_neighbor(grid, section_coord, position, direction).map(|found| found.tile),
        )
    };

    NeighborPattern {
        top: terrain(Direction::Up),
        right: terrain(Direction::Right),
        bottom: terrain(Direction::Down),
        left: terrain(Direction::Left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(rows: &[&str]) -> MapSection {
        MapSection::parse(PositionVector::ORIGIN, rows).expect("valid section")
    }

    fn water(columns: usize, rows: usize) -> MapSection {
        let row = vec!["_-`"; columns].join(" ");
        section(&vec![row.as_str(); rows])
    }

    #[test]
    fn in_bounds_neighbours_stay_in_section() {
        let grid = WorldGrid::new(vec![vec![section(&["_-` 0-`", "_-` _-`"])]]).expect("grid");

        let found = resolve_neighbor(
            &grid,
            PositionVector::ORIGIN,
            PositionVector::new(0, 0),
            Direction::Right,
        )
        .expect("neighbour exists");

        assert_eq!(found.tile, TileKey::LAND);
        assert_eq!(found.position, PositionVector::new(1, 0));
        assert_eq!(found.section, PositionVector::ORIGIN);
        assert_eq!(found.crossing, SectionCrossing::Same);
    }

    #[test]
    fn crossing_enters_on_the_opposite_edge() {
        let grid = WorldGrid::new(vec![
            vec![water(4, 3), water(4, 3)],
            vec![water(4, 3), water(4, 3)],
        ])
        .expect("grid");

        let right = resolve_neighbor(
            &grid,
            PositionVector::ORIGIN,
            PositionVector::new(3, 1),
            Direction::Right,
        )
        .expect("right section exists");
        assert_eq!(right.section, PositionVector::new(1, 0));
        assert_eq!(right.position, PositionVector::new(0, 1));
        assert_eq!(right.crossing, SectionCrossing::Changed);

        let left = resolve_neighbor(
            &grid,
            PositionVector::new(1, 1),
            PositionVector::new(0, 2),
            Direction::Left,
        )
        .expect("left section exists");
        assert_eq!(left.section, PositionVector::new(0, 1));
        assert_eq!(left.position, PositionVector::new(3, 2));

        let up = resolve_neighbor(
            &grid,
            PositionVector::new(0, 1),
            PositionVector::new(2, 0),
            Direction::Up,
        )
        .expect("upper section exists");
        assert_eq!(up.section, PositionVector::ORIGIN);
        assert_eq!(up.position, PositionVector::new(2, 2));

        let down = resolve_neighbor(
            &grid,
            PositionVector::new(1, 0),
            PositionVector::new(1, 2),
            Direction::Down,
        )
        .expect("lower section exists");
        assert_eq!(down.section, PositionVector::new(1, 1));
        assert_eq!(down.position, PositionVector::new(1, 0));
    }

    #[test]
    fn crossing_and_returning_restores_the_origin_tile() {
        let grid = WorldGrid::new(vec![
            vec![water(5, 4), water(5, 4)],
            vec![water(5, 4), water(5, 4)],
        ])
        .expect("grid");
        let mut crossings = 0;

        for section_y in 0..2 {
            for section_x in 0..2 {
                let start_section = PositionVector::new(section_x, section_y);
                for y in 0..4 {
                    for x in 0..5 {
                        let start = PositionVector::new(x, y);
                        for direction in Direction::ALL {
                            let Some(there) =
                                resolve_neighbor(&grid, start_section, start, direction)
                            else {
                                continue;
                            };
                            if there.crossing == SectionCrossing::Changed {
                                crossings += 1;
                            }

                            let back = resolve_neighbor(
                                &grid,
                                there.section,
                                there.position,
                                direction.opposite(),
                            )
                            .expect("the way back exists");
                            assert_eq!(
                                (back.section, back.position),
                                (start_section, start),
                                "{direction:?} from {start} in section {start_section}"
                            );
                            assert_eq!(back.crossing, there.crossing);
                        }
                    }
                }
            }
        }

        // Every inner boundary is crossed once per edge tile in each direction.
        assert_eq!(crossings, 2 * (4 + 4) + 2 * (5 + 5));
    }

    #[test]
    fn missing_sections_are_impassable() {
        let grid = WorldGrid::new(vec![vec![water(3, 3)]]).expect("grid");

        for (position, direction) in [
            (PositionVector::new(0, 1), Direction::Left),
            (PositionVector::new(2, 1), Direction::Right),
            (PositionVector::new(1, 0), Direction::Up),
            (PositionVector::new(1, 2), Direction::Down),
        ] {
            assert_eq!(
                resolve_neighbor(&grid, PositionVector::ORIGIN, position, direction),
                None
            );
        }
    }

    #[test]
    fn entry_outside_a_smaller_neighbour_is_impassable() {
        let grid = WorldGrid::new(vec![vec![water(3, 5), water(3, 2)]]).expect("grid");

        let blocked = resolve_neighbor(
            &grid,
            PositionVector::ORIGIN,
            PositionVector::new(2, 4),
            Direction::Right,
        );
        assert_eq!(blocked, None);

        let allowed = resolve_neighbor(
            &grid,
            PositionVector::ORIGIN,
            PositionVector::new(2, 1),
            Direction::Right,
        )
        .expect("row 1 exists in both sections");
        assert_eq!(allowed.position, PositionVector::new(0, 1));
    }

    #[test]
    fn unresolvable_neighbours_count_as_water() {
        assert_eq!(effective_terrain(None), TerrainKind::Water);
        assert_eq!(effective_terrain(Some(TileKey::LAND)), TerrainKind::Land);

        let grid = WorldGrid::new(vec![vec![section(&["0-` 0-`", "0-` _-`"])]]).expect("grid");
        let pattern = neighbor_pattern(&grid, PositionVector::ORIGIN, PositionVector::ORIGIN);

        assert_eq!(
            pattern,
            NeighborPattern {
                top: TerrainKind::Water,
                right: TerrainKind::Land,
                bottom: TerrainKind::Land,
                left: TerrainKind::Water,
            }
        );
    }
}
