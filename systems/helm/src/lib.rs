#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ship movement state machine.
//!
//! The ship sails one tile at a time. While idle it accepts a held direction
//! and departs toward the neighbouring tile if that tile is water; while
//! moving it ignores input and interpolates its visual position between the
//! previous and current tiles until the animation completes.

mod health;

use glam::Vec2;
use seafarer_core::{Command, Direction, PositionVector, TextureKey};
use seafarer_world::{adjacency::SectionCrossing, query, World};

pub use health::Health;

/// Number of ticks a single tile move animates over.
pub const TOTAL_ANIMATION_FRAMES: u32 = 7;

/// Health lost when arriving on a hazard.
pub const HAZARD_DAMAGE: u32 = 10;

/// Health restored when arriving on an item.
pub const ITEM_HEALING: u32 = 10;

/// Health of an undamaged ship.
pub const MAX_HEALTH: u32 = 100;

/// Movement state of the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipState {
    /// Waiting for a direction.
    Idle,
    /// Animating toward the current tile.
    Moving,
}

/// Move the ship committed to during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Departure {
    /// Tile the ship sails toward, in `section` coordinates.
    pub destination: PositionVector,
    /// Section holding the destination.
    pub section: PositionVector,
    /// Whether the move crosses into another section.
    pub crossing: SectionCrossing,
}

/// Result of a single [`Ship::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The ship is still animating; input was ignored.
    Animating,
    /// The ship is idle and no direction was held.
    Idle,
    /// The held direction leads onto land or off the world.
    Blocked(Direction),
    /// The ship started a new move.
    Departed(Departure),
}

/// Player ship.
#[derive(Clone, Debug)]
pub struct Ship {
    position: PositionVector,
    previous_position: PositionVector,
    state: ShipState,
    frame: u32,
    heading: Direction,
    visual: Vec2,
    health: Health,
    awaiting_arrival: bool,
}

impl Ship {
    /// Creates an idle, undamaged ship facing right at `position`.
    #[must_use]
    pub fn new(position: PositionVector) -> Self {
        Self {
            position,
            previous_position: position,
            state: ShipState::Idle,
            frame: 0,
            heading: Direction::Right,
            visual: tile_vec(position),
            health: Health::full(MAX_HEALTH),
            awaiting_arrival: false,
        }
    }

    /// Tile the ship occupies or sails toward, in active-section coordinates.
    #[must_use]
    pub const fn position(&self) -> PositionVector {
        self.position
    }

    /// Tile the current move started from.
    #[must_use]
    pub const fn previous_position(&self) -> PositionVector {
        self.previous_position
    }

    /// Current movement state.
    #[must_use]
    pub const fn state(&self) -> ShipState {
        self.state
    }

    /// Animation frame of the current move; zero while idle.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Direction the bow points.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Interpolated position in tile units.
    #[must_use]
    pub const fn visual_position(&self) -> Vec2 {
        self.visual
    }

    /// Remaining hull integrity.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Whether the ship has sunk.
    #[must_use]
    pub const fn is_wrecked(&self) -> bool {
        self.health.is_depleted()
    }

    /// Texture matching the current heading.
    #[must_use]
    pub const fn texture_key(&self) -> TextureKey {
        match self.heading {
            Direction::Up => TextureKey::ShipUp,
            Direction::Right => TextureKey::ShipRight,
            Direction::Down => TextureKey::ShipDown,
            Direction::Left => TextureKey::ShipLeft,
        }
    }

    /// Advances the ship by one tick.
    ///
    /// A move that leaves the active section pushes the matching
    /// [`Command::SetCurrentSection`] into `out`; the caller must apply it
    /// before the next tick so the ship's position stays section-local.
    pub fn update(
        &mut self,
        direction: Option<Direction>,
        world: &World,
        out: &mut Vec<Command>,
    ) -> MoveOutcome {
        if self.state == ShipState::Moving {
            self.animate();
            if self.state == ShipState::Moving {
                return MoveOutcome::Animating;
            }
        }

        let Some(direction) = direction else {
            return MoveOutcome::Idle;
        };
        self.heading = direction;

        let Some(neighbor) = query::neighbor(world, self.position, direction) else {
            tracing::trace!(?direction, position = %self.position, "no section beyond the edge");
            return MoveOutcome::Blocked(direction);
        };
        if neighbor.tile.is_land() {
            tracing::trace!(?direction, position = %self.position, "land ahead");
            return MoveOutcome::Blocked(direction);
        }

        self.previous_position = match neighbor.crossing {
            SectionCrossing::Same => self.position,
            SectionCrossing::Changed => neighbor.position - direction.unit(),
        };
        self.position = neighbor.position;
        self.state = ShipState::Moving;
        self.visual = tile_vec(self.previous_position);
        self.awaiting_arrival = true;

        if neighbor.crossing == SectionCrossing::Changed {
            out.push(Command::SetCurrentSection {
                coord: neighbor.section,
            });
        }

        tracing::debug!(
            ?direction,
            destination = %neighbor.position,
            section = %neighbor.section,
            "ship departed"
        );
        MoveOutcome::Departed(Departure {
            destination: neighbor.position,
            section: neighbor.section,
            crossing: neighbor.crossing,
        })
    }

    /// Applies the effects found at the destination of the latest departure.
    ///
    /// Hazards and items apply independently. Calls without a pending
    /// departure leave health untouched.
    pub fn apply_arrival(&mut self, hazard_present: bool, item_present: bool) -> Health {
        if !self.awaiting_arrival {
            return self.health;
        }
        self.awaiting_arrival = false;

        if hazard_present {
            self.health.damage(HAZARD_DAMAGE);
        }
        if item_present {
            self.health.heal(ITEM_HEALING);
        }
        if self.health.is_depleted() {
            tracing::info!(position = %self.position, "ship wrecked");
        }
        self.health
    }

    fn animate(&mut self) {
        self.frame += 1;

        let start = tile_vec(self.previous_position);
        let destination = tile_vec(self.position);
        let delta = destination - start;
        let progress = self.frame as f32 / TOTAL_ANIMATION_FRAMES as f32;
        let visual = start + delta * progress;

        let reached = (destination - visual).dot(delta) <= 0.0;
        let remaining = (destination - visual).abs();
        let detached = remaining.x >= 1.0 || remaining.y >= 1.0;

        if self.frame >= TOTAL_ANIMATION_FRAMES || reached || detached {
            self.visual = destination;
            self.frame = 0;
            self.state = ShipState::Idle;
        } else {
            self.visual = visual;
        }
    }
}

fn tile_vec(position: PositionVector) -> Vec2 {
    Vec2::new(position.x() as f32, position.y() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ships_idle_at_full_health_facing_right() {
        let ship = Ship::new(PositionVector::new(4, 3));

        assert_eq!(ship.state(), ShipState::Idle);
        assert_eq!(ship.frame(), 0);
        assert_eq!(ship.heading(), Direction::Right);
        assert_eq!(ship.texture_key(), TextureKey::ShipRight);
        assert_eq!(ship.visual_position(), Vec2::new(4.0, 3.0));
        assert_eq!(ship.health(), Health::full(MAX_HEALTH));
    }

    #[test]
    fn arrival_effects_need_a_departure() {
        let mut ship = Ship::new(PositionVector::ORIGIN);
        assert_eq!(ship.apply_arrival(true, false).current(), MAX_HEALTH);
    }

    #[test]
    fn damage_lands_before_healing_at_low_health() {
        let mut ship = Ship::new(PositionVector::ORIGIN);
        ship.health = Health::new(5, MAX_HEALTH);
        ship.awaiting_arrival = true;

        // The hazard floors health at zero before the item heals.
        assert_eq!(ship.apply_arrival(true, true).current(), ITEM_HEALING);
        assert!(!ship.is_wrecked());
    }
}
