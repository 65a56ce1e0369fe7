#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Overlay maps rebuilt whenever the active section changes.
//!
//! The terrain overlay covers every cell of the active section with a
//! texture; the hazard and item overlays are sparse maps holding only the
//! cells that carry something. Each rebuild resolves textures through a
//! [`TextureLookup`] and replaces its layer in a [`PlacementSink`] wholesale.

mod entity;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seafarer_core::{
    OverlayLayer, Placement, PlacementSink, PositionVector, TerrainKind, TextureError, TextureKey,
    TextureLookup,
};
use seafarer_world::{autotile, query, World};

pub use entity::{Entity, EntityOverlay, HazardOverlay, ItemOverlay, OverlayKind};

/// Probability that a water tile is drawn with a wave crest.
pub const WAVE_PROBABILITY: f64 = 0.1;

/// Source of purely cosmetic randomness.
pub trait CosmeticRng {
    /// Decides whether the next water tile shows waves.
    fn roll_waves(&mut self) -> bool;
}

/// Seedable [`CosmeticRng`] backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct ChaChaCosmetics {
    rng: ChaCha8Rng,
}

impl ChaChaCosmetics {
    /// Creates a deterministic generator from the provided seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CosmeticRng for ChaChaCosmetics {
    fn roll_waves(&mut self) -> bool {
        self.rng.gen_bool(WAVE_PROBABILITY)
    }
}

/// Terrain drawn at a single cell of the active section.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTile<H> {
    /// Decoded terrain of the cell.
    pub kind: TerrainKind,
    /// Texture chosen for the cell.
    pub texture_key: TextureKey,
    /// Renderer handle resolved for `texture_key`.
    pub texture: H,
}

/// Dense terrain layer of the active section.
#[derive(Clone, Debug)]
pub struct TerrainOverlay<H> {
    columns: u32,
    rows: u32,
    tiles: Vec<(PositionVector, TerrainTile<H>)>,
}

impl<H> Default for TerrainOverlay<H> {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            tiles: Vec::new(),
        }
    }
}

impl<H: Clone> TerrainOverlay<H> {
    /// Rebuilds the layer from the world's active section.
    ///
    /// Land is auto-tiled from its neighbours, including those across section
    /// boundaries. On failure the previous contents are kept.
    pub fn build<L, R>(
        &mut self,
        world: &World,
        lookup: &L,
        rng: &mut R,
    ) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
        R: CosmeticRng,
    {
        let section = query::current_section(world);
        let mut tiles = Vec::new();

        for (position, tile) in section.iter() {
            let texture_key = match tile.terrain() {
                TerrainKind::Land => {
                    autotile::land_texture(query::neighbor_pattern(world, position))
                }
                TerrainKind::Water if rng.roll_waves() => TextureKey::TerrainWaterWithWaves,
                TerrainKind::Water => TextureKey::TerrainWater,
            };
            let texture = lookup.texture(texture_key)?;
            tiles.push((
                position,
                TerrainTile {
                    kind: tile.terrain(),
                    texture_key,
                    texture,
                },
            ));
        }

        self.columns = section.columns();
        self.rows = section.rows();
        self.tiles = tiles;
        tracing::debug!(
            section = %query::current_section_coord(world),
            tiles = self.tiles.len(),
            "terrain overlay rebuilt"
        );
        Ok(())
    }

    /// Terrain drawn at `position`, if the position lies inside the section.
    #[must_use]
    pub fn tile_at(&self, position: PositionVector) -> Option<&TerrainTile<H>> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = usize::try_from(row * self.columns + column).ok()?;
        self.tiles.get(index).map(|(_, tile)| tile)
    }

    /// Columns and rows covered by the layer.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Complete placement set for the layer.
    #[must_use]
    pub fn placements(&self) -> Vec<Placement<H>> {
        self.tiles
            .iter()
            .map(|(position, tile)| Placement::new(*position, tile.texture.clone()))
            .collect()
    }

    /// Replaces the terrain layer of `sink` with this overlay.
    pub fn publish<S>(&self, sink: &mut S)
    where
        S: PlacementSink<H>,
    {
        sink.replace_layer(OverlayLayer::Terrain, self.placements());
    }
}
