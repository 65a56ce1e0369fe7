use std::collections::HashMap;

use seafarer_core::{
    HazardKind, ItemKind, OverlayLayer, Placement, PlacementSink, PositionKey, PositionVector,
    TextureError, TextureKey, TextureLookup, TileKey,
};
use seafarer_world::MapSection;

/// Kind of entity stored in a sparse overlay.
pub trait OverlayKind: Copy + Eq + std::fmt::Debug {
    /// Layer the overlay publishes into.
    const LAYER: OverlayLayer;

    /// Extracts the kind carried by `tile`, including the empty slot.
    fn from_tile(tile: TileKey) -> Self;

    /// Texture drawn for the kind, or `None` for the empty slot.
    fn texture_key(self) -> Option<TextureKey>;
}

impl OverlayKind for HazardKind {
    const LAYER: OverlayLayer = OverlayLayer::Hazards;

    fn from_tile(tile: TileKey) -> Self {
        tile.hazard()
    }

    fn texture_key(self) -> Option<TextureKey> {
        match self {
            HazardKind::None => None,
            HazardKind::Whirlpool => Some(TextureKey::HazardWhirlpool),
        }
    }
}

impl OverlayKind for ItemKind {
    const LAYER: OverlayLayer = OverlayLayer::Items;

    fn from_tile(tile: TileKey) -> Self {
        tile.item()
    }

    fn texture_key(self) -> Option<TextureKey> {
        match self {
            ItemKind::None => None,
            ItemKind::HealthBarrel => Some(TextureKey::ItemHealthBarrel),
            ItemKind::MapPiece => Some(TextureKey::ItemMapPiece),
            ItemKind::SpeedBoost => Some(TextureKey::ItemSpeedBoost),
        }
    }
}

/// Entity occupying a single water tile.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity<K, H> {
    /// Decoded kind of the entity.
    pub kind: K,
    /// Tile position inside the active section.
    pub position: PositionVector,
    /// Renderer handle resolved for the kind.
    pub texture: H,
}

/// Sparse map of entities keyed by serialized position.
#[derive(Clone, Debug)]
pub struct EntityOverlay<K, H> {
    entities: HashMap<PositionKey, Entity<K, H>>,
}

/// Overlay holding the hazards of the active section.
pub type HazardOverlay<H> = EntityOverlay<HazardKind, H>;

/// Overlay holding the items of the active section.
pub type ItemOverlay<H> = EntityOverlay<ItemKind, H>;

impl<K, H> Default for EntityOverlay<K, H> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }
}

impl<K: OverlayKind, H: Clone> EntityOverlay<K, H> {
    /// Replaces the overlay with the entities found in `section`.
    ///
    /// On failure the previous contents are kept.
    pub fn build<L>(&mut self, section: &MapSection, lookup: &L) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
    {
        let mut entities = HashMap::new();
        for (position, tile) in section.iter().filter(|(_, tile)| tile.is_water()) {
            let kind = K::from_tile(tile);
            let Some(texture_key) = kind.texture_key() else {
                continue;
            };
            let texture = lookup.texture(texture_key)?;
            let _ = entities.insert(
                position.serialized(),
                Entity {
                    kind,
                    position,
                    texture,
                },
            );
        }

        self.entities = entities;
        tracing::debug!(layer = ?K::LAYER, entities = self.entities.len(), "overlay rebuilt");
        Ok(())
    }

    /// Entity stored at the serialized position, if any.
    #[must_use]
    pub fn get_at(&self, key: &PositionKey) -> Option<&Entity<K, H>> {
        self.entities.get(key)
    }

    /// Number of entities in the overlay.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Reports whether the overlay holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates every entity in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity<K, H>> + '_ {
        self.entities.values()
    }

    /// Complete placement set for the layer, ordered by position.
    #[must_use]
    pub fn placements(&self) -> Vec<Placement<H>> {
        let mut placements: Vec<_> = self
            .entities
            .values()
            .map(|entity| Placement::new(entity.position, entity.texture.clone()))
            .collect();
        placements.sort_by_key(|placement| (placement.position.y(), placement.position.x()));
        placements
    }

    /// Replaces the overlay's layer of `sink` with this overlay.
    pub fn publish<S>(&self, sink: &mut S)
    where
        S: PlacementSink<H>,
    {
        sink.replace_layer(K::LAYER, self.placements());
    }
}
