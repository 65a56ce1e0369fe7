//! Texture keys and the collaborator contracts used to resolve and place them.

use std::{fmt, str::FromStr};

use crate::PositionVector;

/// Every texture the game knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKey {
    /// Land with water above and to the left.
    TerrainLandTopLeft,
    /// Land with water above.
    TerrainLandTopCenter,
    /// Land with water above and to the right.
    TerrainLandTopRight,
    /// Land with water to the left.
    TerrainLandCenterLeft,
    /// Land surrounded by land.
    TerrainLandCenterCenter,
    /// Land with water to the right.
    TerrainLandCenterRight,
    /// Land with water below and to the left.
    TerrainLandBottomLeft,
    /// Land with water below.
    TerrainLandBottomCenter,
    /// Land with water below and to the right.
    TerrainLandBottomRight,
    /// Land connected only to its right neighbour.
    TerrainLandPeninsulaLeft,
    /// Land connected only to its lower neighbour.
    TerrainLandPeninsulaTop,
    /// Land connected only to its left neighbour.
    TerrainLandPeninsulaRight,
    /// Land connected only to its upper neighbour.
    TerrainLandPeninsulaBottom,
    /// Calm water.
    TerrainWater,
    /// Water with a wave crest.
    TerrainWaterWithWaves,
    /// Ship facing up.
    ShipUp,
    /// Ship facing right.
    ShipRight,
    /// Ship facing down.
    ShipDown,
    /// Ship facing left.
    ShipLeft,
    /// Whirlpool hazard.
    HazardWhirlpool,
    /// Health barrel item.
    ItemHealthBarrel,
    /// Map piece item.
    ItemMapPiece,
    /// Speed boost item.
    ItemSpeedBoost,
}

impl TextureKey {
    /// Every texture key in declaration order.
    pub const ALL: [TextureKey; 23] = [
        TextureKey::TerrainLandTopLeft,
        TextureKey::TerrainLandTopCenter,
        TextureKey::TerrainLandTopRight,
        TextureKey::TerrainLandCenterLeft,
        TextureKey::TerrainLandCenterCenter,
        TextureKey::TerrainLandCenterRight,
        TextureKey::TerrainLandBottomLeft,
        TextureKey::TerrainLandBottomCenter,
        TextureKey::TerrainLandBottomRight,
        TextureKey::TerrainLandPeninsulaLeft,
        TextureKey::TerrainLandPeninsulaTop,
        TextureKey::TerrainLandPeninsulaRight,
        TextureKey::TerrainLandPeninsulaBottom,
        TextureKey::TerrainWater,
        TextureKey::TerrainWaterWithWaves,
        TextureKey::ShipUp,
        TextureKey::ShipRight,
        TextureKey::ShipDown,
        TextureKey::ShipLeft,
        TextureKey::HazardWhirlpool,
        TextureKey::ItemHealthBarrel,
        TextureKey::ItemMapPiece,
        TextureKey::ItemSpeedBoost,
    ];

    /// Stable name used by sprite manifests.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TerrainLandTopLeft => "TerrainLandTopLeft",
            Self::TerrainLandTopCenter => "TerrainLandTopCenter",
            Self::TerrainLandTopRight => "TerrainLandTopRight",
            Self::TerrainLandCenterLeft => "TerrainLandCenterLeft",
            Self::TerrainLandCenterCenter => "TerrainLandCenterCenter",
            Self::TerrainLandCenterRight => "TerrainLandCenterRight",
            Self::TerrainLandBottomLeft => "TerrainLandBottomLeft",
            Self::TerrainLandBottomCenter => "TerrainLandBottomCenter",
            Self::TerrainLandBottomRight => "TerrainLandBottomRight",
            Self::TerrainLandPeninsulaLeft => "TerrainLandPeninsulaLeft",
            Self::TerrainLandPeninsulaTop => "TerrainLandPeninsulaTop",
            Self::TerrainLandPeninsulaRight => "TerrainLandPeninsulaRight",
            Self::TerrainLandPeninsulaBottom => "TerrainLandPeninsulaBottom",
            Self::TerrainWater => "TerrainWater",
            Self::TerrainWaterWithWaves => "TerrainWaterWithWaves",
            Self::ShipUp => "ShipUp",
            Self::ShipRight => "ShipRight",
            Self::ShipDown => "ShipDown",
            Self::ShipLeft => "ShipLeft",
            Self::HazardWhirlpool => "HazardWhirlpool",
            Self::ItemHealthBarrel => "ItemHealthBarrel",
            Self::ItemMapPiece => "ItemMapPiece",
            Self::ItemSpeedBoost => "ItemSpeedBoost",
        }
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when a manifest names a texture the game does not know.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown texture key `{0}`")]
pub struct UnknownTextureKey(String);

impl FromStr for TextureKey {
    type Err = UnknownTextureKey;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| UnknownTextureKey(name.to_owned()))
    }
}

/// Failures reported by a [`TextureLookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    /// The lookup was queried before any texture was registered.
    #[error("textures are not initialised; load the sprite atlas first")]
    NotInitialized,
    /// The lookup is populated but lacks the requested key.
    #[error("no texture registered for {0}")]
    Missing(TextureKey),
}

/// Service resolving texture keys into renderer-specific handles.
pub trait TextureLookup {
    /// Opaque handle understood by the renderer.
    type Handle: Clone;

    /// Resolves the handle registered for `key`.
    fn texture(&self, key: TextureKey) -> Result<Self::Handle, TextureError>;
}

/// Render layers populated by overlay rebuilds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayLayer {
    /// Water and land tiles.
    Terrain,
    /// Hazards drawn above the terrain.
    Hazards,
    /// Items drawn above the terrain.
    Items,
}

/// Texture handle anchored at a tile position.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<H> {
    /// Tile position inside the active section.
    pub position: PositionVector,
    /// Handle to draw at the position.
    pub texture: H,
}

impl<H> Placement<H> {
    /// Creates a new placement.
    #[must_use]
    pub const fn new(position: PositionVector, texture: H) -> Self {
        Self { position, texture }
    }
}

/// Receiver of overlay placements.
///
/// Every call carries the complete contents of the layer; implementations
/// discard whatever the layer held before.
pub trait PlacementSink<H> {
    /// Replaces the contents of `layer` with `placements`.
    fn replace_layer(&mut self, layer: OverlayLayer, placements: Vec<Placement<H>>);
}
