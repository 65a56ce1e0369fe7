//! Land auto-tiling from the four-neighbour terrain pattern.

use seafarer_core::{TerrainKind, TextureKey};

/// Effective terrain of the four orthogonal neighbours of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborPattern {
    /// Terrain above the tile.
    pub top: TerrainKind,
    /// Terrain to the right of the tile.
    pub right: TerrainKind,
    /// Terrain below the tile.
    pub bottom: TerrainKind,
    /// Terrain to the left of the tile.
    pub left: TerrainKind,
}

impl NeighborPattern {
    /// Every one of the sixteen possible patterns.
    #[must_use]
    pub fn all() -> Vec<NeighborPattern> {
        const KINDS: [TerrainKind; 2] = [TerrainKind::Water, TerrainKind::Land];

        let mut patterns = Vec::with_capacity(16);
        for top in KINDS {
            for right in KINDS {
                for bottom in KINDS {
                    for left in KINDS {
                        patterns.push(NeighborPattern {
                            top,
                            right,
                            bottom,
                            left,
                        });
                    }
                }
            }
        }
        patterns
    }
}

/// Texture drawn for a land tile surrounded by `pattern`.
///
/// Patterns without dedicated art (vertical or horizontal strips and isolated
/// islands) fall back to the centre tile.
#[must_use]
pub const fn land_texture(pattern: NeighborPattern) -> TextureKey {
    use TerrainKind::{Land as L, Water as W};

    match (pattern.top, pattern.right, pattern.bottom, pattern.left) {
        (W, W, L, L) => TextureKey::TerrainLandTopRight,
        (W, L, L, L) => TextureKey::TerrainLandTopCenter,
        (W, L, L, W) => TextureKey::TerrainLandTopLeft,
        (L, L, L, W) => TextureKey::TerrainLandCenterLeft,
        (L, L, L, L) => TextureKey::TerrainLandCenterCenter,
        (L, W, L, L) => TextureKey::TerrainLandCenterRight,
        (L, L, W, W) => TextureKey::TerrainLandBottomLeft,
        (L, L, W, L) => TextureKey::TerrainLandBottomCenter,
        (L, W, W, L) => TextureKey::TerrainLandBottomRight,
        (L, W, W, W) => TextureKey::TerrainLandPeninsulaBottom,
        (W, L, W, W) => TextureKey::TerrainLandPeninsulaLeft,
        (W, W, L, W) => TextureKey::TerrainLandPeninsulaTop,
        (W, W, W, L) => TextureKey::TerrainLandPeninsulaRight,
        (L, W, L, W) | (W, L, W, L) | (W, W, W, W) => TextureKey::TerrainLandCenterCenter,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn pattern(
        top: TerrainKind,
        right: TerrainKind,
        bottom: TerrainKind,
        left: TerrainKind,
    ) -> NeighborPattern {
        NeighborPattern {
            top,
            right,
            bottom,
            left,
        }
    }

    #[test]
    fn there_are_sixteen_distinct_patterns() {
        let patterns: HashSet<_> = NeighborPattern::all().into_iter().collect();
        assert_eq!(patterns.len(), 16);
    }

    #[test]
    fn every_pattern_maps_to_a_land_texture() {
        for pattern in NeighborPattern::all() {
            let texture = land_texture(pattern);
            assert!(
                texture.name().starts_with("TerrainLand"),
                "{pattern:?} mapped to {texture}"
            );
        }
    }

    #[test]
    fn patterns_without_art_use_the_centre_tile() {
        use TerrainKind::{Land as L, Water as W};

        for unsupported in [pattern(L, W, L, W), pattern(W, L, W, L), pattern(W, W, W, W)] {
            assert_eq!(land_texture(unsupported), TextureKey::TerrainLandCenterCenter);
        }
    }

    #[test]
    fn coastline_corners_face_the_water() {
        use TerrainKind::{Land as L, Water as W};

        assert_eq!(land_texture(pattern(W, L, L, W)), TextureKey::TerrainLandTopLeft);
        assert_eq!(land_texture(pattern(W, W, L, L)), TextureKey::TerrainLandTopRight);
        assert_eq!(land_texture(pattern(L, L, W, W)), TextureKey::TerrainLandBottomLeft);
        assert_eq!(land_texture(pattern(L, W, W, L)), TextureKey::TerrainLandBottomRight);
        assert_eq!(land_texture(pattern(W, W, W, L)), TextureKey::TerrainLandPeninsulaRight);
    }

    #[test]
    fn distinct_art_covers_thirteen_patterns() {
        let textures: HashSet<_> = NeighborPattern::all().into_iter().map(land_texture).collect();
        assert_eq!(textures.len(), 13);
    }
}
