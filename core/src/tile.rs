//! Compact three-symbol tile-key codec.
//!
//! A tile key packs the terrain, hazard and item occupying a single map cell
//! into three characters, e.g. `` _W` `` for a whirlpool on open water. Land
//! cells are reserved: they never carry a hazard or an item.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Terrain occupying a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Navigable water, encoded as `_`.
    Water,
    /// Impassable land, encoded as `0`.
    Land,
}

impl TerrainKind {
    /// Symbol used for the terrain slot of a tile key.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Water => '_',
            Self::Land => '0',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '_' => Some(Self::Water),
            '0' => Some(Self::Land),
            _ => None,
        }
    }
}

/// Hazard floating on a water tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// No hazard, encoded as `-`.
    None,
    /// Whirlpool that damages the ship, encoded as `W`.
    Whirlpool,
}

impl HazardKind {
    /// Symbol used for the hazard slot of a tile key.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::None => '-',
            Self::Whirlpool => 'W',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(Self::None),
            'W' => Some(Self::Whirlpool),
            _ => None,
        }
    }
}

/// Item floating on a water tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// No item, encoded as a backtick.
    None,
    /// Barrel of supplies that repairs the ship, encoded as `H`.
    HealthBarrel,
    /// Fragment of the world map, encoded as `M`.
    MapPiece,
    /// Favourable current, encoded as `S`.
    SpeedBoost,
}

impl ItemKind {
    /// Symbol used for the item slot of a tile key.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::None => '`',
            Self::HealthBarrel => 'H',
            Self::MapPiece => 'M',
            Self::SpeedBoost => 'S',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '`' => Some(Self::None),
            'H' => Some(Self::HealthBarrel),
            'M' => Some(Self::MapPiece),
            'S' => Some(Self::SpeedBoost),
            _ => None,
        }
    }
}

/// Reasons a tile key fails to decode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The key did not contain exactly three symbols.
    #[error("tile key `{key}` must contain exactly 3 symbols")]
    WrongLength {
        /// Raw key that failed to decode.
        key: String,
    },
    /// The terrain slot held an unknown symbol.
    #[error("tile key `{key}` has unknown terrain symbol `{symbol}`")]
    UnknownTerrain {
        /// Raw key that failed to decode.
        key: String,
        /// Offending symbol.
        symbol: char,
    },
    /// The hazard slot held an unknown symbol.
    #[error("tile key `{key}` has unknown hazard symbol `{symbol}`")]
    UnknownHazard {
        /// Raw key that failed to decode.
        key: String,
        /// Offending symbol.
        symbol: char,
    },
    /// The item slot held an unknown symbol.
    #[error("tile key `{key}` has unknown item symbol `{symbol}`")]
    UnknownItem {
        /// Raw key that failed to decode.
        key: String,
        /// Offending symbol.
        symbol: char,
    },
    /// A land tile carried a hazard or an item.
    #[error("tile key `{key}` places a hazard or item on land")]
    OccupiedLand {
        /// Raw key that failed to decode.
        key: String,
    },
}

/// Decoded contents of a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TileKey {
    terrain: TerrainKind,
    hazard: HazardKind,
    item: ItemKind,
}

impl TileKey {
    /// Empty water tile, `` _-` ``.
    pub const OPEN_WATER: Self = Self {
        terrain: TerrainKind::Water,
        hazard: HazardKind::None,
        item: ItemKind::None,
    };

    /// Land tile, `` 0-` ``.
    pub const LAND: Self = Self {
        terrain: TerrainKind::Land,
        hazard: HazardKind::None,
        item: ItemKind::None,
    };

    /// Creates a water tile carrying the provided hazard and item.
    #[must_use]
    pub const fn water(hazard: HazardKind, item: ItemKind) -> Self {
        Self {
            terrain: TerrainKind::Water,
            hazard,
            item,
        }
    }

    /// Decodes a three-symbol tile key.
    pub fn decode(key: &str) -> Result<Self, DecodeError> {
        let mut symbols = key.chars();
        let (Some(terrain), Some(hazard), Some(item), None) = (
            symbols.next(),
            symbols.next(),
            symbols.next(),
            symbols.next(),
        ) else {
            return Err(DecodeError::WrongLength {
                key: key.to_owned(),
            });
        };

        let terrain =
            TerrainKind::from_symbol(terrain).ok_or_else(|| DecodeError::UnknownTerrain {
                key: key.to_owned(),
                symbol: terrain,
            })?;
        let hazard = HazardKind::from_symbol(hazard).ok_or_else(|| DecodeError::UnknownHazard {
            key: key.to_owned(),
            symbol: hazard,
        })?;
        let item = ItemKind::from_symbol(item).ok_or_else(|| DecodeError::UnknownItem {
            key: key.to_owned(),
            symbol: item,
        })?;

        if terrain == TerrainKind::Land && (hazard != HazardKind::None || item != ItemKind::None)
        {
            return Err(DecodeError::OccupiedLand {
                key: key.to_owned(),
            });
        }

        Ok(Self {
            terrain,
            hazard,
            item,
        })
    }

    /// Terrain occupying the tile.
    #[must_use]
    pub const fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    /// Hazard floating on the tile.
    #[must_use]
    pub const fn hazard(&self) -> HazardKind {
        self.hazard
    }

    /// Item floating on the tile.
    #[must_use]
    pub const fn item(&self) -> ItemKind {
        self.item
    }

    /// Reports whether the tile is navigable water.
    #[must_use]
    pub const fn is_water(&self) -> bool {
        matches!(self.terrain, TerrainKind::Water)
    }

    /// Reports whether the tile is land.
    #[must_use]
    pub const fn is_land(&self) -> bool {
        matches!(self.terrain, TerrainKind::Land)
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.terrain.symbol(),
            self.hazard.symbol(),
            self.item.symbol()
        )
    }
}

impl FromStr for TileKey {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::decode(value)
    }
}

impl TryFrom<String> for TileKey {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<TileKey> for String {
    fn from(key: TileKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_slot() {
        let key = TileKey::decode("_WH").expect("valid key");

        assert_eq!(key.terrain(), TerrainKind::Water);
        assert_eq!(key.hazard(), HazardKind::Whirlpool);
        assert_eq!(key.item(), ItemKind::HealthBarrel);
        assert!(key.is_water());
        assert!(!key.is_land());
    }

    #[test]
    fn plain_land_decodes() {
        let key: TileKey = "0-`".parse().expect("valid land");
        assert_eq!(key, TileKey::LAND);
        assert!(key.is_land());
    }

    #[test]
    fn land_cannot_carry_hazards_or_items() {
        assert_eq!(
            TileKey::decode("0W`"),
            Err(DecodeError::OccupiedLand {
                key: "0W`".to_owned()
            })
        );
        assert!(matches!(
            TileKey::decode("0-M"),
            Err(DecodeError::OccupiedLand { .. })
        ));
    }

    #[test]
    fn unknown_symbols_are_rejected_per_slot() {
        assert!(matches!(
            TileKey::decode("#-`"),
            Err(DecodeError::UnknownTerrain { symbol: '#', .. })
        ));
        assert!(matches!(
            TileKey::decode("_X`"),
            Err(DecodeError::UnknownHazard { symbol: 'X', .. })
        ));
        assert!(matches!(
            TileKey::decode("_-?"),
            Err(DecodeError::UnknownItem { symbol: '?', .. })
        ));
    }

    #[test]
    fn keys_must_have_three_symbols() {
        for raw in ["", "_-", "_-``"] {
            assert!(matches!(
                TileKey::decode(raw),
                Err(DecodeError::WrongLength { .. })
            ));
        }
    }

    #[test]
    fn display_reencodes_decoded_key() {
        let key = TileKey::water(HazardKind::None, ItemKind::SpeedBoost);
        assert_eq!(key.to_string(), "_-S");
        assert_eq!(TileKey::OPEN_WATER.to_string(), "_-`");
    }

    #[test]
    fn serde_uses_textual_form() {
        let bytes = bincode::serialize(&TileKey::LAND).expect("serialize");
        let text: String = bincode::deserialize(&bytes).expect("string payload");
        assert_eq!(text, "0-`");

        let bad = bincode::serialize(&"0W`".to_owned()).expect("serialize");
        assert!(bincode::deserialize::<TileKey>(&bad).is_err());
    }
}
