//! Skin catalog
//!
//! Skins are purely visual player tints bought with coins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::PersistenceError;

/// Id of the free skin every player starts with
pub const DEFAULT_SKIN: &str = "green";

/// A purchasable skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    /// Player body/head color, 0xRRGGBB
    pub tint: u32,
    /// Price in coins
    pub cost: u64,
}

/// Why a purchase was refused. State is unchanged in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough coins: need {cost}, have {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("unknown skin '{0}'")]
    UnknownCosmetic(String),
}

/// Result of a successful purchase
#[derive(Debug)]
pub struct Applied {
    pub cosmetic_id: String,
    /// New player tint for the renderer
    pub tint: u32,
    /// Coin balance after the deduction
    pub balance: u64,
    /// Writes that did not reach storage (purchase still applies)
    pub persistence_failures: Vec<PersistenceError>,
}

/// Mapping from skin id to tint and cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmeticCatalog {
    skins: BTreeMap<String, Cosmetic>,
    default_id: String,
}

impl Default for CosmeticCatalog {
    fn default() -> Self {
        let skins = [
            (DEFAULT_SKIN, Cosmetic { tint: 0x00ff00, cost: 0 }),
            ("red", Cosmetic { tint: 0xff0000, cost: 10 }),
            ("blue", Cosmetic { tint: 0x0000ff, cost: 10 }),
        ];
        Self {
            skins: skins
                .into_iter()
                .map(|(id, skin)| (id.to_string(), skin))
                .collect(),
            default_id: DEFAULT_SKIN.to_string(),
        }
    }
}

impl CosmeticCatalog {
    /// Build a catalog; the default skin must be listed and free.
    pub fn new(
        skins: impl IntoIterator<Item = (String, Cosmetic)>,
        default_id: impl Into<String>,
    ) -> Option<Self> {
        let skins: BTreeMap<_, _> = skins.into_iter().collect();
        let default_id = default_id.into();
        match skins.get(&default_id) {
            Some(skin) if skin.cost == 0 => Some(Self { skins, default_id }),
            _ => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Cosmetic> {
        self.skins.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skins.contains_key(id)
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Skins sorted by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cosmetic)> {
        self.skins.iter().map(|(id, skin)| (id.as_str(), skin))
    }

    /// Check a purchase against a balance without applying it.
    /// Returns the skin and the balance left after paying for it.
    pub fn quote(&self, id: &str, balance: u64) -> Result<(Cosmetic, u64), PurchaseError> {
        let skin = *self
            .get(id)
            .ok_or_else(|| PurchaseError::UnknownCosmetic(id.to_string()))?;
        let remaining = balance
            .checked_sub(skin.cost)
            .ok_or(PurchaseError::InsufficientFunds {
                cost: skin.cost,
                balance,
            })?;
        Ok((skin, remaining))
    }
}
