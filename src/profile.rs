//! Player profile: the name scores are recorded under and the bird colour.

use crate::constants::{DEFAULT_BIRD_COLOR, DEFAULT_PLAYER_NAME, MAX_NAME_LEN, PROFILE_KEY, RECORD_VERSION};
use crate::error::StoreError;
use crate::store::{load_json_or_default, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    #[serde(default = "legacy_version")]
    version: u32,
    name: String,
    #[serde(default)]
    color: String,
}

fn legacy_version() -> u32 {
    0
}

impl PlayerProfile {
    /// Build a profile from raw form input.
    ///
    /// The name is trimmed and capped at 25 characters; an empty name becomes
    /// the placeholder. An empty colour becomes the default swatch. Input is
    /// never rejected.
    pub fn sanitize(name: &str, color: &str) -> Self {
        let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
        let name = if name.is_empty() {
            tracing::debug!("Empty player name, using placeholder");
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            name
        };

        let color = color.trim();
        let color = if color.is_empty() {
            DEFAULT_BIRD_COLOR.to_string()
        } else {
            color.to_string()
        };

        Self { name, color }
    }

    /// Read the saved profile. `None` if there is none, it cannot be read,
    /// or its name is blank (the player still has to fill in the form).
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let record = load_json_or_default::<Option<ProfileRecord>>(store, PROFILE_KEY)?;
        if record.name.trim().is_empty() {
            tracing::debug!("Stored profile has no name, ignoring");
            return None;
        }
        // Oversized or untrimmed names from hand-edited records go back
        // through the form rules.
        Some(Self::sanitize(&record.name, &record.color))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let record = ProfileRecord {
            version: RECORD_VERSION,
            name: self.name.clone(),
            color: self.color.clone(),
        };
        save_json(store, PROFILE_KEY, &record)
    }

    /// Parse `#rrggbb` (or `rrggbb`) into RGB, falling back to the default swatch.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color)
            .or_else(|| parse_hex_color(DEFAULT_BIRD_COLOR))
            .unwrap_or((255, 213, 79))
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
