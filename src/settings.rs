//! Game settings and preferences
//!
//! Persisted separately from the high scores.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::highscores::ScoreError;
use crate::i18n::Lang;
use crate::platform::Storage;
use crate::sim::{SpawnPolicy, VehicleKind};

/// Starting-level presets offered on the start screen
pub const LEVEL_PRESETS: [(u32, &str); 5] = [
    (1, "difficulty.easy"),
    (6, "difficulty.normal"),
    (12, "difficulty.hard"),
    (18, "difficulty.expert"),
    (25, "difficulty.hell"),
];

/// Debug menu entries, in menu order
pub const DEBUG_MENU: [SpawnPolicy; 5] = [
    SpawnPolicy::Normal,
    SpawnPolicy::ForceType(VehicleKind::Car),
    SpawnPolicy::ForceType(VehicleKind::Truck),
    SpawnPolicy::ForceType(VehicleKind::Moto),
    SpawnPolicy::PermanentBoss,
];

/// Parse a 1-based debug menu answer; anything else cancels
pub fn debug_menu_choice(answer: &str) -> Option<SpawnPolicy> {
    let index: usize = answer.trim().parse().ok()?;
    DEBUG_MENU.get(index.checked_sub(1)?).copied()
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level a new game starts at (1..=MAX_LEVEL)
    pub starting_level: u32,
    pub lang: Lang,
    /// Debug spawner override; not persisted
    #[serde(skip)]
    pub policy: SpawnPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            lang: Lang::default(),
            policy: SpawnPolicy::Normal,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "road_rush_settings";

    /// Settings for a browser reporting `tag` as its language
    pub fn for_browser_language(tag: &str) -> Self {
        Self {
            lang: Lang::from_tag(tag).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set_starting_level(&mut self, level: u32) {
        self.starting_level = level.clamp(1, MAX_LEVEL);
    }

    /// Load from storage, falling back to `defaults`
    pub fn load(storage: &impl Storage, defaults: Self) -> Self {
        let Some(json) = storage.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return defaults;
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(mut settings) => {
                settings.set_starting_level(settings.starting_level);
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Discarding unreadable settings: {e}");
                defaults
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), ScoreError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_round_trip_skips_policy() {
        let mut storage = MemoryStorage::new();
        let mut settings = Settings::default();
        settings.set_starting_level(12);
        settings.lang = Lang::Fr;
        settings.policy = SpawnPolicy::ForceType(VehicleKind::Truck);
        settings.save(&mut storage).unwrap();

        let loaded = Settings::load(&storage, Settings::default());
        assert_eq!(loaded.starting_level, 12);
        assert_eq!(loaded.lang, Lang::Fr);
        assert_eq!(loaded.policy, SpawnPolicy::Normal);
    }

    #[test]
    fn test_level_clamped() {
        let mut settings = Settings::default();
        settings.set_starting_level(0);
        assert_eq!(settings.starting_level, 1);
        settings.set_starting_level(99);
        assert_eq!(settings.starting_level, MAX_LEVEL);

        let mut storage = MemoryStorage::new();
        storage
            .set("road_rush_settings", r#"{"starting_level":40,"lang":"fr"}"#)
            .unwrap();
        assert_eq!(
            Settings::load(&storage, Settings::default()).starting_level,
            MAX_LEVEL
        );
    }

    #[test]
    fn test_debug_menu_choice() {
        assert_eq!(debug_menu_choice("1"), Some(SpawnPolicy::Normal));
        assert_eq!(
            debug_menu_choice(" 3 "),
            Some(SpawnPolicy::ForceType(VehicleKind::Truck))
        );
        assert_eq!(debug_menu_choice("5"), Some(SpawnPolicy::PermanentBoss));
        assert_eq!(debug_menu_choice("0"), None);
        assert_eq!(debug_menu_choice("6"), None);
        assert_eq!(debug_menu_choice(""), None);
    }

    #[test]
    fn test_browser_language_default() {
        assert_eq!(Settings::for_browser_language("fr-CA").lang, Lang::Fr);
        assert_eq!(Settings::for_browser_language("ja").lang, Lang::En);
        let storage = MemoryStorage::new();
        let defaults = Settings::for_browser_language("fr");
        assert_eq!(Settings::load(&storage, defaults.clone()), defaults);
    }
}
