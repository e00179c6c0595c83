//! Translation lookup
//!
//! French and English tables are embedded. Lookups fall back to English, then
//! to the key itself. `{name}` placeholders are filled from the parameters.

use serde::{Deserialize, Serialize};

use crate::sim::{Notice, SpawnPolicy, VehicleKind};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Fr,
    #[default]
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Parse a language tag such as `fr-FR`; unsupported languages are `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let code = tag.split('-').next().unwrap_or_default().to_lowercase();
        match code.as_str() {
            "fr" => Some(Lang::Fr),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Display name for the language picker
    pub fn name(self) -> &'static str {
        match self {
            Lang::Fr => "Français",
            Lang::En => "English",
        }
    }

    pub fn all() -> [Lang; 2] {
        [Lang::Fr, Lang::En]
    }
}

const FR: &[(&str, &str)] = &[
    ("title", "Course de Voitures"),
    ("startGame", "Commencer la partie"),
    ("level", "Niveau"),
    ("score", "Score"),
    ("lives", "Vies"),
    ("pause", "PAUSE"),
    ("gameOver", "Partie Terminée !"),
    ("finalScore", "Score Final"),
    ("enterName", "Entrez votre nom"),
    ("nameRequired", "Veuillez entrer votre nom !"),
    ("saveScore", "Sauvegarder"),
    ("backToMenu", "Rejouer"),
    ("bestScores", "Meilleurs Scores"),
    ("noScores", "Aucun score"),
    ("resetScores", "Réinitialiser les scores"),
    ("levelUp", "NIVEAU {level} !"),
    ("bonusPoints", "+{points} points"),
    ("bonusPoint", "+{points} point"),
    ("bonusLives", "+{lives} vies"),
    ("bonusLife", "+{lives} vie"),
    ("preparingGame", "Préparez-vous..."),
    ("resumeGame", "Appuyez sur P pour reprendre"),
    ("chooseLevel", "Choisis ton niveau de départ :"),
    ("loading", "Chargement..."),
    ("progress", "Progression"),
    ("difficulty.easy", "1 (Facile)"),
    ("difficulty.normal", "6 (Normal)"),
    ("difficulty.hard", "12 (Difficile)"),
    ("difficulty.expert", "18 (Expert)"),
    ("difficulty.hell", "25 (Enfer)"),
    ("controls.arrows", "Flèches pour se déplacer"),
    ("controls.pause", "P pour mettre en pause"),
    ("controls.restart", "R pour rejouer"),
    ("controls.debug", "D pour le mode debug"),
    ("controls.enter", "Entrée pour commencer"),
    ("controls.escape", "Échap (x2) pour quitter"),
    ("debug.title", "MODE DEBUG"),
    ("debug.cars", "Que des voitures"),
    ("debug.trucks", "Que des camions"),
    ("debug.motos", "Que des motos"),
    ("debug.boss", "Boss permanent (Niveau {level})"),
    ("debug.levelHint", "+/- pour changer niveau"),
    ("resetConfirm", "Êtes-vous sûr de vouloir supprimer TOUS les scores sauvegardés ?\n\nCette action est irréversible !"),
    ("scoresReset", "Tous les scores ont été supprimés !"),
];

const EN: &[(&str, &str)] = &[
    ("title", "Car Race"),
    ("startGame", "Start Game"),
    ("level", "Level"),
    ("score", "Score"),
    ("lives", "Lives"),
    ("pause", "PAUSE"),
    ("gameOver", "Game Over!"),
    ("finalScore", "Final Score"),
    ("enterName", "Enter your name"),
    ("nameRequired", "Please enter your name!"),
    ("saveScore", "Save Score"),
    ("backToMenu", "Play Again"),
    ("bestScores", "Best Scores"),
    ("noScores", "No scores"),
    ("resetScores", "Reset Scores"),
    ("levelUp", "LEVEL {level} !"),
    ("bonusPoints", "+{points} points"),
    ("bonusPoint", "+{points} point"),
    ("bonusLives", "+{lives} lives"),
    ("bonusLife", "+{lives} life"),
    ("preparingGame", "Get ready..."),
    ("resumeGame", "Press P to resume"),
    ("chooseLevel", "Choose your starting level:"),
    ("loading", "Loading..."),
    ("progress", "Progress"),
    ("difficulty.easy", "1 (Easy)"),
    ("difficulty.normal", "6 (Normal)"),
    ("difficulty.hard", "12 (Hard)"),
    ("difficulty.expert", "18 (Expert)"),
    ("difficulty.hell", "25 (Hell)"),
    ("controls.arrows", "Arrow keys to move"),
    ("controls.pause", "P to pause"),
    ("controls.restart", "R to restart"),
    ("controls.debug", "D for debug mode"),
    ("controls.enter", "Enter to start"),
    ("controls.escape", "Escape (x2) to quit"),
    ("debug.title", "DEBUG MODE"),
    ("debug.cars", "Cars only"),
    ("debug.trucks", "Trucks only"),
    ("debug.motos", "Motorcycles only"),
    ("debug.boss", "Permanent boss (Level {level})"),
    ("debug.levelHint", "+/- to change level"),
    ("resetConfirm", "Are you sure you want to delete ALL saved scores?\n\nThis cannot be undone!"),
    ("scoresReset", "All scores have been deleted!"),
];

fn table(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::Fr => FR,
        Lang::En => EN,
    }
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    table(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Fill `{name}` placeholders; unknown placeholders are left untouched
fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Translate `key`, falling back to English and then to the key itself
pub fn translate(lang: Lang, key: &str, params: &[(&str, String)]) -> String {
    let template = lookup(lang, key).or_else(|| lookup(Lang::En, key));
    match template {
        Some(template) => interpolate(template, params),
        None => {
            log::warn!("Translation not found for key: {key}");
            key.to_string()
        }
    }
}

/// Localized text for a simulation notice
pub fn notice_text(notice: Notice, lang: Lang) -> String {
    match notice {
        Notice::BonusPoints(points) => {
            let key = if points == 1 { "bonusPoint" } else { "bonusPoints" };
            translate(lang, key, &[("points", points.to_string())])
        }
        Notice::BonusLives(lives) => {
            let key = if lives == 1 { "bonusLife" } else { "bonusLives" };
            translate(lang, key, &[("lives", lives.to_string())])
        }
    }
}

/// Display colour for a simulation notice
pub fn notice_color(notice: Notice) -> &'static str {
    match notice {
        Notice::BonusPoints(_) => "#f1c40f",
        Notice::BonusLives(_) => "#22c55e",
    }
}

/// Lines of the debug indicator for an active override; `None` when off
pub fn debug_mode_lines(policy: SpawnPolicy, level: u32, lang: Lang) -> Option<Vec<String>> {
    let mut lines = vec![translate(lang, "debug.title", &[])];
    match policy {
        SpawnPolicy::Normal => return None,
        SpawnPolicy::ForceType(kind) => {
            let key = match kind {
                VehicleKind::Car => "debug.cars",
                VehicleKind::Truck => "debug.trucks",
                VehicleKind::Moto => "debug.motos",
            };
            lines.push(translate(lang, key, &[]));
        }
        SpawnPolicy::PermanentBoss => {
            lines.push(translate(lang, "debug.boss", &[("level", level.to_string())]));
            lines.push(translate(lang, "debug.levelHint", &[]));
        }
    }
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_with_params() {
        assert_eq!(
            translate(Lang::Fr, "levelUp", &[("level", "7".to_string())]),
            "NIVEAU 7 !"
        );
        assert_eq!(
            translate(Lang::En, "levelUp", &[("level", "7".to_string())]),
            "LEVEL 7 !"
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(translate(Lang::Fr, "nope.missing", &[]), "nope.missing");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(
            translate(Lang::En, "bonusPoints", &[("lives", "2".to_string())]),
            "+{points} points"
        );
        assert_eq!(interpolate("a {b", &[]), "a {b");
    }

    #[test]
    fn test_tables_have_same_keys() {
        for (key, _) in FR {
            assert!(lookup(Lang::En, key).is_some(), "missing en: {key}");
        }
        assert_eq!(FR.len(), EN.len());
    }

    #[test]
    fn test_notice_text_singular_plural() {
        assert_eq!(notice_text(Notice::BonusPoints(5), Lang::En), "+5 points");
        assert_eq!(notice_text(Notice::BonusPoints(1), Lang::En), "+1 point");
        assert_eq!(notice_text(Notice::BonusLives(1), Lang::Fr), "+1 vie");
        assert_eq!(notice_text(Notice::BonusLives(5), Lang::Fr), "+5 vies");
    }

    #[test]
    fn test_debug_mode_lines() {
        assert_eq!(debug_mode_lines(SpawnPolicy::Normal, 3, Lang::En), None);
        assert_eq!(
            debug_mode_lines(SpawnPolicy::ForceType(VehicleKind::Truck), 3, Lang::Fr),
            Some(vec!["MODE DEBUG".to_string(), "Que des camions".to_string()])
        );
        let boss = debug_mode_lines(SpawnPolicy::PermanentBoss, 17, Lang::En).unwrap();
        assert_eq!(boss.len(), 3);
        assert_eq!(boss[1], "Permanent boss (Level 17)");
        assert_eq!(boss[2], "+/- to change level");
    }

    #[test]
    fn test_lang_codes_parse_back() {
        for lang in Lang::all() {
            assert_eq!(Lang::from_tag(lang.code()), Some(lang));
            assert!(!lang.name().is_empty());
        }
    }

    #[test]
    fn test_lang_from_tag() {
        assert_eq!(Lang::from_tag("fr-FR"), Some(Lang::Fr));
        assert_eq!(Lang::from_tag("EN"), Some(Lang::En));
        assert_eq!(Lang::from_tag("de-DE"), None);
    }
}
