//! Color palette and fixed label tables
//!
//! Every target and every spawned circle draws from the same palette.
//! Labels are static lookups per language, never computed.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

/// The full palette, in display order
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

impl Color {
    /// Packed 0xRRGGBB value for renderers
    pub fn rgb(&self) -> u32 {
        match self {
            Color::Red => 0xFF0000,
            Color::Green => 0x00FF00,
            Color::Blue => 0x0000FF,
            Color::Yellow => 0xFFFF00,
            Color::Magenta => 0xFF00FF,
            Color::Cyan => 0x00FFFF,
        }
    }

    /// Display label in the given language
    pub fn label(&self, language: Language) -> &'static str {
        let table = match language {
            Language::English => &ENGLISH_LABELS,
            Language::Russian => &RUSSIAN_LABELS,
        };
        table[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
            Color::Magenta => 4,
            Color::Cyan => 5,
        }
    }
}

/// Draw a color uniformly from a palette.
///
/// Callers guarantee the palette is non-empty (checked when rules are validated).
pub fn random_color<R: Rng>(palette: &[Color], rng: &mut R) -> Color {
    palette[rng.random_range(0..palette.len())]
}

/// Label language (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "russian" | "ru" => Some(Language::Russian),
            _ => None,
        }
    }

    /// Prompt shown while a round is in progress
    pub fn prompt(&self, target: Color) -> String {
        match self {
            Language::English => format!("Tap {}", target.label(*self)),
            Language::Russian => format!("Нажми на {}", target.label(*self)),
        }
    }

    /// Score label
    pub fn score_label(&self, score: u32) -> String {
        match self {
            Language::English => format!("Score: {}", score),
            Language::Russian => format!("Очки: {}", score),
        }
    }

    /// Prompt replacement once the round has ended
    pub fn game_over(&self, score: u32) -> String {
        match self {
            Language::English => format!("Game over! Score: {}", score),
            Language::Russian => format!("Игра окончена! Очки: {}", score),
        }
    }
}

const ENGLISH_LABELS: [&str; 6] = ["RED", "GREEN", "BLUE", "YELLOW", "MAGENTA", "CYAN"];

const RUSSIAN_LABELS: [&str; 6] = [
    "КРАСНЫЙ",
    "ЗЕЛЁНЫЙ",
    "СИНИЙ",
    "ЖЁЛТЫЙ",
    "МАГЕНТА",
    "ЦИАН",
];
