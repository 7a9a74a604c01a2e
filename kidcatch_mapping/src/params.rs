// Numeric tuning for a playable round.
//
// Two independent difficulty signals exist and are kept apart:
// - `Difficulty`: an explicit label ("easy" | "medium" | "hard"). Absent or
//   unrecognized labels silently become `Medium`; this never errors.
// - `SpeedHint`: a best-effort reading of a child's free-text answer
//   ("快" → fast, "慢" → slow). Lower precision, decided upstream of
//   parameter derivation. `configure.rs` decides which signal wins.
//
// Difficulty table:
//
//   difficulty | spawn interval | round length | score multiplier
//   easy       | 1500 ms        | 45 s         | ×0.8
//   medium     | 1000 ms        | 60 s         | ×1.0
//   hard       |  700 ms        | 75 s         | ×1.5
//
// Catch radius is a pure function of catcher size (40 / 60 / 80 px) on the
// 400×600 logical play field; `PlayField::scale` converts it for other field
// widths. A color's `score_factor` (2 for gold) multiplies the base score
// before the difficulty multiplier; the product is rounded to the nearest
// integer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{CatcherEntry, CatcherSize, ColorEffect};

/// Base points awarded per catch before color and difficulty multipliers.
pub const BASE_POINTS_PER_CATCH: u32 = 10;

/// Explicit difficulty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a label. Case and surrounding whitespace are ignored; anything
    /// unrecognized (including `None`) is `Medium`.
    pub fn from_label(label: Option<&str>) -> Self {
        Self::parse(label.unwrap_or_default()).unwrap_or_default()
    }

    /// Strict parse: `None` for unrecognized labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn tuning(self) -> DifficultyTuning {
        match self {
            Difficulty::Easy => DifficultyTuning {
                spawn_interval_ms: 1500,
                round_secs: 45,
                score_multiplier: 0.8,
            },
            Difficulty::Medium => DifficultyTuning {
                spawn_interval_ms: 1000,
                round_secs: 60,
                score_multiplier: 1.0,
            },
            Difficulty::Hard => DifficultyTuning {
                spawn_interval_ms: 700,
                round_secs: 75,
                score_multiplier: 1.5,
            },
        }
    }
}

// Lenient on the way in: stored or user-supplied configs with a missing or
// odd label still load, as `Medium`.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(Difficulty::from_label(label.as_deref()))
    }
}

/// Per-difficulty timing and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyTuning {
    pub spawn_interval_ms: u64,
    pub round_secs: u32,
    pub score_multiplier: f64,
}

/// Free-text speed reading of a child's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedHint {
    Fast,
    Slow,
}

impl SpeedHint {
    /// fast → hard, slow → easy.
    pub fn difficulty(self) -> Difficulty {
        match self {
            SpeedHint::Fast => Difficulty::Hard,
            SpeedHint::Slow => Difficulty::Easy,
        }
    }
}

/// Substring heuristic: "快" (and compounds like "很快") reads as fast, else
/// "慢" (and "慢慢") as slow. Fast is checked first, so "快一點不要慢" is fast.
pub fn speed_hint(answer: &str) -> Option<SpeedHint> {
    if answer.contains('快') {
        Some(SpeedHint::Fast)
    } else if answer.contains('慢') {
        Some(SpeedHint::Slow)
    } else {
        None
    }
}

/// Logical play-field dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    /// The field all lexicon-derived distances are expressed in.
    pub const LOGICAL: PlayField = PlayField {
        width: 400.0,
        height: 600.0,
    };

    /// Convert a distance on the logical field to this field, scaling by
    /// width.
    pub fn scale(&self, logical_distance: f32) -> f32 {
        logical_distance * self.width / Self::LOGICAL.width
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::LOGICAL
    }
}

/// Catch radius on the logical field.
pub fn catch_radius(size: CatcherSize) -> f32 {
    match size {
        CatcherSize::Small => 40.0,
        CatcherSize::Medium => 60.0,
        CatcherSize::Large => 80.0,
    }
}

/// Points for one catch: `round(base × color_factor × multiplier)`.
pub fn points_per_catch(base: u32, color_factor: u32, multiplier: f64) -> u32 {
    let raw = f64::from(base.saturating_mul(color_factor)) * multiplier;
    // Non-negative and far below u32::MAX for every table value.
    raw.round().max(0.0) as u32
}

/// Everything the scene needs to run a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameParams {
    pub difficulty: Difficulty,
    pub spawn_interval_ms: u64,
    pub round_secs: u32,
    pub score_multiplier: f64,
    /// On the logical 400×600 field.
    pub catch_radius: f32,
    pub points_per_catch: u32,
}

/// Derive round parameters from a difficulty label, the resolved catcher, and
/// the (exact-key) color effect, if any.
pub fn derive_params(
    difficulty: Option<&str>,
    catcher: &CatcherEntry,
    color: Option<&ColorEffect>,
) -> GameParams {
    params_for(Difficulty::from_label(difficulty), catcher, color)
}

/// `derive_params` for an already-parsed difficulty.
pub fn params_for(
    difficulty: Difficulty,
    catcher: &CatcherEntry,
    color: Option<&ColorEffect>,
) -> GameParams {
    let tuning = difficulty.tuning();
    let color_factor = color.map_or(1, |c| c.score_factor);
    GameParams {
        difficulty,
        spawn_interval_ms: tuning.spawn_interval_ms,
        round_secs: tuning.round_secs,
        score_multiplier: tuning.score_multiplier,
        catch_radius: catch_radius(catcher.size),
        points_per_catch: points_per_catch(
            BASE_POINTS_PER_CATCH,
            color_factor,
            tuning.score_multiplier,
        ),
    }
}
