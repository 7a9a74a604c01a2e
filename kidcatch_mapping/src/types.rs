// Core mapping types: lexicon entries, catcher sizes, color effects, and the
// per-input `Interpretation` record.
//
// These types are shared by every other crate in the workspace: the guide
// crate embeds them in prompts, the store persists the configuration they
// derive, and the scene crate reads glyphs and sizes from them. They were
// kept in one file so there is a single source of truth for the JSON shape
// of `data/catch_lexicon.json`.
//
// The type hierarchy is:
// - `EntryKind`: which table family an input is resolved against (object or catcher)
// - `CatcherSize`: small / medium / large, drives the catch radius
// - `ObjectEntry`: glyph + fall behavior + special effect + emotional value
// - `CatcherEntry`: glyph + size + special ability + emotional value
// - `LexiconEntry`: either of the above, for kind-agnostic callers
// - `ColorEffect`: visual effect, mood, gameplay impact, score factor
// - `MatchTier`: which resolution tier produced an entry
// - `Interpretation`: original input + tier + matched key + entry
//
// All field names serialize as camelCase so the same structs can be written
// straight into API responses consumed by the web client.

use serde::{Deserialize, Serialize};

/// Which lexicon family an input is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A falling object ("what do we catch?").
    Object,
    /// A catching tool ("what do we catch it with?").
    Catcher,
}

/// Physical size class of a catcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatcherSize {
    Small,
    Medium,
    Large,
}

/// How a falling object looks and behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    /// Display glyph (an emoji).
    pub visual: String,
    /// How the object falls.
    pub behavior: String,
    /// What happens when it is caught.
    pub special_effect: String,
    /// The feeling the object is meant to carry.
    pub emotional_value: String,
}

/// How a catching tool looks and what it can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatcherEntry {
    pub visual: String,
    pub size: CatcherSize,
    pub special_ability: String,
    pub emotional_value: String,
}

/// A resolved entry of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LexiconEntry {
    Object(ObjectEntry),
    Catcher(CatcherEntry),
}

impl LexiconEntry {
    /// The display glyph, regardless of kind. Never empty for entries
    /// produced by the interpreter.
    pub fn visual(&self) -> &str {
        match self {
            LexiconEntry::Object(e) => &e.visual,
            LexiconEntry::Catcher(e) => &e.visual,
        }
    }

    pub fn emotional_value(&self) -> &str {
        match self {
            LexiconEntry::Object(e) => &e.emotional_value,
            LexiconEntry::Catcher(e) => &e.emotional_value,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            LexiconEntry::Object(_) => EntryKind::Object,
            LexiconEntry::Catcher(_) => EntryKind::Catcher,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectEntry> {
        match self {
            LexiconEntry::Object(e) => Some(e),
            LexiconEntry::Catcher(_) => None,
        }
    }

    pub fn as_catcher(&self) -> Option<&CatcherEntry> {
        match self {
            LexiconEntry::Catcher(e) => Some(e),
            LexiconEntry::Object(_) => None,
        }
    }
}

/// Visual and gameplay effect of a named color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEffect {
    /// What the color does to the falling objects.
    pub effect: String,
    pub mood: String,
    pub game_impact: String,
    /// Multiplier applied to the base per-catch score before the difficulty
    /// multiplier. 1 for purely cosmetic colors.
    #[serde(default = "default_score_factor")]
    pub score_factor: u32,
}

fn default_score_factor() -> u32 {
    1
}

/// Which resolution tier produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// A hand-authored entry whose key occurs in the input.
    Predefined,
    /// A glyph-only keyword occurs in the input; text comes from a category template.
    Keyword,
    /// Nothing matched; the entry was synthesized around the raw input.
    Generic,
}

/// The resolved result for one free-text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// The input exactly as given (not normalized).
    pub input: String,
    pub tier: MatchTier,
    /// The table key or keyword that matched, if any.
    pub matched_key: Option<String>,
    pub entry: LexiconEntry,
}
