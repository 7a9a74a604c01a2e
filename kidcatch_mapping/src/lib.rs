// Creative-input mapping crate for the catch-game co-creation flow.
//
// Turns a child's free-text answers ("恐龍", "用籃子接", "金色的") into the
// glyphs, behavior text, and numeric tuning that drive a small "catch the
// falling objects" minigame. Everything here is pure and synchronous: the
// tables are loaded once, every lookup is a read, and no function in the
// resolve/describe/derive path can fail.
//
// Architecture:
// - `types.rs`:      Entry types: `ObjectEntry`, `CatcherEntry`, `ColorEffect`, `Interpretation`
// - `interpret.rs`:  Three-tier resolver chain (predefined → keyword → generic)
// - `describe.rs`:   Effect-description paragraph for an object/catcher/color triple
// - `params.rs`:     Difficulty tuning, catch radius, per-catch score
// - `model.rs`:      `StepId`, `CreationStep`, `GameConfiguration`
// - `configure.rs`:  Child-input reading, configuration assembly, `ResolvedGame`
// - `suggest.rs`:    Related-choice suggestions for the guided flow
// - `lib.rs` (this file): `Lexicon` struct: loads and queries the JSON tables
//
// The lexicon is loaded from `data/catch_lexicon.json` via
// `Lexicon::from_json()`. Every table is a JSON array rather than an object
// so that declaration order survives parsing: the interpreter's first-match
// rule depends on it. `default_lexicon()` embeds the file with `include_str!`
// and parses it once per process.

pub mod configure;
pub mod describe;
pub mod interpret;
pub mod model;
pub mod params;
pub mod suggest;
pub mod types;

use std::sync::LazyLock;

use serde::Deserialize;

pub use configure::{
    AssembledConfiguration, ChildInputReading, ConfigError, DifficultySource, ResolvedGame,
    build_configuration, interpret_child_input, resolve_game,
};
pub use describe::describe;
pub use model::{CreationStep, GameConfiguration, StepId};
pub use params::{
    Difficulty, DifficultyTuning, GameParams, PlayField, SpeedHint, catch_radius, derive_params,
    speed_hint,
};
pub use suggest::suggest_related_choices;
pub use types::{
    CatcherEntry, CatcherSize, ColorEffect, EntryKind, Interpretation, LexiconEntry, MatchTier,
    ObjectEntry,
};

/// A predefined object entry with its lookup key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyedObject {
    pub key: String,
    #[serde(flatten)]
    pub entry: ObjectEntry,
}

/// A predefined catcher entry with its lookup key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyedCatcher {
    pub key: String,
    #[serde(flatten)]
    pub entry: CatcherEntry,
}

/// A named color effect.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyedColor {
    pub key: String,
    #[serde(flatten)]
    pub effect: ColorEffect,
}

/// A glyph-only keyword (no behavior text of its own).
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordGlyph {
    pub keyword: String,
    pub visual: String,
}

/// Text template for a synthesized object. `{keyword}` and `{input}`
/// placeholders are substituted at resolve time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectTemplate {
    pub behavior: String,
    pub special_effect: String,
    pub emotional_value: String,
}

/// A keyword category ("animal", "food", "vehicle") with its canned text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub template: ObjectTemplate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatcherTemplate {
    pub size: CatcherSize,
    pub special_ability: String,
    pub emotional_value: String,
}

/// The top-level JSON structure for the lexicon file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexiconFile {
    objects: Vec<KeyedObject>,
    object_keywords: Vec<KeywordGlyph>,
    object_categories: Vec<KeywordCategory>,
    object_keyword_default: ObjectTemplate,
    object_generic: ObjectEntry,
    catchers: Vec<KeyedCatcher>,
    catcher_keywords: Vec<KeywordGlyph>,
    catcher_keyword_template: CatcherTemplate,
    catcher_generic: CatcherEntry,
    colors: Vec<KeyedColor>,
}

/// The loaded mapping tables.
///
/// Immutable after construction, so a single instance can be shared by any
/// number of threads without locking.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub(crate) objects: Vec<KeyedObject>,
    pub(crate) object_keywords: Vec<KeywordGlyph>,
    pub(crate) object_categories: Vec<KeywordCategory>,
    pub(crate) object_keyword_default: ObjectTemplate,
    pub(crate) object_generic: ObjectEntry,
    pub(crate) catchers: Vec<KeyedCatcher>,
    pub(crate) catcher_keywords: Vec<KeywordGlyph>,
    pub(crate) catcher_keyword_template: CatcherTemplate,
    pub(crate) catcher_generic: CatcherEntry,
    pub(crate) colors: Vec<KeyedColor>,
}

impl Lexicon {
    /// Parse a lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Ok(Lexicon {
            objects: file.objects,
            object_keywords: file.object_keywords,
            object_categories: file.object_categories,
            object_keyword_default: file.object_keyword_default,
            object_generic: file.object_generic,
            catchers: file.catchers,
            catcher_keywords: file.catcher_keywords,
            catcher_keyword_template: file.catcher_keyword_template,
            catcher_generic: file.catcher_generic,
            colors: file.colors,
        })
    }

    /// Predefined objects, in file order.
    pub fn objects(&self) -> &[KeyedObject] {
        &self.objects
    }

    /// Predefined catchers, in file order.
    pub fn catchers(&self) -> &[KeyedCatcher] {
        &self.catchers
    }

    pub fn colors(&self) -> &[KeyedColor] {
        &self.colors
    }

    pub fn object_keywords(&self) -> &[KeywordGlyph] {
        &self.object_keywords
    }

    pub fn catcher_keywords(&self) -> &[KeywordGlyph] {
        &self.catcher_keywords
    }

    /// Exact-key color lookup. Unlike object and catcher resolution there is
    /// no containment matching: "金色的" is not "金色".
    pub fn color_effect(&self, color: &str) -> Option<&ColorEffect> {
        self.colors
            .iter()
            .find(|c| c.key == color)
            .map(|c| &c.effect)
    }

    /// First predefined catcher key that occurs in `input` verbatim.
    pub fn find_catcher_key(&self, input: &str) -> Option<&str> {
        self.catchers
            .iter()
            .find(|c| input.contains(c.key.as_str()))
            .map(|c| c.key.as_str())
    }

    /// First color key that occurs in `input` verbatim.
    pub fn find_color_key(&self, input: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|c| input.contains(c.key.as_str()))
            .map(|c| c.key.as_str())
    }
}

static DEFAULT_LEXICON: LazyLock<Lexicon> = LazyLock::new(|| {
    let json = include_str!("../../data/catch_lexicon.json");
    Lexicon::from_json(json).expect("embedded catch_lexicon.json is malformed")
});

/// The process-wide lexicon embedded at compile time.
///
/// Parsed on first use. Panics if the embedded JSON is malformed (should
/// never happen in a released build; `test_default_lexicon_loads` guards it).
pub fn default_lexicon() -> &'static Lexicon {
    &DEFAULT_LEXICON
}
