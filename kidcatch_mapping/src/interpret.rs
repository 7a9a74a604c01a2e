// Free-text → lexicon entry resolution.
//
// Every input resolves to *some* entry. Resolution is an ordered chain of
// tiers, first match wins:
//
//   1. Predefined: the normalized input contains a predefined table key
//      (scanned in file order). The hand-authored entry is returned as-is.
//   2. Keyword: the input contains a glyph-only keyword (file order). The
//      glyph comes from the keyword table; the text comes from the first
//      category list containing that keyword (animal, food, vehicle, in file
//      order), or from the neutral default template.
//   3. Generic: a placeholder glyph plus text that quotes the raw input.
//      This tier always succeeds, which makes the chain total.
//
// Catchers run the same chain against their own tables; their keyword tier
// has a single template (no categories) and their generic glyph is a pair of
// hands.
//
// Matching is substring containment, not equality. When one key is a
// substring of another the earlier-declared key wins, e.g. "熊貓" hits the
// keyword "熊" (🐻) before reaching "熊貓" (🐼). Downstream text depends on
// which entry wins, so this is preserved exactly.
//
// Normalization is `trim` + `to_lowercase`. Lowercasing is a no-op for the
// CJK keys; it only matters for mixed-script input. The generic tier echoes
// the input *before* normalization.
//
// See also: `describe.rs` (consumes resolved entries), `configure.rs`
// (applies the resolver to each creation-step answer).

use crate::types::{
    CatcherEntry, EntryKind, Interpretation, LexiconEntry, MatchTier, ObjectEntry,
};
use crate::{Lexicon, ObjectTemplate, default_lexicon};

/// One input prepared for matching.
struct Query<'a> {
    raw: &'a str,
    normalized: String,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: raw.trim().to_lowercase(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        !key.is_empty() && self.normalized.contains(&key.to_lowercase())
    }
}

/// An entry plus how it was found.
struct Resolved<E> {
    tier: MatchTier,
    matched_key: Option<String>,
    entry: E,
}

/// A tier that may decline the input.
type Tier<E> = fn(&Lexicon, &Query<'_>) -> Option<Resolved<E>>;

/// The tier that never declines.
type Terminal<E> = fn(&Lexicon, &Query<'_>) -> Resolved<E>;

const OBJECT_TIERS: [Tier<ObjectEntry>; 2] = [predefined_object, keyword_object];
const CATCHER_TIERS: [Tier<CatcherEntry>; 2] = [predefined_catcher, keyword_catcher];

fn run_chain<E>(
    lexicon: &Lexicon,
    query: &Query<'_>,
    tiers: &[Tier<E>],
    terminal: Terminal<E>,
) -> Resolved<E> {
    tiers
        .iter()
        .find_map(|tier| tier(lexicon, query))
        .unwrap_or_else(|| terminal(lexicon, query))
}

fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, value)
}

fn predefined_object(lexicon: &Lexicon, query: &Query<'_>) -> Option<Resolved<ObjectEntry>> {
    lexicon
        .objects
        .iter()
        .find(|o| query.contains(&o.key))
        .map(|o| Resolved {
            tier: MatchTier::Predefined,
            matched_key: Some(o.key.clone()),
            entry: o.entry.clone(),
        })
}

fn keyword_object(lexicon: &Lexicon, query: &Query<'_>) -> Option<Resolved<ObjectEntry>> {
    let hit = lexicon
        .object_keywords
        .iter()
        .find(|k| query.contains(&k.keyword))?;

    let template: &ObjectTemplate = lexicon
        .object_categories
        .iter()
        .find(|c| c.keywords.iter().any(|k| *k == hit.keyword))
        .map(|c| &c.template)
        .unwrap_or(&lexicon.object_keyword_default);

    Some(Resolved {
        tier: MatchTier::Keyword,
        matched_key: Some(hit.keyword.clone()),
        entry: ObjectEntry {
            visual: hit.visual.clone(),
            behavior: fill_template(&template.behavior, "{keyword}", &hit.keyword),
            special_effect: fill_template(&template.special_effect, "{keyword}", &hit.keyword),
            emotional_value: fill_template(&template.emotional_value, "{keyword}", &hit.keyword),
        },
    })
}

fn generic_object(lexicon: &Lexicon, query: &Query<'_>) -> Resolved<ObjectEntry> {
    let generic = &lexicon.object_generic;
    Resolved {
        tier: MatchTier::Generic,
        matched_key: None,
        entry: ObjectEntry {
            visual: generic.visual.clone(),
            behavior: fill_template(&generic.behavior, "{input}", query.raw),
            special_effect: fill_template(&generic.special_effect, "{input}", query.raw),
            emotional_value: fill_template(&generic.emotional_value, "{input}", query.raw),
        },
    }
}

fn predefined_catcher(lexicon: &Lexicon, query: &Query<'_>) -> Option<Resolved<CatcherEntry>> {
    lexicon
        .catchers
        .iter()
        .find(|c| query.contains(&c.key))
        .map(|c| Resolved {
            tier: MatchTier::Predefined,
            matched_key: Some(c.key.clone()),
            entry: c.entry.clone(),
        })
}

fn keyword_catcher(lexicon: &Lexicon, query: &Query<'_>) -> Option<Resolved<CatcherEntry>> {
    let hit = lexicon
        .catcher_keywords
        .iter()
        .find(|k| query.contains(&k.keyword))?;
    let template = &lexicon.catcher_keyword_template;

    Some(Resolved {
        tier: MatchTier::Keyword,
        matched_key: Some(hit.keyword.clone()),
        entry: CatcherEntry {
            visual: hit.visual.clone(),
            size: template.size,
            special_ability: fill_template(&template.special_ability, "{keyword}", &hit.keyword),
            emotional_value: fill_template(&template.emotional_value, "{keyword}", &hit.keyword),
        },
    })
}

fn generic_catcher(lexicon: &Lexicon, query: &Query<'_>) -> Resolved<CatcherEntry> {
    let generic = &lexicon.catcher_generic;
    Resolved {
        tier: MatchTier::Generic,
        matched_key: None,
        entry: CatcherEntry {
            visual: generic.visual.clone(),
            size: generic.size,
            special_ability: fill_template(&generic.special_ability, "{input}", query.raw),
            emotional_value: fill_template(&generic.emotional_value, "{input}", query.raw),
        },
    }
}

impl Lexicon {
    /// Resolve an object answer. Total: never fails, never returns an empty glyph.
    pub fn resolve_object(&self, input: &str) -> ObjectEntry {
        run_chain(self, &Query::new(input), &OBJECT_TIERS, generic_object).entry
    }

    /// Resolve a catcher answer. Total, like `resolve_object`.
    pub fn resolve_catcher(&self, input: &str) -> CatcherEntry {
        run_chain(self, &Query::new(input), &CATCHER_TIERS, generic_catcher).entry
    }

    /// Kind-dispatched resolve.
    pub fn resolve(&self, input: &str, kind: EntryKind) -> LexiconEntry {
        self.interpret(input, kind).entry
    }

    /// Resolve and keep the provenance (tier and matched key).
    pub fn interpret(&self, input: &str, kind: EntryKind) -> Interpretation {
        let query = Query::new(input);
        let (tier, matched_key, entry) = match kind {
            EntryKind::Object => {
                let r = run_chain(self, &query, &OBJECT_TIERS, generic_object);
                (r.tier, r.matched_key, LexiconEntry::Object(r.entry))
            }
            EntryKind::Catcher => {
                let r = run_chain(self, &query, &CATCHER_TIERS, generic_catcher);
                (r.tier, r.matched_key, LexiconEntry::Catcher(r.entry))
            }
        };
        Interpretation {
            input: input.to_string(),
            tier,
            matched_key,
            entry,
        }
    }

    /// Name of the first keyword category containing `keyword`, if any.
    pub fn keyword_category(&self, keyword: &str) -> Option<&str> {
        self.object_categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| k == keyword))
            .map(|c| c.name.as_str())
    }
}

/// `Lexicon::resolve` against the default lexicon.
pub fn resolve(input: &str, kind: EntryKind) -> LexiconEntry {
    default_lexicon().resolve(input, kind)
}

/// `Lexicon::resolve_object` against the default lexicon.
pub fn resolve_object(input: &str) -> ObjectEntry {
    default_lexicon().resolve_object(input)
}

/// `Lexicon::resolve_catcher` against the default lexicon.
pub fn resolve_catcher(input: &str) -> CatcherEntry {
    default_lexicon().resolve_catcher(input)
}
