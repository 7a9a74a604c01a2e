// From creation-step answers to a playable configuration.
//
// Three stages, each usable on its own:
// - `interpret_child_input` reads one raw answer every way the flow might
//   need it (object mapping, catcher key, color key, speed hint).
// - `build_configuration` assembles a `GameConfiguration` from the ordered
//   `CreationStep`s. The object and catcher answers are required; this is the
//   only fallible operation in the crate and its errors are input-validation
//   errors meant for the user.
// - `resolve_game` expands a stored configuration into the entries and
//   numeric parameters the scene consumes.
//
// Difficulty precedence. The explicit label and the speed-step hint are
// separate inputs. A recognized explicit label wins; otherwise the hint from
// the speed answer decides; otherwise `Medium`. The outcome records which
// source decided (`DifficultySource`) so callers can surface it.

use serde::Serialize;
use thiserror::Error;

use crate::model::{CreationStep, GameConfiguration, StepId, answer_for};
use crate::params::{Difficulty, GameParams, SpeedHint, params_for, speed_hint};
use crate::types::{CatcherEntry, ColorEffect, ObjectEntry};
use crate::{Lexicon, default_lexicon};

/// Input-validation failures while assembling a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required step has no (non-blank) answer.
    #[error("missing answer for the {0} step")]
    MissingAnswer(StepId),
}

/// Everything one raw answer could mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildInputReading {
    /// The raw answer; used verbatim as the object key.
    pub object_key: String,
    pub object_mapping: ObjectEntry,
    /// A predefined catcher key found in the answer, else the raw answer.
    pub catcher_key: String,
    pub catcher_mapping: CatcherEntry,
    pub color_key: Option<String>,
    pub speed_hint: Option<SpeedHint>,
}

/// Which input decided the configuration's difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DifficultySource {
    Explicit,
    SpeedHint,
    Default,
}

/// A configuration plus how its difficulty was decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledConfiguration {
    pub configuration: GameConfiguration,
    pub difficulty_source: DifficultySource,
    /// The speed answer's hint, recorded even when an explicit label won.
    pub speed_hint: Option<SpeedHint>,
}

/// A configuration expanded for play.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGame {
    pub configuration: GameConfiguration,
    pub object: ObjectEntry,
    pub catcher: CatcherEntry,
    pub color: Option<ColorEffect>,
    pub params: GameParams,
}

impl Lexicon {
    pub fn interpret_child_input(&self, input: &str) -> ChildInputReading {
        let catcher_key = self
            .find_catcher_key(input)
            .map_or_else(|| input.to_string(), str::to_string);
        ChildInputReading {
            object_key: input.to_string(),
            object_mapping: self.resolve_object(input),
            catcher_key,
            catcher_mapping: self.resolve_catcher(input),
            color_key: self.find_color_key(input).map(str::to_string),
            speed_hint: speed_hint(input),
        }
    }

    pub fn build_configuration(
        &self,
        steps: &[CreationStep],
        game_title: Option<&str>,
        explicit_difficulty: Option<&str>,
    ) -> Result<AssembledConfiguration, ConfigError> {
        let object_answer = required_answer(steps, StepId::Object)?;
        let catcher_answer = required_answer(steps, StepId::Catcher)?;

        let catcher_type = self
            .find_catcher_key(catcher_answer)
            .unwrap_or(catcher_answer)
            .to_string();

        let object_color = answer_for(steps, StepId::Color)
            .filter(|a| !a.trim().is_empty())
            .map(|a| self.find_color_key(a).unwrap_or(a).to_string());

        let hint = answer_for(steps, StepId::Speed).and_then(speed_hint);
        let (difficulty, difficulty_source) =
            match explicit_difficulty.and_then(Difficulty::parse) {
                Some(d) => (d, DifficultySource::Explicit),
                None => match hint {
                    Some(h) => (h.difficulty(), DifficultySource::SpeedHint),
                    None => (Difficulty::Medium, DifficultySource::Default),
                },
            };

        let game_title = game_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| format!("{object_answer}接接樂"), str::to_string);

        Ok(AssembledConfiguration {
            configuration: GameConfiguration {
                object_type: object_answer.to_string(),
                catcher_type,
                object_color,
                difficulty,
                game_title,
            },
            difficulty_source,
            speed_hint: hint,
        })
    }

    pub fn resolve_game(&self, configuration: &GameConfiguration) -> ResolvedGame {
        let object = self.resolve_object(&configuration.object_type);
        let catcher = self.resolve_catcher(&configuration.catcher_type);
        let color = configuration
            .object_color
            .as_deref()
            .and_then(|c| self.color_effect(c))
            .cloned();
        let params = params_for(configuration.difficulty, &catcher, color.as_ref());
        ResolvedGame {
            configuration: configuration.clone(),
            object,
            catcher,
            color,
            params,
        }
    }

    /// Effect paragraph for a stored configuration.
    pub fn describe_configuration(&self, configuration: &GameConfiguration) -> String {
        self.describe(
            &configuration.object_type,
            &configuration.catcher_type,
            configuration.object_color.as_deref(),
        )
    }
}

fn required_answer(steps: &[CreationStep], id: StepId) -> Result<&str, ConfigError> {
    answer_for(steps, id)
        .filter(|a| !a.trim().is_empty())
        .ok_or(ConfigError::MissingAnswer(id))
}

/// `Lexicon::interpret_child_input` against the default lexicon.
pub fn interpret_child_input(input: &str) -> ChildInputReading {
    default_lexicon().interpret_child_input(input)
}

/// `Lexicon::build_configuration` against the default lexicon.
pub fn build_configuration(
    steps: &[CreationStep],
    game_title: Option<&str>,
    explicit_difficulty: Option<&str>,
) -> Result<AssembledConfiguration, ConfigError> {
    default_lexicon().build_configuration(steps, game_title, explicit_difficulty)
}

/// `Lexicon::resolve_game` against the default lexicon.
pub fn resolve_game(configuration: &GameConfiguration) -> ResolvedGame {
    default_lexicon().resolve_game(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatcherSize;

    fn steps(answers: &[(StepId, &str)]) -> Vec<CreationStep> {
        answers
            .iter()
            .map(|(id, a)| CreationStep::new(*id, "問題", *a))
            .collect()
    }

    #[test]
    fn reading_detects_catcher_color_and_speed() {
        let reading = interpret_child_input("用籃子接金色的星星，要快快的");
        assert_eq!(reading.object_key, "用籃子接金色的星星，要快快的");
        assert_eq!(reading.object_mapping.visual, "⭐");
        assert_eq!(reading.catcher_key, "籃子");
        assert_eq!(reading.catcher_mapping.visual, "🧺");
        assert_eq!(reading.color_key.as_deref(), Some("金色"));
        assert_eq!(reading.speed_hint, Some(SpeedHint::Fast));
    }

    #[test]
    fn reading_falls_back_to_raw_catcher_key() {
        let reading = interpret_child_input("鍋子");
        assert_eq!(reading.catcher_key, "鍋子");
        assert_eq!(reading.catcher_mapping.visual, "🍳");
        assert_eq!(reading.color_key, None);
        assert_eq!(reading.speed_hint, None);
    }

    #[test]
    fn minimal_configuration() {
        let assembled = build_configuration(
            &steps(&[(StepId::Object, "蘋果"), (StepId::Catcher, "我的手")]),
            None,
            None,
        )
        .unwrap();
        let config = assembled.configuration;
        assert_eq!(config.object_type, "蘋果");
        assert_eq!(config.catcher_type, "手");
        assert_eq!(config.object_color, None);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.game_title, "蘋果接接樂");
        assert_eq!(assembled.difficulty_source, DifficultySource::Default);
    }

    #[test]
    fn missing_required_answers() {
        assert_eq!(
            build_configuration(&steps(&[(StepId::Catcher, "籃子")]), None, None),
            Err(ConfigError::MissingAnswer(StepId::Object))
        );
        assert_eq!(
            build_configuration(&steps(&[(StepId::Object, "蘋果")]), None, None),
            Err(ConfigError::MissingAnswer(StepId::Catcher))
        );
        assert_eq!(
            build_configuration(
                &steps(&[(StepId::Object, "  "), (StepId::Catcher, "籃子")]),
                None,
                None
            ),
            Err(ConfigError::MissingAnswer(StepId::Object))
        );
    }

    #[test]
    fn color_answer_prefers_table_key_then_raw() {
        let with_key = build_configuration(
            &steps(&[
                (StepId::Object, "蘋果"),
                (StepId::Catcher, "籃子"),
                (StepId::Color, "要閃亮亮的"),
            ]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(with_key.configuration.object_color.as_deref(), Some("閃亮"));

        let raw = build_configuration(
            &steps(&[
                (StepId::Object, "蘋果"),
                (StepId::Catcher, "籃子"),
                (StepId::Color, "粉紅色"),
            ]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(raw.configuration.object_color.as_deref(), Some("粉紅色"));
    }

    #[test]
    fn speed_hint_sets_difficulty_without_explicit_label() {
        let base = [
            (StepId::Object, "蘋果"),
            (StepId::Catcher, "籃子"),
            (StepId::Speed, "慢慢的"),
        ];
        let assembled = build_configuration(&steps(&base), None, None).unwrap();
        assert_eq!(assembled.configuration.difficulty, Difficulty::Easy);
        assert_eq!(assembled.difficulty_source, DifficultySource::SpeedHint);
    }

    #[test]
    fn explicit_label_beats_speed_hint() {
        let base = [
            (StepId::Object, "蘋果"),
            (StepId::Catcher, "籃子"),
            (StepId::Speed, "慢慢的"),
        ];
        let assembled = build_configuration(&steps(&base), None, Some("hard")).unwrap();
        assert_eq!(assembled.configuration.difficulty, Difficulty::Hard);
        assert_eq!(assembled.difficulty_source, DifficultySource::Explicit);
        assert_eq!(assembled.speed_hint, Some(SpeedHint::Slow));

        // Unrecognized explicit labels do not count as a selection.
        let assembled = build_configuration(&steps(&base), None, Some("turbo")).unwrap();
        assert_eq!(assembled.configuration.difficulty, Difficulty::Easy);
    }

    #[test]
    fn custom_title_is_kept() {
        let assembled = build_configuration(
            &steps(&[(StepId::Object, "蘋果"), (StepId::Catcher, "籃子")]),
            Some("小明的蘋果雨"),
            None,
        )
        .unwrap();
        assert_eq!(assembled.configuration.game_title, "小明的蘋果雨");
    }

    #[test]
    fn resolve_game_reads_size_and_color() {
        let config = GameConfiguration {
            object_type: "星星".into(),
            catcher_type: "網子".into(),
            object_color: Some("金色".into()),
            difficulty: Difficulty::Easy,
            game_title: "t".into(),
        };
        let game = resolve_game(&config);
        assert_eq!(game.object.visual, "⭐");
        assert_eq!(game.catcher.size, CatcherSize::Large);
        assert_eq!(game.params.catch_radius, 80.0);
        assert_eq!(game.params.points_per_catch, 16);
        assert!(game.color.is_some());
    }
}
