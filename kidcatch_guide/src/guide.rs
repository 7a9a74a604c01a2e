// Step guidance and share text, live or static.
//
// `Guide` decides once, at construction, whether a live enricher exists.
// Every call then tries the live path first (when present) and drops to the
// static templates on any `EnrichError`, logging it at `warn`. Callers never
// see an enrichment error; `Guidance::is_ai_generated` tells them which path
// produced the text.
//
// Suggested questions, the game effect and the next step are always computed
// locally, so they are identical in both modes.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kidcatch_mapping::model::answer_for;
use kidcatch_mapping::{CreationStep, Lexicon, StepId, default_lexicon};

use crate::config::{EnrichmentConfig, EnrichmentStatus};
use crate::enricher::{Enricher, GeminiEnricher};
use crate::{fallback, prompt};

/// Guidance for the parent after one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub guidance: String,
    pub suggested_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_effect: Option<String>,
    pub next_step: StepId,
    pub is_ai_generated: bool,
}

pub struct Guide {
    enricher: Option<Box<dyn Enricher>>,
    status: EnrichmentStatus,
    lexicon: &'static Lexicon,
}

impl Guide {
    /// Live when the config is `Ready` and the HTTP client builds; static
    /// otherwise.
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        let status = config.status();
        if status != EnrichmentStatus::Ready {
            info!(%status, "enrichment not configured, using static guidance");
            return Self::offline_with_status(status);
        }
        match GeminiEnricher::new(config) {
            Ok(enricher) => {
                info!(model = %config.model, "enrichment ready");
                Self::with_enricher(Box::new(enricher))
            }
            Err(e) => {
                warn!(error = %e, "enrichment client unavailable, using static guidance");
                Self::offline_with_status(status)
            }
        }
    }

    /// Static guidance only.
    pub fn offline() -> Self {
        Self::offline_with_status(EnrichmentStatus::NoKey)
    }

    fn offline_with_status(status: EnrichmentStatus) -> Self {
        Self {
            enricher: None,
            status,
            lexicon: default_lexicon(),
        }
    }

    pub fn with_enricher(enricher: Box<dyn Enricher>) -> Self {
        Self {
            enricher: Some(enricher),
            status: EnrichmentStatus::Ready,
            lexicon: default_lexicon(),
        }
    }

    pub fn status(&self) -> EnrichmentStatus {
        self.status
    }

    pub fn is_live(&self) -> bool {
        self.enricher.is_some()
    }

    /// The live enricher's name (the model, for Gemini).
    pub fn enricher_name(&self) -> Option<&str> {
        self.enricher.as_deref().map(|e| e.name())
    }

    /// Try the live enricher; `None` means "use the fallback".
    fn enrich(&self, purpose: &str, prompt: impl FnOnce() -> String) -> Option<String> {
        let enricher = self.enricher.as_ref()?;
        match enricher.generate(&prompt()) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(enricher = enricher.name(), purpose, error = %e, "enrichment failed, falling back");
                None
            }
        }
    }

    /// Guidance after `current_step` was answered with `child_answer` (or
    /// before anything was answered, when `None`).
    pub fn guide_step(
        &self,
        current_step: StepId,
        prior_steps: &[CreationStep],
        child_answer: Option<&str>,
    ) -> Guidance {
        let child_answer = child_answer.filter(|a| !a.trim().is_empty());
        let suggested_questions = fallback::suggested_questions(current_step)
            .iter()
            .map(|q| q.to_string())
            .collect();
        let game_effect = child_answer.map(|_| {
            let answer = |id| answer_for(prior_steps, id);
            self.lexicon.describe(
                answer(StepId::Object).unwrap_or_default(),
                answer(StepId::Catcher).unwrap_or_default(),
                answer(StepId::Color),
            )
        });

        let live = self.enrich("guidance", || {
            prompt::guidance_prompt(self.lexicon, child_answer)
        });
        let is_ai_generated = live.is_some();
        let guidance =
            live.unwrap_or_else(|| fallback::guidance(current_step, child_answer));

        Guidance {
            guidance,
            suggested_questions,
            game_effect,
            next_step: current_step.next(),
            is_ai_generated,
        }
    }

    pub fn share_text(&self, game_title: &str, steps: &[CreationStep]) -> String {
        self.enrich("share text", || prompt::share_prompt(game_title, steps))
            .unwrap_or_else(|| fallback::share_text(game_title, steps))
    }
}

impl Default for Guide {
    fn default() -> Self {
        Self::offline()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{EnrichError, Result};

    /// Scripted enricher: returns queued replies in order, then errors.
    pub(crate) struct ScriptedEnricher {
        replies: Mutex<Vec<Result<String>>>,
    }

    impl ScriptedEnricher {
        pub(crate) fn new(replies: Vec<Result<String>>) -> Self {
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
            }
        }
    }

    impl Enricher for ScriptedEnricher {
        fn generate(&self, _prompt: &str) -> Result<String> {
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(EnrichError::Status(503)))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn steps() -> Vec<CreationStep> {
        vec![
            CreationStep::new(StepId::Object, "q", "蘋果"),
            CreationStep::new(StepId::Catcher, "q", "籃子"),
        ]
    }

    #[test]
    fn offline_start_step() {
        let guide = Guide::offline();
        let g = guide.guide_step(StepId::Start, &[], None);
        assert!(!g.is_ai_generated);
        assert_eq!(g.next_step, StepId::Object);
        assert_eq!(g.game_effect, None);
        assert_eq!(g.suggested_questions[0], "寶貝想接什麼水果呢？");
        assert!(g.guidance.starts_with("讓我們一起創作"));
    }

    #[test]
    fn offline_answer_step_has_effect() {
        let guide = Guide::offline();
        let g = guide.guide_step(StepId::Catcher, &steps(), Some("籃子"));
        assert_eq!(g.next_step, StepId::Color);
        assert!(g.guidance.contains("用「籃子」來接東西"));
        let effect = g.game_effect.unwrap();
        assert!(effect.starts_with("寶貝選擇了用🧺來接🍎！"));
    }

    #[test]
    fn blank_answer_is_no_answer() {
        let g = Guide::offline().guide_step(StepId::Object, &steps(), Some("  "));
        assert_eq!(g.game_effect, None);
        assert_eq!(g.guidance, fallback::guidance(StepId::Object, None));
    }

    #[test]
    fn live_text_is_used_when_available() {
        let guide = Guide::with_enricher(Box::new(ScriptedEnricher::new(vec![Ok(
            "好棒！".into(),
        )])));
        let g = guide.guide_step(StepId::Object, &steps(), Some("蘋果"));
        assert!(g.is_ai_generated);
        assert_eq!(g.guidance, "好棒！");
        // Effect and questions do not depend on the enricher.
        assert!(g.game_effect.is_some());
        assert_eq!(g.suggested_questions[0], "我們用什麼來接呢？");
    }

    #[test]
    fn enrichment_error_falls_back() {
        let guide = Guide::with_enricher(Box::new(ScriptedEnricher::new(vec![Err(
            EnrichError::MalformedResponse("x".into()),
        )])));
        let g = guide.guide_step(StepId::Color, &steps(), Some("金色"));
        assert!(!g.is_ai_generated);
        assert!(g.guidance.starts_with("「金色」的顏色"));
        assert_eq!(g.next_step, StepId::Speed);
    }

    #[test]
    fn share_text_live_and_fallback() {
        let guide = Guide::with_enricher(Box::new(ScriptedEnricher::new(vec![Ok(
            "快來玩！🎉".into(),
        )])));
        assert_eq!(guide.share_text("蘋果接接樂", &steps()), "快來玩！🎉");
        // Script exhausted: fallback.
        assert!(guide.share_text("蘋果接接樂", &steps()).contains("用籃子接蘋果"));
    }

    #[test]
    fn unconfigured_config_is_offline() {
        let guide = Guide::from_config(&EnrichmentConfig::default());
        assert!(!guide.is_live());
        assert_eq!(guide.enricher_name(), None);
        assert_eq!(guide.status(), EnrichmentStatus::NoKey);

        let live = Guide::with_enricher(Box::new(ScriptedEnricher::new(vec![])));
        assert_eq!(live.enricher_name(), Some("scripted"));
    }

    #[test]
    fn guidance_wire_shape() {
        let g = Guide::offline().guide_step(StepId::Start, &[], None);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["nextStep"], "object");
        assert_eq!(json["isAiGenerated"], false);
        assert!(json.get("gameEffect").is_none());
    }
}
