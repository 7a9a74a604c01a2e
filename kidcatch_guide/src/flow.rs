// Guided creation flow: one parent/child session from the opening prompt to
// a finished configuration.
//
// State machine:
//
//   start() ──► Object ──► Catcher ──► Color ──► Speed ──► complete
//
// `start` asks the guide for the opening and moves straight to `Object`.
// Each `answer` records a `CreationStep` against the current step (its
// question is the first suggestion on screen, else `DEFAULT_QUESTION`), asks
// the guide about it, and either advances to the guide's `next_step` or, when
// that is `Complete` or four answers are in, finishes: the configuration is
// assembled, and the effect text and share text are generated.
//
// Blank answers are rejected without touching state. A finished flow rejects
// further answers.

use tracing::{debug, info};

use kidcatch_mapping::{CreationStep, GameConfiguration, StepId, build_configuration, describe};

use crate::error::FlowError;
use crate::fallback::DEFAULT_QUESTION;
use crate::guide::{Guidance, Guide};

/// Answers after which the flow finishes regardless of the step.
pub const MAX_ANSWERS: usize = 4;

/// What a finished flow produced.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowOutcome {
    pub steps: Vec<CreationStep>,
    pub configuration: GameConfiguration,
    pub game_effect: String,
    pub share_text: String,
}

/// Result of one accepted answer.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowProgress {
    Continue(Guidance),
    Complete(FlowOutcome),
}

#[derive(Clone, Debug)]
pub struct CreationFlow {
    current: StepId,
    steps: Vec<CreationStep>,
    guidance: Guidance,
    outcome: Option<FlowOutcome>,
}

impl CreationFlow {
    pub fn start(guide: &Guide) -> Self {
        let guidance = guide.guide_step(StepId::Start, &[], None);
        Self {
            current: guidance.next_step,
            steps: Vec::new(),
            guidance,
            outcome: None,
        }
    }

    pub fn current_step(&self) -> StepId {
        if self.outcome.is_some() {
            StepId::Complete
        } else {
            self.current
        }
    }

    pub fn steps(&self) -> &[CreationStep] {
        &self.steps
    }

    /// Latest guidance shown to the parent.
    pub fn guidance(&self) -> &Guidance {
        &self.guidance
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&FlowOutcome> {
        self.outcome.as_ref()
    }

    pub fn answer(&mut self, guide: &Guide, answer: &str) -> Result<FlowProgress, FlowError> {
        if self.outcome.is_some() {
            return Err(FlowError::AlreadyComplete);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(FlowError::EmptyAnswer);
        }

        let question = self
            .guidance
            .suggested_questions
            .first()
            .map_or(DEFAULT_QUESTION, String::as_str);
        let step = CreationStep::new(self.current, question, answer);
        let mut steps = self.steps.clone();
        steps.push(step);

        let guidance = guide.guide_step(self.current, &steps, Some(answer));
        debug!(step = %self.current, next = %guidance.next_step, "answer recorded");

        if guidance.next_step == StepId::Complete || steps.len() >= MAX_ANSWERS {
            let outcome = finish(guide, &steps)?;
            info!(title = %outcome.configuration.game_title, "creation flow complete");
            self.steps = steps;
            self.guidance = guidance;
            self.outcome = Some(outcome.clone());
            return Ok(FlowProgress::Complete(outcome));
        }

        self.steps = steps;
        self.current = guidance.next_step;
        self.guidance = guidance.clone();
        Ok(FlowProgress::Continue(guidance))
    }
}

fn finish(guide: &Guide, steps: &[CreationStep]) -> Result<FlowOutcome, FlowError> {
    let assembled = build_configuration(steps, None, None)?;
    let configuration = assembled.configuration;
    let game_effect = describe(
        &configuration.object_type,
        &configuration.catcher_type,
        configuration.object_color.as_deref(),
    );
    let share_text = guide.share_text(&configuration.game_title, steps);
    Ok(FlowOutcome {
        steps: steps.to_vec(),
        configuration,
        game_effect,
        share_text,
    })
}
