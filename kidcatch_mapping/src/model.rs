// Creation-flow data model: step identifiers, question/answer records, and
// the finalized game configuration.
//
// `CreationStep`s are the provenance trail of a game: one per question asked,
// in order, never mutated. `GameConfiguration` is derived once from them at
// the end of the flow (see `configure.rs`) and persisted with the game record.
// Both cross the HTTP boundary, so they serialize with the web client's
// camelCase field names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::Difficulty;

/// Where the guided flow is. Answers are recorded against the step that was
/// current when they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Start,
    Object,
    Catcher,
    Color,
    Speed,
    Complete,
    /// Any step name outside the flow. Such answers are kept with the game
    /// but never feed the configuration.
    #[serde(other)]
    Unknown,
}

impl StepId {
    /// Flow order.
    pub const ORDER: [StepId; 6] = [
        StepId::Start,
        StepId::Object,
        StepId::Catcher,
        StepId::Color,
        StepId::Speed,
        StepId::Complete,
    ];

    /// The step after this one. `Complete` is terminal.
    pub fn next(self) -> StepId {
        match self {
            StepId::Start | StepId::Unknown => StepId::Object,
            StepId::Object => StepId::Catcher,
            StepId::Catcher => StepId::Color,
            StepId::Color => StepId::Speed,
            StepId::Speed | StepId::Complete => StepId::Complete,
        }
    }

    /// Wire-name lookup. `None` for names outside the flow.
    pub fn parse(name: &str) -> Option<StepId> {
        StepId::ORDER.into_iter().find(|s| s.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Start => "start",
            StepId::Object => "object",
            StepId::Catcher => "catcher",
            StepId::Color => "color",
            StepId::Speed => "speed",
            StepId::Complete => "complete",
            StepId::Unknown => "unknown",
        }
    }

    /// Human-facing step title.
    pub fn title(self) -> &'static str {
        match self {
            StepId::Start => "開始創作",
            StepId::Object => "選擇要接的東西",
            StepId::Catcher => "選擇接取工具",
            StepId::Color => "選擇顏色",
            StepId::Speed => "選擇難度",
            StepId::Complete => "完成創作",
            StepId::Unknown => "其他",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question asked during the flow and the child's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationStep {
    pub id: StepId,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl CreationStep {
    pub fn new(id: StepId, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// First answer recorded for `id`, if any.
pub fn answer_for(steps: &[CreationStep], id: StepId) -> Option<&str> {
    steps
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.answer.as_str())
}

/// The finalized parameter set a playable round is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfiguration {
    pub object_type: String,
    pub catcher_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_color: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub game_title: String,
}
