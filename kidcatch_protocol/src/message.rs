// Request and response bodies for the HTTP API.
//
// Every response is a JSON object with a `success` flag. Successful bodies are
// wrapped in `Success<T>`, which flattens `T` next to `"success": true`;
// failures are `ErrorBody` (`"success": false` plus a user-facing message).
//
// Request bodies default every field so that a structurally valid but
// incomplete body reaches the handler's own validation (and its specific
// message) instead of failing generic JSON parsing.
//
// Field names are camelCase throughout; the browser client and the stored
// records share them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kidcatch_mapping::{
    CatcherEntry, ColorEffect, CreationStep, Difficulty, GameConfiguration, GameParams,
    ObjectEntry,
};

use crate::types::{GameId, UserId};

/// Defaults the preview endpoint fills in for absent fields.
pub const PREVIEW_DEFAULT_OBJECT: &str = "蘋果";
pub const PREVIEW_DEFAULT_CATCHER: &str = "籃子";
pub const PREVIEW_DEFAULT_TITLE: &str = "接東西遊戲";

/// `{"success": true, ...body}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Success {
            success: true,
            body,
        }
    }
}

/// `{"success": false, "error": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            success: false,
            error: error.into(),
        }
    }
}

/// `POST /api/games/create`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGameRequest {
    pub user_id: String,
    pub creation_steps: Vec<CreationStep>,
    pub game_title: Option<String>,
    /// Explicit difficulty label; takes precedence over the speed answer.
    pub difficulty: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: GameId,
    /// Empty for temporary games.
    pub share_url: String,
    pub share_text: String,
    pub game_config: GameConfiguration,
    pub game_effect: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_temporary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Public information about a game's creator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorInfo {
    pub user_id: UserId,
}

/// A stored game as returned to players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: GameId,
    pub game_config: GameConfiguration,
    pub game_effect: String,
    pub share_text: String,
    pub creation_steps: Vec<CreationStep>,
    pub created_at: DateTime<Utc>,
    pub play_count: u64,
    pub likes: u64,
    pub is_public: bool,
    pub creator: CreatorInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub game: GameView,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameListResponse {
    pub games: Vec<GameView>,
}

/// `PATCH /api/games/{id}`. `action` is validated by the handler so that an
/// unsupported action gets its own message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchGameRequest {
    pub action: String,
    pub user_id: Option<String>,
}

/// Supported PATCH actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "like" => Some(LikeAction::Like),
            "unlike" => Some(LikeAction::Unlike),
            _ => None,
        }
    }

    /// Change applied to the like counter.
    pub fn delta(self) -> i64 {
        match self {
            LikeAction::Like => 1,
            LikeAction::Unlike => -1,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LikeAction::Like => "點讚成功",
            LikeAction::Unlike => "取消點讚",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchGameResponse {
    pub message: String,
    pub new_likes: u64,
}

/// `DELETE /api/games/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteGameRequest {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /api/guide`. `current_step` is a wire name; unknown names are
/// treated as the start step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideRequest {
    pub current_step: String,
    pub previous_answers: Vec<CreationStep>,
    pub child_answer: Option<String>,
}

/// `POST /api/preview` body, and the JSON inside `GET /api/preview?config=`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewRequest {
    pub object_type: Option<String>,
    pub catcher_type: Option<String>,
    pub object_color: Option<String>,
    pub difficulty: Option<String>,
    pub game_title: Option<String>,
}

impl PreviewRequest {
    /// Fill absent or blank fields with the preview defaults.
    pub fn into_configuration(self) -> GameConfiguration {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|v| !v.trim().is_empty())
        }
        GameConfiguration {
            object_type: present(self.object_type)
                .unwrap_or_else(|| PREVIEW_DEFAULT_OBJECT.to_string()),
            catcher_type: present(self.catcher_type)
                .unwrap_or_else(|| PREVIEW_DEFAULT_CATCHER.to_string()),
            object_color: present(self.object_color),
            difficulty: Difficulty::from_label(self.difficulty.as_deref()),
            game_title: present(self.game_title)
                .unwrap_or_else(|| PREVIEW_DEFAULT_TITLE.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub game_config: GameConfiguration,
    pub game_effect: String,
    pub object: ObjectEntry,
    pub catcher: CatcherEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorEffect>,
    pub params: GameParams,
    pub start_banner: String,
}

/// `GET /api/status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// `ready`, `no-key` or `invalid-key`.
    pub enrichment: String,
    pub model: String,
    /// `memory` or `json-file`.
    pub store: String,
    pub version: String,
}
