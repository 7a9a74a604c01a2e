// Stored game records.
//
// A record is created once from a `NewGame` and afterwards only its counters
// (`play_count`, `likes`) and deletion marker change. Deletion is soft: the
// record stays, flagged, and is hidden from players and listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kidcatch_mapping::{CreationStep, GameConfiguration};
use kidcatch_protocol::{CreatorInfo, GameId, GameView, UserId};

/// Everything the creator supplies for a new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub user_id: UserId,
    pub game_config: GameConfiguration,
    pub creation_steps: Vec<CreationStep>,
    pub game_effect: String,
    pub share_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: GameId,
    pub user_id: UserId,
    pub game_config: GameConfiguration,
    pub creation_steps: Vec<CreationStep>,
    pub game_effect: String,
    pub share_text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_public() -> bool {
    true
}

impl GameRecord {
    pub fn new(id: GameId, game: NewGame, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: game.user_id,
            game_config: game.game_config,
            creation_steps: game.creation_steps,
            game_effect: game.game_effect,
            share_text: game.share_text,
            created_at,
            play_count: 0,
            likes: 0,
            is_public: true,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Visible to players: not soft-deleted.
    pub fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    pub fn view(&self) -> GameView {
        GameView {
            id: self.id.clone(),
            game_config: self.game_config.clone(),
            game_effect: self.game_effect.clone(),
            share_text: self.share_text.clone(),
            creation_steps: self.creation_steps.clone(),
            created_at: self.created_at,
            play_count: self.play_count,
            likes: self.likes,
            is_public: self.is_public,
            creator: CreatorInfo {
                user_id: self.user_id.clone(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use kidcatch_mapping::{Difficulty, StepId};

    use super::*;

    pub(crate) fn sample_game(user: &str, object: &str) -> NewGame {
        NewGame {
            user_id: UserId(user.into()),
            game_config: GameConfiguration {
                object_type: object.into(),
                catcher_type: "籃子".into(),
                object_color: None,
                difficulty: Difficulty::Medium,
                game_title: format!("{object}接接樂"),
            },
            creation_steps: vec![
                CreationStep::new(StepId::Object, "寶貝想接什麼水果呢？", object),
                CreationStep::new(StepId::Catcher, "我們用什麼來接呢？", "籃子"),
            ],
            game_effect: "effect".into(),
            share_text: "share".into(),
        }
    }

    #[test]
    fn new_record_defaults() {
        let record = GameRecord::new(GameId("g".into()), sample_game("u", "蘋果"), Utc::now());
        assert_eq!(record.play_count, 0);
        assert_eq!(record.likes, 0);
        assert!(record.is_public);
        assert!(record.is_visible());
        assert_eq!(record.deleted_at, None);
    }

    #[test]
    fn view_carries_creator() {
        let record = GameRecord::new(GameId("g".into()), sample_game("u", "蘋果"), Utc::now());
        let view = record.view();
        assert_eq!(view.creator.user_id, UserId("u".into()));
        assert_eq!(view.game_config.object_type, "蘋果");
    }

    #[test]
    fn older_records_load_with_defaults() {
        let json = r#"{
            "id": "g1", "userId": "u1",
            "gameConfig": {"objectType": "蘋果", "catcherType": "籃子", "gameTitle": "t"},
            "creationSteps": [], "gameEffect": "e", "shareText": "s",
            "createdAt": "2025-06-01T08:00:00Z"
        }"#;
        let record: GameRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_public);
        assert!(!record.is_deleted);
        assert_eq!(record.game_config.difficulty, Difficulty::Medium);
    }
}
