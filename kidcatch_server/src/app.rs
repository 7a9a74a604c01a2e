// Request handlers for the JSON API.
//
// `App::handle(method, url, body)` is the whole API as a pure-ish function:
// it routes, parses the body, calls into the mapping core, the guide and the
// store, and returns an `ApiResponse` (status plus serialized JSON). The
// tiny_http loop in `server.rs` only moves bytes in and out of it, which
// keeps every handler testable without a socket.
//
// Failure policy:
// - Malformed JSON and missing fields are 400s with a user-facing message.
// - A store failure while creating a game is not an error for the caller:
//   the game is returned under a `temp_` id with `isTemporary: true`.
// - A failed play-count increment is logged and the view is still served.
// - Soft-deleted games are indistinguishable from missing ones (404).

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use kidcatch_guide::Guide;
use kidcatch_mapping::{Lexicon, StepId, default_lexicon};
use kidcatch_protocol::{
    CreateGameRequest, CreateGameResponse, DeleteGameRequest, ErrorBody, GameId,
    GameListResponse, GameResponse, GuideRequest, LikeAction, MessageResponse, PatchGameRequest,
    PatchGameResponse, PreviewRequest, PreviewResponse, StatusResponse, Success, UserId,
};
use kidcatch_scene::start_banner;
use kidcatch_store::{GameRecord, GameStore, JsonFileStore, MemoryStore, NewGame, StoreError};

use crate::config::{ServerConfig, share_url};
use crate::error::Result;
use crate::router::{Route, route};

pub const MSG_MALFORMED_BODY: &str = "請求格式錯誤";
pub const MSG_MISSING_CREATION: &str = "缺少必要的創作資料";
pub const MSG_INCOMPLETE_CREATION: &str = "創作資料不完整";
pub const MSG_TEMPORARY_GAME: &str = "Unable to save permanently, but game created";
pub const MSG_USER_REQUIRED: &str = "需要用戶 ID";
pub const MSG_LIST_FAILED: &str = "獲取遊戲列表失敗";
pub const MSG_INVALID_ID: &str = "遊戲 ID 無效";
pub const MSG_GAME_NOT_FOUND: &str = "遊戲不存在";
pub const MSG_GET_FAILED: &str = "獲取遊戲失敗，請稍後再試";
pub const MSG_UNSUPPORTED_ACTION: &str = "不支援的操作";
pub const MSG_UPDATE_FAILED: &str = "更新遊戲失敗";
pub const MSG_MISSING_PARAMS: &str = "缺少必要參數";
pub const MSG_CREATOR_ONLY: &str = "只有創作者可以刪除遊戲";
pub const MSG_DELETED: &str = "遊戲已刪除";
pub const MSG_DELETE_FAILED: &str = "刪除遊戲失敗";
pub const MSG_ROUTE_NOT_FOUND: &str = "找不到此 API";
pub const MSG_METHOD_NOT_ALLOWED: &str = "不支援的請求方法";

/// Status code plus a JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, &Success::new(body))
    }

    pub(crate) fn error(status: u16, message: &str) -> Self {
        Self::json(status, &ErrorBody::new(message))
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Self {
                    status: 500,
                    body: r#"{"success":false,"error":"internal error"}"#.into(),
                }
            }
        }
    }
}

/// Parse a request body. An empty body is the type's default, so missing
/// fields reach the handler's own validation.
fn parse_body<T: DeserializeOwned + Default>(body: &str) -> std::result::Result<T, ApiResponse> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "malformed request body");
        ApiResponse::error(400, MSG_MALFORMED_BODY)
    })
}

fn game_id(raw: &str) -> std::result::Result<GameId, ApiResponse> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiResponse::error(400, MSG_INVALID_ID));
    }
    Ok(GameId(raw.to_string()))
}

pub struct App {
    store: Arc<dyn GameStore>,
    guide: Guide,
    lexicon: &'static Lexicon,
    app_url: String,
}

impl App {
    pub fn new(store: Arc<dyn GameStore>, guide: Guide, app_url: impl Into<String>) -> Self {
        Self {
            store,
            guide,
            lexicon: default_lexicon(),
            app_url: app_url.into(),
        }
    }

    /// Store and guide as `config` describes them.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let store: Arc<dyn GameStore> = match &config.data_path {
            Some(path) => Arc::new(JsonFileStore::open(path.clone())?),
            None => Arc::new(MemoryStore::new()),
        };
        info!(store = store.kind(), "game store ready");
        let guide = Guide::from_config(&config.enrichment);
        Ok(Self::new(store, guide, config.app_url.clone()))
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    pub fn handle(&self, method: &str, url: &str, body: &str) -> ApiResponse {
        let route = route(method, url);
        debug!(method, url, ?route, "request");
        let result = match route {
            Route::CreateGame => self.create_game(body),
            Route::ListGames { user_id } => self.list_games(user_id),
            Route::GetGame(id) => self.get_game(&id),
            Route::PatchGame(id) => self.patch_game(&id, body),
            Route::DeleteGame(id) => self.delete_game(&id, body),
            Route::Guide => self.guide_step(body),
            Route::Preview => parse_body::<PreviewRequest>(body).map(|r| self.preview(r)),
            Route::PreviewQuery { config } => match config {
                Some(json) => parse_body::<PreviewRequest>(&json).map(|r| self.preview(r)),
                None => Ok(self.preview(PreviewRequest::default())),
            },
            Route::Status => Ok(self.status()),
            Route::MethodNotAllowed => Err(ApiResponse::error(405, MSG_METHOD_NOT_ALLOWED)),
            Route::NotFound => Err(ApiResponse::error(404, MSG_ROUTE_NOT_FOUND)),
        };
        result.unwrap_or_else(|response| response)
    }

    fn create_game(&self, body: &str) -> std::result::Result<ApiResponse, ApiResponse> {
        let request: CreateGameRequest = parse_body(body)?;
        let user_id = UserId(request.user_id);
        if user_id.is_blank() || request.creation_steps.is_empty() {
            return Err(ApiResponse::error(400, MSG_MISSING_CREATION));
        }

        let assembled = self
            .lexicon
            .build_configuration(
                &request.creation_steps,
                request.game_title.as_deref(),
                request.difficulty.as_deref(),
            )
            .map_err(|e| {
                debug!(error = %e, "incomplete creation");
                ApiResponse::error(400, MSG_INCOMPLETE_CREATION)
            })?;
        let configuration = assembled.configuration;
        let game_effect = self.lexicon.describe_configuration(&configuration);
        let share_text = self
            .guide
            .share_text(&configuration.game_title, &request.creation_steps);

        let new_game = NewGame {
            user_id,
            game_config: configuration.clone(),
            creation_steps: request.creation_steps,
            game_effect: game_effect.clone(),
            share_text: share_text.clone(),
        };
        let response = match self.store.insert(new_game) {
            Ok(game_id) => {
                info!(%game_id, title = %configuration.game_title, "game created");
                CreateGameResponse {
                    share_url: share_url(&self.app_url, game_id.as_str()),
                    game_id,
                    share_text,
                    game_config: configuration,
                    game_effect,
                    is_temporary: false,
                    error: None,
                }
            }
            Err(e) => {
                let game_id = GameId::temporary(Utc::now().timestamp_millis());
                error!(error = %e, %game_id, "failed to save game, serving it temporarily");
                CreateGameResponse {
                    game_id,
                    share_url: String::new(),
                    share_text,
                    game_config: configuration,
                    game_effect,
                    is_temporary: true,
                    error: Some(MSG_TEMPORARY_GAME.into()),
                }
            }
        };
        Ok(ApiResponse::ok(response))
    }

    fn list_games(&self, user_id: Option<String>) -> std::result::Result<ApiResponse, ApiResponse> {
        let Some(user_id) = user_id.map(UserId).filter(|u| !u.is_blank()) else {
            return Err(ApiResponse::error(400, MSG_USER_REQUIRED));
        };
        let records = self.store.list_by_user(&user_id).map_err(|e| {
            error!(error = %e, "failed to list games");
            ApiResponse::error(500, MSG_LIST_FAILED)
        })?;
        Ok(ApiResponse::ok(GameListResponse {
            games: records.iter().map(GameRecord::view).collect(),
        }))
    }

    /// A visible record, or the 404/500 to answer with.
    fn visible_record(
        &self,
        id: &GameId,
        failure: &str,
    ) -> std::result::Result<GameRecord, ApiResponse> {
        match self.store.get(id) {
            Ok(record) if record.is_visible() => Ok(record),
            Ok(_) | Err(StoreError::NotFound(_)) => Err(ApiResponse::error(404, MSG_GAME_NOT_FOUND)),
            Err(e) => {
                error!(error = %e, %id, "failed to read game");
                Err(ApiResponse::error(500, failure))
            }
        }
    }

    fn get_game(&self, raw_id: &str) -> std::result::Result<ApiResponse, ApiResponse> {
        let id = game_id(raw_id)?;
        let mut view = self.visible_record(&id, MSG_GET_FAILED)?.view();
        let counted = view.play_count + 1;
        view.play_count = self.store.record_play(&id).unwrap_or_else(|e| {
            warn!(error = %e, %id, "failed to record play");
            counted
        });
        Ok(ApiResponse::ok(GameResponse { game: view }))
    }

    fn patch_game(&self, raw_id: &str, body: &str) -> std::result::Result<ApiResponse, ApiResponse> {
        let id = game_id(raw_id)?;
        let request: PatchGameRequest = parse_body(body)?;
        self.visible_record(&id, MSG_UPDATE_FAILED)?;
        let Some(action) = LikeAction::parse(&request.action) else {
            return Err(ApiResponse::error(400, MSG_UNSUPPORTED_ACTION));
        };
        let likes = self
            .store
            .adjust_likes(&id, action.delta())
            .map_err(|e| match e {
                StoreError::NotFound(_) => ApiResponse::error(404, MSG_GAME_NOT_FOUND),
                e => {
                    error!(error = %e, %id, "failed to update likes");
                    ApiResponse::error(500, MSG_UPDATE_FAILED)
                }
            })?;
        Ok(ApiResponse::ok(PatchGameResponse {
            message: action.message().into(),
            new_likes: likes,
        }))
    }

    fn delete_game(&self, raw_id: &str, body: &str) -> std::result::Result<ApiResponse, ApiResponse> {
        let request: DeleteGameRequest = parse_body(body)?;
        let user = UserId(request.user_id);
        if raw_id.trim().is_empty() || user.is_blank() {
            return Err(ApiResponse::error(400, MSG_MISSING_PARAMS));
        }
        let id = game_id(raw_id)?;
        match self.store.soft_delete(&id, &user) {
            Ok(()) => {
                info!(%id, %user, "game deleted");
                Ok(ApiResponse::ok(MessageResponse {
                    message: MSG_DELETED.into(),
                }))
            }
            Err(StoreError::NotFound(_)) => Err(ApiResponse::error(404, MSG_GAME_NOT_FOUND)),
            Err(StoreError::Forbidden { .. }) => Err(ApiResponse::error(403, MSG_CREATOR_ONLY)),
            Err(e) => {
                error!(error = %e, %id, "failed to delete game");
                Err(ApiResponse::error(500, MSG_DELETE_FAILED))
            }
        }
    }

    fn guide_step(&self, body: &str) -> std::result::Result<ApiResponse, ApiResponse> {
        let request: GuideRequest = parse_body(body)?;
        // Unknown or missing step names are treated as the start.
        let step = StepId::parse(request.current_step.trim()).unwrap_or(StepId::Start);
        let guidance = self.guide.guide_step(
            step,
            &request.previous_answers,
            request.child_answer.as_deref(),
        );
        Ok(ApiResponse::ok(guidance))
    }

    fn preview(&self, request: PreviewRequest) -> ApiResponse {
        let configuration = request.into_configuration();
        let game_effect = self.lexicon.describe_configuration(&configuration);
        let resolved = self.lexicon.resolve_game(&configuration);
        let start_banner = start_banner(&resolved);
        ApiResponse::ok(PreviewResponse {
            game_config: resolved.configuration,
            game_effect,
            object: resolved.object,
            catcher: resolved.catcher,
            color: resolved.color,
            params: resolved.params,
            start_banner,
        })
    }

    fn status(&self) -> ApiResponse {
        ApiResponse::ok(StatusResponse {
            enrichment: self.guide.status().as_str().into(),
            model: self.guide.enricher_name().unwrap_or("static").into(),
            store: self.store.kind().into(),
            version: env!("CARGO_PKG_VERSION").into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use kidcatch_store::error::Result as StoreResult;

    use super::*;

    /// Every operation fails.
    struct BrokenStore;

    impl GameStore for BrokenStore {
        fn kind(&self) -> &'static str {
            "broken"
        }
        fn insert(&self, _game: NewGame) -> StoreResult<GameId> {
            Err(StoreError::Poisoned)
        }
        fn get(&self, _id: &GameId) -> StoreResult<GameRecord> {
            Err(StoreError::Poisoned)
        }
        fn list_by_user(&self, _user: &UserId) -> StoreResult<Vec<GameRecord>> {
            Err(StoreError::Poisoned)
        }
        fn record_play(&self, _id: &GameId) -> StoreResult<u64> {
            Err(StoreError::Poisoned)
        }
        fn adjust_likes(&self, _id: &GameId, _delta: i64) -> StoreResult<u64> {
            Err(StoreError::Poisoned)
        }
        fn soft_delete(&self, _id: &GameId, _user: &UserId) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }
    }

    fn app() -> App {
        App::new(
            Arc::new(MemoryStore::new()),
            Guide::offline(),
            "http://kids.test/",
        )
    }

    fn call(app: &App, method: &str, url: &str, body: Value) -> (u16, Value) {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        let response = app.handle(method, url, &body);
        (response.status, serde_json::from_str(&response.body).unwrap())
    }

    fn create_body(user: &str) -> Value {
        json!({
            "userId": user,
            "creationSteps": [
                {"id": "object", "question": "q", "answer": "蘋果"},
                {"id": "catcher", "question": "q", "answer": "用籃子接"},
                {"id": "color", "question": "q", "answer": "金色"}
            ]
        })
    }

    fn create(app: &App, user: &str) -> String {
        let (status, body) = call(app, "POST", "/api/games/create", create_body(user));
        assert_eq!(status, 200);
        body["gameId"].as_str().unwrap().to_string()
    }

    #[test]
    fn create_game_persists_and_links() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/games/create", create_body("u1"));
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        let id = body["gameId"].as_str().unwrap();
        assert_eq!(body["shareUrl"], format!("http://kids.test/play/{id}"));
        assert_eq!(body["gameConfig"]["objectType"], "蘋果");
        assert_eq!(body["gameConfig"]["catcherType"], "籃子");
        assert_eq!(body["gameConfig"]["objectColor"], "金色");
        assert_eq!(body["gameConfig"]["gameTitle"], "蘋果接接樂");
        assert!(body["gameEffect"].as_str().unwrap().starts_with("寶貝選擇了用🧺來接🍎！"));
        assert!(body["shareText"].as_str().unwrap().contains("蘋果接接樂"));
        assert!(body.get("isTemporary").is_none());
        assert!(app.store().get(&GameId(id.into())).is_ok());
    }

    #[test]
    fn create_game_validation() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/games/create",
            json!({"userId": "", "creationSteps": []}),
        );
        assert_eq!(status, 400);
        assert_eq!(body["error"], MSG_MISSING_CREATION);

        let (status, body) = call(
            &app,
            "POST",
            "/api/games/create",
            json!({"userId": "u1", "creationSteps": [{"id": "object", "answer": "蘋果"}]}),
        );
        assert_eq!(status, 400);
        assert_eq!(body["error"], MSG_INCOMPLETE_CREATION);

        let response = app.handle("POST", "/api/games/create", "{oops");
        assert_eq!(response.status, 400);
    }

    #[test]
    fn create_game_accepts_unfamiliar_step_ids() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/games/create",
            json!({
                "userId": "u1",
                "creationSteps": [
                    {"id": "object", "question": "q", "answer": "星星"},
                    {"id": "catcher", "question": "q", "answer": "網子"},
                    {"id": "music", "question": "q", "answer": "兒歌"}
                ]
            }),
        );
        assert_eq!(status, 200);
        assert_eq!(body["gameConfig"]["objectType"], "星星");
        let id = GameId(body["gameId"].as_str().unwrap().into());
        let record = app.store().get(&id).unwrap();
        assert_eq!(record.creation_steps[2].id, StepId::Unknown);
        assert_eq!(record.creation_steps[2].answer, "兒歌");
    }

    #[test]
    fn create_game_survives_store_failure() {
        let app = App::new(Arc::new(BrokenStore), Guide::offline(), "http://kids.test");
        let (status, body) = call(&app, "POST", "/api/games/create", create_body("u1"));
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert!(body["gameId"].as_str().unwrap().starts_with("temp_"));
        assert_eq!(body["shareUrl"], "");
        assert_eq!(body["isTemporary"], true);
        assert_eq!(body["error"], MSG_TEMPORARY_GAME);
    }

    #[test]
    fn temporary_game_is_not_kept_by_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let config = ServerConfig {
            data_path: Some(data_dir.join("games.json")),
            app_url: "http://kids.test".into(),
            ..ServerConfig::default()
        };
        let app = App::from_config(&config).unwrap();
        std::fs::write(&data_dir, "in the way").unwrap();

        let (status, body) = call(&app, "POST", "/api/games/create", create_body("u1"));
        assert_eq!(status, 200);
        assert_eq!(body["isTemporary"], true);
        let temp_id = body["gameId"].as_str().unwrap().to_string();
        assert!(temp_id.starts_with("temp_"));

        let (status, body) = call(&app, "GET", "/api/games?userId=u1", Value::Null);
        assert_eq!(status, 200);
        assert!(body["games"].as_array().unwrap().is_empty());
        let (status, _) = call(&app, "GET", &format!("/api/games/{temp_id}"), Value::Null);
        assert_eq!(status, 404);

        std::fs::remove_file(&data_dir).unwrap();
        let saved = create(&app, "u2");
        let reopened = JsonFileStore::open(data_dir.join("games.json")).unwrap();
        assert!(reopened.list_by_user(&UserId("u1".into())).unwrap().is_empty());
        assert!(reopened.get(&GameId(saved)).is_ok());
    }

    #[test]
    fn get_game_counts_plays() {
        let app = app();
        let id = create(&app, "u1");
        let url = format!("/api/games/{id}");
        let (status, body) = call(&app, "GET", &url, Value::Null);
        assert_eq!(status, 200);
        assert_eq!(body["game"]["id"], id.as_str());
        assert_eq!(body["game"]["playCount"], 1);
        assert_eq!(body["game"]["creator"]["userId"], "u1");
        assert_eq!(body["game"]["isPublic"], true);
        let (_, body) = call(&app, "GET", &url, Value::Null);
        assert_eq!(body["game"]["playCount"], 2);

        let (status, body) = call(&app, "GET", "/api/games/nope", Value::Null);
        assert_eq!(status, 404);
        assert_eq!(body["error"], MSG_GAME_NOT_FOUND);
        let (status, _) = call(&app, "GET", "/api/games/%20", Value::Null);
        assert_eq!(status, 400);
    }

    #[test]
    fn likes_go_up_and_down_but_not_below_zero() {
        let app = app();
        let id = create(&app, "u1");
        let url = format!("/api/games/{id}");
        let (status, body) = call(&app, "PATCH", &url, json!({"action": "like"}));
        assert_eq!(status, 200);
        assert_eq!(body["message"], "點讚成功");
        assert_eq!(body["newLikes"], 1);
        call(&app, "PATCH", &url, json!({"action": "unlike"}));
        let (_, body) = call(&app, "PATCH", &url, json!({"action": "unlike"}));
        assert_eq!(body["message"], "取消點讚");
        assert_eq!(body["newLikes"], 0);

        let (status, body) = call(&app, "PATCH", &url, json!({"action": "share"}));
        assert_eq!(status, 400);
        assert_eq!(body["error"], MSG_UNSUPPORTED_ACTION);
        let (status, _) = call(&app, "PATCH", "/api/games/nope", json!({"action": "like"}));
        assert_eq!(status, 404);
    }

    #[test]
    fn delete_is_creator_only_and_hides_the_game() {
        let app = app();
        let id = create(&app, "u1");
        let url = format!("/api/games/{id}");

        let (status, body) = call(&app, "DELETE", &url, Value::Null);
        assert_eq!(status, 400);
        assert_eq!(body["error"], MSG_MISSING_PARAMS);

        let (status, body) = call(&app, "DELETE", &url, json!({"userId": "u2"}));
        assert_eq!(status, 403);
        assert_eq!(body["error"], MSG_CREATOR_ONLY);

        let (status, body) = call(&app, "DELETE", &url, json!({"userId": "u1"}));
        assert_eq!(status, 200);
        assert_eq!(body["message"], MSG_DELETED);

        let (status, _) = call(&app, "GET", &url, Value::Null);
        assert_eq!(status, 404);
        let (status, _) = call(&app, "DELETE", &url, json!({"userId": "u1"}));
        assert_eq!(status, 404);
    }

    #[test]
    fn list_games_per_user() {
        let app = app();
        create(&app, "u1");
        create(&app, "u1");
        create(&app, "u2");
        let (status, body) = call(&app, "GET", "/api/games?userId=u1", Value::Null);
        assert_eq!(status, 200);
        assert_eq!(body["games"].as_array().unwrap().len(), 2);

        let (status, body) = call(&app, "GET", "/api/games", Value::Null);
        assert_eq!(status, 400);
        assert_eq!(body["error"], MSG_USER_REQUIRED);

        let broken = App::new(Arc::new(BrokenStore), Guide::offline(), "");
        let (status, body) = call(&broken, "GET", "/api/games?userId=u1", Value::Null);
        assert_eq!(status, 500);
        assert_eq!(body["error"], MSG_LIST_FAILED);
    }

    #[test]
    fn broken_store_reads_are_500s() {
        let app = App::new(Arc::new(BrokenStore), Guide::offline(), "");
        let (status, body) = call(&app, "GET", "/api/games/x", Value::Null);
        assert_eq!(status, 500);
        assert_eq!(body["error"], MSG_GET_FAILED);
    }

    #[test]
    fn guide_endpoint() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/guide",
            json!({
                "currentStep": "catcher",
                "previousAnswers": [
                    {"id": "object", "question": "q", "answer": "恐龍"},
                    {"id": "catcher", "question": "q", "answer": "籃子"}
                ],
                "childAnswer": "籃子"
            }),
        );
        assert_eq!(status, 200);
        assert_eq!(body["nextStep"], "color");
        assert_eq!(body["isAiGenerated"], false);
        assert!(body["gameEffect"].as_str().unwrap().contains("🦕"));

        let (_, body) = call(&app, "POST", "/api/guide", json!({"currentStep": "???"}));
        assert_eq!(body["nextStep"], "object");
        assert!(body.get("gameEffect").is_none());
    }

    #[test]
    fn preview_fills_defaults() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/preview", Value::Null);
        assert_eq!(status, 200);
        assert_eq!(body["gameConfig"]["objectType"], "蘋果");
        assert_eq!(body["gameConfig"]["catcherType"], "籃子");
        assert_eq!(body["gameConfig"]["gameTitle"], "接東西遊戲");
        assert_eq!(body["gameConfig"]["difficulty"], "medium");
        assert_eq!(body["object"]["visual"], "🍎");
        assert_eq!(body["params"]["pointsPerCatch"], 10);
        assert_eq!(
            body["startBanner"],
            "遊戲開始！\n用🧺接住所有🍎\n滑鼠或鍵盤控制移動"
        );
    }

    #[test]
    fn preview_from_query() {
        let app = app();
        let config = json!({
            "objectType": "星星",
            "catcherType": "網子",
            "objectColor": "金色",
            "difficulty": "hard",
            "gameTitle": "t"
        })
        .to_string();
        let url = format!("/api/preview?config={}", urlencoding::encode(&config));
        let (status, body) = call(&app, "GET", &url, Value::Null);
        assert_eq!(status, 200);
        assert_eq!(body["gameConfig"]["difficulty"], "hard");
        assert_eq!(body["params"]["pointsPerCatch"], 30);
        assert_eq!(body["params"]["catchRadius"], 80.0);
        assert_eq!(body["color"]["scoreFactor"], 2);

        let (status, _) = call(&app, "GET", "/api/preview?config=%7Bnope", Value::Null);
        assert_eq!(status, 400);
    }

    #[test]
    fn status_and_unknown_routes() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/status", Value::Null);
        assert_eq!(status, 200);
        assert_eq!(body["enrichment"], "no-key");
        assert_eq!(body["model"], "static");
        assert_eq!(body["store"], "memory");

        let (status, body) = call(&app, "GET", "/api/nope", Value::Null);
        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        let (status, _) = call(&app, "PUT", "/api/status", Value::Null);
        assert_eq!(status, 405);
    }
}
