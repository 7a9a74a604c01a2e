// kidcatch_protocol: JSON wire types for the Kidcatch HTTP API.
//
// Shared by the server (`kidcatch_server`) and any client, including the
// server's own smoke tests. Holds no behavior beyond small constructors and
// field defaulting; validation lives in the handlers.
//
// Module overview:
// - `types.rs`:    ID newtypes: `GameId` (UUID or `temp_` id), `UserId`.
// - `message.rs`:  Request/response bodies, the `Success<T>` / `ErrorBody`
//                  envelope, and the preview defaults.
//
// Game content types (`GameConfiguration`, `CreationStep`, entries, params)
// are re-used from `kidcatch_mapping` rather than mirrored, so the wire shape
// and the domain shape cannot drift.

pub mod message;
pub mod types;

pub use message::{
    CreateGameRequest, CreateGameResponse, CreatorInfo, DeleteGameRequest, ErrorBody,
    GameListResponse, GameResponse, GameView, GuideRequest, LikeAction, MessageResponse,
    PatchGameRequest, PatchGameResponse, PreviewRequest, PreviewResponse, StatusResponse,
    Success,
};
pub use types::{GameId, UserId};
