// kidcatch_scene: the catch minigame itself, without a renderer.
//
// A `CatchScene` owns one round of play for a `ResolvedGame`: catcher
// position, falling items, score and the countdown. Callers drive it with
// `step(dt_ms, input)` and draw whatever the returned `SceneEvent`s and
// accessors describe. Given a seed and an input sequence, a round replays
// exactly, which is what the tests and the CLI's `play` command rely on.
//
// - `config.rs`: `SceneConfig`, field geometry and timing constants.
// - `scene.rs`:  `CatchScene`, input/event types, banner and end texts.

pub mod config;
pub mod scene;

pub use config::SceneConfig;
pub use scene::{
    CatchScene, FallingItem, RoundSummary, SceneEvent, SceneInput, ease_out_quad, end_message,
    start_banner,
};
