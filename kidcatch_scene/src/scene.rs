// Headless catch-the-falling-objects round.
//
// The scene is driven entirely by `step(dt_ms, input)`; there is no clock of
// its own. Each step, in order:
//
//   1. apply input (pointer sets the catcher x, a held key nudges it),
//   2. hide the start banner once its time is up,
//   3. advance every falling item along its tween and resolve catches and
//      misses,
//   4. spawn new items for each full spawn interval elapsed,
//   5. count the round timer down in whole ticks, ending the round at zero.
//
// Items tween from `spawn_y` to `field_height + fall_overshoot` with a
// quadratic ease-out (fast start, slowing toward the bottom). An item is
// caught when it is within the catch radius of the catcher *and* inside the
// bottom catch zone; an item that finishes its tween uncaught is missed.
//
// All randomness (spawn x, fall duration) comes from a seeded `StdRng`, so
// a seed plus an input sequence replays exactly. `restart` reseeds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use kidcatch_mapping::ResolvedGame;

use crate::config::SceneConfig;

/// Player input for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SceneInput {
    #[default]
    Idle,
    /// Pointer moved to this x.
    Pointer(f32),
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "event")]
pub enum SceneEvent {
    Spawned { id: u64, x: f32, duration_ms: u64 },
    Caught { id: u64, points: u32, score: u32 },
    Missed { id: u64 },
    BannerHidden,
    TimerTick { time_left: u32 },
    Ended(RoundSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub score: u32,
    pub caught: u32,
    pub missed: u32,
    /// Rounded caught / (caught + missed); 0 when nothing fell.
    pub accuracy_percent: u32,
}

impl RoundSummary {
    fn from_counts(score: u32, caught: u32, missed: u32) -> Self {
        let total = caught + missed;
        let accuracy_percent = if total == 0 {
            0
        } else {
            (f64::from(caught) * 100.0 / f64::from(total)).round() as u32
        };
        Self {
            score,
            caught,
            missed,
            accuracy_percent,
        }
    }
}

/// One item in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    start_y: f32,
    end_y: f32,
    duration_ms: u64,
    elapsed_ms: u64,
}

impl FallingItem {
    fn advance(&mut self, dt_ms: u64) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        let t = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.y = self.start_y + (self.end_y - self.start_y) * ease_out_quad(t);
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// Quadratic ease-out on `[0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// The text shown over the field for the first few seconds.
pub fn start_banner(game: &ResolvedGame) -> String {
    format!(
        "遊戲開始！\n用{}接住所有{}\n滑鼠或鍵盤控制移動",
        game.catcher.visual, game.object.visual
    )
}

/// End-of-round text.
pub fn end_message(game: &ResolvedGame, summary: &RoundSummary) -> String {
    format!(
        "遊戲結束！\n\n你用{}接了{}個{}！\n\n最終分數: {}\n錯過物品: {}\n準確率: {}%",
        game.catcher.visual,
        summary.caught,
        game.object.visual,
        summary.score,
        summary.missed,
        summary.accuracy_percent
    )
}

pub struct CatchScene {
    game: ResolvedGame,
    config: SceneConfig,
    seed: u64,
    rng: StdRng,
    catch_radius: f32,
    catcher_x: f32,
    items: Vec<FallingItem>,
    next_id: u64,
    score: u32,
    caught: u32,
    missed: u32,
    time_left: u32,
    elapsed_ms: u64,
    spawn_accum_ms: u64,
    timer_accum_ms: u64,
    banner_visible: bool,
    summary: Option<RoundSummary>,
}

impl CatchScene {
    pub fn new(game: ResolvedGame, config: SceneConfig, seed: u64) -> Self {
        let catch_radius = config.field().scale(game.params.catch_radius);
        let mut scene = Self {
            game,
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            catch_radius,
            catcher_x: 0.0,
            items: Vec::new(),
            next_id: 0,
            score: 0,
            caught: 0,
            missed: 0,
            time_left: 0,
            elapsed_ms: 0,
            spawn_accum_ms: 0,
            timer_accum_ms: 0,
            banner_visible: true,
            summary: None,
        };
        scene.reset();
        scene
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.catcher_x = self.config.field_width / 2.0;
        self.items.clear();
        self.next_id = 0;
        self.score = 0;
        self.caught = 0;
        self.missed = 0;
        self.time_left = self.game.params.round_secs;
        self.elapsed_ms = 0;
        self.spawn_accum_ms = 0;
        self.timer_accum_ms = 0;
        self.banner_visible = self.config.banner_ms > 0;
        self.summary = None;
    }

    /// Back to the initial state, same seed.
    pub fn restart(&mut self) {
        info!(title = %self.game.configuration.game_title, "round restarted");
        self.reset();
    }

    pub fn game(&self) -> &ResolvedGame {
        &self.game
    }

    pub fn is_active(&self) -> bool {
        self.summary.is_none()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn catcher_x(&self) -> f32 {
        self.catcher_x
    }

    pub fn catch_radius(&self) -> f32 {
        self.catch_radius
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    pub fn banner(&self) -> Option<String> {
        self.banner_visible.then(|| start_banner(&self.game))
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn step(&mut self, dt_ms: u64, input: SceneInput) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if !self.is_active() {
            return events;
        }

        self.apply_input(input);

        self.elapsed_ms += dt_ms;
        if self.banner_visible && self.elapsed_ms >= self.config.banner_ms {
            self.banner_visible = false;
            events.push(SceneEvent::BannerHidden);
        }

        self.advance_items(dt_ms, &mut events);

        let interval = self.game.params.spawn_interval_ms.max(1);
        self.spawn_accum_ms += dt_ms;
        while self.spawn_accum_ms >= interval {
            self.spawn_accum_ms -= interval;
            events.push(self.spawn());
        }

        let tick = self.config.timer_tick_ms.max(1);
        self.timer_accum_ms += dt_ms;
        while self.timer_accum_ms >= tick && self.is_active() {
            self.timer_accum_ms -= tick;
            self.time_left = self.time_left.saturating_sub(1);
            events.push(SceneEvent::TimerTick {
                time_left: self.time_left,
            });
            if self.time_left == 0 {
                events.push(self.end());
            }
        }

        events
    }

    fn apply_input(&mut self, input: SceneInput) {
        let step = self.config.catcher_speed * self.config.key_frame_secs;
        let x = match input {
            SceneInput::Idle => return,
            SceneInput::Pointer(x) => x,
            SceneInput::Left => self.catcher_x - step,
            SceneInput::Right => self.catcher_x + step,
        };
        self.catcher_x = self.config.clamp_catcher_x(x);
    }

    fn advance_items(&mut self, dt_ms: u64, events: &mut Vec<SceneEvent>) {
        let catcher_y = self.config.catcher_y();
        let zone_top = self.config.field_height - self.config.catch_zone;
        let points = self.game.params.points_per_catch;

        let mut kept = Vec::with_capacity(self.items.len());
        for mut item in std::mem::take(&mut self.items) {
            item.advance(dt_ms);
            let distance = (item.x - self.catcher_x).hypot(item.y - catcher_y);
            if distance < self.catch_radius && item.y > zone_top {
                self.score += points;
                self.caught += 1;
                debug!(id = item.id, score = self.score, "caught");
                events.push(SceneEvent::Caught {
                    id: item.id,
                    points,
                    score: self.score,
                });
            } else if item.finished() {
                self.missed += 1;
                events.push(SceneEvent::Missed { id: item.id });
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
    }

    fn spawn(&mut self) -> SceneEvent {
        let margin = self.config.spawn_margin.round() as i32;
        let max_x = (self.config.field_width.round() as i32 - margin).max(margin);
        let x = self.rng.gen_range(margin..=max_x) as f32;
        let max_ms = self.config.fall_max_ms.max(self.config.fall_min_ms).max(1);
        let min_ms = self.config.fall_min_ms.clamp(1, max_ms);
        let duration_ms = self.rng.gen_range(min_ms..=max_ms);

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(FallingItem {
            id,
            x,
            y: self.config.spawn_y,
            start_y: self.config.spawn_y,
            end_y: self.config.field_height + self.config.fall_overshoot,
            duration_ms,
            elapsed_ms: 0,
        });
        SceneEvent::Spawned { id, x, duration_ms }
    }

    fn end(&mut self) -> SceneEvent {
        self.items.clear();
        let summary = RoundSummary::from_counts(self.score, self.caught, self.missed);
        info!(
            score = summary.score,
            caught = summary.caught,
            missed = summary.missed,
            accuracy = summary.accuracy_percent,
            "round ended"
        );
        self.summary = Some(summary);
        SceneEvent::Ended(summary)
    }
}
