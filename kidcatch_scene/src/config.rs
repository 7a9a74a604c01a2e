// Scene tuning constants.
//
// Everything here is in the scene's own pixel space. The defaults describe
// the 400×600 logical field the lexicon's catch radii are expressed in; other
// field sizes scale the radius by width (`PlayField::scale`).

use serde::{Deserialize, Serialize};

use kidcatch_mapping::PlayField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Keyboard movement speed, px per second of nominal frame time.
    pub catcher_speed: f32,
    /// Seconds of movement applied per update while a key is held.
    pub key_frame_secs: f32,
    /// Catcher's distance above the bottom edge.
    pub catcher_bottom_offset: f32,
    /// Catcher x is kept within `[margin, width - margin]`.
    pub catcher_margin: f32,
    /// Items spawn with x in `[margin, width - margin]`.
    pub spawn_margin: f32,
    pub spawn_y: f32,
    /// Items fall until `field_height + fall_overshoot`.
    pub fall_overshoot: f32,
    pub fall_min_ms: u64,
    pub fall_max_ms: u64,
    /// Height of the band at the bottom where catches count.
    pub catch_zone: f32,
    pub banner_ms: u64,
    pub timer_tick_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field_width: PlayField::LOGICAL.width,
            field_height: PlayField::LOGICAL.height,
            catcher_speed: 300.0,
            key_frame_secs: 0.016,
            catcher_bottom_offset: 50.0,
            catcher_margin: 50.0,
            spawn_margin: 50.0,
            spawn_y: -30.0,
            fall_overshoot: 50.0,
            fall_min_ms: 2000,
            fall_max_ms: 4000,
            catch_zone: 100.0,
            banner_ms: 3000,
            timer_tick_ms: 1000,
        }
    }
}

impl SceneConfig {
    /// Parse from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn field(&self) -> PlayField {
        PlayField {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn catcher_y(&self) -> f32 {
        self.field_height - self.catcher_bottom_offset
    }

    pub fn clamp_catcher_x(&self, x: f32) -> f32 {
        x.clamp(self.catcher_margin, self.field_width - self.catcher_margin)
    }
}
