//! Gameplay tuning values.
//!
//! Distances and positions are in world pixels, speeds in pixels per second,
//! durations in milliseconds unless stated otherwise.

/// Global physics.
pub mod physics {
    /// Downward acceleration in px/s².
    pub const GRAVITY: f32 = 980.0;
    pub const MAX_FALL_SPEED: f32 = 800.0;
    pub const DEFAULT_FRICTION: f32 = 0.8;
    pub const DEFAULT_MAX_VELOCITY: f32 = 800.0;
}

/// Ground locomotion and jumping.
pub mod movement {
    pub const WALK_SPEED: f32 = 150.0;
    pub const RUN_SPEED: f32 = 250.0;
    pub const CROUCH_SPEED: f32 = 75.0;
    pub const JUMP_VELOCITY_MIN: f32 = 500.0;
    /// Fraction of walk speed reachable while airborne.
    pub const AIR_CONTROL_FACTOR: f32 = 0.5;
    /// Per-tick blend toward the air-control target velocity.
    pub const AIR_CONTROL_BLEND: f32 = 0.1;
    /// Recovery time after touching down.
    pub const LANDING_DURATION: f32 = 100.0;
}

pub mod dodge_roll {
    pub const DISTANCE: f32 = 180.0;
    pub const DURATION: f32 = 500.0;
    /// Leading window of invulnerability.
    pub const I_FRAMES_START: f32 = 200.0;
}

pub mod backstep {
    pub const DISTANCE: f32 = 80.0;
    pub const DURATION: f32 = 300.0;
    pub const I_FRAMES_START: f32 = 100.0;
}

pub mod crouch_slide {
    pub const DISTANCE: f32 = 200.0;
    pub const DURATION: f32 = 500.0;
    pub const COOLDOWN: f32 = 500.0;
}

pub mod jump_forgiveness {
    /// Grace window after walking off a ledge.
    pub const COYOTE_TIME: f32 = 100.0;
    /// How long a jump pressed in the air is remembered.
    pub const JUMP_BUFFER: f32 = 100.0;
}

pub mod input_buffer {
    /// 8 frames at 60 fps.
    pub const WINDOW: f64 = 133.0;
}

pub mod camera {
    pub const DEAD_ZONE_WIDTH: f32 = 64.0;
    pub const DEAD_ZONE_HEIGHT: f32 = 64.0;
    /// Forward shift of the camera target while running.
    pub const LOOK_AHEAD_DISTANCE: f32 = 100.0;
    /// Per-tick fraction of the out-of-dead-zone offset the camera covers.
    pub const FOLLOW_FACTOR: f32 = 0.1;
    pub const SHAKE_AMPLITUDE: f32 = 10.0;
    /// Shake intensity reaches 1.0 at this much remaining duration.
    pub const SHAKE_FADE: f32 = 1000.0;
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;
}

/// Placeholder character body used by the ground plane and world bounds.
pub mod character {
    pub const WIDTH: f32 = 32.0;
    pub const HEIGHT: f32 = 64.0;
}

/// Weapon zone thresholds relative to the character, in pixels.
pub mod weapon_zone {
    pub const BEHIND_THRESHOLD: f32 = 20.0;
    pub const VERTICAL_THRESHOLD: f32 = 30.0;
}

/// Fixed-step scheduling.
pub mod time {
    /// One physics tick at 60 Hz, in milliseconds.
    pub const FIXED_TIMESTEP: f64 = 1000.0 / 60.0;
    /// Upper bound on a single frame's delta (spiral-of-death guard).
    pub const MAX_FRAME_TIME: f64 = 250.0;
}
