use std::sync::Arc;

use vesper_core::errors::Result;

use crate::track::{KeyframeCursor, KeyframeTrack};
use crate::value::AnimationValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    Once,
    #[default]
    Loop,
    PingPong,
    /// Loops like [`Loop`](Self::Loop), but every completed cycle adds the
    /// track's `last - first` delta, so a walk cycle keeps walking.
    Relative,
}

/// Plays one keyframe track over time.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    track: Arc<KeyframeTrack>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    /// Number of whole cycles wrapped in `Relative` mode (negative when
    /// playing backwards).
    cycles: i32,
    cursor: KeyframeCursor,
}

impl AnimationAction {
    #[must_use]
    pub fn new(track: Arc<KeyframeTrack>) -> Self {
        Self {
            track,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::default(),
            paused: false,
            enabled: true,
            cycles: 0,
            cursor: KeyframeCursor::default(),
        }
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn track(&self) -> &Arc<KeyframeTrack> {
        &self.track
    }

    #[must_use]
    pub fn cycles(&self) -> i32 {
        self.cycles
    }

    /// Rewinds to the start and forgets accumulated relative cycles.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.cycles = 0;
        self.paused = false;
        self.cursor = KeyframeCursor::default();
    }

    /// Advances playback time by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.track.duration();
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                    log::debug!("AnimationAction finished after {duration:.3}s");
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop | LoopMode::Relative => {
                let wrapped = (self.time / duration).floor();
                if wrapped != 0.0 {
                    self.time -= wrapped * duration;
                    if self.loop_mode == LoopMode::Relative {
                        self.cycles += wrapped as i32;
                    }
                }
            }
            LoopMode::PingPong => {
                self.time = self.time.rem_euclid(duration * 2.0);
            }
        }
    }

    /// Position inside the track. Equal to `time` except in `PingPong`
    /// mode, where the second half of the period plays backwards.
    #[must_use]
    pub fn local_time(&self) -> f32 {
        let duration = self.track.duration();
        if self.loop_mode == LoopMode::PingPong && self.time > duration {
            duration * 2.0 - self.time
        } else {
            self.time
        }
    }

    /// Value of the track at the current time.
    pub fn sample(&mut self) -> Result<AnimationValue> {
        let value = self.track.sample_with_cursor(self.local_time(), &mut self.cursor)?;
        if self.loop_mode != LoopMode::Relative || self.cycles == 0 || self.track.animation_type().is_discrete() {
            return Ok(value);
        }

        let offset = self
            .track
            .last_value()
            .subtract(self.track.first_value())?
            .scale(self.cycles as f32)?;
        value.add(&offset)
    }
}
