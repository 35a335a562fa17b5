//! Audio output: the player seam, its `rodio` implementation and haptic effects.

mod haptics;
mod player;
mod sink;
mod types;

pub use haptics::{HapticEffect, HapticEngine, HapticError, HapticGate, NoHaptics};
pub use player::{AudioBackend, MediaPlayer};
pub use sink::RodioBackend;
pub use types::{AudioAttributes, ContentType, PlayerError, PlayerEvent, RouteId, Usage};
