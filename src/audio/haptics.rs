//! Haptic effects attached to an audio route.
//!
//! The effect itself is produced by the platform; this module only models
//! availability, creation and the enabled flag.

use thiserror::Error;

use super::types::RouteId;

#[derive(Debug, Error)]
pub enum HapticError {
    #[error("haptic generation is not available on this device")]
    Unavailable,
    #[error("failed to create haptic effect for route {route}: {reason}")]
    Create { route: RouteId, reason: String },
}

pub trait HapticEffect {
    fn set_enabled(&mut self, enabled: bool) -> Result<(), HapticError>;
    fn release(&mut self);
}

pub trait HapticEngine {
    type Effect: HapticEffect;

    /// Must be checked before `create`.
    fn is_available(&self) -> bool;
    fn create(&mut self, route: RouteId) -> Result<Self::Effect, HapticError>;
}

/// Engine for hosts without a haptic generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

#[derive(Debug)]
pub enum NoEffect {}

impl HapticEffect for NoEffect {
    fn set_enabled(&mut self, _enabled: bool) -> Result<(), HapticError> {
        match *self {}
    }

    fn release(&mut self) {
        match *self {}
    }
}

impl HapticEngine for NoHaptics {
    type Effect = NoEffect;

    fn is_available(&self) -> bool {
        false
    }

    fn create(&mut self, _route: RouteId) -> Result<NoEffect, HapticError> {
        Err(HapticError::Unavailable)
    }
}

/// Wraps an engine behind the user's `haptics.enabled` switch.
#[derive(Debug, Clone)]
pub struct HapticGate<E> {
    inner: E,
    enabled: bool,
}

impl<E> HapticGate<E> {
    pub fn new(inner: E, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    /// Whether the user turned haptics off.
    pub fn switched_off(&self) -> bool {
        !self.enabled
    }
}

impl<E: HapticEngine> HapticEngine for HapticGate<E> {
    type Effect = E::Effect;

    fn is_available(&self) -> bool {
        self.enabled && self.inner.is_available()
    }

    fn create(&mut self, route: RouteId) -> Result<Self::Effect, HapticError> {
        if !self.enabled {
            return Err(HapticError::Unavailable);
        }
        self.inner.create(route)
    }
}
