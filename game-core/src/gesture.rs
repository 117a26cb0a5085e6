use game_types::Gesture;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Angular velocity above which a tilt counts as a gesture, in rad/s.
pub const DEFAULT_TILT_THRESHOLD: f32 = 5.0;

/// Device axis that carries the forward/backward tilt when the phone is held
/// landscape against the forehead.
pub const TILT_AXIS: Axis = Axis::Y;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One gyroscope reading in device-native units (rad/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngularVelocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AngularVelocity {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStatus {
    Available,
    Unavailable,
}

/// Turns a stream of gyroscope samples into at most one gesture per armed word.
///
/// The detector starts latched: nothing is emitted until `arm` is called for
/// the first visible word.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    threshold: f32,
    latched: bool,
    status: SensorStatus,
    unavailable_reported: bool,
}

impl GestureDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            latched: true,
            status: SensorStatus::Available,
            unavailable_reported: false,
        }
    }

    /// Resets the one-shot latch for a newly visible word.
    pub fn arm(&mut self) {
        self.latched = false;
    }

    /// Stops emitting until the next `arm`, e.g. while the app is in the background.
    pub fn disarm(&mut self) {
        self.latched = true;
    }

    pub fn is_armed(&self) -> bool {
        !self.latched
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn on_sample(&mut self, reading: AngularVelocity) -> Option<Gesture> {
        if self.latched {
            return None;
        }

        let value = reading.axis(TILT_AXIS);
        let gesture = if value < -self.threshold {
            Gesture::Correct
        } else if value > self.threshold {
            Gesture::Skip
        } else {
            return None;
        };

        self.latched = true;
        debug!("Detected {:?} at {:.2} rad/s", gesture, value);
        Some(gesture)
    }

    /// Manual fallback when the sensor is missing; obeys the same latch.
    pub fn trigger(&mut self, gesture: Gesture) -> Option<Gesture> {
        if self.latched {
            return None;
        }
        self.latched = true;
        Some(gesture)
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Marks the sensor as missing. Returns true only the first time, so the
    /// condition is reported upward once.
    pub fn mark_unavailable(&mut self) -> bool {
        self.status = SensorStatus::Unavailable;
        if self.unavailable_reported {
            return false;
        }
        self.unavailable_reported = true;
        warn!("Gyroscope unavailable, manual triggers required");
        true
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_THRESHOLD)
    }
}
