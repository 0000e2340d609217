//! Per-tick animation.
//!
//! Everything here is a pure function of the elapsed-time sequence: the same
//! shapes advanced by the same `dt` values end in the same state.

use crate::model::{Geometry, Shape};

impl Shape {
    /// Advance time-based state by `dt` seconds. Does nothing unless animation
    /// is enabled. A negative or non-finite `dt` is ignored.
    ///
    /// The pulse factor is `1 + sin(t + dt) * scale_speed * dt`, so its
    /// amplitude depends on frame time; only a fixed `dt` sequence is
    /// reproducible.
    pub fn update(&mut self, dt: f32) {
        if !self.is_animated() {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring animation tick with dt = {dt}");
            return;
        }

        if let Some(speed) = self.rotation_speed() {
            self.set_rotation(self.rotation() + speed * dt);
        }

        let base = self.scale();
        let mut pulse = None;
        match self.geometry_mut() {
            Geometry::Circle {
                scale_speed,
                pulse_time,
                ..
            }
            | Geometry::Rectangle {
                scale_speed,
                pulse_time,
                ..
            } => {
                let factor = 1.0 + (*pulse_time + dt).sin() * *scale_speed * dt;
                *pulse_time += dt;
                pulse = Some(factor);
            }
            Geometry::Text {
                blink_interval,
                blink_timer,
                visible,
                ..
            } => {
                *blink_timer += dt;
                if *blink_timer >= *blink_interval {
                    *visible = !*visible;
                    *blink_timer = 0.0;
                }
            }
            // Cubes only move through explicit rotate calls.
            _ => {}
        }
        if let Some(factor) = pulse {
            self.set_display_scale(base * factor);
        }
    }
}
