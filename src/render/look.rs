use glam::{Quat, Vec3};

/// Initial camera heading inside the photosphere.
///
/// Yaw 0 looks down -Z, positive yaw turns right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookDirection {
    yaw_degrees: f32,
}

impl LookDirection {
    pub fn from_yaw_degrees(yaw_degrees: f64) -> Self {
        let yaw = if yaw_degrees.is_finite() {
            wrap_degrees(yaw_degrees as f32)
        } else {
            0.0
        };
        Self { yaw_degrees: yaw }
    }

    /// Yaw wrapped into [-180, 180).
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw_degrees.to_radians())
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

fn wrap_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
