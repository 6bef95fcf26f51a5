// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A perspective fly camera.

use crate::math::{Mat4, Vec3};

/// The viewpoint of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Heading in degrees; `-90` looks down `-Z`.
    pub yaw: f32,
    /// Elevation in degrees, kept within `(-90, 90)`.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport width divided by height.
    pub aspect_ratio: f32,
    /// Near clip distance. Also uploaded to the depth program.
    pub near: f32,
    /// Far clip distance. Also uploaded to the depth program.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Turns the camera, clamping pitch short of the poles.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-89.0, 89.0);
    }

    /// The world-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
    }

    /// The view-to-clip matrix, with OpenGL's `[-1, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let front = Camera::default().front();
        assert_relative_eq!(front.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(front.z, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 200.0);
        assert_eq!(camera.pitch, 89.0);
    }
}
