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

//! Uniform random placement of instances over a ground rectangle.

use meadow_core::math::{Mat4, Rotation, Transform, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A value that is either fixed or drawn uniformly from an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Jitter {
    /// Always the same value.
    Fixed(f32),
    /// Uniform in `[min, max]`.
    Uniform {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

impl Jitter {
    fn is_finite(&self) -> bool {
        match *self {
            Jitter::Fixed(value) => value.is_finite(),
            Jitter::Uniform { min, max } => min.is_finite() && max.is_finite(),
        }
    }

    /// Replaces a jitter with a non-finite bound by `Fixed(fallback)`.
    fn or_fixed(self, what: &str, fallback: f32) -> Self {
        if self.is_finite() {
            self
        } else {
            log::warn!("Scatter {what} {self:?} is not finite, using {fallback}.");
            Jitter::Fixed(fallback)
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> f32 {
        match *self {
            Jitter::Fixed(value) => value,
            Jitter::Uniform { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// How to scatter instances over a ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of instances.
    pub count: usize,
    /// World-space height of every instance.
    pub height: f32,
    /// Shrinks the sampled area: half-extents are divided by this value.
    /// Values below 1 are treated as 1.
    pub constraint_divisor: f32,
    /// Uniform scale of each instance.
    pub scale: Jitter,
    /// Rotation around Y, in degrees.
    pub yaw: Jitter,
    /// Seed of the generator, so a field is reproducible.
    pub seed: u64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 100_000,
            height: 0.5,
            constraint_divisor: 1.0,
            scale: Jitter::Fixed(1.0),
            yaw: Jitter::Uniform {
                min: 0.0,
                max: 360.0,
            },
            seed: 0,
        }
    }
}

/// The XZ rectangle instances are scattered over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundFootprint {
    /// Center of the rectangle on the XZ plane.
    pub center: Vec2,
    /// Half the width (X) and depth (Z).
    pub half_extents: Vec2,
}

impl GroundFootprint {
    /// The footprint of a unit plane placed by `transform`: a 70x70 scale
    /// centered on the origin spans `[-35, 35]` on both axes.
    pub fn from_plane_transform(transform: &Transform) -> Self {
        Self {
            center: Vec2::new(transform.position.x, transform.position.z),
            half_extents: Vec2::new(transform.scale.x.abs(), transform.scale.z.abs()) * 0.5,
        }
    }
}

/// Samples `config.count` transforms inside `footprint`.
pub fn scatter_transforms(config: &ScatterConfig, footprint: &GroundFootprint) -> Vec<Transform> {
    let divisor = if !config.constraint_divisor.is_finite() {
        log::warn!(
            "Scatter constraint divisor {} is not finite, using 1.",
            config.constraint_divisor
        );
        1.0
    } else if config.constraint_divisor < 1.0 {
        log::warn!(
            "Scatter constraint divisor {} is below 1, using 1.",
            config.constraint_divisor
        );
        1.0
    } else {
        config.constraint_divisor
    };
    let height = if config.height.is_finite() {
        config.height
    } else {
        log::warn!("Scatter height {} is not finite, using 0.", config.height);
        0.0
    };
    let scale = config.scale.or_fixed("scale", 1.0);
    let yaw = config.yaw.or_fixed("yaw", 0.0);
    let half = footprint.half_extents / divisor;
    let mut rng = StdRng::seed_from_u64(config.seed);

    (0..config.count)
        .map(|_| {
            let x = footprint.center.x + rng.gen_range(-half.x..=half.x);
            let z = footprint.center.y + rng.gen_range(-half.y..=half.y);
            let scale = scale.sample(&mut rng);
            let yaw = yaw.sample(&mut rng);
            Transform::from_position(Vec3::new(x, height, z))
                .with_rotation(Rotation::new(yaw, 0.0, 0.0))
                .with_scale(Vec3::splat(scale))
        })
        .collect()
}

/// Like [`scatter_transforms`], returning model matrices.
pub fn scatter_models(config: &ScatterConfig, footprint: &GroundFootprint) -> Vec<Mat4> {
    scatter_transforms(config, footprint)
        .iter()
        .map(Transform::to_mat4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let config = ScatterConfig {
            count: 32,
            ..Default::default()
        };
        let ground = GroundFootprint::from_plane_transform(
            &Transform::IDENTITY.with_scale(Vec3::new(10.0, 1.0, 10.0)),
        );
        assert_eq!(
            scatter_transforms(&config, &ground),
            scatter_transforms(&config, &ground)
        );
    }

    #[test]
    fn divisor_shrinks_the_area() {
        let config = ScatterConfig {
            count: 1_000,
            constraint_divisor: 4.0,
            ..Default::default()
        };
        let ground = GroundFootprint {
            center: Vec2::new(100.0, -100.0),
            half_extents: Vec2::splat(20.0),
        };
        for t in scatter_transforms(&config, &ground) {
            assert!((95.0..=105.0).contains(&t.position.x));
            assert!((-105.0..=-95.0).contains(&t.position.z));
        }
    }

    #[test]
    fn inverted_jitter_range_is_accepted() {
        let config = ScatterConfig {
            count: 10,
            scale: Jitter::Uniform { min: 2.0, max: 1.0 },
            ..Default::default()
        };
        let ground = GroundFootprint {
            center: Vec2::ZERO,
            half_extents: Vec2::ONE,
        };
        for t in scatter_transforms(&config, &ground) {
            assert!((1.0..=2.0).contains(&t.scale.x));
        }
    }

    #[test]
    fn non_finite_settings_fall_back_instead_of_panicking() {
        let config = ScatterConfig {
            count: 50,
            constraint_divisor: f32::NAN,
            scale: Jitter::Uniform {
                min: f32::NAN,
                max: 2.0,
            },
            yaw: Jitter::Uniform {
                min: 0.0,
                max: f32::INFINITY,
            },
            ..Default::default()
        };
        let ground = GroundFootprint {
            center: Vec2::ZERO,
            half_extents: Vec2::splat(5.0),
        };
        let field = scatter_transforms(&config, &ground);
        assert_eq!(field.len(), 50);
        for t in field {
            assert!((-5.0..=5.0).contains(&t.position.x));
            assert_eq!(t.scale, Vec3::ONE);
        }
    }

    #[test]
    fn nan_divisor_from_ron_is_tolerated() {
        let config: ScatterConfig =
            ron::de::from_str("(count: 4, constraint_divisor: NaN)").unwrap();
        assert!(config.constraint_divisor.is_nan());
        let ground = GroundFootprint {
            center: Vec2::ZERO,
            half_extents: Vec2::ONE,
        };
        assert_eq!(scatter_models(&config, &ground).len(), 4);
    }
}
