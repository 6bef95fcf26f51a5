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

use criterion::{criterion_group, criterion_main, Criterion};
use meadow_core::math::{Transform, Vec3};
use meadow_core::renderer::InstanceBuffer;
use meadow_core::testing::MockDevice;
use meadow_lanes::instancing::{scatter_models, GroundFootprint, ScatterConfig};
use std::hint::black_box;

fn bench_instance_packing(c: &mut Criterion) {
    let ground = GroundFootprint::from_plane_transform(
        &Transform::IDENTITY.with_scale(Vec3::new(70.0, 1.0, 70.0)),
    );
    // 100,000 instances, as in a dense grass field
    let models = scatter_models(&ScatterConfig::default(), &ground);

    let mut group = c.benchmark_group("Instance Packing");
    group.sample_size(20);

    group.bench_function("Scatter 100k", |b| {
        b.iter(|| black_box(scatter_models(&ScatterConfig::default(), &ground)));
    });

    group.bench_function("Pack + Upload 100k", |b| {
        b.iter(|| {
            let device = MockDevice::new();
            let mut instances = InstanceBuffer::from_models(models.iter().copied());
            black_box(instances.upload(&device).unwrap());
        });
    });

    group.bench_function("Animate + Flush 100k", |b| {
        let device = MockDevice::new();
        let mut instances = InstanceBuffer::from_models(models.iter().copied());
        instances.upload(&device).unwrap();
        b.iter(|| {
            instances.update_models(|i, model| {
                model.w_axis.y = 0.5 + (i % 7) as f32 * 0.01;
            });
            instances.flush(&device).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_instance_packing);
criterion_main!(benches);
