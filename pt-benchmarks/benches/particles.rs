use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pt_config::TreeConfig;
use pt_frame::{PixelGrid, SceneFrame, Shape};
use pt_particles::{Mode, ParticleBuffers, ParticleTree, Scene};
use pt_renderer_trait::Renderer;
use rand::{rngs::StdRng, SeedableRng};
use std::{
    hint::black_box,
    sync::Arc,
    time::{Duration, Instant},
};
use strum::IntoEnumIterator;

/// The delta of a single frame at 60fps.
const FRAME: f32 = 1. / 60.;

struct SimpleRenderer;

impl Renderer for SimpleRenderer {
    fn init() -> Self {
        Self
    }

    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        // Do nothing, but don't optimise this away
        black_box(frame);
    }
}

fn config(count: usize) -> TreeConfig {
    TreeConfig {
        particle_count: count,
        ..TreeConfig::default()
    }
}

fn gradient() -> Arc<PixelGrid> {
    Arc::new(PixelGrid::from_fn(|x, y| {
        [x as f32 / 99., y as f32 / 99., 0.5, 1.]
    }))
}

fn update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [1_000, 30_000, 200_000] {
        for mode in Mode::iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode} steady"), count),
                &count,
                |b, &count| {
                    let start = Instant::now();
                    let mut tree = ParticleTree::new(config(count));
                    tree.set_image(Some(gradient()), start);
                    tree.set_mode(mode, start);

                    // Get past the burst so that every iteration eases
                    let mut now = start + Duration::from_secs(2);
                    tree.update(FRAME, now);

                    b.iter(|| {
                        now += Duration::from_millis(16);
                        black_box(tree.update(FRAME, now));
                    });
                },
            );
        }
    }

    group.finish();
}

fn retarget(c: &mut Criterion) {
    let image = gradient();
    let shapes = [
        Shape::Tree {
            height: 4.2,
            width: 4.,
            colour: TreeConfig::default().base_colour(),
        },
        Shape::Scatter,
        Shape::Image(&image),
    ];

    let mut group = c.benchmark_group("retarget");

    for shape in shapes {
        group.bench_function(shape.name(), |b| {
            let mut rng = StdRng::seed_from_u64(12345);
            let mut buffers = ParticleBuffers::new(30_000, &mut rng);

            b.iter(|| buffers.retarget(black_box(&shape), &mut rng));
        });
    }

    group.finish();
}

fn scene(c: &mut Criterion) {
    c.bench_function("scene update and render", |b| {
        let mut scene = Scene::new(config(30_000));
        let mut renderer = SimpleRenderer::init();
        let mut now = Instant::now();
        scene.start();

        b.iter(|| {
            now += Duration::from_millis(16);
            scene.update(FRAME, now);
            renderer.render_frame(&scene.frame());
        });
    });
}

criterion_group!(benches, update, retarget, scene);
criterion_main!(benches);
