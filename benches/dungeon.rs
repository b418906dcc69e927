use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ancient_tombs::data::GameConfig;
use ancient_tombs::world::{compute_fov, generate_dungeon};

fn bench_generation(c: &mut Criterion) {
    let params = GameConfig::default().dungeon_params();
    c.bench_function("generate_dungeon 80x43", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| generate_dungeon(&mut rng, black_box(&params)))
    });
}

fn bench_fov(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let dungeon = match generate_dungeon(&mut rng, &config.dungeon_params()) {
        Ok(dungeon) => dungeon,
        Err(e) => panic!("benchmark level failed to generate: {e}"),
    };
    let origin = dungeon.first_center();
    let mut map = dungeon.map;

    c.bench_function("compute_fov radius 10", |b| {
        b.iter(|| compute_fov(&mut map, black_box(origin), config.torch_radius))
    });
}

criterion_group!(benches, bench_generation, bench_fov);
criterion_main!(benches);
