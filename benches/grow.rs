use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psytree::atmosphere;
use psytree::generation::grow_tree;
use psytree::growth::map_profile;
use psytree::profile::{TraitProfile, UsageStats};
use psytree::scene::TreeScene;

fn mature_inputs() -> (TraitProfile, UsageStats) {
    let mut profile = TraitProfile::default();
    profile.openness.set("intellect", 8.0);
    profile.agreeableness.set("sympathy", 9.0);
    (profile, UsageStats::new(40, 45))
}

fn bench_map_profile(c: &mut Criterion) {
    let (profile, usage) = mature_inputs();

    c.bench_function("map_profile", |b| {
        b.iter(|| map_profile(black_box(Some(&profile)), black_box("alice"), &usage))
    });
}

fn bench_grow_tree_mature(c: &mut Criterion) {
    let (profile, usage) = mature_inputs();
    let params = map_profile(Some(&profile), "alice", &usage).unwrap();

    c.bench_function("grow_tree_mature", |b| {
        b.iter(|| grow_tree(black_box(&params), black_box(40)))
    });
}

fn bench_grow_tree_young(c: &mut Criterion) {
    let profile = TraitProfile::default();
    let usage = UsageStats::new(5, 3);
    let params = map_profile(Some(&profile), "alice", &usage).unwrap();

    c.bench_function("grow_tree_young", |b| {
        b.iter(|| grow_tree(black_box(&params), black_box(5)))
    });
}

fn bench_compose_interactive(c: &mut Criterion) {
    let (profile, usage) = mature_inputs();

    c.bench_function("compose_interactive", |b| {
        b.iter(|| {
            TreeScene::interactive(
                black_box(Some(&profile)),
                black_box("alice"),
                &usage,
                false,
                50.0,
            )
        })
    });
}

fn bench_flatten(c: &mut Criterion) {
    let (profile, usage) = mature_inputs();
    let mut scene = TreeScene::interactive(Some(&profile), "alice", &usage, true, 50.0);

    c.bench_function("flatten", |b| {
        b.iter(|| {
            scene.update(black_box(0.016));
            scene.flatten()
        })
    });
}

fn bench_interpolate(c: &mut Criterion) {
    c.bench_function("interpolate_environment", |b| {
        let mut t = 0.0_f32;
        b.iter(|| {
            t = (t + 0.5) % 100.0;
            atmosphere::interpolate(black_box(t))
        })
    });
}

criterion_group!(
    benches,
    bench_map_profile,
    bench_grow_tree_mature,
    bench_grow_tree_young,
    bench_compose_interactive,
    bench_flatten,
    bench_interpolate
);
criterion_main!(benches);
