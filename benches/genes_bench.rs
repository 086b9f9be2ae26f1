//! Benchmarks for symbios-genes.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use symbios_genes::{ConnectionGene, Gene, TraitConfig};

const CONFIG: &str = r#"
[link_traits.plasticity]
type = "real"
min = 0.0
max = 1.0
mutation_probability = 0.8
replace_probability = 0.1
perturb_power = 0.1

[link_traits.delay]
type = "int"
min = 1
max = 16
mutation_probability = 0.8
replace_probability = 0.1
perturb_power = 2

[link_traits.gated]
type = "bool"
mutation_probability = 0.3

[link_traits.transmitter]
type = "text"
candidates = ["glutamate", "gaba", "dopamine", "serotonin"]
weights = [4.0, 3.0, 1.0, 1.0]
mutation_probability = 0.5
"#;

fn config() -> TraitConfig {
    TraitConfig::from_toml_str(CONFIG).expect("benchmark config should load")
}

fn bench_initialize(c: &mut Criterion) {
    let config = config();

    c.bench_function("traits_initialize", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut gene = ConnectionGene::new(0, 1, 1, 0.0);
        b.iter(|| {
            gene.init_traits(&config.link_traits, &mut rng);
            black_box(&gene);
        });
    });
}

fn bench_mutation(c: &mut Criterion) {
    let config = config();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut gene = ConnectionGene::new(0, 1, 1, 0.0);
    gene.init_traits(&config.link_traits, &mut rng);

    c.bench_function("traits_mutation", |b| {
        b.iter(|| {
            gene.mutate_traits(&config.link_traits, &mut rng);
            black_box(&gene);
        });
    });
}

fn bench_mating(c: &mut Criterion) {
    let config = config();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut parent1 = ConnectionGene::new(0, 1, 1, 0.0);
    let mut parent2 = ConnectionGene::new(0, 1, 1, 0.0);
    parent1.init_traits(&config.link_traits, &mut rng);
    parent2.init_traits(&config.link_traits, &mut rng);

    c.bench_function("traits_mating", |b| {
        b.iter(|| {
            let mut child = parent1.clone();
            child.mate_traits(&parent2, &mut rng).unwrap();
            black_box(child);
        });
    });
}

fn bench_distance(c: &mut Criterion) {
    let config = config();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut gene1 = ConnectionGene::new(0, 1, 1, 0.0);
    let mut gene2 = ConnectionGene::new(0, 1, 1, 0.0);
    gene1.init_traits(&config.link_traits, &mut rng);
    gene2.init_traits(&config.link_traits, &mut rng);

    c.bench_function("traits_distance", |b| {
        b.iter(|| {
            let d = gene1.trait_distances(&gene2).unwrap();
            black_box(d.weighted_total(&config.link_traits));
        });
    });
}

criterion_group!(
    benches,
    bench_initialize,
    bench_mutation,
    bench_mating,
    bench_distance,
);
criterion_main!(benches);
