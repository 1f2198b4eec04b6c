//! Benchmark for station transactions.
//!
//! Run with: cargo bench --package mutagen_station --bench station_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mutagen_core::{ClassTag, ItemCatalog, ItemId};
use mutagen_station::{FusionStation, Inventory, Pool, PooledInventory, SlotId, StationConfig};

fn create_station() -> (FusionStation<PooledInventory>, ItemId, ItemId) {
    let mut catalog = ItemCatalog::new();
    let wing = catalog
        .add_base("Honey Wing", ClassTag::Winged, 90.0)
        .unwrap();
    let jelly = catalog
        .add_base("Queen Jelly", ClassTag::Swarm, 100.0)
        .unwrap();

    let station = FusionStation::new(catalog, PooledInventory::new(), StationConfig::default());
    (station, wing, jelly)
}

fn benchmark_place_and_clear(c: &mut Criterion) {
    let (mut station, wing, jelly) = create_station();
    station.inventory_mut().add_units(wing, 8);
    station.inventory_mut().add_units(jelly, 8);

    c.bench_function("place_place_clear", |b| {
        b.iter(|| {
            station.place_into_slot(SlotId::IngredientA, black_box(wing), 4, Pool::Active);
            station.place_into_slot(SlotId::IngredientB, black_box(jelly), 4, Pool::All);
            black_box(station.clear_all())
        });
    });
}

fn benchmark_merge_cycle(c: &mut Criterion) {
    let (mut station, wing, jelly) = create_station();

    c.bench_function("place_merge_claim", |b| {
        b.iter(|| {
            station.inventory_mut().add_units(wing, 2);
            station.inventory_mut().add_units(jelly, 1);
            station.place_into_slot(SlotId::IngredientA, wing, 2, Pool::All);
            station.place_into_slot(SlotId::IngredientB, jelly, 1, Pool::All);
            let report = station.merge();
            station.claim_output_to_inventory();
            // Keep the inventory from filling up with products.
            if let Some(product) = report.merge.and_then(|m| m.product) {
                station.inventory_mut().remove_up_to(Pool::All, product, 1);
                station.inventory_mut().remove_up_to(Pool::Active, product, 1);
            }
            black_box(report)
        });
    });
}

fn benchmark_chance_query(c: &mut Criterion) {
    let (mut station, wing, jelly) = create_station();
    station.inventory_mut().add_units(wing, 1);
    station.inventory_mut().add_units(jelly, 1);
    station.place_into_slot(SlotId::IngredientA, wing, 1, Pool::All);
    station.place_into_slot(SlotId::IngredientB, jelly, 1, Pool::All);

    c.bench_function("current_chance", |b| {
        b.iter(|| black_box(station.current_chance()));
    });
}

criterion_group!(
    benches,
    benchmark_place_and_clear,
    benchmark_merge_cycle,
    benchmark_chance_query
);
criterion_main!(benches);
