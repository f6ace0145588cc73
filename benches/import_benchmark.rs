use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use zeromoto_tracker::services::csv_io::parse_import;
use zeromoto_tracker::services::{EmissionCatalog, TripLedger};

const ROWS: usize = 10_000;

fn build_trip_log(rows: usize) -> String {
    let vehicles = [
        "Petrol Scooter",
        " diesel car",
        "ELECTRIC SCOOTER (GRID AVG)",
        "Electric Scooter (Clean Energy)",
        "Unlisted Moped",
    ];

    let mut csv = String::from("Date,Scooter ID,Distance (km),Vehicle Type\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "2025-03-{:02},ZM-{:04},{}.{},{}\n",
            i % 28 + 1,
            i % 500,
            i % 40,
            i % 10,
            vehicles[i % vehicles.len()]
        ));
    }
    csv
}

fn benchmark_bulk_import(c: &mut Criterion) {
    let catalog = EmissionCatalog::default();
    let csv = build_trip_log(ROWS);
    let rows = parse_import(csv.as_bytes()).expect("Failed to parse trip log");

    let mut group = c.benchmark_group("bulk_import");

    group.bench_function("parse_10k_rows", |b| {
        b.iter(|| parse_import(black_box(csv.as_bytes())))
    });

    group.bench_function("append_10k_rows", |b| {
        b.iter(|| {
            let mut ledger = TripLedger::default();
            ledger.append_bulk(&catalog, black_box(rows.clone()))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_bulk_import);
criterion_main!(benches);
