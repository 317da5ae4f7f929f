//! Benchmarks for venue sorting
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use venuebook::venue::*;

fn create_test_venues(count: usize) -> Vec<Venue> {
    (0..count)
        .map(|i| {
            let mut venue = Venue::new(format!("Venue {}", count - i));
            if i % 7 != 0 {
                venue = venue.drive_time((i * 37 % 240) as u32);
            }
            match i % 4 {
                0 => venue.price_saturday(PRICE_UNAVAILABLE),
                1 => venue.price_saturday(format!("£{},{:03}", i % 20, i % 1000)),
                2 => venue.price_saturday(format!("{} or nearest offer", i * 13)),
                _ => venue,
            }
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [10, 100, 1000] {
        let venues = create_test_venues(size);
        group.throughput(Throughput::Elements(size as u64));

        for key in [SortKey::Alphabetic, SortKey::Distance, SortKey::PriceSaturday] {
            group.bench_function(format!("{}_{}", key, size), |b| {
                b.iter(|| sort_venues(black_box(&venues), key))
            });
        }
    }

    group.finish();
}

fn bench_price_parse(c: &mut Criterion) {
    let inputs = ["£12,500", "Unavailable", "", "from 950 + VAT", "POA"];

    c.bench_function("price_sort_value", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(price::sort_value(Some(black_box(input))));
            }
        })
    });
}

criterion_group!(benches, bench_sort, bench_price_parse);
criterion_main!(benches);
