use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Days, NaiveDate, TimeZone, Utc};
use stockwise_core::ProductId;
use stockwise_forecasting::{
    DailyPoint, DailySeries, DemandForecaster, LastSale, PriorityScorer, ProductActivity, ProductStockSnapshot,
    SalesTrendPredictor, SeededJitter,
};

fn series(days: u64) -> DailySeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..days)
        .map(|i| DailyPoint::new(start + Days::new(i), 5 + i % 7, 120.0 + (i % 11) as f64 * 9.5, 3 + i % 4))
        .collect()
}

fn bench_demand_forecast(c: &mut Criterion) {
    let as_of = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let history = series(90);
    let forecaster = DemandForecaster::default();

    let mut group = c.benchmark_group("demand_forecast");
    for horizon in [7u32, 30, 365] {
        group.bench_with_input(BenchmarkId::from_parameter(horizon), &horizon, |b, &h| {
            let mut jitter = SeededJitter::from_seed(42);
            b.iter(|| forecaster.forecast(black_box(&history), h, as_of, &mut jitter))
        });
    }
    group.finish();
}

fn bench_sales_trend(c: &mut Criterion) {
    let as_of = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let history = series(90);
    let predictor = SalesTrendPredictor::default();

    c.bench_function("sales_trend_30d", |b| {
        let mut jitter = SeededJitter::from_seed(7);
        b.iter(|| predictor.predict(black_box(&history), 30, as_of, &mut jitter))
    });
}

fn bench_priority_ranking(c: &mut Criterion) {
    let scorer = PriorityScorer::default();

    let mut group = c.benchmark_group("priority_ranking");
    for size in [100usize, 1_000, 10_000] {
        let snapshots: Vec<ProductStockSnapshot> = (0..size)
            .map(|i| ProductStockSnapshot {
                product_id: ProductId::new(),
                product_name: format!("product-{i}"),
                current_stock: (i % 25) as u64,
                category_name: None,
                supplier_name: None,
            })
            .collect();
        let activity: Vec<ProductActivity> = (0..size)
            .map(|i| ProductActivity {
                sales_velocity: (i % 80) as u64,
                order_count: (i % 20) as u64,
                last_sale: if i % 9 == 0 {
                    LastSale::Never
                } else {
                    LastSale::DaysAgo((i % 45) as u32)
                },
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| scorer.rank(snapshots.iter().zip(activity.iter().copied())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_demand_forecast, bench_sales_trend, bench_priority_ranking);
criterion_main!(benches);
