use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use lotpack::entities::StallDims;
use lotpack::geometry::geo_enums::Axis;
use lotpack::geometry::primitives::{Point, SPolygon};
use lotpack::packing::{self, LayoutStrategy, PackConfig, PerimeterConfig};

criterion_main!(benches);
criterion_group!(benches, strategy_bench, capped_bench);

const DIMS: StallDims = StallDims {
    width: 2.5,
    length: 5.0,
    aisle: 6.0,
};

/// L-shaped lot of roughly 6 hectares
fn l_shaped_lot() -> SPolygon {
    SPolygon::new(vec![
        Point(0.0, 0.0),
        Point(300.0, 0.0),
        Point(300.0, 120.0),
        Point(150.0, 120.0),
        Point(150.0, 250.0),
        Point(0.0, 250.0),
    ])
    .unwrap()
}

fn strategies() -> [(&'static str, LayoutStrategy); 5] {
    [
        ("row_based", LayoutStrategy::RowBased),
        ("column_based", LayoutStrategy::ColumnBased),
        (
            "angled",
            LayoutStrategy::Angled {
                axis: Axis::Horizontal,
                angle_deg: 45.0,
            },
        ),
        ("parallel", LayoutStrategy::Parallel),
        (
            "perimeter_center",
            LayoutStrategy::PerimeterCenter(PerimeterConfig::default()),
        ),
    ]
}

/// Full packing of the same lot with every strategy
fn strategy_bench(c: &mut Criterion) {
    let boundary = l_shaped_lot();
    let mut group = c.benchmark_group("strategy_bench");
    for (name, strategy) in strategies() {
        let config = PackConfig {
            dims: DIMS,
            strategy,
            max_count: None,
        };
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(packing::pack(&boundary, &config)))
        });
    }
    group.finish();
}

/// A capped run should only pay for the candidates it scans
fn capped_bench(c: &mut Criterion) {
    let boundary = l_shaped_lot();
    let mut group = c.benchmark_group("capped_bench");
    for max_count in [10, 100, 1000] {
        let config = PackConfig {
            dims: DIMS,
            strategy: LayoutStrategy::RowBased,
            max_count: Some(max_count),
        };
        group.bench_function(BenchmarkId::from_parameter(max_count), |b| {
            b.iter(|| black_box(packing::pack(&boundary, &config)))
        });
    }
    group.finish();
}
