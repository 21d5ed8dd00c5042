//! 三种瓶颈求法的性能对比

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use weightgraph::algorithm::{bottlenecks, Strategy};
use weightgraph::store::TestGraphState;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("bottleneck");

    for size in [10usize, 20, 40] {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let test = TestGraphState::random(size, 0.3, &mut rng)
            .and_then(|state| state.build())
            .expect("生成测试图失败");
        let source = *test.graph.key(test.start).expect("起点不存在");
        let budget = size as f64 * 1.5;

        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), size),
                &test.graph,
                |b, graph| b.iter(|| bottlenecks(black_box(graph), &source, budget, strategy)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
