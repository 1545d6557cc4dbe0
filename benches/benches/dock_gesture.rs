// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_dock::{
    Axis, DockConfig, DockDirector, DockLayout, NoopObserver, PanelState, SwipeDirection,
};

const CONTAINER: Size = Size::new(1080.0, 1920.0);

fn docked_director() -> DockDirector<NoopObserver> {
    let mut director = DockDirector::new(DockConfig::default(), CONTAINER, NoopObserver)
        .expect("default config fits the container");
    director.present(false);
    director
        .change_state_to(PanelState::Docked, Duration::ZERO)
        .expect("expanded panels can dock");
    director
}

/// A drag from the docked tile to the top of the container, one sample per
/// 60 Hz frame.
fn upward_drag(director: &mut DockDirector<NoopObserver>, samples: u32) {
    let start = director.layout().docked_rect().center();
    let step = start.y / f64::from(samples);
    director.on_pointer_down(start, Duration::ZERO);
    for i in 1..=samples {
        let time = Duration::from_micros(16_667 * u64::from(i));
        let point = Point::new(start.x, start.y - step * f64::from(i));
        black_box(director.on_pointer_move(point, time));
    }
    let end = Duration::from_micros(16_667 * u64::from(samples + 1));
    black_box(director.on_pointer_up(Point::new(start.x, 0.0), end));
}

fn bench_dock(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_dock");
    group.sample_size(50);

    let layout = DockLayout::new(DockConfig::default(), CONTAINER).expect("valid layout");
    group.bench_function("interpolate_vertical(n=1000)", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(layout.interpolate(f64::from(i) / 1000.0, Axis::Vertical));
            }
        });
    });
    group.bench_function("interpolate_swipe(n=1000)", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let direction = if i % 2 == 0 {
                    SwipeDirection::Left
                } else {
                    SwipeDirection::Right
                };
                black_box(layout.interpolate(f64::from(i) / 1000.0, Axis::Horizontal(direction)));
            }
        });
    });

    for samples in [30_u32, 120] {
        group.bench_function(format!("upward_drag(samples={samples})"), |b| {
            b.iter_batched(
                docked_director,
                |mut director| {
                    upward_drag(&mut director, samples);
                    director
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dock);
criterion_main!(benches);
