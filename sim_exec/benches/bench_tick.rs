//! # Simulation Tick Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nalgebra::Point2;
use sim_lib::{
    geometry::where_point_thick,
    loco_ctrl::{self, ControlLaw},
    sensor,
    sim::{Params, Simulation, StartPose},
    track::{self, TrackScoring},
};

fn params(law: ControlLaw, scoring: TrackScoring) -> Params {
    Params {
        timestep_s: 0.01,
        start_pose: StartPose {
            x_cm: 0.0,
            y_cm: 7.5,
            heading_rad: 0.0,
        },
        track: track::Params {
            centre_cm: [0.0, 0.0],
            semi_axis_a_cm: 12.5,
            semi_axis_b_cm: 7.5,
            thickness_cm: 1.5,
            scoring,
        },
        sensor: sensor::Params {
            sensor_length_cm: 4.0,
            sensor_width_cm: 2.5,
        },
        vehicle: loco_ctrl::Params {
            axle_distance_cm: 3.5,
            max_wheel_velocity_cms: 29.0,
            law,
        },
    }
}

fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("where_point_thick", |b| {
        b.iter(|| {
            where_point_thick(
                black_box(4.0),
                black_box(8.75),
                12.5,
                7.5,
                0.0,
                0.0,
                1.5,
            )
        })
    });

    // The history grows every tick, so bench a fixed-length run rather than
    // one tick of an ever-growing simulation
    let cases = [
        ("Simulation::tick::bang_bang", ControlLaw::BangBang, TrackScoring::Annulus),
        ("Simulation::tick::proportional", ControlLaw::proportional(), TrackScoring::Annulus),
        ("Simulation::tick::proportional_radial", ControlLaw::proportional(), TrackScoring::Radial),
    ];

    for (name, law, scoring) in cases.iter() {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut sim = Simulation::new(params(*law, *scoring)).unwrap();
                let mut last = Point2::origin();
                for i in 0..1000 {
                    last = sim.tick(i).pose.position_cm;
                }
                black_box(last)
            })
        });
    }
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
