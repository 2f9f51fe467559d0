//! Benchmarks for whole-engine rendering.

mod engine;

pub use engine::bench_engine;
