//! Compile benchmarks — pattern → schema and router construction.
//!
//! Measures the one-time cost of compiling patterns and registering routes,
//! including guard regex compilation and scaling with route count.

use waypost::prelude::*;

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Schema compilation
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn compile_literal(bencher: divan::Bencher) {
    bencher.bench_local(|| Schema::compile(divan::black_box("/settings/profile/avatar")));
}

#[divan::bench]
fn compile_parameters(bencher: divan::Bencher) {
    bencher.bench_local(|| Schema::compile(divan::black_box("/teams/:team/users/:id/posts/:post")));
}

#[divan::bench]
fn compile_open_wildcard(bencher: divan::Bencher) {
    bencher.bench_local(|| Schema::compile(divan::black_box("/files/:owner/*")));
}

#[divan::bench]
fn compile_guard_regex(bencher: divan::Bencher) {
    bencher.bench_local(|| StringMatch::regex(r"^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}$"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Router construction at scale
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [1, 10, 100, 1000])]
fn register_n_distinct_schemas(bencher: divan::Bencher, n: usize) {
    let patterns: Vec<String> = (0..n).map(|i| format!("/section{i}/:id")).collect();
    bencher.bench_local(|| Router::from_patterns(&patterns));
}

#[divan::bench(args = [1, 10, 100, 1000])]
fn register_n_entries_one_schema(bencher: divan::Bencher, n: usize) {
    let patterns: Vec<String> = (0..n).map(|i| format!("/match/:p{i}")).collect();
    bencher.bench_local(|| Router::from_patterns(&patterns));
}
