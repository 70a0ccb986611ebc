use std::{rc::Rc, time::Duration};

use const_format::concatcp;
use criterion::{measurement::Measurement, BenchmarkGroup, Criterion};
use wordsurge::{dictionary::WordStore, solver::Solver};

/// The path of the directory containing the word lists.
#[inline]
#[must_use]
const fn dir() -> &'static str
{
	"dict"
}

/// The name of the word-list file.
#[inline]
#[must_use]
const fn name() -> &'static str
{
	"english"
}

/// The path to the text file.
#[inline]
#[must_use]
const fn path_txt() -> &'static str
{
	concatcp!(dir(), "/", name(), ".txt")
}

/// The path to the binary cache.
#[inline]
#[must_use]
const fn path_dict() -> &'static str
{
	concatcp!(dir(), "/", name(), ".dict")
}

/// Benchmark reading a word store from a text file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_read_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("read_from_file", |b| {
		b.iter(|| WordStore::read_from_file(path_txt()).unwrap());
	});
}

/// Benchmark deserializing a word store from the binary cache.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_deserialize_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("deserialize_from_file", |b| {
		b.iter(|| WordStore::deserialize_from_file(path_dict()).unwrap());
	});
}

/// Benchmark solving the hardest pool entries. The solver's cost is
/// exponential in the letter count, so the six-letter sets are the ones
/// worth watching.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_solver<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("solve", |b| {
		let store = Rc::new(WordStore::open(dir(), name()).unwrap());
		let solver = Solver::new(store);
		let sets = ["STRONG", "CHANGE", "PLANET", "WINTER", "SUMMER"]
			.map(|set| set.chars().collect::<Vec<_>>());
		b.iter(|| {
			for letters in &sets
			{
				let solution = solver.solve(letters);
				assert!(!solution.is_empty());
			}
		});
	});
}

/// Run all benchmarks.
///
/// The main purpose of the benchmarking is to ensure that
/// [`deserialize_from_file`](WordStore::deserialize_from_file) is faster than
/// [`read_from_file`](WordStore::read_from_file), and that a full solve of a
/// six-letter puzzle stays comfortably inside a frame budget.
fn main()
{
	// Ensure that both the text and binary files exist.
	let _ = WordStore::open(dir(), name()).unwrap();

	// Run the benchmarks.
	let mut criterion = Criterion::default().configure_from_args();
	let mut group = criterion.benchmark_group("benchmarks");
	group.measurement_time(Duration::from_secs(10));
	bench_read_from_file(&mut group);
	bench_deserialize_from_file(&mut group);
	bench_solver(&mut group);
	group.finish();

	// Generate the final summary.
	criterion.final_summary();
}
