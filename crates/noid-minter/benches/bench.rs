use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use noid_minter::{
    Cursor, DocumentMinter, IdentifierSpace, Minter, MinterRegistry, ThreadRandom, lock,
    model::{Canvas, Manifest},
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

const DOC: &str = "https://example.org/iiif/bench";

// Number of IDs minted per benchmark iteration (split across threads for
// contended runs).
const TOTAL_IDS: usize = 4096;

fn noid_space() -> Arc<IdentifierSpace> {
    Arc::new(IdentifierSpace::noid().expect("noid space"))
}

/// Building and shuffling the full 1.5M token space.
fn bench_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("space");
    group.sample_size(10);
    group.throughput(Throughput::Elements(1_500_625));
    group.bench_function("noid", |b| {
        b.iter(|| black_box(IdentifierSpace::noid().expect("noid space")));
    });
    group.finish();
}

/// Raw traversal with no collision checks.
fn bench_cursor(c: &mut Criterion) {
    let space = noid_space();
    let mut group = c.benchmark_group("cursor");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(Arc::clone(&space), &ThreadRandom);
            for _ in 0..TOTAL_IDS {
                black_box(cursor.try_next().expect("cursor"));
            }
        });
    });
    group.finish();
}

/// Sequential minting from a fresh minter, one group per resource kind.
fn bench_minter<F>(c: &mut Criterion, group_name: &str, minter_fn: impl Fn() -> DocumentMinter, mint: F)
where
    F: Fn(&mut DocumentMinter) -> noid_minter::Result<String>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut minter = minter_fn();
                for _ in 0..TOTAL_IDS {
                    black_box(mint(&mut minter).expect("mint"));
                }
            }
            start.elapsed()
        });
    });
    group.finish();
}

fn bench_minter_canvas(c: &mut Criterion) {
    let space = noid_space();
    bench_minter(
        c,
        "minter/canvas",
        || DocumentMinter::new(Arc::clone(&space), DOC),
        DocumentMinter::mint_canvas_id,
    );
}

fn bench_minter_annotation_page(c: &mut Criterion) {
    let space = noid_space();
    let canvas = Canvas::new(format!("{DOC}/canvas-kfb9"));
    bench_minter(
        c,
        "minter/annotation_page",
        || DocumentMinter::new(Arc::clone(&space), DOC),
        |minter| minter.mint_annotation_page_id(&canvas),
    );
}

/// Minting while skipping a document's worth of existing identifiers.
fn bench_minter_with_existing(c: &mut Criterion) {
    let space = noid_space();
    // every seventh position, so the existing ids are spread over the order
    let manifest = (0..TOTAL_IDS).fold(Manifest::new(DOC), |manifest, i| {
        manifest.with_canvas(Canvas::new(format!("{DOC}/canvas-{}", space.token(i * 7))))
    });
    bench_minter(
        c,
        "minter/canvas/existing",
        || DocumentMinter::from_document(Arc::clone(&space), &manifest).expect("minter"),
        DocumentMinter::mint_canvas_id,
    );
}

/// One shared minter behind the registry, hammered from several threads.
fn bench_registry_contended(c: &mut Criterion) {
    let space = noid_space();
    let mut group = c.benchmark_group("registry/contended");

    for thread_count in [1, 2, 4, 8] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let registry = MinterRegistry::builder(Arc::clone(&space))
                            .environment(Vec::<(String, String)>::new())
                            .build();
                        let barrier = Barrier::new(thread_count + 1);
                        scope(|s| {
                            for _ in 0..thread_count {
                                s.spawn(|| {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        let minter =
                                            registry.get_minter_for_id(DOC).expect("minter");
                                        let mut minter = lock(&minter).expect("lock");
                                        black_box(minter.mint_annotation_id().expect("mint"));
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_space,
    bench_cursor,
    bench_minter_canvas,
    bench_minter_annotation_page,
    bench_minter_with_existing,
    bench_registry_contended,
);
criterion_main!(benches);
