use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shapewkb_core::{decode_element, decode_structure, GeometryType, ImportFlags};

/// `MULTIPOLYGON` of `polygons` closed rings with `ring_len` vertices each.
fn multipolygon_blob(polygons: u32, ring_len: u32) -> Vec<u8> {
    let mut blob = vec![0x01];
    blob.extend_from_slice(&6u32.to_le_bytes());
    blob.extend_from_slice(&polygons.to_le_bytes());
    for p in 0..polygons {
        blob.push(0x01);
        blob.extend_from_slice(&3u32.to_le_bytes());
        blob.extend_from_slice(&1u32.to_le_bytes());
        blob.extend_from_slice(&(ring_len + 1).to_le_bytes());
        let offset = f64::from(p) * 10.0;
        let step = std::f64::consts::TAU / f64::from(ring_len);
        for i in (0..ring_len).chain(std::iter::once(0)) {
            let angle = step * f64::from(i);
            blob.extend_from_slice(&(offset + angle.cos()).to_le_bytes());
            blob.extend_from_slice(&angle.sin().to_le_bytes());
        }
    }
    blob
}

fn nested_collection_blob(depth: u32) -> Vec<u8> {
    let mut blob = Vec::new();
    for _ in 0..depth {
        blob.push(0x01);
        blob.extend_from_slice(&7u32.to_le_bytes());
        blob.extend_from_slice(&1u32.to_le_bytes());
    }
    blob.push(0x01);
    blob.extend_from_slice(&1u32.to_le_bytes());
    blob.extend_from_slice(&1.0f64.to_le_bytes());
    blob.extend_from_slice(&2.0f64.to_le_bytes());
    blob
}

fn bench_polygons(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_multipolygon");
    for ring_len in [16u32, 256, 4096] {
        let blob = multipolygon_blob(8, ring_len);
        group.throughput(Throughput::Bytes(blob.len() as u64));
        for (label, flags) in [
            ("default", ImportFlags::DEFAULT),
            ("non_trusted", ImportFlags::NON_TRUSTED),
        ] {
            group.bench_with_input(BenchmarkId::new(label, ring_len), &blob, |b, blob| {
                b.iter(|| decode_element(black_box(blob), GeometryType::Polygon, flags))
            });
        }
    }
    group.finish();
}

fn bench_collections(c: &mut Criterion) {
    let blob = nested_collection_blob(1_000);
    c.bench_function("decode_structure_depth_1000", |b| {
        b.iter(|| decode_structure(black_box(&blob), ImportFlags::DEFAULT))
    });
}

criterion_group!(benches, bench_polygons, bench_collections);
criterion_main!(benches);
