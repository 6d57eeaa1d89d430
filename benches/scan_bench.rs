use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sfic::events::RecordingLogger;
use sfic::record::{FileRecord, SEPARATOR, ScanMode};
use sfic::scanner::{DirectoryScanner, ExtensionFilter};
use sfic::storage::{SnapshotWriter, load};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::tempdir;

fn create_test_tree(dir: &Path, count: usize) {
    for i in 0..count {
        let sub = dir.join(format!("module_{}", i % 10));
        fs::create_dir_all(&sub).unwrap();
        let content = format!("<?php // file number {i} with some content to hash");
        fs::write(sub.join(format!("file_{i}.php")), content).unwrap();
    }
}

fn benchmark_fingerprint(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let small_file = dir.path().join("small.php");
    let medium_file = dir.path().join("medium.php");
    let large_file = dir.path().join("large.php");

    fs::write(&small_file, vec![b'a'; 1024]).unwrap(); // 1KB
    fs::write(&medium_file, vec![b'b'; 1024 * 100]).unwrap(); // 100KB
    fs::write(&large_file, vec![b'c'; 1024 * 1024 * 10]).unwrap(); // 10MB, memory-mapped

    let mut group = c.benchmark_group("fingerprint");

    group.bench_function("attribute_1kb", |b| {
        b.iter(|| FileRecord::fingerprint(black_box(&small_file), ScanMode::Attribute));
    });

    for (name, path) in [
        ("content_1kb", &small_file),
        ("content_100kb", &medium_file),
        ("content_10mb", &large_file),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| FileRecord::fingerprint(black_box(path), ScanMode::Content));
        });
    }

    group.finish();
}

fn benchmark_snapshot_load(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut group = c.benchmark_group("snapshot_load");

    for count in &[1_000, 10_000] {
        let path = dir.path().join(format!("snapshot_{count}.sfic"));
        let mut writer = SnapshotWriter::begin(&path).unwrap();
        for i in 0..*count {
            let record = FileRecord::new(
                format!("/var/www/site/module_{}/file_{i}.php", i % 10),
                i as u64,
                1_700_000_000,
                format!("{i:032x}"),
            );
            writer.append(&record).unwrap();
        }
        writer.finish().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &path, |b, path| {
            b.iter(|| load(black_box(path), &RecordingLogger::new()));
        });
    }

    group.finish();
}

fn benchmark_record_codec(c: &mut Criterion) {
    let line = "/var/www/site/index.php;2048;1700000000;0123456789abcdef0123456789abcdef;";

    c.bench_function("record_parse", |b| {
        b.iter(|| FileRecord::parse(black_box(line), SEPARATOR));
    });
}

fn benchmark_directory_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("directory_scan");
    group.sample_size(20);

    for mode in [ScanMode::Attribute, ScanMode::Content] {
        let dir = tempdir().unwrap();
        create_test_tree(dir.path(), 500);
        let scanner = DirectoryScanner::new(dir.path(), mode, ExtensionFilter::parse_list("php"));
        scanner.scan(&RecordingLogger::new()).unwrap();

        group.bench_function(BenchmarkId::new("rescan_500", mode), |b| {
            b.iter(|| scanner.scan(&RecordingLogger::new()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fingerprint,
    benchmark_snapshot_load,
    benchmark_record_codec,
    benchmark_directory_scan
);
criterion_main!(benches);
