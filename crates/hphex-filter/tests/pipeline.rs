// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end batch tests over real files in a scratch directory.

use std::path::{Path, PathBuf};

use hphex_core::{AppConfig, HphexError, Image, Pixel};
use hphex_filter::codec::{decode, encode, hash_bytes, read_file};
use hphex_filter::{FilePair, NormalizeOutcome, run_batch};

const IMPULSE: &str = "HPHEX 3 3\n\
    0000 0000 0000  0000 0000 0000  0000 0000 0000\n\
    0000 0000 0000  ffff ffff ffff  0000 0000 0000\n\
    0000 0000 0000  0000 0000 0000  0000 0000 0000\n";

const IMPULSE_FILTERED: &str = "HPHEX 3 3 \
    ffff ffff ffff 6667 6667 6667 ffff ffff ffff \
    6667 6667 6667 0000 0000 0000 6667 6667 6667 \
    ffff ffff ffff 6667 6667 6667 ffff ffff ffff ";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn centre_impulse_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "impulse.hphex", IMPULSE);
    let output = dir.path().join("impulse.out.hphex");

    let mut seen = Vec::new();
    let report = run_batch(
        &[FilePair::new(&input, &output)],
        &AppConfig::default(),
        |file| seen.push(file.outcome),
    )
    .expect("batch");

    let written = std::fs::read(&output).expect("read output");
    assert_eq!(String::from_utf8_lossy(&written), IMPULSE_FILTERED);

    assert_eq!(report.files.len(), 1);
    let file = &report.files[0];
    assert_eq!((file.height, file.width), (3, 3));
    assert_eq!(file.outcome, NormalizeOutcome::Stretched { min: 7281, max: 16383 });
    assert_eq!(file.bytes, written.len());
    assert_eq!(file.sha256, hash_bytes(&written));
    assert_eq!(seen, vec![file.outcome]);

    // The input is never touched.
    assert_eq!(std::fs::read_to_string(&input).expect("read input"), IMPULSE);
}

#[test]
fn malformed_input_is_a_format_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "short.hphex", "HPHEX 2 2 0000 0000");
    let output = dir.path().join("short.out.hphex");

    let err = run_batch(
        &[FilePair::new(&input, &output)],
        &AppConfig::default(),
        |_| {},
    )
    .unwrap_err();

    match &err {
        HphexError::Load { path, source } => {
            assert_eq!(path, &input);
            assert!(matches!(**source, HphexError::Format(_)));
        }
        other => panic!("unexpected error variant: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn first_failure_stops_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write(dir.path(), "good.hphex", IMPULSE);
    let bad = write(dir.path(), "bad.hphex", "HPHEX 1 1 zzzz 0000 0000");
    let later = write(dir.path(), "later.hphex", IMPULSE);
    let pairs = [
        FilePair::new(&good, dir.path().join("good.out")),
        FilePair::new(&bad, dir.path().join("bad.out")),
        FilePair::new(&later, dir.path().join("later.out")),
    ];

    let mut processed = Vec::new();
    let err = run_batch(&pairs, &AppConfig::default(), |file| {
        processed.push(file.input.clone())
    })
    .unwrap_err();

    assert!(err.to_string().contains("bad.hphex"), "got: {err}");
    assert_eq!(processed, vec![good]);
    assert!(dir.path().join("good.out").exists());
    assert!(!dir.path().join("bad.out").exists());
    assert!(!dir.path().join("later.out").exists());
}

#[test]
fn preload_rejects_bad_input_before_writing_anything() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write(dir.path(), "good.hphex", IMPULSE);
    let bad = write(dir.path(), "bad.hphex", "HPHEX 2 1 0000 0000 0000");
    let pairs = [
        FilePair::new(&good, dir.path().join("good.out")),
        FilePair::new(&bad, dir.path().join("bad.out")),
    ];
    let config = AppConfig {
        preload_inputs: true,
        ..AppConfig::default()
    };

    let err = run_batch(&pairs, &config, |_| {}).unwrap_err();
    assert!(matches!(err, HphexError::Load { .. }));
    assert!(!dir.path().join("good.out").exists());
}

#[test]
fn missing_input_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.hphex");
    let err = run_batch(
        &[FilePair::new(&missing, dir.path().join("out"))],
        &AppConfig::default(),
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err.root(), HphexError::Open { .. }));
    assert!(err.to_string().contains("missing.hphex"));
}

#[test]
fn unwritable_output_is_a_save_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "in.hphex", IMPULSE);
    // A directory cannot be opened as an output file.
    let err = run_batch(
        &[FilePair::new(&input, dir.path())],
        &AppConfig::default(),
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, HphexError::Save { .. }));
    assert!(matches!(err.root(), HphexError::Write { .. }));
}

#[test]
fn pairs_are_processed_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let flat = write(dir.path(), "flat.hphex", "HPHEX 1 1 0005 0005 0005");
    let ramp = write(
        dir.path(),
        "ramp.hphex",
        "HPHEX 1 3 0000 0000 0000 00ff 00ff 00ff 01fe 01fe 01fe",
    );
    let pairs = [
        FilePair::new(&ramp, dir.path().join("ramp.out")),
        FilePair::new(&flat, dir.path().join("flat.out")),
    ];

    let report = run_batch(&pairs, &AppConfig::default(), |_| {}).expect("batch");
    let outcomes: Vec<_> = report.files.iter().map(|f| f.outcome).collect();
    // The ramp blurs to 127, 255, 382 before stretching.
    assert_eq!(
        outcomes,
        vec![
            NormalizeOutcome::Stretched { min: 127, max: 382 },
            NormalizeOutcome::AlreadyNormalized,
        ]
    );
    assert_eq!(
        read_file(dir.path().join("flat.out")).expect("decode"),
        Image::filled(1, 1, Pixel::splat(5)).expect("alloc")
    );
}

#[test]
fn encode_decode_round_trip_on_varied_images() {
    let images = [
        Image::new(0, 0).expect("alloc"),
        Image::filled(1, 1, Pixel::WHITE).expect("alloc"),
        Image::from_fn(5, 7, |y, x| {
            let v = (y * 7919 + x * 104_729) as u16;
            Pixel::new(v, v.rotate_left(5), !v)
        })
        .expect("alloc"),
    ];
    for image in images {
        assert_eq!(decode(&encode(&image)).expect("decode"), image);
    }
}
