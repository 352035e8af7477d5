//! File Loader Tests.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use pipesim_core::common::LoadError;
use pipesim_core::config::Config;
use pipesim_core::sim::Simulator;
use pipesim_core::sim::loader::{
    dump_path_for, load_memory, load_program, parse_memory_image, write_memory_image,
};

fn tempdir() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"))
}

#[test]
fn program_file_round_trip_through_a_run() {
    let dir = tempdir();
    let program_path = dir.path().join("sum.txt");
    let memory_path = dir.path().join("memory_map.txt");
    fs::write(&program_path, "0 ld R1 #0\n1 ld R2 #4\n2 addl R3 R1 R2\n3 st R3 #8\n4 ret\n")
        .unwrap_or_else(|e| panic!("{e}"));
    fs::write(&memory_path, "3 4\n0\n").unwrap_or_else(|e| panic!("{e}"));

    let config = Config::default();
    let program = load_program(&program_path).unwrap_or_else(|e| panic!("{e}"));
    let memory =
        load_memory(Some(&memory_path), config.memory.size).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(memory.image_len(), 3);

    let mut sim = Simulator::new(program, memory, &config);
    assert!(sim.run().halted());

    let name = dump_path_for(&program_path);
    assert_eq!(name, PathBuf::from("mmap_sum.txt"));
    let dump = dir.path().join(name);
    write_memory_image(&dump, &sim.cpu.memory).unwrap_or_else(|e| panic!("{e}"));
    let text = fs::read_to_string(&dump).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(text, "3 4 7");
    assert_eq!(parse_memory_image(&text).ok(), Some(vec![3, 4, 7]));
}

#[test]
fn missing_program_is_an_io_error() {
    let dir = tempdir();
    let err = load_program(&dir.path().join("absent.txt"));
    assert!(matches!(err, Err(LoadError::Io { .. })));
}

#[test]
fn no_memory_file_means_zeroed_memory() {
    let memory = load_memory(None, 8).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(memory.capacity(), 8);
    assert_eq!(memory.image_len(), 0);
    assert_eq!(memory.words(8), &[0; 8]);
}

#[test]
fn oversized_image_is_rejected() {
    let dir = tempdir();
    let path = dir.path().join("big.txt");
    fs::write(&path, "1 2 3 4 5").unwrap_or_else(|e| panic!("{e}"));
    assert!(matches!(
        load_memory(Some(&path), 4),
        Err(LoadError::MemoryImageTooLarge { capacity: 4 })
    ));
}

#[test]
fn bad_program_file_reports_the_line() {
    let dir = tempdir();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "0 set R1 #1\n1 set R99 #2\n").unwrap_or_else(|e| panic!("{e}"));
    assert!(matches!(
        load_program(&path),
        Err(LoadError::RegisterOutOfRange { line: 2, register: 99, max: 15 })
    ));
}
