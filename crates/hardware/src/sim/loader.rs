//! Program and Memory Image Loader.
//!
//! This module reads the simulator's two input files and writes its one output
//! file. It performs:
//! 1. **Program loading:** Reads assembly text and parses it into an instruction table.
//! 2. **Memory images:** Parses whitespace-separated signed words into data memory.
//! 3. **Memory dump:** Writes the words covered by the image back out after a run,
//!    to `mmap_<program file name>` by default.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::LoadError;
use crate::core::memory::DataMemory;
use crate::isa::{InstructionTable, parse_program};

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the assembly source.
///
/// # Returns
///
/// The instruction table, or the first load error encountered.
pub fn load_program(path: &Path) -> Result<InstructionTable, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let program = parse_program(&text)?;
    info!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Parses a memory image: one signed integer per word, separated by whitespace.
pub fn parse_memory_image(text: &str) -> Result<Vec<i32>, LoadError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i32>().map_err(|_| LoadError::BadMemoryWord {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Builds data memory of `capacity` words, optionally preloaded from a file.
pub fn load_memory(path: Option<&Path>, capacity: usize) -> Result<DataMemory, LoadError> {
    let Some(path) = path else {
        return Ok(DataMemory::new(capacity));
    };
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let image = parse_memory_image(&text)?;
    let memory = DataMemory::with_image(capacity, &image)?;
    info!(path = %path.display(), words = image.len(), "memory image loaded");
    Ok(memory)
}

/// Default dump location for a program: `mmap_<file name>`, relative to the
/// working directory whatever directory the program was loaded from.
pub fn dump_path_for(program: &Path) -> PathBuf {
    let name = program
        .file_name()
        .map_or_else(|| "program".to_string(), |n| n.to_string_lossy().into_owned());
    PathBuf::from(format!("mmap_{name}"))
}

/// Formats words the way memory images are read: space separated.
pub fn format_memory_image(words: &[i32]) -> String {
    words
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the words covered by the original image to `path`.
pub fn write_memory_image(path: &Path, memory: &DataMemory) -> Result<(), LoadError> {
    fs::write(path, format_memory_image(memory.image())).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), words = memory.image_len(), "memory image written");
    Ok(())
}
