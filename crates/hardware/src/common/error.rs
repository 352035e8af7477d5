//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Load Errors:** Problems found while reading the program text or the memory image.
//! 2. **Simulation Errors:** Fatal conditions that abort a run mid-flight.
//! 3. **Configuration Errors:** Malformed or inconsistent JSON configuration.
//!
//! Backpressure (a busy register, a full ROB or RS) is never an error; it is a
//! stall and only shows up in the statistics.

use thiserror::Error;

/// A failure while loading the instruction table or the memory image.
///
/// Loading is all-or-nothing: any error means no partial table is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The mnemonic is not one of the supported opcodes.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        mnemonic: String,
    },

    /// The line does not match the grammar of its mnemonic.
    #[error("line {line}: {reason}: `{text}`")]
    Malformed {
        /// 1-based source line.
        line: usize,
        /// The full source line.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A register operand names a register that does not exist.
    #[error("line {line}: register R{register} is out of range (R0..R{max})")]
    RegisterOutOfRange {
        /// 1-based source line.
        line: usize,
        /// The register number as written.
        register: i64,
        /// Highest valid register number.
        max: usize,
    },

    /// The program text contains no instructions.
    #[error("program contains no instructions")]
    EmptyProgram,

    /// A memory image token is not a signed integer.
    #[error("memory image word {position}: `{token}` is not an integer")]
    BadMemoryWord {
        /// 0-based word position.
        position: usize,
        /// The offending token.
        token: String,
    },

    /// The memory image has more words than data memory can hold.
    #[error("memory image exceeds capacity of {capacity} words")]
    MemoryImageTooLarge {
        /// Capacity of data memory in words.
        capacity: usize,
    },

    /// A file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A fatal condition that aborts a simulation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A divide instruction found a zero divisor.
    #[error("divide by zero in instruction {index}")]
    DivideByZero {
        /// Instruction table index of the divide.
        index: usize,
    },

    /// A load or store addressed a word outside data memory.
    #[error("memory address {addr} out of range in instruction {index}")]
    AddressOutOfRange {
        /// Instruction table index of the access.
        index: usize,
        /// The byte address that was computed.
        addr: i32,
    },

    /// Fetch ran past the last instruction with nothing left in flight.
    #[error("fetch ran past the end of the program at pc {pc}")]
    FetchOutOfRange {
        /// Instruction index the PC pointed at.
        pc: usize,
    },

    /// The run did not halt within the configured number of cycles.
    #[error("no halt within {limit} cycles")]
    CycleLimit {
        /// The configured cycle limit.
        limit: u64,
    },
}

/// A configuration that could not be parsed or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON text did not deserialize into a configuration.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the simulator cannot use.
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        /// Dotted path of the field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
