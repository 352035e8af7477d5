//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the single context object
//! holding all processor state. It coordinates the following:
//! 1. **Architectural State:** Registers with rename state, the program
//!    counter and data memory.
//! 2. **Pipeline Control:** The twelve stage latches, forwarding channels, and
//!    the ROB and reservation station of the out-of-order backend.
//! 3. **Prediction:** The branch predictor consulted by Fetch and trained by
//!    Branch-Resolve.
//!
//! Every stage handler receives `&mut Cpu`; nothing lives in global state.

/// Cycle driver: handler ordering, advance pass, flush and effect commit.
pub mod execution;

use crate::common::{REG_COUNT, RegisterFile, TagAllocator};
use crate::config::{BackendType, Config};
use crate::core::memory::DataMemory;
use crate::core::pipeline::hazards::ForwardingUnit;
use crate::core::pipeline::latches::{Latches, Stage};
use crate::core::pipeline::reservation::ReservationStation;
use crate::core::pipeline::rob::Rob;
use crate::core::units::bru::BranchPredictorWrapper;
use crate::isa::InstructionTable;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// The loaded program.
    pub program: InstructionTable,
    /// Architectural registers and their producer tags.
    pub regs: RegisterFile,
    /// Word-addressed data memory.
    pub memory: DataMemory,
    /// Index of the next instruction to fetch.
    pub pc: usize,
    /// Set once `ret` has been fetched; cleared by a redirect.
    pub fetch_stopped: bool,
    /// Branch Predictor Unit.
    pub branch_predictor: BranchPredictorWrapper,
    /// Stage latches.
    pub latches: Latches,
    /// In-order forwarding channels.
    pub forwarding: ForwardingUnit,
    /// Reorder buffer (out-of-order backend).
    pub rob: Rob,
    /// Reservation station (out-of-order backend).
    pub rs: ReservationStation,
    /// Which backend drives Register-Read and Retire.
    pub backend: BackendType,
    /// Performance statistics.
    pub stats: SimStats,
    /// Producer tags for the in-order backend.
    pub(crate) tags: TagAllocator,
    next_seq: u64,
}

impl Cpu {
    /// Creates a CPU with `program` loaded and `memory` as its data memory.
    ///
    /// # Arguments
    ///
    /// * `program` - The instruction table to run.
    /// * `memory` - Initial data memory contents.
    /// * `config` - Backend, predictor and buffer sizes.
    pub fn new(program: InstructionTable, memory: DataMemory, config: &Config) -> Self {
        Self {
            program,
            regs: RegisterFile::new(),
            memory,
            pc: 0,
            fetch_stopped: false,
            branch_predictor: BranchPredictorWrapper::new(&config.pipeline),
            latches: Latches::new(),
            forwarding: ForwardingUnit::new(),
            rob: Rob::new(config.pipeline.rob_size),
            rs: ReservationStation::new(config.pipeline.rs_size),
            backend: config.pipeline.backend,
            stats: SimStats::default(),
            tags: TagAllocator::new(),
            next_seq: 0,
        }
    }

    /// Hands out the next fetch sequence number.
    pub(crate) const fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// True if no instruction is anywhere in the machine.
    pub fn is_drained(&self) -> bool {
        self.latches.is_empty() && self.rob.is_empty() && self.rs.is_empty()
    }

    /// Sequence number of the oldest branch that has not yet resolved.
    ///
    /// Covers branches waiting in the reservation station and branches in any
    /// latch up to and including Branch-Resolve.
    pub fn oldest_unresolved_branch(&self) -> Option<u64> {
        let queued = self
            .rs
            .iter()
            .map(|e| e.inst)
            .filter(|inst| inst.opcode.is_branch())
            .map(|inst| inst.seq);
        let in_chain = self
            .latches
            .iter()
            .filter(|(stage, _)| *stage <= Stage::Branch)
            .filter_map(|(_, inst)| inst)
            .filter(|inst| inst.opcode.is_branch())
            .map(|inst| inst.seq);
        queued.chain(in_chain).min()
    }

    /// Committed register values.
    pub fn registers(&self) -> [i32; REG_COUNT] {
        self.regs.values()
    }
}
