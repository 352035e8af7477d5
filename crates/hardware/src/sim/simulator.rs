//! Simulator: the run loop around a [`Cpu`].
//!
//! Drives the CPU cycle by cycle until `ret` retires or a fatal error occurs,
//! enforces the cycle budget, and packages the final state into a report.

use tracing::{info, warn};

use crate::common::{LoadError, REG_COUNT, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::memory::DataMemory;
use crate::core::pipeline::PipelineSnapshot;
use crate::isa::{InstructionTable, parse_program};
use crate::stats::SimStats;

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `ret` retired.
    Halted,
    /// A fatal condition stopped the run.
    Aborted(SimError),
}

/// Final state of a run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Why the run stopped.
    pub termination: Termination,
    /// Committed register values.
    pub registers: [i32; REG_COUNT],
    /// Counters.
    pub stats: SimStats,
}

impl RunReport {
    /// True if the run ended by retiring `ret`.
    pub fn halted(&self) -> bool {
        self.termination == Termination::Halted
    }
}

/// Top-level simulator.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU state (registers, memory, pipeline, stats).
    pub cpu: Cpu,
    max_cycles: u64,
    halted: bool,
}

impl Simulator {
    /// Creates a simulator for `program` with `memory` as data memory.
    pub fn new(program: InstructionTable, memory: DataMemory, config: &Config) -> Self {
        Self {
            cpu: Cpu::new(program, memory, config),
            max_cycles: config.general.max_cycles,
            halted: false,
        }
    }

    /// Parses `source` and preloads memory with `image`.
    pub fn from_source(source: &str, image: &[i32], config: &Config) -> Result<Self, LoadError> {
        let program = parse_program(source)?;
        let memory = DataMemory::with_image(config.memory.size, image)?;
        Ok(Self::new(program, memory, config))
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// Returns `Ok(true)` once the program has halted; further calls do nothing.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        if self.halted {
            return Ok(true);
        }
        self.halted = self.cpu.tick()?;
        Ok(self.halted)
    }

    /// Current stage occupancy.
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot::capture(&self.cpu)
    }

    /// Runs to completion.
    pub fn run(&mut self) -> RunReport {
        self.run_with(|_| {})
    }

    /// Runs to completion, calling `observer` with the stage occupancy after
    /// every cycle.
    pub fn run_with(&mut self, mut observer: impl FnMut(&PipelineSnapshot)) -> RunReport {
        let termination = loop {
            if self.cpu.stats.cycles >= self.max_cycles {
                break Termination::Aborted(SimError::CycleLimit {
                    limit: self.max_cycles,
                });
            }
            match self.tick() {
                Ok(halted) => {
                    observer(&self.snapshot());
                    if halted {
                        break Termination::Halted;
                    }
                }
                Err(err) => break Termination::Aborted(err),
            }
        };

        match &termination {
            Termination::Halted => info!(
                cycles = self.cpu.stats.cycles,
                retired = self.cpu.stats.instructions_retired,
                "run halted"
            ),
            Termination::Aborted(err) => warn!(cycle = self.cpu.stats.cycles, "run aborted: {err}"),
        }

        RunReport {
            termination,
            registers: self.cpu.registers(),
            stats: self.cpu.stats.clone(),
        }
    }
}
