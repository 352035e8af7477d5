//! Pipeline occupancy snapshot.

use std::fmt;

use crate::core::Cpu;
use crate::core::pipeline::latches::Stage;
use crate::isa::Instruction;

/// Which instruction occupies each stage at the end of a cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineSnapshot {
    /// Cycles completed when the snapshot was taken.
    pub cycle: u64,
    /// Occupied stages, Fetch first.
    pub stages: Vec<(Stage, Instruction)>,
}

impl PipelineSnapshot {
    /// Captures the current latch contents of `cpu`.
    pub fn capture(cpu: &Cpu) -> Self {
        let stages = cpu
            .latches
            .iter()
            .filter_map(|(stage, inst)| inst.map(|i| (stage, cpu.program[i.index])))
            .collect();
        Self {
            cycle: cpu.stats.cycles,
            stages,
        }
    }

    /// The instruction in `stage`, if any.
    pub fn get(&self, stage: Stage) -> Option<&Instruction> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, inst)| inst)
    }
}

impl fmt::Display for PipelineSnapshot {
    /// Prints one line per occupied stage, Retire first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- cycle {} -----", self.cycle)?;
        for (stage, inst) in self.stages.iter().rev() {
            writeln!(f, "{:<5}: {inst}", stage.label())?;
        }
        Ok(())
    }
}
