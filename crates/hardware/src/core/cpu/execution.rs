//! Main Execution Loop.
//!
//! This module implements one simulated clock cycle. It performs the following:
//! 1. **Handlers:** Runs every stage handler from Retire back to Fetch, each
//!    seeing the state the previous cycle left behind.
//! 2. **Advance:** Moves latches toward Retire wherever the next latch is free,
//!    freezing the front of the pipeline on a stall and dispatching from the
//!    reservation station in the out-of-order backend.
//! 3. **Commit:** Applies the deferred register writes, ROB completions and
//!    forwarding publications recorded during the cycle.
//! 4. **Flush:** Squashes younger instructions after a mispredicted branch and
//!    rebuilds the producer map from the survivors.

use tracing::{debug, trace};

use super::Cpu;
use crate::common::SimError;
use crate::config::BackendType;
use crate::core::pipeline::latches::Stage;
use crate::core::pipeline::signals::{CycleEffects, StallCause};
use crate::core::pipeline::stages;

/// Latches whose destination tags survive a flush in the in-order backend,
/// oldest first. Retire is absent: its write was already applied.
const IN_ORDER_WRITERS: [Stage; 4] = [Stage::Writeback, Stage::Mem2, Stage::Mem1, Stage::Branch];

impl Cpu {
    /// Advances the machine by one clock cycle.
    ///
    /// Returns `Ok(true)` once `ret` has retired.
    ///
    /// # Errors
    ///
    /// Any fatal [`SimError`]: divide by zero, an out-of-range data address,
    /// or a fetch past the end of the program with nothing left in flight.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        let mut fx = CycleEffects::default();
        self.stats.cycles += 1;

        stages::retire_stage(self, &mut fx);
        stages::wb_stage(self, &mut fx);
        stages::mem2_stage(self, &mut fx)?;
        stages::mem1_stage(self);
        stages::branch_stage(self, &mut fx);
        stages::div_stage(self, &mut fx)?;
        stages::mul_stage(self, &mut fx)?;
        stages::add_stage(self, &mut fx)?;
        match self.backend {
            BackendType::InOrder => stages::register_read_stage(self, &mut fx),
            BackendType::OutOfOrder => stages::issue_stage(self, &mut fx),
        }
        stages::analyze_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self, &fx);

        self.advance(&fx);
        self.apply_effects(&fx);

        if let Some(cause) = fx.stall {
            trace!(cycle = self.stats.cycles, %cause, "front frozen");
            match cause {
                StallCause::DataHazard => self.stats.stalls_data += 1,
                StallCause::RobFull => self.stats.stalls_rob_full += 1,
                StallCause::RsFull => self.stats.stalls_rs_full += 1,
            }
        }

        if !fx.halt && self.is_drained() && self.program.get(self.pc).is_none() {
            return Err(SimError::FetchOutOfRange { pc: self.pc });
        }
        Ok(fx.halt)
    }

    /// Moves instructions one stage toward Retire, Retire end first.
    fn advance(&mut self, fx: &CycleEffects) {
        if !fx.retire_blocked {
            let _ = self.latches.take(Stage::Retire);
        }

        for stage in Stage::ALL.into_iter().rev() {
            let Some(next) = stage.next() else { continue };

            if stage == Stage::RegisterRead && self.backend == BackendType::OutOfOrder {
                if self.latches.is_free(Stage::Add) {
                    if let Some(entry) = self.rs.dispatch() {
                        trace!(seq = entry.inst.seq, "dispatch from RS");
                        self.latches.put(Stage::Add, entry.into_inflight());
                        self.stats.rs_dispatches += 1;
                    }
                }
                if fx.issued {
                    let _ = self.latches.take(Stage::RegisterRead);
                }
                continue;
            }

            if fx.stall.is_some() && stage <= Stage::RegisterRead {
                continue;
            }
            let _ = self.latches.advance(stage, next);
        }
    }

    /// Applies everything the handlers deferred to the end of the cycle.
    fn apply_effects(&mut self, fx: &CycleEffects) {
        if fx.commit && self.rob.commit_head().is_some() {
            self.stats.rob_commits += 1;
        }
        for w in &fx.reg_writes {
            self.regs.write(w.reg, w.value);
            let _ = self.regs.clear_if_match(w.reg, w.tag);
        }
        for &(tag, value) in &fx.completions {
            self.rob.complete(tag, value);
            self.rs.wakeup(tag, value);
        }
        self.forwarding.end_cycle();
    }

    /// Squashes every instruction fetched after `seq` and restarts Fetch at
    /// `redirect`.
    pub fn flush_younger(&mut self, seq: u64, redirect: usize) {
        // ROB entries mirror instructions already counted in a latch or the RS.
        let squashed = self.latches.squash_younger(seq) + self.rs.flush_after(seq);
        let _ = self.rob.flush_after(seq);
        self.forwarding.clear();

        match self.backend {
            BackendType::InOrder => {
                let writers: Vec<_> = IN_ORDER_WRITERS
                    .into_iter()
                    .filter_map(|stage| self.latches.get(stage))
                    .filter_map(|inst| inst.operands.dest.zip(inst.tag))
                    .collect();
                self.regs.rebuild_producers(writers);
            }
            BackendType::OutOfOrder => {
                let writers: Vec<_> = self.rob.iter().map(|e| (e.dest, e.tag)).collect();
                self.regs.rebuild_producers(writers);
            }
        }

        self.pc = redirect;
        self.fetch_stopped = false;
        self.stats.flushes += 1;
        self.stats.squashed += squashed as u64;
        debug!(seq, redirect, squashed, "pipeline flushed");
    }
}
