//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, control).
//! 3. **Branch prediction:** Correct predictions, mispredictions, flushes, and accuracy.
//! 4. **Stalls:** Data hazard, ROB-full and RS-full stall cycles.
//! 5. **Out-of-order:** ROB commits and RS dispatches.

use std::fmt;
use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of add/sub/set/mul/div instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch instructions retired.
    pub inst_branch: u64,
    /// Count of `ret` instructions retired.
    pub inst_control: u64,

    /// Number of branches resolved without a flush.
    pub branch_predictions: u64,
    /// Number of branches that flushed the pipeline.
    pub branch_mispredictions: u64,
    /// Number of pipeline flushes.
    pub flushes: u64,
    /// Instructions discarded by flushes.
    pub squashed: u64,

    /// Stall cycles due to data hazards (busy source register).
    pub stalls_data: u64,
    /// Stall cycles because the ROB was full.
    pub stalls_rob_full: u64,
    /// Stall cycles because the reservation station was full.
    pub stalls_rs_full: u64,

    /// ROB entries committed.
    pub rob_commits: u64,
    /// Instructions dispatched from the reservation station.
    pub rs_dispatches: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_control: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            flushes: 0,
            squashed: 0,
            stalls_data: 0,
            stalls_rob_full: 0,
            stalls_rs_full: 0,
            rob_commits: 0,
            rs_dispatches: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"instruction_mix"`, `"branch"`, `"ooo"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "instruction_mix", "branch", "ooo"];

impl SimStats {
    /// Cycles in which the front of the pipeline was frozen, for any reason.
    pub const fn stalled_cycles(&self) -> u64 {
        self.stalls_data + self.stalls_rob_full + self.stalls_rs_full
    }

    /// Instructions retired per cycle; zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fraction of resolved branches that did not flush, in percent.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * self.branch_predictions as f64 / total as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("STALLS");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            println!(
                "  stalls.rob_full        {} ({:.2}%)",
                self.stalls_rob_full,
                pct(self.stalls_rob_full, cyc)
            );
            println!(
                "  stalls.rs_full         {} ({:.2}%)",
                self.stalls_rs_full,
                pct(self.stalls_rs_full, cyc)
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            println!(
                "  op.alu                 {} ({:.2}%)",
                self.inst_alu,
                pct(self.inst_alu, instr)
            );
            println!(
                "  op.load                {} ({:.2}%)",
                self.inst_load,
                pct(self.inst_load, instr)
            );
            println!(
                "  op.store               {} ({:.2}%)",
                self.inst_store,
                pct(self.inst_store, instr)
            );
            println!(
                "  op.branch              {} ({:.2}%)",
                self.inst_branch,
                pct(self.inst_branch, instr)
            );
            println!(
                "  op.control             {} ({:.2}%)",
                self.inst_control,
                pct(self.inst_control, instr)
            );
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!(
                "  bp.lookups             {}",
                self.branch_predictions + self.branch_mispredictions
            );
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {:.2}%", self.branch_accuracy());
            println!("  flushes                {}", self.flushes);
            println!("  squashed               {}", self.squashed);
            println!("----------------------------------------------------------");
        }
        if want("ooo") {
            println!("OUT-OF-ORDER");
            println!("  rob.commits            {}", self.rob_commits);
            println!("  rs.dispatches          {}", self.rs_dispatches);
        }
        println!("==========================================================");
    }
}

impl fmt::Display for SimStats {
    /// The short end-of-run summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Stalled cycles due to data hazard: {}",
            self.stalled_cycles()
        )?;
        writeln!(f, "Total execution cycles: {}", self.cycles)?;
        writeln!(f, "Total instruction simulated: {}", self.instructions_retired)?;
        write!(f, "IPC: {:.6}", self.ipc())
    }
}
