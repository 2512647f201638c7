//! Simulation statistics collection and reporting.
//!
//! Each cache organization owns one [`RunCounters`] and updates it from its
//! own methods. At the end of a run the driver turns the active
//! organization's counters into a [`SimResult`].

use serde::Serialize;

/// Reported cycle count of a run that did not finish within its budget.
pub const UNBOUNDED_CYCLES: u64 = u64::MAX;

/// Per-organization counters. All fields only ever grow during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunCounters {
    pub cycles: u64,
    pub hits: u64,
    pub misses: u64,
    pub structural_cost: u64,
    pub requests_issued: u64,

    /// Direct-mapped writes cut short at the last line.
    pub capacity_truncations: u64,
    /// Read misses with no backing memory entry.
    pub unavailable_reads: u64,
}

impl RunCounters {
    /// Fraction of reads that hit, in percent. 0 when nothing was read.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// Adds `weight` to the structural cost.
    pub fn charge(&mut self, weight: u64) {
        self.structural_cost += weight;
    }
}

/// Outcome of a run, derived once from the active organization's counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimResult {
    /// Elapsed cycles, or [`UNBOUNDED_CYCLES`] if the budget ran out first.
    pub cycles: u64,
    pub misses: u64,
    pub hits: u64,
    pub structural_cost: u64,
    pub requests_issued: u64,
    pub completed: bool,
}

impl SimResult {
    /// Builds the result for a run over `total_requests` requests.
    ///
    /// A run that issued fewer requests than it was given reports
    /// `UNBOUNDED_CYCLES` but keeps the hits, misses and cost accumulated
    /// up to the point it stopped.
    pub fn from_counters(counters: &RunCounters, total_requests: u64) -> Self {
        let completed = counters.requests_issued >= total_requests;
        Self {
            cycles: if completed {
                counters.cycles
            } else {
                UNBOUNDED_CYCLES
            },
            misses: counters.misses,
            hits: counters.hits,
            structural_cost: counters.structural_cost,
            requests_issued: counters.requests_issued,
            completed,
        }
    }

    /// Fraction of reads that hit, in percent. 0 when nothing was read.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// Prints the run summary to standard output.
    pub fn print(&self, title: &str) {
        let reads = self.hits + self.misses;

        println!("==========================================================");
        println!("{}", title);
        println!("==========================================================");
        if self.completed {
            println!("Cycles: {}", self.cycles);
        } else {
            println!("Cycles: {} (budget exhausted)", self.cycles);
        }
        println!("Misses: {}", self.misses);
        println!("Hits: {}", self.hits);
        println!("Gates: {}", self.structural_cost);
        println!("----------------------------------------------------------");
        println!("  requests.issued        {}", self.requests_issued);
        println!("  reads                  {}", reads);
        println!("  hit_rate               {:.2}%", self.hit_rate());
        println!("==========================================================");
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let reads = hits + misses;
    if reads == 0 {
        0.0
    } else {
        (hits as f64 / reads as f64) * 100.0
    }
}
