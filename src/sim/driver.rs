//! Simulation Driver.
//!
//! Owns the request sequence and the logical clock. Each tick delivers the
//! next request to the active cache organization, which performs exactly
//! one operation. The clock stops when the requests are exhausted or the
//! cycle budget is reached, whichever comes first.
//!
//! ```text
//! Idle -> Running -> Completed
//!                 \-> BudgetExceeded
//! ```
//!
//! An optional comparison lane drives the other organization with the same
//! requests and its own backing memory. It is never traced and never
//! affects the primary result.

use super::trace::{TraceRecord, TraceSink};
use crate::cache::{self, CacheModel, Response};
use crate::common::Request;
use crate::config::{CacheConfig, Config, Organization};
use crate::memory::BackingMemory;
use crate::stats::SimResult;

/// Driver state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// No tick has run yet.
    Idle,
    /// Requests are being issued.
    Running,
    /// Every request was issued within the budget.
    Completed,
    /// The clock reached the budget with requests still pending.
    BudgetExceeded,
}

/// A cache organization paired with the memory it writes through to.
struct Lane {
    organization: Organization,
    cache: Box<dyn CacheModel>,
    memory: BackingMemory,
}

impl Lane {
    fn new(organization: Organization, config: &CacheConfig) -> Self {
        Self {
            organization,
            cache: cache::build(organization, config),
            memory: BackingMemory::new(),
        }
    }

    fn process(&mut self, request: &Request) -> Response {
        self.cache.process(request, &mut self.memory)
    }
}

/// Clock-driven simulation of one cache organization over a request stream.
pub struct Simulation {
    requests: Vec<Request>,
    next: usize,
    clock: u64,
    budget: u64,
    state: RunState,
    cache_config: CacheConfig,
    active: Lane,
    comparison: Option<Lane>,
    trace: Option<Box<dyn TraceSink>>,
    rdata: u32,
}

impl Simulation {
    /// Creates a driver for `requests` using the organization, geometry and
    /// cycle budget in `config`. The configuration must already be validated.
    pub fn new(requests: Vec<Request>, config: &Config) -> Self {
        Self {
            requests,
            next: 0,
            clock: 0,
            budget: config.cycle_budget(),
            state: RunState::Idle,
            cache_config: config.cache.clone(),
            active: Lane::new(config.simulation.organization, &config.cache),
            comparison: None,
            trace: None,
            rdata: 0,
        }
    }

    /// Also drives the other organization for a side-by-side comparison.
    pub fn with_comparison(mut self) -> Self {
        let other = self.active.organization.other();
        self.comparison = Some(Lane::new(other, &self.cache_config));
        self
    }

    /// Sends one record per tick of the active organization to `sink`.
    pub fn attach_trace(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Current state of the run.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Ticks elapsed.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Organization receiving the requests.
    pub fn organization(&self) -> Organization {
        self.active.organization
    }

    /// The active cache.
    pub fn cache(&self) -> &dyn CacheModel {
        self.active.cache.as_ref()
    }

    /// Backing memory of the active cache.
    pub fn memory(&self) -> &BackingMemory {
        &self.active.memory
    }

    /// Number of requests in the stream.
    pub fn total_requests(&self) -> usize {
        self.requests.len()
    }

    /// Advances the clock by one tick.
    ///
    /// # Returns
    ///
    /// The active cache's response, or `None` once the run has reached a
    /// terminal state. The tick that issues the last request, or that uses
    /// up the budget, moves the state there before returning.
    pub fn step(&mut self) -> Option<Response> {
        match self.state {
            RunState::Completed | RunState::BudgetExceeded => return None,
            RunState::Idle => {
                log::debug!(
                    "starting {:?} run: {} requests, budget {} cycles",
                    self.active.organization,
                    self.requests.len(),
                    self.budget
                );
                self.state = RunState::Running;
            }
            RunState::Running => {}
        }

        if let Some(end) = self.end_state() {
            self.finish(end);
            return None;
        }

        let request = self.requests[self.next];
        let response = self.active.process(&request);
        if let Some(lane) = self.comparison.as_mut() {
            lane.process(&request);
        }
        log::trace!(
            "tick {}: {:?} {:#010x} -> {:?}",
            self.clock,
            request.access_type(),
            request.address,
            response.outcome
        );

        if let Some(data) = response.read_data {
            self.rdata = data;
        }
        self.emit_trace(&request);

        self.next += 1;
        self.clock += 1;
        if let Some(end) = self.end_state() {
            self.finish(end);
        }
        Some(response)
    }

    /// Runs until a terminal state is reached and returns the result.
    pub fn run(&mut self) -> SimResult {
        while self.step().is_some() {}
        self.result()
    }

    /// Result of the active organization so far.
    pub fn result(&self) -> SimResult {
        SimResult::from_counters(self.active.cache.counters(), self.requests.len() as u64)
    }

    /// Result of the comparison lane, if one was requested.
    pub fn comparison_result(&self) -> Option<(Organization, SimResult)> {
        self.comparison.as_ref().map(|lane| {
            (
                lane.organization,
                SimResult::from_counters(lane.cache.counters(), self.requests.len() as u64),
            )
        })
    }

    fn emit_trace(&mut self, request: &Request) {
        let Some(sink) = self.trace.as_mut() else {
            return;
        };
        let counters = self.active.cache.counters();
        let record = TraceRecord {
            tick: self.clock,
            address: request.address,
            wdata: request.data,
            rdata: self.rdata,
            we: request.is_write,
            cycles: counters.cycles,
            hits: counters.hits,
            misses: counters.misses,
            structural_cost: counters.structural_cost,
            requests_issued: counters.requests_issued,
        };
        if let Err(e) = sink.record(&record) {
            log::warn!("trace write failed, detaching trace: {}", e);
            self.trace = None;
        }
    }

    /// Terminal state the run has reached, if any. Exhaustion wins over
    /// the budget when both hold.
    fn end_state(&self) -> Option<RunState> {
        if self.next >= self.requests.len() {
            Some(RunState::Completed)
        } else if self.clock >= self.budget {
            Some(RunState::BudgetExceeded)
        } else {
            None
        }
    }

    fn finish(&mut self, state: RunState) {
        self.state = state;
        log::debug!("run ended in {:?} after {} cycles", state, self.clock);
        if let Some(mut sink) = self.trace.take() {
            if let Err(e) = sink.close() {
                log::warn!("failed to close trace: {}", e);
            }
        }
    }
}
