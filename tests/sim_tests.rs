//! Integration tests for the simulation driver.

use cache_sim::common::{Request, INVALID_DATA};
use cache_sim::config::{Config, Organization};
use cache_sim::sim::{RunState, Simulation, TraceRecord, TraceSink};
use cache_sim::stats::{RunCounters, SimResult, UNBOUNDED_CYCLES};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Creates a test configuration.
fn create_test_config(organization: Organization, lines: u32, line_size: u32) -> Config {
    let mut config = Config::default();
    config.simulation.organization = organization;
    config.cache.lines = lines;
    config.cache.line_size = line_size;
    config
}

/// Trace sink that keeps every record in shared memory.
#[derive(Default)]
struct RecordingSink {
    records: Rc<RefCell<Vec<TraceRecord>>>,
    closed: Rc<RefCell<bool>>,
}

impl TraceSink for RecordingSink {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.records.borrow_mut().push(*record);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        *self.closed.borrow_mut() = true;
        Ok(())
    }
}

/// Trace sink whose writes always fail.
struct FailingSink;

impl TraceSink for FailingSink {
    fn record(&mut self, _record: &TraceRecord) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

/// Tests a write then read of the same address on a direct-mapped cache.
#[test]
fn test_direct_mapped_write_then_read() {
    let config = create_test_config(Organization::DirectMapped, 4, 8);
    let requests = vec![Request::write(0x00, 1), Request::read(0x00)];
    let mut sim = Simulation::new(requests, &config);

    assert!(sim.step().is_some());
    let c = sim.cache().counters();
    assert_eq!((c.hits, c.misses), (0, 0));

    let resp = sim.step().unwrap();
    assert_eq!(resp.read_data, Some(1));

    let result = sim.run();
    assert_eq!(sim.state(), RunState::Completed);
    assert_eq!(result.hits, 1);
    assert_eq!(result.misses, 0);
    assert_eq!(result.cycles, 2);
    assert!(result.completed);
}

/// Tests the single-line fully-associative eviction scenario end to end.
#[test]
fn test_fully_associative_single_line_run() {
    let config = create_test_config(Organization::FullyAssociative, 1, 16);
    let requests = vec![
        Request::write(0x00, 5),
        Request::write(0x40, 9),
        Request::read(0x00),
    ];
    let mut sim = Simulation::new(requests, &config);

    let result = sim.run();
    assert_eq!(result.misses, 1);
    assert_eq!(result.hits, 0);
    assert_eq!(result.cycles, 3);
    assert_eq!(sim.memory().read(0x40), Some(9));
}

/// Tests every read of an empty memory misses in both organizations.
#[test]
fn test_reads_on_empty_memory_all_miss() {
    for organization in [Organization::DirectMapped, Organization::FullyAssociative] {
        let config = create_test_config(organization, 4, 8);
        let requests: Vec<Request> = (0..6).map(|i| Request::read(i * 3)).collect();
        let mut sim = Simulation::new(requests, &config);

        let mut responses = Vec::new();
        while let Some(resp) = sim.step() {
            responses.push(resp);
        }
        assert!(responses
            .iter()
            .all(|r| r.read_data == Some(INVALID_DATA)));

        let result = sim.result();
        assert_eq!((result.hits, result.misses), (0, 6), "{:?}", organization);
        assert!(sim.memory().is_empty());
    }
}

/// Tests a stored value reads back its low byte in both organizations.
#[test]
fn test_round_trip_low_byte() {
    for organization in [Organization::DirectMapped, Organization::FullyAssociative] {
        let config = create_test_config(organization, 4, 8);
        let requests = vec![Request::write(0x21, 0x1234), Request::read(0x21)];
        let mut sim = Simulation::new(requests, &config);

        sim.step();
        let resp = sim.step().unwrap();
        assert_eq!(resp.read_data, Some(0x34), "{:?}", organization);
    }
}

/// Tests a budget smaller than the request count stops the run.
#[test]
fn test_budget_exceeded() {
    let mut config = create_test_config(Organization::DirectMapped, 4, 8);
    config.simulation.cycles = 3;
    let requests: Vec<Request> = (0..5).map(|i| Request::write(i, i + 1)).collect();
    let mut sim = Simulation::new(requests, &config);

    let result = sim.run();
    assert_eq!(sim.state(), RunState::BudgetExceeded);
    assert_eq!(sim.clock(), 3);
    assert_eq!(result.cycles, UNBOUNDED_CYCLES);
    assert_eq!(result.requests_issued, 3);
    assert!(!result.completed);

    // Nothing past the budget reached memory.
    assert_eq!(sim.memory().read(3), None);
}

/// Tests a budget equal to the request count completes.
#[test]
fn test_budget_exactly_sufficient() {
    let mut config = create_test_config(Organization::FullyAssociative, 4, 8);
    config.simulation.cycles = 2;
    let requests = vec![Request::write(0x10, 7), Request::read(0x10)];
    let mut sim = Simulation::new(requests, &config);

    let result = sim.run();
    assert_eq!(sim.state(), RunState::Completed);
    assert_eq!(result.cycles, 2);
    assert_eq!(result.hits, 1);
}

/// Tests an empty request list with a zero budget completes immediately.
#[test]
fn test_empty_requests_zero_budget() {
    let mut config = Config::default();
    config.simulation.cycles = 0;
    let mut sim = Simulation::new(Vec::new(), &config);

    let result = sim.run();
    assert_eq!(sim.state(), RunState::Completed);
    assert_eq!(result.cycles, 0);
    assert!(result.completed);
}

/// Tests the driver state transitions.
#[test]
fn test_state_transitions() {
    let config = Config::default();
    let mut sim = Simulation::new(vec![Request::read(0), Request::read(1)], &config);
    assert_eq!(sim.state(), RunState::Idle);
    assert_eq!(sim.total_requests(), 2);

    assert!(sim.step().is_some());
    assert_eq!(sim.state(), RunState::Running);

    assert!(sim.step().is_some());
    assert_eq!(sim.state(), RunState::Completed);

    assert!(sim.step().is_none());
    assert_eq!(sim.state(), RunState::Completed);
    assert_eq!(sim.clock(), 2);
}

/// Tests the tick issuing the last request completes the run and closes
/// the trace.
#[test]
fn test_last_request_completes_run() {
    let sink = RecordingSink::default();
    let closed = Rc::clone(&sink.closed);
    let mut sim = Simulation::new(vec![Request::write(0, 1)], &Config::default());
    sim.attach_trace(Box::new(sink));

    assert!(sim.step().is_some());
    assert_eq!(sim.state(), RunState::Completed);
    assert_eq!(sim.cache().counters().requests_issued, 1);
    assert!(*closed.borrow());
    assert!(sim.result().completed);
}

/// Tests the tick that uses up the budget ends the run.
#[test]
fn test_budget_reached_at_tick_end() {
    let mut config = Config::default();
    config.simulation.cycles = 1;
    let mut sim = Simulation::new(vec![Request::read(0), Request::read(1)], &config);

    assert!(sim.step().is_some());
    assert_eq!(sim.state(), RunState::BudgetExceeded);
    assert!(sim.step().is_none());
    assert_eq!(sim.clock(), 1);
}

/// Tests the final request completes the run even on the last budgeted tick.
#[test]
fn test_exhaustion_wins_over_budget() {
    let mut config = Config::default();
    config.simulation.cycles = 1;
    let mut sim = Simulation::new(vec![Request::read(0)], &config);

    assert!(sim.step().is_some());
    assert_eq!(sim.state(), RunState::Completed);
    assert!(sim.result().completed);
}

/// Tests the comparison lane runs the other organization independently.
#[test]
fn test_comparison_lane() {
    let config = create_test_config(Organization::DirectMapped, 2, 4);
    let requests = vec![
        Request::write(0x00, 1),
        Request::write(0x08, 2),
        Request::read(0x00),
    ];

    let mut plain = Simulation::new(requests.clone(), &config);
    let expected = plain.run();
    assert!(plain.comparison_result().is_none());

    let mut sim = Simulation::new(requests, &config).with_comparison();
    let result = sim.run();
    assert_eq!(result, expected);
    // 0x00 and 0x08 share line 0 in the direct-mapped cache.
    assert_eq!(result.misses, 1);

    let (organization, other) = sim.comparison_result().unwrap();
    assert_eq!(organization, Organization::FullyAssociative);
    assert_eq!(other.hits, 1);
    assert_eq!(other.cycles, 3);
}

/// Tests one trace record per tick with the read port held across writes.
#[test]
fn test_trace_records() {
    let config = create_test_config(Organization::DirectMapped, 4, 8);
    let requests = vec![
        Request::write(0x04, 0xAB),
        Request::read(0x04),
        Request::write(0x05, 0xCD),
    ];
    let sink = RecordingSink::default();
    let records = Rc::clone(&sink.records);
    let closed = Rc::clone(&sink.closed);

    let mut sim = Simulation::new(requests, &config);
    sim.attach_trace(Box::new(sink));
    sim.run();

    let records = records.borrow();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.tick).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    assert!(records[0].we);
    assert_eq!(records[0].wdata, 0xAB);
    assert_eq!(records[0].rdata, 0);

    assert!(!records[1].we);
    assert_eq!(records[1].rdata, 0xAB);
    assert_eq!(records[1].hits, 1);

    assert_eq!(records[2].address, 0x05);
    assert_eq!(records[2].rdata, 0xAB);
    assert_eq!(records[2].requests_issued, 3);
    assert!(*closed.borrow());
}

/// Tests the trace is closed when the budget runs out.
#[test]
fn test_trace_closed_on_budget_exceeded() {
    let mut config = Config::default();
    config.simulation.cycles = 1;
    let sink = RecordingSink::default();
    let records = Rc::clone(&sink.records);
    let closed = Rc::clone(&sink.closed);

    let mut sim = Simulation::new(vec![Request::read(0), Request::read(1)], &config);
    sim.attach_trace(Box::new(sink));
    sim.run();

    assert_eq!(sim.state(), RunState::BudgetExceeded);
    assert_eq!(records.borrow().len(), 1);
    assert!(*closed.borrow());
}

/// Tests a failing trace does not stop the run.
#[test]
fn test_failing_trace_is_detached() {
    let config = Config::default();
    let requests = vec![Request::write(0, 1), Request::read(0)];
    let mut sim = Simulation::new(requests, &config);
    sim.attach_trace(Box::new(FailingSink));

    let result = sim.run();
    assert!(result.completed);
    assert_eq!(result.hits, 1);
}

/// Tests result derivation from counters.
#[test]
fn test_sim_result_from_counters() {
    let counters = RunCounters {
        cycles: 4,
        hits: 3,
        misses: 1,
        structural_cost: 120,
        requests_issued: 4,
        ..RunCounters::default()
    };
    assert_eq!(counters.hit_rate(), 75.0);

    let done = SimResult::from_counters(&counters, 4);
    assert!(done.completed);
    assert_eq!(done.cycles, 4);
    assert_eq!(done.hit_rate(), counters.hit_rate());

    let cut = SimResult::from_counters(&counters, 10);
    assert!(!cut.completed);
    assert_eq!(cut.cycles, UNBOUNDED_CYCLES);
    assert_eq!(cut.hits, 3);
    assert_eq!(cut.structural_cost, 120);
}

/// Tests the hit rate of a run without reads.
#[test]
fn test_hit_rate_without_reads() {
    assert_eq!(RunCounters::default().hit_rate(), 0.0);
}
