//! Test module organization.
//!
//! This module organizes all integration tests for the cache simulator.


/// Address decomposition, request and error type tests.
mod common_tests;




/// Driver, budget and end-to-end scenario tests.
mod sim_tests;
