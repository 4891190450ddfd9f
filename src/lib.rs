//! Capacity and connectivity diagnostics for a daily flight schedule and a weekly order log.

pub mod airport;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod network;
pub mod order;
pub mod report;
pub mod schedule;
pub mod time;
