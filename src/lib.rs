//! Solvebench - benchmark harness for combinatorial solvers
//!
//! This library drives an external solver over a corpus of generated problem
//! instances, echoes each result line, and summarizes elapsed times per
//! problem type. The same aggregation can be replayed over a captured output
//! stream to regenerate its summary lines.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod metadata;
pub mod record;
pub mod replay;
pub mod runner;
pub mod solver;
pub mod stats;
