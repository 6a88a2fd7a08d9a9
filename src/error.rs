//! Population-level failure conditions
//!
//! Per-rocket arithmetic never fails: huge, negative or non-finite fitness and
//! zero-length velocity are ordinary outcomes. Only the states below stop a
//! tick, and the caller decides whether to halt or reset.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Selection probabilities would divide by zero
    #[error("total population fitness is zero, selection probabilities are undefined")]
    ZeroTotalFitness,

    /// No live rocket to rank or breed from
    #[error("population has no live rockets")]
    EmptyPopulation,

    #[error("genome channels differ in length (bottom {bottom}, left {left}, right {right})")]
    GenomeLengthMismatch {
        bottom: usize,
        left: usize,
        right: usize,
    },
}
