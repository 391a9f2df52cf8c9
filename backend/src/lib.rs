//! Habit tracker backend: behavior definitions, daily completion logs,
//! and the compliance analytics that turn a sparse log of yes/no
//! completions into streaks, rolling rates, and target-frequency
//! classifications.

pub mod domain;
pub mod rest;
pub mod storage;
