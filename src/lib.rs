#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod util;

pub use pipeline::{QuizContentSelector, QuizSource, SelectError, SelectionOutcome};
