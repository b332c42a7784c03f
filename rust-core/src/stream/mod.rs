//! Live replay: the window feeder and its tick gate

pub mod feeder;
pub mod scheduler;

pub use feeder::{FeederPhase, StreamState, StreamingWindowFeeder, Tick};
pub use scheduler::TickScheduler;
