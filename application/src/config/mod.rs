//! Application-level configuration.
//!
//! - [`DebateParams`]: how each decision round is run (rounds, draw size,
//!   call timeout, arbitration policy, fan-out, seed)

pub mod debate_params;

pub use debate_params::DebateParams;
