//! The randomizer: a timed, decelerating reveal of a restaurant picked at
//! random from the candidates matching the filter.
//!
//! - [`sequencer`] is the synchronous state machine, returning effects
//! - [`runtime`] owns it on a tokio task and carries the effects out
//! - [`easter_egg`] and [`scheduler`] are the pieces the sequencer drives

pub mod config;
pub mod easter_egg;
pub mod error;
pub mod reconciliation;
pub mod runtime;
pub mod scheduler;
pub mod sequencer;
pub mod session;

pub use config::{RandomizerConfig, DEFAULT_EASTER_EGG_CHANCE};
pub use easter_egg::{EasterEggTrigger, NOPE_FRAMES};
pub use error::RandomizerError;
pub use reconciliation::{CounterKind, CounterUpdate, ResultReconciler};
pub use runtime::Randomizer;
pub use scheduler::StepTimer;
pub use sequencer::{Effect, RollSequencer};
pub use session::{Continuation, RollMode, RollPhase, RollSession, RollSnapshot, ScheduledStep};
