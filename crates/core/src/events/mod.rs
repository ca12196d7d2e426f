//! Budget update events module.
//!
//! Provides the process-local update bus that mutation call sites use to
//! announce budget changes, the trailing-edge debouncer subscribers apply to
//! coalesce bursts, and the observer glue budget-summary UI surfaces attach
//! to. Everything here is in-process; nothing is persisted or delivered
//! across processes.

mod budget_update;
mod bus;
mod debounce;
mod observer;

pub use budget_update::*;
pub use bus::*;
pub use debounce::*;
pub use observer::*;
