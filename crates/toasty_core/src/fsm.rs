//! State machine transitions
//!
//! Lifecycle types implement [`StateTransitions`] as a pure transition table.
//! Callers ask the table whether an event is legal in the current state and
//! only perform side effects when it returns a new state.
//!
//! ```rust
//! use toasty_core::StateTransitions;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Door {
//!     Open,
//!     Closed,
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Push {
//!     Toggle,
//! }
//!
//! impl StateTransitions for Door {
//!     type Event = Push;
//!
//!     fn on_event(&self, event: Push) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Open, Push::Toggle) => Some(Door::Closed),
//!             (Door::Closed, Push::Toggle) => Some(Door::Open),
//!         }
//!     }
//! }
//!
//! assert_eq!(Door::Open.on_event(Push::Toggle), Some(Door::Closed));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// A state type with an explicit transition table
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Events that drive this machine
    type Event: Clone + Copy + PartialEq + Eq + Debug;

    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: Self::Event) -> Option<Self>;

    /// Whether `event` is legal in this state
    fn accepts(&self, event: Self::Event) -> bool {
        self.on_event(event).is_some()
    }
}
