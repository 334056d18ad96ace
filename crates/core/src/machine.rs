//! State machine contract for client-side flows (pure, deterministic).
//!
//! - **Decision logic**: `handle(&self, cmd)` returns events.
//! - **State mutation**: `apply(&mut self, event)` evolves state.
//!
//! Machines must not perform IO or side effects. They only return events
//! describing what happened; async drivers interpret those events (call the
//! identity provider, persist, navigate) and feed completions back in.

/// A pure decide/apply state machine.
///
/// This split keeps every transition testable without a provider or a store:
/// `handle` is a pure function of (state, command), and `apply` is the only
/// place state changes.
pub trait StateMachine {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations should remain deterministic.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    /// Returning an empty event list is a valid decision (a guarded no-op,
    /// e.g. a duplicate submit while one is in flight).
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Execute a command against a machine: decide, then evolve.
///
/// Returns the emitted events so the caller can act on them (a driver reads
/// them to know whether a provider call was actually started).
pub fn execute<M>(machine: &mut M, command: &M::Command) -> Result<Vec<M::Event>, M::Error>
where
    M: StateMachine,
{
    let events = M::handle(machine, command)?;
    for ev in &events {
        M::apply(machine, ev);
    }
    Ok(events)
}
