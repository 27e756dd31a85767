pub mod auth;

pub use auth::{auth_gate_middleware, AuthGate, GateOutcome, Subject};
