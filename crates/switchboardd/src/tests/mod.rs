//! Test suites for the Switchboard server.

mod session_behaviour;
mod support;
