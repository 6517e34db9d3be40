//! Fuel Track backend library, shared by the `fuel-server` binary and the
//! end-to-end tests.

pub mod server;
