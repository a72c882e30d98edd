//! Library surface of the `pumpqc` binary: logging setup lives here so
//! integration tests can drive it with a custom writer.

pub mod logging;
