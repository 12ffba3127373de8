//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging only; metrics belong to the layers above
//! - Every failure in the transport core is logged where it is detected,
//!   with the operation name and OS error

pub mod logging;

pub use logging::init_logging;
