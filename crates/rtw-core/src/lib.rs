//! Decision-support rules for workplace injury return-to-work coordination.
//!
//! The engines in [`clinical`] are pure functions over case facts supplied by the caller. The
//! only I/O-adjacent piece is the certificate action sync, which talks to storage through the
//! traits in [`clinical::certificates::sync`].

pub mod clinical;
pub mod config;
pub mod dates;
pub mod error;
pub mod telemetry;
