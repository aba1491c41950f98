//! Clinical and compliance decision-support engines.
//!
//! Every engine is advisory: results describe the evidence and suggest follow-up, a human
//! coordinator decides what happens next.

pub mod certificates;
pub mod evidence;
pub mod suitability;
