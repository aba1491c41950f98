mod common;
mod compliance;
mod sync;
