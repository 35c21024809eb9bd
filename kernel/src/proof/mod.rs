//! Proof module: canonical digests for grids and plans.
//!
//! Depends on nothing else in the kernel; callers hash the bytes they own.

pub mod hash;
