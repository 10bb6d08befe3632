#![cfg_attr(not(feature = "std"), no_std)]

// Owned context storage needs a heap; everything else runs on borrowed slices.
#[cfg(feature = "alloc")]
extern crate alloc;

pub mod api;
pub mod common;
pub mod float;

pub use common::{Direction, FftError, FftProcess};
pub use float::{FftConfig, FftContext, KernelKind};
pub use num_complex::Complex32;
