pub mod complex;
pub mod context;
pub mod real;
mod core;
pub(crate) mod math;
mod simd;

pub use crate::common::{Direction, FftError, FftProcess};
pub use context::{FftConfig, FftContext};
pub use simd::KernelKind;
