// src/common.rs

use core::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    NotPowerOfTwo,
    CountExceedsCapacity { count: usize, max_count: usize },
    SizeMismatch,
    BufferTooSmall { required: usize },
    DirectionUnsupported,
    NotRealContext,
    TooLarge,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::NotPowerOfTwo => write!(f, "Size must be a non-zero power of 2"),
            FftError::CountExceedsCapacity { count, max_count } => write!(
                f,
                "Transform size {} exceeds the context maximum of {}",
                count, max_count
            ),
            FftError::SizeMismatch => write!(f, "Data buffer is shorter than the transform size"),
            FftError::BufferTooSmall { required } => write!(
                f,
                "Backing buffer is too small, {} complex elements required",
                required
            ),
            FftError::DirectionUnsupported => {
                write!(f, "Context was not created for this transform direction")
            }
            FftError::NotRealContext => write!(f, "Context was not created for real transforms"),
            FftError::TooLarge => write!(f, "Buffer size overflows the address space"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Which transform directions a context can serve.
///
/// The twiddle table is stored once. `Inverse` contexts store it with the
/// inverse sign convention, the other two with the forward one; `Both`
/// conjugates on the fly for inverse calls.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
    Both,
}

impl Direction {
    #[inline]
    pub fn supports_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    #[inline]
    pub fn supports_inverse(self) -> bool {
        matches!(self, Direction::Inverse | Direction::Both)
    }

    /// Sign convention of the stored table: `true` when it holds `exp(+2πik/N)`.
    #[inline]
    pub(crate) fn table_is_inverse(self) -> bool {
        self == Direction::Inverse
    }
}

pub trait FftProcess<T> {
    fn process(&self, input: &[T], output: &mut [T], inverse: bool) -> Result<(), FftError>;
}
