// src/float/context.rs

use core::fmt;
use core::mem::size_of;

use num_complex::Complex32;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::core::precompute_twiddles;
use super::simd::{self, Kernel, KernelKind};
use crate::common::{Direction, FftError};

/// Creation parameters for an [`FftContext`].
///
/// `max_count` bounds every transform the context will run. Real contexts
/// that can run inverse transforms also reserve scratch space for the
/// spectrum reconstruction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FftConfig {
    max_count: usize,
    direction: Direction,
    real: bool,
    simd: bool,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FftConfig {
    pub const fn new(max_count: usize) -> Self {
        Self {
            max_count,
            direction: Direction::Forward,
            real: false,
            simd: true,
        }
    }

    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub const fn real(mut self, real: bool) -> Self {
        self.real = real;
        self
    }

    /// Allows a vectorized kernel when the CPU supports one. Turning this off
    /// forces the scalar kernel.
    pub const fn simd(mut self, simd: bool) -> Self {
        self.simd = simd;
        self
    }

    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    pub const fn is_real(&self) -> bool {
        self.real
    }

    fn layout(&self) -> Result<Layout, FftError> {
        if !self.max_count.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo);
        }
        let scratch_len = if self.real && self.direction.supports_inverse() {
            self.max_count / 2 + 1
        } else {
            0
        };
        let layout = Layout {
            table_len: self.max_count,
            scratch_len,
        };
        layout.bytes()?;
        Ok(layout)
    }

    /// Number of `Complex32` elements a caller buffer must hold for
    /// [`FftContext::new_in`].
    pub fn required_len(&self) -> Result<usize, FftError> {
        self.layout()?.total()
    }

    pub fn required_bytes(&self) -> Result<usize, FftError> {
        self.layout()?.bytes()
    }
}

/// Placement of the twiddle table and the scratch area inside one buffer.
#[derive(Debug, Clone, Copy)]
struct Layout {
    table_len: usize,
    scratch_len: usize,
}

impl Layout {
    fn total(&self) -> Result<usize, FftError> {
        self.table_len
            .checked_add(self.scratch_len)
            .ok_or(FftError::TooLarge)
    }

    /// Byte size of the whole buffer; fails when it does not fit in `usize`.
    fn bytes(&self) -> Result<usize, FftError> {
        self.total()?
            .checked_mul(size_of::<Complex32>())
            .ok_or(FftError::TooLarge)
    }
}

enum Storage<'a> {
    #[cfg(feature = "alloc")]
    Owned(Vec<Complex32>),
    Borrowed(&'a mut [Complex32]),
}

impl Storage<'_> {
    fn as_slice(&self) -> &[Complex32] {
        match self {
            #[cfg(feature = "alloc")]
            Storage::Owned(buf) => buf,
            Storage::Borrowed(buf) => buf,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [Complex32] {
        match self {
            #[cfg(feature = "alloc")]
            Storage::Owned(buf) => buf,
            Storage::Borrowed(buf) => buf,
        }
    }
}

/// Reusable transform state: the twiddle table for `max_count`, optional
/// real-inverse scratch and the kernel picked for this CPU.
///
/// The table is never modified after creation, so `&FftContext` can be
/// shared between threads. Dropping the context releases the buffer only
/// when it was allocated by [`FftContext::new`].
pub struct FftContext<'a> {
    config: FftConfig,
    layout: Layout,
    kernel: Kernel,
    storage: Storage<'a>,
}

#[cfg(feature = "alloc")]
impl FftContext<'static> {
    /// Creates a context that owns its table and scratch.
    pub fn new(config: FftConfig) -> Result<Self, FftError> {
        let layout = config.layout()?;
        let storage = Storage::Owned(alloc::vec![Complex32::default(); layout.total()?]);
        Ok(Self::build(config, layout, storage))
    }
}

impl<'a> FftContext<'a> {
    /// Creates a context inside a caller buffer of at least
    /// [`FftConfig::required_len`] elements. The buffer stays borrowed for
    /// the lifetime of the context and is never freed by it.
    pub fn new_in(config: FftConfig, buf: &'a mut [Complex32]) -> Result<Self, FftError> {
        let layout = config.layout()?;
        let required = layout.total()?;
        if buf.len() < required {
            tracing::debug!(required, available = buf.len(), "fft context buffer too small");
            return Err(FftError::BufferTooSmall { required });
        }
        Ok(Self::build(config, layout, Storage::Borrowed(&mut buf[..required])))
    }

    fn build(config: FftConfig, layout: Layout, mut storage: Storage<'a>) -> Self {
        let (table, _) = storage.as_mut_slice().split_at_mut(layout.table_len);
        precompute_twiddles(table, config.direction.table_is_inverse());

        let kernel = Kernel::select(config.simd);
        let ctx = Self {
            config,
            layout,
            kernel,
            storage,
        };
        tracing::debug!(
            max_count = config.max_count,
            direction = ?config.direction,
            real = config.real,
            kernel = ?kernel.kind(),
            owned = ctx.owns_buffer(),
            "created fft context"
        );
        ctx
    }

    /// Whether a vectorized kernel is available in this build on this CPU.
    pub fn is_simd_supported() -> bool {
        simd::simd_supported()
    }

    pub fn config(&self) -> FftConfig {
        self.config
    }

    pub fn max_count(&self) -> usize {
        self.config.max_count
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn is_real(&self) -> bool {
        self.config.real
    }

    pub fn kernel_kind(&self) -> KernelKind {
        self.kernel.kind()
    }

    pub fn uses_simd_kernel(&self) -> bool {
        self.kernel.kind().is_simd()
    }

    pub fn owns_buffer(&self) -> bool {
        match self.storage {
            #[cfg(feature = "alloc")]
            Storage::Owned(_) => true,
            Storage::Borrowed(_) => false,
        }
    }

    /// Length of the scratch area, zero unless the context serves inverse
    /// real transforms.
    pub fn scratch_len(&self) -> usize {
        self.layout.scratch_len
    }

    pub(crate) fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub(crate) fn table(&self) -> &[Complex32] {
        &self.storage.as_slice()[..self.layout.table_len]
    }

    /// Table and scratch borrowed together for the inverse real path.
    pub(crate) fn table_and_scratch(&mut self) -> (&[Complex32], &mut [Complex32]) {
        let layout = self.layout;
        let (table, scratch) = self.storage.as_mut_slice().split_at_mut(layout.table_len);
        (table, &mut scratch[..layout.scratch_len])
    }

    /// Checks `count` against the context geometry and direction.
    pub(crate) fn validate(&self, count: usize, inverse: bool) -> Result<(), FftError> {
        if !count.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo);
        }
        if count > self.config.max_count {
            return Err(FftError::CountExceedsCapacity {
                count,
                max_count: self.config.max_count,
            });
        }
        let supported = if inverse {
            self.config.direction.supports_inverse()
        } else {
            self.config.direction.supports_forward()
        };
        if !supported {
            return Err(FftError::DirectionUnsupported);
        }
        Ok(())
    }

    pub(crate) fn table_is_inverse(&self) -> bool {
        self.config.direction.table_is_inverse()
    }
}

impl fmt::Debug for FftContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftContext")
            .field("max_count", &self.config.max_count)
            .field("direction", &self.config.direction)
            .field("real", &self.config.real)
            .field("kernel", &self.kernel.kind())
            .field("owns_buffer", &self.owns_buffer())
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
