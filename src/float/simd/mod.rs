// src/float/simd/mod.rs
//
// Kernel selection. The butterfly recursion is shared; only the combine step
// differs between kernels, and it is resolved once when a context is built.

use num_complex::Complex32;

use super::core::{Twiddles, combine_scalar};

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod sse2;

/// The combine implementation a context resolved at creation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KernelKind {
    Scalar,
    Sse2,
    Neon,
}

impl KernelKind {
    pub fn is_simd(self) -> bool {
        self != KernelKind::Scalar
    }
}

type CombineFn = fn(&Twiddles<'_>, &mut [Complex32], usize);

#[derive(Clone, Copy)]
pub(crate) struct Kernel {
    kind: KernelKind,
    combine: CombineFn,
}

impl Kernel {
    pub(crate) const SCALAR: Kernel = Kernel {
        kind: KernelKind::Scalar,
        combine: combine_scalar,
    };

    /// Picks the fastest kernel the running CPU supports, or scalar when
    /// `allow_simd` is off.
    pub(crate) fn select(allow_simd: bool) -> Kernel {
        if allow_simd {
            if let Some(kernel) = Self::probe() {
                return kernel;
            }
        }
        Self::SCALAR
    }

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    fn probe() -> Option<Kernel> {
        if sse2_detected() {
            tracing::trace!("sse2 detected, using vectorized combine");
            Some(Kernel {
                kind: KernelKind::Sse2,
                combine: sse2::combine,
            })
        } else {
            None
        }
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    fn probe() -> Option<Kernel> {
        if neon_detected() {
            tracing::trace!("neon detected, using vectorized combine");
            Some(Kernel {
                kind: KernelKind::Neon,
                combine: neon::combine,
            })
        } else {
            None
        }
    }

    #[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
    fn probe() -> Option<Kernel> {
        None
    }

    #[inline]
    pub(crate) fn kind(&self) -> KernelKind {
        self.kind
    }

    #[inline(always)]
    pub(crate) fn combine(&self, tw: &Twiddles<'_>, output: &mut [Complex32], stride: usize) {
        (self.combine)(tw, output, stride)
    }
}

/// Whether this build and CPU can run a vectorized kernel.
pub(crate) fn simd_supported() -> bool {
    Kernel::probe().is_some()
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn sse2_detected() -> bool {
    #[cfg(feature = "std")]
    return std::arch::is_x86_feature_detected!("sse2");

    #[cfg(not(feature = "std"))]
    return cfg!(target_feature = "sse2");
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn neon_detected() -> bool {
    #[cfg(feature = "std")]
    return std::arch::is_aarch64_feature_detected!("neon");

    #[cfg(not(feature = "std"))]
    return cfg!(target_feature = "neon");
}

#[cfg(test)]
#[path = "simd_tests.rs"]
mod tests;
