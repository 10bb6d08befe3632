use crate::common::FftError;
use num_complex::Complex32;
use core::slice;
use super::context::FftContext;
use super::core::{Twiddles, transform};
use super::math::{add, mul, rotate_i, sub};
use super::simd::Kernel;

// A real sequence of N samples is transformed as N/2 complex pairs
// z[n] = x[2n] + i*x[2n+1], and the one-sided spectrum is separated from
// Z = DFT(z) with X[k] = (Z[k] + conj(Z[N/2-k])) / 2 + W^k (Z[k] - conj(Z[N/2-k])) / 2i.
// The halving is skipped, so every bin comes out doubled.
impl FftContext<'_> {
    /// Forward transform of `count` real samples into the `count/2 + 1` bins
    /// of the one-sided spectrum.
    ///
    /// The bins are **twice** the DFT values: `output[k] = 2 * X[k]`.
    pub fn forward_real(
        &self,
        count: usize,
        input: &[f32],
        output: &mut [Complex32],
    ) -> Result<(), FftError> {
        if let Err(err) = self.validate_real(count, false) {
            tracing::debug!(count, %err, "forward real transform rejected");
            return Err(err);
        }
        if input.len() < count || output.len() < count / 2 + 1 {
            return Err(FftError::SizeMismatch);
        }

        if count == 1 {
            output[0] = Complex32::new(2.0 * input[0], 0.0);
            return Ok(());
        }

        let half = count / 2;
        let table = self.table();
        let table_inverse = self.table_is_inverse();

        let tw = Twiddles::new(table, half, table_inverse, false);
        transform(self.kernel(), &tw, as_complex(&input[..count]), 0, 1, &mut output[..half]);

        // Z is periodic in N/2; the separation reads Z[N/2] at i == 0.
        output[half] = output[0];

        let sep = Twiddles::new(table, count, table_inverse, false);
        // Rows i and N/2 - i meet at N/4, which is written twice with equal values.
        for i in 0..=count / 4 {
            let (sum, diff) = sum_diff(output[i], output[half - i]);
            output[i] = sub(sum, mul(rotate_i(sep.get(i)), diff));

            let (sum, diff) = mirror(sum, diff);
            output[half - i] = sub(sum, mul(rotate_i(sep.get(half - i)), diff));
        }

        Ok(())
    }

    /// Inverse transform of the one-sided spectrum `input[..=count/2]` into
    /// `count` real samples, using the context's own scratch area.
    ///
    /// Given the true spectrum of `x` the output is `count * x`.
    pub fn inverse_real(
        &mut self,
        count: usize,
        input: &[Complex32],
        output: &mut [f32],
    ) -> Result<(), FftError> {
        if let Err(err) = self.validate_real(count, true) {
            tracing::debug!(count, %err, "inverse real transform rejected");
            return Err(err);
        }
        let kernel = *self.kernel();
        let table_inverse = self.table_is_inverse();
        let (table, scratch) = self.table_and_scratch();
        inverse_real_into(&kernel, table, table_inverse, count, input, output, scratch)
    }

    /// Same as [`FftContext::inverse_real`] with a caller scratch buffer of at
    /// least [`FftContext::inverse_real_scratch_len`] elements, so a shared
    /// context can serve several threads.
    pub fn inverse_real_with_scratch(
        &self,
        count: usize,
        input: &[Complex32],
        output: &mut [f32],
        scratch: &mut [Complex32],
    ) -> Result<(), FftError> {
        if let Err(err) = self.validate_real(count, true) {
            tracing::debug!(count, %err, "inverse real transform rejected");
            return Err(err);
        }
        inverse_real_into(
            self.kernel(),
            self.table(),
            self.table_is_inverse(),
            count,
            input,
            output,
            scratch,
        )
    }

    pub fn inverse_real_scratch_len(count: usize) -> usize {
        count / 2 + 1
    }

    fn validate_real(&self, count: usize, inverse: bool) -> Result<(), FftError> {
        if !self.is_real() {
            return Err(FftError::NotRealContext);
        }
        self.validate(count, inverse)
    }
}

fn inverse_real_into(
    kernel: &Kernel,
    table: &[Complex32],
    table_inverse: bool,
    count: usize,
    input: &[Complex32],
    output: &mut [f32],
    scratch: &mut [Complex32],
) -> Result<(), FftError> {
    let half = count / 2;
    if input.len() < half + 1 || output.len() < count {
        return Err(FftError::SizeMismatch);
    }
    if scratch.len() < half + 1 {
        return Err(FftError::BufferTooSmall { required: half + 1 });
    }

    if count == 1 {
        output[0] = input[0].re;
        return Ok(());
    }

    let sep = Twiddles::new(table, count, table_inverse, true);
    for i in 0..=count / 4 {
        let (sum, diff) = sum_diff(input[i], input[half - i]);
        scratch[i] = add(sum, mul(rotate_i(sep.get(i)), diff));

        let (sum, diff) = mirror(sum, diff);
        scratch[half - i] = add(sum, mul(rotate_i(sep.get(half - i)), diff));
    }

    let tw = Twiddles::new(table, half, table_inverse, true);
    transform(kernel, &tw, &scratch[..half], 0, 1, as_complex_mut(&mut output[..count]));
    Ok(())
}

/// `z0 + conj(z1)` and `z0 - conj(z1)`.
#[inline(always)]
fn sum_diff(z0: Complex32, z1: Complex32) -> (Complex32, Complex32) {
    (
        Complex32::new(z0.re + z1.re, z0.im - z1.im),
        Complex32::new(z0.re - z1.re, z0.im + z1.im),
    )
}

/// Sum and difference for the mirrored row: `conj(sum)` and `-conj(diff)`.
#[inline(always)]
fn mirror(sum: Complex32, diff: Complex32) -> (Complex32, Complex32) {
    (Complex32::new(sum.re, -sum.im), Complex32::new(-diff.re, diff.im))
}

fn as_complex(samples: &[f32]) -> &[Complex32] {
    debug_assert!(samples.len() % 2 == 0);
    // Safety: Complex32 is repr(C) with two f32 fields, so it has the size of
    // two f32 and the same alignment.
    unsafe { slice::from_raw_parts(samples.as_ptr() as *const Complex32, samples.len() / 2) }
}

fn as_complex_mut(samples: &mut [f32]) -> &mut [Complex32] {
    debug_assert!(samples.len() % 2 == 0);
    // Safety: see `as_complex`.
    unsafe { slice::from_raw_parts_mut(samples.as_mut_ptr() as *mut Complex32, samples.len() / 2) }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
