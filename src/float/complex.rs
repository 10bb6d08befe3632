use crate::common::{FftError, FftProcess};
use num_complex::Complex32; // Complex<f32>
use super::context::FftContext;
use super::core::{Twiddles, transform};

impl FftContext<'_> {
    /// Forward DFT of `input[..count]` into `output[..count]`.
    ///
    /// No scaling is applied in either direction: a forward transform
    /// followed by an inverse one returns the input multiplied by `count`.
    pub fn forward_complex(
        &self,
        count: usize,
        input: &[Complex32],
        output: &mut [Complex32],
    ) -> Result<(), FftError> {
        self.run_complex(count, input, output, false)
    }

    /// Inverse DFT of `input[..count]` into `output[..count]`, unscaled.
    pub fn inverse_complex(
        &self,
        count: usize,
        input: &[Complex32],
        output: &mut [Complex32],
    ) -> Result<(), FftError> {
        self.run_complex(count, input, output, true)
    }

    fn run_complex(
        &self,
        count: usize,
        input: &[Complex32],
        output: &mut [Complex32],
        inverse: bool,
    ) -> Result<(), FftError> {
        if let Err(err) = self.validate(count, inverse) {
            tracing::debug!(count, inverse, %err, "complex transform rejected");
            return Err(err);
        }
        if input.len() < count || output.len() < count {
            return Err(FftError::SizeMismatch);
        }

        let tw = Twiddles::new(self.table(), count, self.table_is_inverse(), inverse);
        transform(self.kernel(), &tw, input, 0, 1, &mut output[..count]);
        Ok(())
    }
}

// Full-size transform at the context's `max_count`.
impl FftProcess<Complex32> for FftContext<'_> {
    fn process(
        &self,
        input: &[Complex32],
        output: &mut [Complex32],
        inverse: bool,
    ) -> Result<(), FftError> {
        self.run_complex(self.max_count(), input, output, inverse)
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
