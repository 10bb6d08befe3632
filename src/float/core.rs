// src/float/core.rs

use num_complex::Complex32;
use core::f64::consts::PI;

use super::math::{add, add_i, mul, sub, sub_i};
use super::simd::Kernel;

/// Fills `table` with `exp(-2πik/N)` for `k = 0..N`, where `N = table.len()`.
///
/// With `inverse` set the imaginary part is negated, giving `exp(+2πik/N)`.
pub(crate) fn precompute_twiddles(table: &mut [Complex32], inverse: bool) {
    let n = table.len();
    for (k, slot) in table.iter_mut().enumerate() {
        let angle = -2.0 * PI * (k as f64) / (n as f64);
        let (sin, cos) = sin_cos(angle);
        let w = Complex32::new(cos as f32, sin as f32);
        *slot = if inverse { w.conj() } else { w };
    }
}

fn sin_cos(angle: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    return (angle.sin(), angle.cos());

    #[cfg(not(feature = "std"))]
    return (libm::sin(angle), libm::cos(angle));
}

/// View of the twiddle table for one transform call.
///
/// `div` is `max_count / count` of the outermost transform, so a recursion
/// level working at input stride `s` reads entry `i * s * div`.
#[derive(Clone, Copy)]
pub(crate) struct Twiddles<'t> {
    table: &'t [Complex32],
    div: usize,
    conjugate: bool,
    inverse: bool,
}

impl<'t> Twiddles<'t> {
    /// `table_inverse` is the sign convention the table was built with,
    /// `inverse` the direction of this call.
    pub(crate) fn new(table: &'t [Complex32], count: usize, table_inverse: bool, inverse: bool) -> Self {
        debug_assert!(count > 0 && table.len() % count == 0);
        Self {
            table,
            div: table.len() / count,
            conjugate: table_inverse != inverse,
            inverse,
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, k: usize) -> Complex32 {
        let w = self.table[k * self.div];
        if self.conjugate { w.conj() } else { w }
    }

    #[inline(always)]
    pub(crate) fn inverse(&self) -> bool {
        self.inverse
    }
}

/// One radix-4 output row from the already-rotated partial spectra
/// `f0`, `f1·W`, `f2·W²`, `f3·W³`.
#[inline(always)]
pub(crate) fn butterfly4(
    f0: Complex32,
    f1w: Complex32,
    f2w2: Complex32,
    f3w3: Complex32,
    inverse: bool,
) -> [Complex32; 4] {
    let sum02 = add(f0, f2w2);
    let diff02 = sub(f0, f2w2);
    let sum13 = add(f1w, f3w3);
    let diff13 = sub(f1w, f3w3);

    // X1 = D02 - i*D13 and X3 = D02 + i*D13 going forward, swapped going back.
    let (x1, x3) = if inverse {
        (add_i(diff02, diff13), sub_i(diff02, diff13))
    } else {
        (sub_i(diff02, diff13), add_i(diff02, diff13))
    };

    [add(sum02, sum13), x1, sub(sum02, sum13), x3]
}

/// Recursive decimation-in-time transform of `output.len()` samples read from
/// `input[offset]`, `input[offset + stride]`, ...
///
/// Sizes that are not a power of four bottom out in the radix-2 case.
pub(crate) fn transform(
    kernel: &Kernel,
    tw: &Twiddles<'_>,
    input: &[Complex32],
    offset: usize,
    stride: usize,
    output: &mut [Complex32],
) {
    let count = output.len();
    match count {
        1 => output[0] = input[offset],
        2 => {
            let a = input[offset];
            let b = input[offset + stride];
            output[0] = add(a, b);
            output[1] = sub(a, b);
        }
        4 => {
            // Closed-form twiddles 1, -i, -1, i; no table reads.
            let x = [
                input[offset],
                input[offset + stride],
                input[offset + 2 * stride],
                input[offset + 3 * stride],
            ];
            output.copy_from_slice(&butterfly4(x[0], x[1], x[2], x[3], tw.inverse()));
        }
        _ => {
            debug_assert!(count % 4 == 0);
            let n = count / 4;
            let stride4 = stride * 4;
            for (q, quarter) in output.chunks_exact_mut(n).enumerate() {
                transform(kernel, tw, input, offset + q * stride, stride4, quarter);
            }
            kernel.combine(tw, output, stride);
        }
    }
}

/// Scalar combine of four consecutive partial spectra held in `output`.
pub(crate) fn combine_scalar(tw: &Twiddles<'_>, output: &mut [Complex32], stride: usize) {
    let n = output.len() / 4;
    let (out0, rest) = output.split_at_mut(n);
    let (out1, rest) = rest.split_at_mut(n);
    let (out2, out3) = rest.split_at_mut(n);
    combine_rows(tw, [out0, out1, out2, out3], stride, 0);
}

/// Combines rows `start..n` of the four quarter slices.
#[inline(always)]
pub(crate) fn combine_rows(
    tw: &Twiddles<'_>,
    quarters: [&mut [Complex32]; 4],
    stride: usize,
    start: usize,
) {
    let [out0, out1, out2, out3] = quarters;
    let inverse = tw.inverse();
    for i in start..out0.len() {
        let f1w = mul(out1[i], tw.get(i * stride));
        let f2w2 = mul(out2[i], tw.get(2 * i * stride));
        let f3w3 = mul(out3[i], tw.get(3 * i * stride));
        let [x0, x1, x2, x3] = butterfly4(out0[i], f1w, f2w2, f3w3, inverse);
        out0[i] = x0;
        out1[i] = x1;
        out2[i] = x2;
        out3[i] = x3;
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
