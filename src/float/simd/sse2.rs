// src/float/simd/sse2.rs

use core::arch::x86_64::*;
use num_complex::Complex32;

use crate::float::core::{Twiddles, combine_rows};

/// Radix-4 combine, four output rows per iteration.
///
/// Quarters shorter than four rows (the `count == 8` level) go through the
/// scalar rows.
pub(super) fn combine(tw: &Twiddles<'_>, output: &mut [Complex32], stride: usize) {
    let n = output.len() / 4;
    let (out0, rest) = output.split_at_mut(n);
    let (out1, rest) = rest.split_at_mut(n);
    let (out2, out3) = rest.split_at_mut(n);

    let lanes = n - n % 4;
    if lanes > 0 {
        // Safety: this kernel is only selected after sse2 was detected, and
        // every quarter holds at least `lanes` elements.
        unsafe { combine_sse2(tw, [out0.as_mut_ptr(), out1.as_mut_ptr(), out2.as_mut_ptr(), out3.as_mut_ptr()], stride, lanes) };
    }
    combine_rows(tw, [out0, out1, out2, out3], stride, lanes);
}

#[target_feature(enable = "sse2")]
unsafe fn combine_sse2(tw: &Twiddles<'_>, out: [*mut Complex32; 4], stride: usize, lanes: usize) {
    let inverse = tw.inverse();
    let [p0, p1, p2, p3] = out;

    let mut i = 0;
    while i < lanes {
        unsafe {
            let (f0_re, f0_im) = load_deinterleaved(p0.add(i));
            let (f1_re, f1_im) = load_deinterleaved(p1.add(i));
            let (f2_re, f2_im) = load_deinterleaved(p2.add(i));
            let (f3_re, f3_im) = load_deinterleaved(p3.add(i));

            let (w1_re, w1_im) = gather_twiddles(tw, i, stride);
            let (w2_re, w2_im) = gather_twiddles(tw, i, 2 * stride);
            let (w3_re, w3_im) = gather_twiddles(tw, i, 3 * stride);

            let (f1w_re, f1w_im) = complex_mul(f1_re, f1_im, w1_re, w1_im);
            let (f2w2_re, f2w2_im) = complex_mul(f2_re, f2_im, w2_re, w2_im);
            let (f3w3_re, f3w3_im) = complex_mul(f3_re, f3_im, w3_re, w3_im);

            let sum02_re = _mm_add_ps(f0_re, f2w2_re);
            let sum02_im = _mm_add_ps(f0_im, f2w2_im);
            let diff02_re = _mm_sub_ps(f0_re, f2w2_re);
            let diff02_im = _mm_sub_ps(f0_im, f2w2_im);
            let sum13_re = _mm_add_ps(f1w_re, f3w3_re);
            let sum13_im = _mm_add_ps(f1w_im, f3w3_im);
            let diff13_re = _mm_sub_ps(f1w_re, f3w3_re);
            let diff13_im = _mm_sub_ps(f1w_im, f3w3_im);

            store_interleaved(p0.add(i), _mm_add_ps(sum02_re, sum13_re), _mm_add_ps(sum02_im, sum13_im));
            store_interleaved(p2.add(i), _mm_sub_ps(sum02_re, sum13_re), _mm_sub_ps(sum02_im, sum13_im));

            // x + i*y = (x.re - y.im, x.im + y.re), x - i*y = (x.re + y.im, x.im - y.re)
            let plus_re = _mm_sub_ps(diff02_re, diff13_im);
            let plus_im = _mm_add_ps(diff02_im, diff13_re);
            let minus_re = _mm_add_ps(diff02_re, diff13_im);
            let minus_im = _mm_sub_ps(diff02_im, diff13_re);
            if inverse {
                store_interleaved(p1.add(i), plus_re, plus_im);
                store_interleaved(p3.add(i), minus_re, minus_im);
            } else {
                store_interleaved(p1.add(i), minus_re, minus_im);
                store_interleaved(p3.add(i), plus_re, plus_im);
            }
        }
        i += 4;
    }
}

/// Loads four complex values and splits them into real and imaginary lanes.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load_deinterleaved(ptr: *const Complex32) -> (__m128, __m128) {
    unsafe {
        let p = ptr as *const f32;
        let a = _mm_loadu_ps(p);
        let b = _mm_loadu_ps(p.add(4));
        (
            _mm_shuffle_ps(a, b, 0b10_00_10_00),
            _mm_shuffle_ps(a, b, 0b11_01_11_01),
        )
    }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store_interleaved(ptr: *mut Complex32, re: __m128, im: __m128) {
    unsafe {
        let p = ptr as *mut f32;
        _mm_storeu_ps(p, _mm_unpacklo_ps(re, im));
        _mm_storeu_ps(p.add(4), _mm_unpackhi_ps(re, im));
    }
}

/// Twiddles for rows `i..i + 4` at the given step. Read through the scalar
/// accessor so conjugation happens exactly as on the scalar path.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn gather_twiddles(tw: &Twiddles<'_>, i: usize, step: usize) -> (__m128, __m128) {
    let w0 = tw.get(i * step);
    let w1 = tw.get((i + 1) * step);
    let w2 = tw.get((i + 2) * step);
    let w3 = tw.get((i + 3) * step);
    (
        _mm_setr_ps(w0.re, w1.re, w2.re, w3.re),
        _mm_setr_ps(w0.im, w1.im, w2.im, w3.im),
    )
}

/// (a + bi)(c + di) = (ac - bd) + (bc + ad)i
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn complex_mul(a: __m128, b: __m128, c: __m128, d: __m128) -> (__m128, __m128) {
    let ac = _mm_mul_ps(a, c);
    let bd = _mm_mul_ps(b, d);
    let bc = _mm_mul_ps(b, c);
    let ad = _mm_mul_ps(a, d);
    (_mm_sub_ps(ac, bd), _mm_add_ps(bc, ad))
}
