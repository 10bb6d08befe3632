// src/float/simd/neon.rs

use core::arch::aarch64::*;
use num_complex::Complex32;

use crate::float::core::{Twiddles, combine_rows};

/// Radix-4 combine on 128-bit registers (four rows) or, for the two-row
/// quarters of a `count == 8` level, 64-bit registers.
pub(super) fn combine(tw: &Twiddles<'_>, output: &mut [Complex32], stride: usize) {
    let n = output.len() / 4;
    let (out0, rest) = output.split_at_mut(n);
    let (out1, rest) = rest.split_at_mut(n);
    let (out2, out3) = rest.split_at_mut(n);
    let ptrs = [out0.as_mut_ptr(), out1.as_mut_ptr(), out2.as_mut_ptr(), out3.as_mut_ptr()];

    let done = if n % 4 == 0 {
        // Safety: selected only after neon was detected; quarters hold n rows.
        unsafe { combine_q(tw, ptrs, stride, n) };
        n
    } else if n == 2 {
        // Safety: as above, two rows per quarter.
        unsafe { combine_d(tw, ptrs, stride) };
        n
    } else {
        0
    };
    combine_rows(tw, [out0, out1, out2, out3], stride, done);
}

#[target_feature(enable = "neon")]
unsafe fn combine_q(tw: &Twiddles<'_>, out: [*mut Complex32; 4], stride: usize, rows: usize) {
    let inverse = tw.inverse();
    let [p0, p1, p2, p3] = out;

    let mut i = 0;
    while i < rows {
        unsafe {
            let f0 = vld2q_f32(p0.add(i) as *const f32);
            let f1 = vld2q_f32(p1.add(i) as *const f32);
            let f2 = vld2q_f32(p2.add(i) as *const f32);
            let f3 = vld2q_f32(p3.add(i) as *const f32);

            let w1 = gather_q(tw, i, stride);
            let w2 = gather_q(tw, i, 2 * stride);
            let w3 = gather_q(tw, i, 3 * stride);

            let f1w = vmul_complex_q(f1, w1);
            let f2w2 = vmul_complex_q(f2, w2);
            let f3w3 = vmul_complex_q(f3, w3);

            let sum02 = float32x4x2_t(vaddq_f32(f0.0, f2w2.0), vaddq_f32(f0.1, f2w2.1));
            let diff02 = float32x4x2_t(vsubq_f32(f0.0, f2w2.0), vsubq_f32(f0.1, f2w2.1));
            let sum13 = float32x4x2_t(vaddq_f32(f1w.0, f3w3.0), vaddq_f32(f1w.1, f3w3.1));
            let diff13 = float32x4x2_t(vsubq_f32(f1w.0, f3w3.0), vsubq_f32(f1w.1, f3w3.1));

            let x0 = float32x4x2_t(vaddq_f32(sum02.0, sum13.0), vaddq_f32(sum02.1, sum13.1));
            let x2 = float32x4x2_t(vsubq_f32(sum02.0, sum13.0), vsubq_f32(sum02.1, sum13.1));
            let plus = float32x4x2_t(vsubq_f32(diff02.0, diff13.1), vaddq_f32(diff02.1, diff13.0));
            let minus = float32x4x2_t(vaddq_f32(diff02.0, diff13.1), vsubq_f32(diff02.1, diff13.0));
            let (x1, x3) = if inverse { (plus, minus) } else { (minus, plus) };

            vst2q_f32(p0.add(i) as *mut f32, x0);
            vst2q_f32(p1.add(i) as *mut f32, x1);
            vst2q_f32(p2.add(i) as *mut f32, x2);
            vst2q_f32(p3.add(i) as *mut f32, x3);
        }
        i += 4;
    }
}

#[target_feature(enable = "neon")]
unsafe fn combine_d(tw: &Twiddles<'_>, out: [*mut Complex32; 4], stride: usize) {
    let [p0, p1, p2, p3] = out;
    unsafe {
        let f0 = vld2_f32(p0 as *const f32);
        let f1 = vld2_f32(p1 as *const f32);
        let f2 = vld2_f32(p2 as *const f32);
        let f3 = vld2_f32(p3 as *const f32);

        let w1 = gather_d(tw, stride);
        let w2 = gather_d(tw, 2 * stride);
        let w3 = gather_d(tw, 3 * stride);

        let f1w = vmul_complex_d(f1, w1);
        let f2w2 = vmul_complex_d(f2, w2);
        let f3w3 = vmul_complex_d(f3, w3);

        let sum02 = float32x2x2_t(vadd_f32(f0.0, f2w2.0), vadd_f32(f0.1, f2w2.1));
        let diff02 = float32x2x2_t(vsub_f32(f0.0, f2w2.0), vsub_f32(f0.1, f2w2.1));
        let sum13 = float32x2x2_t(vadd_f32(f1w.0, f3w3.0), vadd_f32(f1w.1, f3w3.1));
        let diff13 = float32x2x2_t(vsub_f32(f1w.0, f3w3.0), vsub_f32(f1w.1, f3w3.1));

        let x0 = float32x2x2_t(vadd_f32(sum02.0, sum13.0), vadd_f32(sum02.1, sum13.1));
        let x2 = float32x2x2_t(vsub_f32(sum02.0, sum13.0), vsub_f32(sum02.1, sum13.1));
        let plus = float32x2x2_t(vsub_f32(diff02.0, diff13.1), vadd_f32(diff02.1, diff13.0));
        let minus = float32x2x2_t(vadd_f32(diff02.0, diff13.1), vsub_f32(diff02.1, diff13.0));
        let (x1, x3) = if tw.inverse() { (plus, minus) } else { (minus, plus) };

        vst2_f32(p0 as *mut f32, x0);
        vst2_f32(p1 as *mut f32, x1);
        vst2_f32(p2 as *mut f32, x2);
        vst2_f32(p3 as *mut f32, x3);
    }
}

/// Twiddles for rows `i..i + 4`, real lanes in `.0` and imaginary in `.1`.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn gather_q(tw: &Twiddles<'_>, i: usize, step: usize) -> float32x4x2_t {
    let w = [
        tw.get(i * step),
        tw.get((i + 1) * step),
        tw.get((i + 2) * step),
        tw.get((i + 3) * step),
    ];
    let re = [w[0].re, w[1].re, w[2].re, w[3].re];
    let im = [w[0].im, w[1].im, w[2].im, w[3].im];
    unsafe { float32x4x2_t(vld1q_f32(re.as_ptr()), vld1q_f32(im.as_ptr())) }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn gather_d(tw: &Twiddles<'_>, step: usize) -> float32x2x2_t {
    let w0 = tw.get(0);
    let w1 = tw.get(step);
    let re = [w0.re, w1.re];
    let im = [w0.im, w1.im];
    unsafe { float32x2x2_t(vld1_f32(re.as_ptr()), vld1_f32(im.as_ptr())) }
}

/// (a + bi)(c + di) = (ac - bd) + (bc + ad)i, no fused multiply-add so the
/// lanes round exactly like the scalar path.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn vmul_complex_q(x: float32x4x2_t, y: float32x4x2_t) -> float32x4x2_t {
    let ac = vmulq_f32(x.0, y.0);
    let bd = vmulq_f32(x.1, y.1);
    let bc = vmulq_f32(x.1, y.0);
    let ad = vmulq_f32(x.0, y.1);
    float32x4x2_t(vsubq_f32(ac, bd), vaddq_f32(bc, ad))
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn vmul_complex_d(x: float32x2x2_t, y: float32x2x2_t) -> float32x2x2_t {
    let ac = vmul_f32(x.0, y.0);
    let bd = vmul_f32(x.1, y.1);
    let bc = vmul_f32(x.1, y.0);
    let ad = vmul_f32(x.0, y.1);
    float32x2x2_t(vsub_f32(ac, bd), vadd_f32(bc, ad))
}
