// src/float/math.rs
//
// Scalar complex primitives. The SIMD kernels evaluate exactly these
// expressions lane by lane, so keep the operation order in sync with them.

use num_complex::Complex32;

#[inline(always)]
pub(crate) fn add(a: Complex32, b: Complex32) -> Complex32 {
    Complex32::new(a.re + b.re, a.im + b.im)
}

#[inline(always)]
pub(crate) fn sub(a: Complex32, b: Complex32) -> Complex32 {
    Complex32::new(a.re - b.re, a.im - b.im)
}

/// (a + bi)(c + di) = (ac - bd) + (bc + ad)i
#[inline(always)]
pub(crate) fn mul(x: Complex32, y: Complex32) -> Complex32 {
    Complex32::new(x.re * y.re - x.im * y.im, x.im * y.re + x.re * y.im)
}

/// x - i*y
#[inline(always)]
pub(crate) fn sub_i(x: Complex32, y: Complex32) -> Complex32 {
    Complex32::new(x.re + y.im, x.im - y.re)
}

/// x + i*y
#[inline(always)]
pub(crate) fn add_i(x: Complex32, y: Complex32) -> Complex32 {
    Complex32::new(x.re - y.im, x.im + y.re)
}

/// i*w, the rotation factor used by the real-spectrum separation.
#[inline(always)]
pub(crate) fn rotate_i(w: Complex32) -> Complex32 {
    Complex32::new(-w.im, w.re)
}

#[inline]
pub(crate) fn is_power_of_two_i32(x: i32) -> bool {
    x > 0 && (x & (x - 1)) == 0
}
