// src/api.rs
//
// Flat entry points mirroring a C-style interface: constructors return
// `None` and transforms return `false` on any invalid argument. Buffer sizes
// are in bytes. Passing no buffer together with a size slot writes the size
// the call needs and fails, so the caller can allocate and call again.

use core::mem::size_of;

use num_complex::Complex32;

use crate::common::{Direction, FftError};
use crate::float::math::is_power_of_two_i32;
use crate::float::{FftConfig, FftContext};

/// Creates a context for transforms of up to `max_count` points.
///
/// * `buf = None, buf_size = Some(_)`: writes the required byte size and
///   returns `None`.
/// * `buf = Some(_), buf_size = Some(n)`: uses the caller buffer when both
///   `n` and the slice cover the required size, otherwise writes the
///   required size and returns `None`.
/// * `buf = Some(_), buf_size = None`: invalid, returns `None`.
/// * `buf = None, buf_size = None`: allocates (needs the `alloc` feature).
pub fn create<'a>(
    max_count: i32,
    direction: Direction,
    real: bool,
    buf: Option<&'a mut [Complex32]>,
    buf_size: Option<&mut usize>,
) -> Option<FftContext<'a>> {
    if !is_power_of_two_i32(max_count) {
        tracing::debug!(max_count, "fft context rejected, not a positive power of two");
        return None;
    }
    let config = FftConfig::new(max_count as usize)
        .direction(direction)
        .real(real);
    let required = config.required_bytes().ok()?;

    match (buf, buf_size) {
        (Some(_), None) => None,
        (None, Some(size)) => {
            *size = required;
            None
        }
        (Some(buf), Some(size)) => {
            if *size < required || buf.len() * size_of::<Complex32>() < required {
                *size = required;
                return None;
            }
            FftContext::new_in(config, buf).ok()
        }
        (None, None) => allocate(config),
    }
}

#[cfg(feature = "alloc")]
fn allocate(config: FftConfig) -> Option<FftContext<'static>> {
    FftContext::new(config).ok()
}

#[cfg(not(feature = "alloc"))]
fn allocate(_config: FftConfig) -> Option<FftContext<'static>> {
    None
}

/// Releases a context. The backing buffer is freed only if the context
/// allocated it; a caller buffer is simply handed back to its owner.
pub fn destroy(ctx: FftContext<'_>) {
    drop(ctx);
}

pub fn forward_complex(
    ctx: Option<&FftContext<'_>>,
    count: i32,
    input: &[Complex32],
    output: &mut [Complex32],
) -> bool {
    with_count(ctx, count, |ctx, count| ctx.forward_complex(count, input, output))
}

pub fn inverse_complex(
    ctx: Option<&FftContext<'_>>,
    count: i32,
    input: &[Complex32],
    output: &mut [Complex32],
) -> bool {
    with_count(ctx, count, |ctx, count| ctx.inverse_complex(count, input, output))
}

/// Forward real transform; the bins are twice the DFT values.
pub fn forward_real(
    ctx: Option<&FftContext<'_>>,
    count: i32,
    input: &[f32],
    output: &mut [Complex32],
) -> bool {
    with_count(ctx, count, |ctx, count| ctx.forward_real(count, input, output))
}

/// Inverse real transform.
///
/// With `tmp = None, tmp_size = Some(_)` the required scratch size in bytes
/// is written and `false` returned. With neither, the context's own scratch
/// area is used.
pub fn inverse_real(
    ctx: Option<&mut FftContext<'_>>,
    count: i32,
    input: &[Complex32],
    output: &mut [f32],
    tmp: Option<&mut [Complex32]>,
    tmp_size: Option<&mut usize>,
) -> bool {
    let Some(ctx) = ctx else {
        return false;
    };
    if !is_power_of_two_i32(count) {
        return false;
    }
    let count = count as usize;
    let required = FftContext::inverse_real_scratch_len(count) * size_of::<Complex32>();

    let result = match (tmp, tmp_size) {
        (None, Some(size)) => {
            *size = required;
            return false;
        }
        (Some(_), None) => return false,
        (Some(tmp), Some(size)) => {
            if *size < required {
                *size = required;
                return false;
            }
            ctx.inverse_real_with_scratch(count, input, output, tmp)
        }
        (None, None) => ctx.inverse_real(count, input, output),
    };
    result.is_ok()
}

fn with_count<F>(ctx: Option<&FftContext<'_>>, count: i32, run: F) -> bool
where
    F: FnOnce(&FftContext<'_>, usize) -> Result<(), FftError>,
{
    let Some(ctx) = ctx else {
        return false;
    };
    if !is_power_of_two_i32(count) {
        return false;
    }
    run(ctx, count as usize).is_ok()
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
