use super::*;

fn ones(n: usize) -> Vec<Complex32> {
    vec![Complex32::new(1.0, 0.0); n]
}

fn impulse(n: usize) -> Vec<Complex32> {
    let mut x = vec![Complex32::default(); n];
    x[0] = Complex32::new(1.0, 0.0);
    x
}

#[test]
fn test_create_rejects_bad_sizes() {
    for max_count in [0, -4, 6, 12, i32::MIN] {
        assert!(create(max_count, Direction::Forward, false, None, None).is_none());
    }
}

#[test]
fn test_create_sizing_protocol() {
    let mut size = 0usize;
    assert!(create(64, Direction::Both, true, None, Some(&mut size)).is_none());
    // 64 table entries plus 33 scratch entries, 8 bytes each.
    assert_eq!(size, (64 + 33) * 8);

    let mut buf = vec![Complex32::default(); size / size_of::<Complex32>()];
    let ctx = create(64, Direction::Both, true, Some(buf.as_mut_slice()), Some(&mut size)).unwrap();
    assert!(!ctx.owns_buffer());
    assert_eq!(ctx.max_count(), 64);
    destroy(ctx);
}

#[test]
fn test_create_sizing_at_largest_count() {
    let mut size = 0usize;
    assert!(create(1 << 30, Direction::Both, true, None, Some(&mut size)).is_none());

    // Does not fit a 32-bit address space; the size slot is left alone.
    #[cfg(target_pointer_width = "32")]
    assert_eq!(size, 0);

    #[cfg(target_pointer_width = "64")]
    assert_eq!(size, ((1 << 30) + (1 << 29) + 1) * 8);
}

#[test]
fn test_create_with_short_buffer_reports_size() {
    let mut buf = vec![Complex32::default(); 8];
    let mut size = 8 * size_of::<Complex32>();
    assert!(create(16, Direction::Forward, false, Some(buf.as_mut_slice()), Some(&mut size)).is_none());
    assert_eq!(size, 16 * 8);

    // Size claims enough but the slice does not.
    let mut size = 16 * 8;
    assert!(create(16, Direction::Forward, false, Some(buf.as_mut_slice()), Some(&mut size)).is_none());
    assert_eq!(size, 16 * 8);
}

#[test]
fn test_create_with_buffer_and_no_size_fails() {
    let mut buf = vec![Complex32::default(); 64];
    assert!(create(16, Direction::Forward, false, Some(buf.as_mut_slice()), None).is_none());
}

#[test]
fn test_create_allocates() {
    let ctx = create(16, Direction::Forward, false, None, None).unwrap();
    assert!(ctx.owns_buffer());
    destroy(ctx);
}

#[test]
fn test_forward_complex_impulses() {
    for n in [4usize, 8] {
        let ctx = create(n as i32, Direction::Forward, false, None, None);
        let mut out = vec![Complex32::default(); n];
        assert!(forward_complex(ctx.as_ref(), n as i32, &impulse(n), &mut out));
        assert_eq!(out, ones(n));
    }

    let ctx = create(2, Direction::Forward, false, None, None);
    let input = [Complex32::new(3.0, 0.0), Complex32::new(1.0, 0.0)];
    let mut out = [Complex32::default(); 2];
    assert!(forward_complex(ctx.as_ref(), 2, &input, &mut out));
    assert_eq!(out, [Complex32::new(4.0, 0.0), Complex32::new(2.0, 0.0)]);
}

#[test]
fn test_inverse_complex_of_flat_spectrum() {
    let ctx = create(8, Direction::Inverse, false, None, None);
    let mut out = vec![Complex32::default(); 8];
    assert!(inverse_complex(ctx.as_ref(), 8, &ones(8), &mut out));
    assert!((out[0].re - 8.0).abs() < 1e-5);
    for val in &out[1..] {
        assert!(val.l1_norm() < 1e-5);
    }
}

#[test]
fn test_transforms_reject_bad_arguments() {
    let mut out = vec![Complex32::default(); 16];
    let input = impulse(16);
    assert!(!forward_complex(None, 16, &input, &mut out));

    let ctx = create(16, Direction::Forward, false, None, None);
    assert!(!forward_complex(ctx.as_ref(), 0, &input, &mut out));
    assert!(!forward_complex(ctx.as_ref(), -16, &input, &mut out));
    assert!(!forward_complex(ctx.as_ref(), 32, &input, &mut out));
    assert!(!inverse_complex(ctx.as_ref(), 16, &input, &mut out));

    let samples = vec![0.0f32; 16];
    assert!(!forward_real(ctx.as_ref(), 16, &samples, &mut out));
}

#[test]
fn test_real_round_trip() {
    let n = 16usize;
    let x: Vec<f32> = (0..n).map(|k| k as f32 - 4.0).collect();
    let mut ctx = create(n as i32, Direction::Both, true, None, None);

    let mut spectrum = vec![Complex32::default(); n / 2 + 1];
    assert!(forward_real(ctx.as_ref(), n as i32, &x, &mut spectrum));

    let mut back = vec![0.0f32; n];
    assert!(inverse_real(ctx.as_mut(), n as i32, &spectrum, &mut back, None, None));
    for (&got, &want) in back.iter().zip(&x) {
        assert!((got - 2.0 * n as f32 * want).abs() < 1e-2, "{} vs {}", got, want);
    }
}

#[test]
fn test_inverse_real_scratch_protocol() {
    let n = 16usize;
    let mut ctx = create(n as i32, Direction::Inverse, true, None, None);
    let spectrum = vec![Complex32::new(1.0, 0.0); n / 2 + 1];
    let mut out = vec![0.0f32; n];

    let mut size = 0usize;
    assert!(!inverse_real(ctx.as_mut(), n as i32, &spectrum, &mut out, None, Some(&mut size)));
    assert_eq!(size, (n / 2 + 1) * 8);

    let mut tmp = vec![Complex32::default(); size / size_of::<Complex32>()];
    assert!(!inverse_real(ctx.as_mut(), n as i32, &spectrum, &mut out, Some(tmp.as_mut_slice()), None));
    assert!(inverse_real(
        ctx.as_mut(),
        n as i32,
        &spectrum,
        &mut out,
        Some(tmp.as_mut_slice()),
        Some(&mut size)
    ));
    // Flat spectrum is an impulse of height n.
    assert!((out[0] - n as f32).abs() < 1e-4);
    assert!(out[1..].iter().all(|v| v.abs() < 1e-4));

    let mut small = 8usize;
    assert!(!inverse_real(
        ctx.as_mut(),
        n as i32,
        &spectrum,
        &mut out,
        Some(tmp.as_mut_slice()),
        Some(&mut small)
    ));
    assert_eq!(small, size);

    assert!(!inverse_real(None, n as i32, &spectrum, &mut out, None, None));
}
