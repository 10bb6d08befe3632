use super::*;
use crate::common::{Direction, FftError};

#[test]
fn test_required_len() {
    assert_eq!(FftConfig::new(16).required_len(), Ok(16));
    assert_eq!(
        FftConfig::new(16).direction(Direction::Both).required_len(),
        Ok(16)
    );
    // Forward-only real contexts need no scratch.
    assert_eq!(FftConfig::new(16).real(true).required_len(), Ok(16));
    assert_eq!(
        FftConfig::new(16).real(true).direction(Direction::Inverse).required_len(),
        Ok(16 + 9)
    );
    assert_eq!(
        FftConfig::new(16).real(true).direction(Direction::Both).required_bytes(),
        Ok(25 * 8)
    );
}

#[test]
fn test_rejects_bad_sizes() {
    assert_eq!(FftConfig::new(0).required_len(), Err(FftError::NotPowerOfTwo));
    assert_eq!(FftConfig::new(6).required_len(), Err(FftError::NotPowerOfTwo));
    assert!(matches!(
        FftContext::new(FftConfig::new(12)),
        Err(FftError::NotPowerOfTwo)
    ));
}

#[test]
fn test_sizes_that_overflow_are_rejected() {
    // Element counts still fit in usize here, byte counts do not.
    let top = 1usize << (usize::BITS - 1);
    let config = FftConfig::new(top).real(true).direction(Direction::Both);
    assert_eq!(config.required_len(), Err(FftError::TooLarge));
    assert_eq!(config.required_bytes(), Err(FftError::TooLarge));

    let config = FftConfig::new(top >> 1).real(true).direction(Direction::Both);
    assert_eq!(config.required_bytes(), Err(FftError::TooLarge));
    assert!(matches!(FftContext::new(config), Err(FftError::TooLarge)));

    let mut buf = [Complex32::default(); 4];
    assert!(matches!(
        FftContext::new_in(FftConfig::new(top), &mut buf),
        Err(FftError::TooLarge)
    ));
}

#[test]
fn test_owned_context() {
    let config = FftConfig::new(64).direction(Direction::Both).real(true);
    assert_eq!(config.max_count(), 64);
    assert!(config.is_real());

    let ctx = FftContext::new(config).unwrap();
    assert_eq!(ctx.config(), config);
    assert!(ctx.owns_buffer());
    assert_eq!(ctx.max_count(), 64);
    assert_eq!(ctx.direction(), Direction::Both);
    assert!(ctx.is_real());
    assert_eq!(ctx.scratch_len(), 33);
    assert_eq!(ctx.table().len(), 64);
}

#[test]
fn test_borrowed_context() {
    let config = FftConfig::new(8).direction(Direction::Inverse).real(true);
    let required = config.required_len().unwrap();
    let mut buf = vec![Complex32::new(9.0, 9.0); required];

    {
        let mut ctx = FftContext::new_in(config, &mut buf).unwrap();
        assert!(!ctx.owns_buffer());
        // Inverse-only tables hold exp(+2πik/N).
        assert!(ctx.table()[2].im > 0.99);
        let (table, scratch) = ctx.table_and_scratch();
        assert_eq!(table.len(), 8);
        assert_eq!(scratch.len(), 5);
    }

    // Table lives at the front of the caller buffer and survives the context.
    assert_eq!(buf[0], Complex32::new(1.0, 0.0));
    assert!((buf[2].im - 1.0).abs() < 1e-6);
}

#[test]
fn test_borrowed_buffer_too_small() {
    let config = FftConfig::new(32);
    let mut buf = vec![Complex32::default(); 31];
    assert!(matches!(
        FftContext::new_in(config, &mut buf),
        Err(FftError::BufferTooSmall { required: 32 })
    ));

    // Larger buffers are fine; only the required prefix is used.
    let mut buf = vec![Complex32::default(); 100];
    let ctx = FftContext::new_in(config, &mut buf).unwrap();
    assert_eq!(ctx.table().len(), 32);
}

#[test]
fn test_simd_can_be_disabled() {
    let ctx = FftContext::new(FftConfig::new(16).simd(false)).unwrap();
    assert_eq!(ctx.kernel_kind(), KernelKind::Scalar);
    assert!(!ctx.uses_simd_kernel());

    let auto = FftContext::new(FftConfig::new(16)).unwrap();
    assert_eq!(auto.uses_simd_kernel(), FftContext::is_simd_supported());
}

#[test]
fn test_validate() {
    let ctx = FftContext::new(FftConfig::new(16)).unwrap();
    assert_eq!(ctx.validate(16, false), Ok(()));
    assert_eq!(ctx.validate(1, false), Ok(()));
    assert_eq!(ctx.validate(0, false), Err(FftError::NotPowerOfTwo));
    assert_eq!(
        ctx.validate(32, false),
        Err(FftError::CountExceedsCapacity { count: 32, max_count: 16 })
    );
    assert_eq!(ctx.validate(16, true), Err(FftError::DirectionUnsupported));
}

#[test]
fn test_context_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FftContext<'static>>();

    let ctx = FftContext::new(FftConfig::new(256)).unwrap();
    let input: Vec<Complex32> = (0..256).map(|k| Complex32::new(k as f32, 0.0)).collect();
    let mut expected = vec![Complex32::default(); 256];
    ctx.forward_complex(256, &input, &mut expected).unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut out = vec![Complex32::default(); 256];
                ctx.forward_complex(256, &input, &mut out).unwrap();
                assert_eq!(out, expected);
            });
        }
    });
}

#[test]
fn test_debug_lists_geometry() {
    let ctx = FftContext::new(FftConfig::new(8).simd(false)).unwrap();
    let text = format!("{:?}", ctx);
    assert!(text.contains("max_count: 8"));
    assert!(text.contains("Scalar"));
}
