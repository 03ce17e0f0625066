//! Tests for SampleBuffer
//!
//! These tests verify:
//! - Non-interleaved layout
//! - Conversion from interleaved frames
//! - Shape validation

use soundmexpro::{SampleBuffer, SmpError};

#[test]
fn test_zeros_shape() {
    let buffer = SampleBuffer::<f32>::zeros(4, 2);
    assert_eq!(buffer.shape(), (4, 2));
    assert_eq!(buffer.as_slice().len(), 8);
    assert!(buffer.as_slice().iter().all(|&s| s == 0.0));
}

#[test]
fn test_from_channels_is_channel_major() {
    let buffer = SampleBuffer::from_channels(vec![vec![1.0f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .unwrap();

    assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(buffer.channel(1), Some(&[4.0, 5.0, 6.0][..]));
    assert_eq!(buffer.get(2, 0), Some(3.0));
    assert_eq!(buffer.get(3, 0), None);
}

#[test]
fn test_from_channels_rejects_ragged_input() {
    let result = SampleBuffer::from_channels(vec![vec![1.0f32, 2.0], vec![3.0]]);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));
}

#[test]
fn test_from_interleaved_reorders_frames() {
    let frames = [1.0f32, 10.0, 2.0, 20.0, 3.0, 30.0];
    let buffer = SampleBuffer::from_interleaved(&frames, 2).unwrap();

    assert_eq!(buffer.shape(), (3, 2));
    assert_eq!(buffer.channel(0), Some(&[1.0, 2.0, 3.0][..]));
    assert_eq!(buffer.channel(1), Some(&[10.0, 20.0, 30.0][..]));
    assert_eq!(buffer.to_interleaved(), frames.to_vec());
}

#[test]
fn test_from_interleaved_rejects_partial_frame() {
    let result = SampleBuffer::from_interleaved(&[1.0f32, 2.0, 3.0], 2);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));

    let result = SampleBuffer::from_interleaved(&[1.0f32], 0);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));
}

#[test]
fn test_set_in_and_out_of_range() {
    let mut buffer = SampleBuffer::<f32>::zeros(2, 2);
    assert!(buffer.set(1, 1, 0.5));
    assert!(!buffer.set(2, 0, 0.5));
    assert_eq!(buffer.as_slice(), &[0.0, 0.0, 0.0, 0.5]);
}

#[test]
fn test_try_zeros_within_limit() {
    let buffer = SampleBuffer::<f32>::try_zeros(4, 2, 32).unwrap();
    assert_eq!(buffer.shape(), (4, 2));
    assert!(buffer.as_slice().iter().all(|&s| s == 0.0));
}

#[test]
fn test_try_zeros_rejects_overflowing_shape() {
    let result = SampleBuffer::<f32>::try_zeros(usize::MAX / 2, 4, usize::MAX);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));
}

#[test]
fn test_try_zeros_rejects_shape_over_limit() {
    let result = SampleBuffer::<f64>::try_zeros(4, 2, 63);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));
}
