use vaani::domain::Waveform;

#[test]
fn given_pcm16_extremes_when_converting_then_scales_by_32768() {
    let waveform = Waveform::from_pcm16(&[i16::MIN, 0, 16384], 8_000);

    assert_eq!(waveform.samples, vec![-1.0, 0.0, 0.5]);
    assert_eq!(waveform.sample_rate, 8_000);
}

#[test]
fn given_samples_when_measuring_duration_then_is_length_over_rate() {
    let waveform = Waveform::new(vec![0.0; 24_000], 16_000);

    assert!((waveform.duration_secs() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn given_zero_rate_when_measuring_duration_then_is_zero() {
    let waveform = Waveform::new(vec![0.0; 10], 0);

    assert_eq!(waveform.duration_secs(), 0.0);
}

#[test]
fn given_mixed_signs_when_measuring_peak_then_returns_largest_magnitude() {
    let waveform = Waveform::new(vec![0.2, -0.7, 0.5], 16_000);

    assert_eq!(waveform.peak(), 0.7);
}
