//! Audio peak summaries for the track background.
//!
//! The host decodes the song's audio and hands the PCM samples over; this
//! module reduces them to the per-window peaks stored in the song document.

use thiserror::Error;

use crate::models::Waveform;

/// Samples per output value when the caller has no preference
pub const DEFAULT_WAVEFORM_SCALE: usize = 128;

/// Peak value of the 8-bit range summaries are quantized to
const PEAK_RANGE: f64 = 127.0;

/// Waveform summarization failure; fatal, the caller decides what to retry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WaveformError {
    #[error("no audio samples to summarize")]
    EmptyAudio,

    #[error("scale must be at least 1")]
    ZeroScale,
}

/// Summarize decoded PCM samples into the waveform stored in the song.
///
/// `scale` is the number of samples per output value. Each window
/// contributes its peak magnitude, quantized to the 8-bit range the track
/// renderer expects; `max` is the largest of them.
pub fn summarize(samples: &[f32], scale: usize) -> Result<Waveform, WaveformError> {
    if samples.is_empty() {
        return Err(WaveformError::EmptyAudio);
    }
    if scale == 0 {
        return Err(WaveformError::ZeroScale);
    }

    let mut values = Vec::with_capacity((samples.len() + scale - 1) / scale);
    for window in samples.chunks(scale) {
        let peak = window.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        values.push((f64::from(peak).min(1.0) * PEAK_RANGE).round());
    }
    let max = values.iter().fold(0.0_f64, |acc, &value| acc.max(value));

    Ok(Waveform { max, values })
}
