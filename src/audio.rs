use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Fixture format: 16 kHz mono 16-bit PCM, one second of silence.
pub const FIXTURE_SAMPLE_RATE: u32 = 16_000;
pub const FIXTURE_DURATION_SECS: f64 = 1.0;

/// Build `duration_secs` of silent little-endian 16-bit mono PCM.
///
/// A deterministic byte sequence of zero-valued samples — a reproducible
/// request payload, not an audio codec.
pub fn silent_pcm(sample_rate: u32, duration_secs: f64) -> Vec<u8> {
    let samples = (f64::from(sample_rate) * duration_secs) as usize;
    let mut data = Vec::with_capacity(samples * 2);
    for _ in 0..samples {
        data.extend_from_slice(&0i16.to_le_bytes());
    }
    data
}

/// The default transcription fixture.
pub fn fixture() -> Vec<u8> {
    silent_pcm(FIXTURE_SAMPLE_RATE, FIXTURE_DURATION_SECS)
}

/// Base64 for transport. The server decodes with the standard alphabet.
pub fn encode(pcm: &[u8]) -> String {
    STANDARD.encode(pcm)
}
