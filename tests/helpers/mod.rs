#![allow(dead_code)]

use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use meow2text::application::ports::{
    AudioDecoder, AudioDecoderError, DecodedAudio, GenerationBackend, GenerationError,
};
use meow2text::application::services::MeowTranslator;
use meow2text::infrastructure::personality::StaticPersonalityCatalog;
use meow2text::presentation::config::Settings;

pub const RATE: u32 = 16_000;

pub fn sine(freq: f32, secs: f32, amplitude: f32, rate: u32) -> Vec<f32> {
    let n = (secs * rate as f32).round() as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / rate as f32 + 0.3).sin())
        .collect()
}

/// Sine bursts of `on_ms` separated by `off_ms` of silence.
pub fn pulsed_sine(freq: f32, secs: f32, amplitude: f32, on_ms: u32, off_ms: u32) -> Vec<f32> {
    let on = (RATE * on_ms / 1000) as usize;
    let period = on + (RATE * off_ms / 1000) as usize;
    sine(freq, secs, amplitude, RATE)
        .into_iter()
        .enumerate()
        .map(|(i, s)| if i % period < on { s } else { 0.0 })
        .collect()
}

pub fn silence(secs: f32, rate: u32) -> Vec<f32> {
    vec![0.0; (secs * rate as f32).round() as usize]
}

/// Deterministic uniform noise from a linear congruential generator.
pub fn white_noise(secs: f32, amplitude: f32) -> Vec<f32> {
    let n = (secs * RATE as f32).round() as usize;
    let mut state: u32 = 0x1234_5678;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let unit = (state >> 8) as f32 / (1u32 << 24) as f32;
            amplitude * (unit * 2.0 - 1.0)
        })
        .collect()
}

/// Build a 16-bit mono PCM WAV file in memory.
pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

/// Build a mono 16-bit FLAC stream of `frame_count` CONSTANT subframes, each
/// `block_size` samples long. A few bytes per frame decode to a full block.
/// `declared_samples` goes into STREAMINFO; 0 means unknown.
pub fn build_constant_flac(
    sample_rate: u32,
    block_size: u16,
    frame_count: u32,
    declared_samples: u64,
) -> Vec<u8> {
    let mut flac = Vec::new();
    flac.extend_from_slice(b"fLaC");

    // STREAMINFO, flagged as the last metadata block.
    flac.push(0x80);
    flac.extend_from_slice(&[0, 0, 34]);
    flac.extend_from_slice(&block_size.to_be_bytes());
    flac.extend_from_slice(&block_size.to_be_bytes());
    flac.extend_from_slice(&[0, 0, 13]);
    flac.extend_from_slice(&[0, 0, 14]);
    let packed = ((sample_rate as u64) << 44) | (15u64 << 36) | (declared_samples & 0xF_FFFF_FFFF);
    flac.extend_from_slice(&packed.to_be_bytes());
    flac.extend_from_slice(&[0u8; 16]);

    for frame_number in 0..frame_count {
        let mut frame = vec![0xFF, 0xF8, 0x70 | flac_rate_code(sample_rate), 0x08];
        frame.extend_from_slice(&flac_utf8(frame_number));
        frame.extend_from_slice(&(block_size - 1).to_be_bytes());
        frame.push(crc8(&frame));

        frame.push(0x00);
        frame.extend_from_slice(&0x1000i16.to_be_bytes());

        let footer = crc16(&frame);
        frame.extend_from_slice(&footer.to_be_bytes());
        flac.extend_from_slice(&frame);
    }

    flac
}

fn flac_rate_code(sample_rate: u32) -> u8 {
    match sample_rate {
        8_000 => 0x4,
        16_000 => 0x5,
        22_050 => 0x6,
        32_000 => 0x8,
        44_100 => 0x9,
        48_000 => 0xA,
        _ => 0x0,
    }
}

fn flac_utf8(value: u32) -> Vec<u8> {
    if value < 0x80 {
        vec![value as u8]
    } else {
        assert!(value < 0x800, "frame number out of range");
        vec![0xC0 | (value >> 6) as u8, 0x80 | (value & 0x3F) as u8]
    }
}

fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in bytes {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
        }
    }
    crc
}

fn crc16(bytes: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in bytes {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x8005 } else { crc << 1 };
        }
    }
    crc
}

pub fn to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

/// Hands back fixed samples regardless of input bytes.
pub struct StaticDecoder {
    samples: Vec<f32>,
    sample_rate: u32,
    delay: Duration,
    pub calls: AtomicUsize,
    pub last_max_duration: Mutex<Option<Duration>>,
}

impl StaticDecoder {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_max_duration: Mutex::new(None),
        }
    }

    /// Blocks the calling thread for `delay` on every decode.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl AudioDecoder for StaticDecoder {
    fn decode(
        &self,
        _data: &[u8],
        _format_hint: Option<&str>,
        max_duration: Duration,
    ) -> Result<DecodedAudio, AudioDecoderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_max_duration.lock() = Some(max_duration);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(DecodedAudio {
            samples: self.samples.clone(),
            sample_rate: self.sample_rate,
        })
    }
}

pub struct FailingDecoder;

impl AudioDecoder for FailingDecoder {
    fn decode(
        &self,
        _data: &[u8],
        _format_hint: Option<&str>,
        _max_duration: Duration,
    ) -> Result<DecodedAudio, AudioDecoderError> {
        Err(AudioDecoderError::DecodingFailed("corrupt stream".to_string()))
    }
}

/// Plays back queued responses in order, then repeats `fallback`.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    fallback: Result<String, GenerationError>,
    pub prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(
        responses: Vec<Result<String, GenerationError>>,
        fallback: Result<String, GenerationError>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fallback,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(Vec::new(), Ok(reply.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::new(Vec::new(), Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait::async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str, _timeout: Duration) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        let next = self.responses.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Never answers within any reasonable deadline.
pub struct StalledBackend {
    calls: AtomicUsize,
}

impl StalledBackend {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GenerationBackend for StalledBackend {
    async fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }

    fn name(&self) -> &'static str {
        "stalled"
    }
}

pub fn fast_settings() -> Settings {
    let mut settings = Settings::default();
    settings.generation.timeout_ms = 50;
    settings.generation.retry_backoff_ms = 5;
    settings
}

pub fn translator(
    decoder: Arc<dyn AudioDecoder>,
    backend: Arc<dyn GenerationBackend>,
    settings: &Settings,
) -> MeowTranslator {
    MeowTranslator::new(
        decoder,
        backend,
        Arc::new(StaticPersonalityCatalog::from_settings(&settings.personalities)),
        settings,
    )
}
