/// Sound engine: procedural sound effects via rodio.
///
/// All cues are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget, except the urgency tick: that cue keeps
/// its Sink so a re-trigger (or phase exit) can cut the previous one off.
///
/// Compile with `--no-default-features` or without the "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each cue.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_start: Arc<Vec<u8>>,
        sfx_click: Arc<Vec<u8>>,
        sfx_wrong: Arc<Vec<u8>>,
        sfx_bonus: Arc<Vec<u8>>,
        sfx_clock: Arc<Vec<u8>>,
        /// The one live urgency sink, if any.
        urgency: Mutex<Option<Sink>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_start: Arc::new(make_wav(&gen_start())),
                sfx_click: Arc::new(make_wav(&gen_click())),
                sfx_wrong: Arc::new(make_wav(&gen_wrong())),
                sfx_bonus: Arc::new(make_wav(&gen_bonus())),
                sfx_clock: Arc::new(make_wav(&gen_clock())),
                urgency: Mutex::new(None),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_start(&self) { self.play(&self.sfx_start); }
        pub fn play_click(&self) { self.play(&self.sfx_click); }
        pub fn play_bonus(&self) { self.play(&self.sfx_bonus); }

        pub fn play_wrong(&self) {
            self.stop_urgency();
            self.play(&self.sfx_wrong);
        }

        /// (Re)start the ambient clock tick. At most one is live at a
        /// time: the previous sink is stopped before the new one starts.
        pub fn play_urgency(&self) {
            let mut slot = match self.urgency.lock() {
                Ok(s) => s,
                Err(_) => return,
            };
            if let Some(old) = slot.take() {
                old.stop();
            }
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(self.sfx_clock.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    *slot = Some(sink);
                }
            }
        }

        /// Cut the ambient tick. Called on answers and on phase exit.
        pub fn stop_urgency(&self) {
            if let Ok(mut slot) = self.urgency.lock() {
                if let Some(sink) = slot.take() {
                    sink.stop();
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Game start: bright ascending fanfare C5→E5→G5→C6
    fn gen_start() -> Vec<f32> {
        let notes = [523.0_f32, 659.0, 784.0, 1047.0];
        let note_dur = 0.09;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.4;
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 2.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.3);
            }
        }
        samples
    }

    /// Button click: single short blip
    fn gen_click() -> Vec<f32> {
        let freq = 880.0_f32;
        let n = (SAMPLE_RATE as f32 * 0.035) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                (t * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.3
            })
            .collect()
    }

    /// Miss / timeout: harsh descending two-tone
    fn gen_wrong() -> Vec<f32> {
        let notes = [330.0_f32, 233.0];
        let note_dur = 0.16;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.5;
                // Square-ish wave for a buzzer feel
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.6
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.4;
                samples.push(wave * env * 0.3);
            }
        }
        // Final fade to avoid a pop
        let fade_len = samples.len() / 5;
        let total = samples.len();
        for i in (total - fade_len)..total {
            let ratio = (total - i) as f32 / fade_len as f32;
            samples[i] *= ratio;
        }
        samples
    }

    /// Combo bonus: quick ascending arpeggio G5→C6→E6→G6
    fn gen_bonus() -> Vec<f32> {
        let notes = [784.0_f32, 1047.0, 1319.0, 1568.0];
        let note_dur = 0.05;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Clock tick: two muffled wood-block clicks spanning ~0.9 s
    fn gen_clock() -> Vec<f32> {
        let total = (SAMPLE_RATE as f32 * 0.9) as usize;
        let mut samples = vec![0.0_f32; total];
        let mut rng: u32 = 98765;
        for (offset, freq) in [(0usize, 1100.0_f32), (total / 2, 850.0)] {
            let n = (SAMPLE_RATE as f32 * 0.03) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - i as f32 / n as f32).powf(2.0);
                let tone = (t * freq * 2.0 * std::f32::consts::PI).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                if offset + i < total {
                    samples[offset + i] = (tone * 0.7 + noise * 0.3) * env * 0.25;
                }
            }
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let clamped = s.max(-1.0).min(1.0);
            let val = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_start(&self) {}
    pub fn play_click(&self) {}
    pub fn play_wrong(&self) {}
    pub fn play_bonus(&self) {}
    pub fn play_urgency(&self) {}
    pub fn stop_urgency(&self) {}
}
