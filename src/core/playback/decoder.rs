//! core/playback/decoder.rs
//! Audio decoding (Symphonia) -> rodio::Source.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use rodio::Source;

use symphonia::core::audio::{Channels, SampleBuffer, SignalSpec};
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use crate::core::error::{Error, Result};

/// Open `path` as a seekable rodio Source, starting at `start_ms`.
/// Also returns the stream duration when the container knows it.
pub fn open_source_at_ms(path: &Path, start_ms: u64) -> Result<(SymphoniaSource, Option<u64>)> {
    let mut format = probe_format(path)?;

    let track = format
        .default_track()
        .ok_or_else(|| Error::NoAudioTrack(path.to_path_buf()))?;
    let track_id = track.id;

    // Clone so we can seek (mutable borrow of format) without borrow conflicts.
    let codec_params = track.codec_params.clone();
    let duration_ms = duration_from_params(codec_params.time_base, codec_params.n_frames);

    if start_ms > 0 {
        let seek_to = SeekTo::Time {
            time: Time::from(Duration::from_millis(start_ms)),
            track_id: Some(track_id),
        };
        format
            .seek(SeekMode::Accurate, seek_to)
            .map_err(Error::Seek)?;
    }

    // Built after any seek so decoder state starts clean.
    let decoder = make_decoder(&codec_params)?;

    let remaining = duration_ms.map(|d| Duration::from_millis(d.saturating_sub(start_ms)));
    let src = SymphoniaSource::new(path.to_path_buf(), format, decoder, track_id, remaining);
    Ok((src, duration_ms))
}

/// Best-effort duration without decoding. `None` for anything we can't probe.
pub fn probe_duration_ms(path: &Path) -> Option<u64> {
    let format = match probe_format(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("duration probe skipped for {}: {e}", path.display());
            return None;
        }
    };

    let params = &format.default_track()?.codec_params;
    duration_from_params(params.time_base, params.n_frames)
}

fn probe_format(path: &Path) -> Result<Box<dyn FormatReader>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(Error::Probe)?;

    Ok(probed.format)
}

fn make_decoder(params: &CodecParameters) -> Result<Box<dyn Decoder>> {
    symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(Error::DecoderInit)
}

pub(crate) fn duration_from_params(
    time_base: Option<TimeBase>,
    n_frames: Option<u64>,
) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

/// Consecutive undecodable frames tolerated before the stream is abandoned.
/// Damaged MP3s often have a few; a file of garbage has nothing else.
const MAX_BAD_FRAMES: u32 = 16;

/// A streaming rodio Source backed by Symphonia.
///
/// One packet is decoded at a time into `pcm` (interleaved f32), which is
/// reused for as long as the signal layout stays the same.
pub struct SymphoniaSource {
    path: PathBuf,
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,

    spec: SignalSpec,
    pcm: Option<SampleBuffer<f32>>,
    cursor: usize,

    /// Playing time left from the opening position, if the stream length is known.
    remaining: Option<Duration>,
    finished: bool,
}

impl SymphoniaSource {
    fn new(
        path: PathBuf,
        format: Box<dyn FormatReader>,
        decoder: Box<dyn Decoder>,
        track_id: u32,
        remaining: Option<Duration>,
    ) -> Self {
        let mut this = Self {
            path,
            format,
            decoder,
            track_id,
            // MPEG-1 Layer III stereo; replaced by the first decoded packet.
            spec: SignalSpec::new(44_100, Channels::FRONT_LEFT | Channels::FRONT_RIGHT),
            pcm: None,
            cursor: 0,
            remaining,
            finished: false,
        };

        // Prime once so sample_rate/channels are right before rodio asks.
        this.advance();
        this
    }

    fn buffered(&self) -> &[f32] {
        match &self.pcm {
            Some(pcm) => &pcm.samples()[self.cursor..],
            None => &[],
        }
    }

    /// Load the next packet's samples. Sets `finished` at end of stream or on
    /// an unrecoverable error.
    fn advance(&mut self) {
        match self.decode_packet() {
            Ok(true) => {}
            Ok(false) => self.finished = true,
            Err(e) => {
                warn!("decode stopped for {}: {e}", self.path.display());
                self.finished = true;
            }
        }
    }

    /// `Ok(false)` at end of stream.
    fn decode_packet(&mut self) -> std::result::Result<bool, SymphoniaError> {
        let mut bad_frames = 0;

        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                // End of stream surfaces as an IO error.
                Err(SymphoniaError::IoError(_)) => return Ok(false),
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(msg)) if bad_frames < MAX_BAD_FRAMES => {
                    bad_frames += 1;
                    debug!("skipping bad frame in {}: {msg}", self.path.display());
                    continue;
                }
                Err(SymphoniaError::IoError(_)) => return Ok(false),
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Encoder delay can hand back empty buffers.
            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            let needed = decoded.capacity() * spec.channels.count();
            let reusable = spec == self.spec
                && self.pcm.as_ref().is_some_and(|b| b.capacity() >= needed);
            if !reusable {
                self.pcm = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
                self.spec = spec;
            }

            if let Some(pcm) = self.pcm.as_mut() {
                pcm.copy_interleaved_ref(decoded);
            }
            self.cursor = 0;
            return Ok(true);
        }
    }
}

impl Iterator for SymphoniaSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        while SymphoniaSource::buffered(self).is_empty() {
            if self.finished {
                return None;
            }
            self.advance();
        }

        let sample = SymphoniaSource::buffered(self)[0];
        self.cursor += 1;
        Some(sample)
    }
}

impl Source for SymphoniaSource {
    /// Samples left in the current packet; rodio re-reads the layout after it.
    fn current_span_len(&self) -> Option<usize> {
        let left = self.buffered().len();
        (left > 0).then_some(left)
    }

    fn channels(&self) -> u16 {
        self.spec.channels.count() as u16
    }

    fn sample_rate(&self) -> u32 {
        self.spec.rate
    }

    fn total_duration(&self) -> Option<Duration> {
        self.remaining
    }
}
