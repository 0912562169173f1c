//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - the audio output (must stay alive)
//! - Sink (per current track)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{debug, info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use super::decoder::open_source_at_ms;
use super::{PlayerCommand, PlayerEvent};
use crate::core::error::{Error, Result};

pub(crate) const TICK_MS: u64 = 200;

type BoxedSource = Box<dyn Source + Send>;

/// Opens `path` positioned at `start_ms`; also returns the total duration.
type OpenFn = fn(&Path, u64) -> Result<(BoxedSource, Option<u64>)>;

fn open_mp3(path: &Path, start_ms: u64) -> Result<(BoxedSource, Option<u64>)> {
    let (source, duration_ms) = open_source_at_ms(path, start_ms)?;
    Ok((Box::new(source), duration_ms))
}

/// Where sinks send their samples.
enum Output {
    Device(OutputStream),
    /// No device: each sink's queue is parked here and pulled by hand.
    #[cfg(test)]
    Detached(Vec<rodio::queue::SourcesQueueOutput>),
}

impl Output {
    fn new_sink(&mut self) -> Sink {
        match self {
            // rodio 0.21.x: Sink is created from the stream's mixer
            Output::Device(stream) => Sink::connect_new(stream.mixer()),
            #[cfg(test)]
            Output::Detached(queues) => {
                let (sink, queue) = Sink::new();
                queues.push(queue);
                sink
            }
        }
    }
}

pub struct PlaybackEngine {
    output: Output,
    open: OpenFn,

    // Current playback
    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    /// Where the current source started; the sink's position is relative to it.
    start_ms: u64,
    volume: f32,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::AudioOutput(e.to_string()))?;
        stream.log_on_drop(false);

        info!("audio output opened");

        Ok(Self::with_output(Output::Device(stream), open_mp3, event_tx))
    }

    fn with_output(output: Output, open: OpenFn, event_tx: Sender<PlayerEvent>) -> Self {
        Self {
            output,
            open,
            sink: None,
            current_path: None,
            start_ms: 0,
            volume: 1.0,
            event_tx,
        }
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
        debug!("playback engine stopped");
    }

    /// Returns true when the loop should exit.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        debug!("engine command: {cmd:?}");

        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.play_from(&path, 0, false) {
                    warn!("play failed for {}: {e}", path.display());
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => self.seek(ms),
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        let position_ms = self.start_ms + sink.get_pos().as_millis() as u64;
        let ended = sink.empty();

        self.emit(PlayerEvent::Position { position_ms });

        if ended {
            // stop_internal drops the sink, so this fires once per track.
            if let Some(path) = self.current_path.clone() {
                self.stop_internal();
                self.emit(PlayerEvent::TrackEnded { path });
            }
        }
    }

    /// Seeking reopens the source at the target; MP3 has no index to jump with.
    fn seek(&mut self, ms: u64) {
        let Some(path) = self.current_path.clone() else {
            return;
        };
        let was_paused = self.sink.as_ref().is_some_and(Sink::is_paused);

        if let Err(e) = self.play_from(&path, ms, was_paused) {
            warn!("seek to {ms} ms failed: {e}");
            self.emit(PlayerEvent::Error(e.to_string()));
        }
    }

    fn play_from(&mut self, path: &Path, start_ms: u64, paused: bool) -> Result<()> {
        self.stop_internal();

        // Open first so a bad file leaves us stopped, not half-started.
        let (source, duration_ms) = (self.open)(path, start_ms)?;

        let sink = self.output.new_sink();
        sink.set_volume(self.volume);
        // Pause before the first sample is pulled, so a paused seek stays silent.
        if paused {
            sink.pause();
        }
        sink.append(source);

        self.sink = Some(sink);
        self.current_path = Some(path.to_path_buf());
        self.start_ms = start_ms;

        info!("playing {} from {start_ms} ms", path.display());
        self.emit(PlayerEvent::Started {
            path: path.to_path_buf(),
            duration_ms,
            start_ms,
        });

        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
        self.start_ms = 0;
    }

    /// Best-effort: if the GUI is gone there is nobody to tell.
    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }
}
