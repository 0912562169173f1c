//! Command-line configuration.
//!
//! Nothing is saved between runs; these flags only pick the starting state.

use std::path::PathBuf;

use clap::Parser;

use crate::core::queue::PlayModes;

pub(crate) const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Parser)]
#[command(name = "fastplay")]
#[command(about = "Browse a folder of MP3 files, read their tags, and play them")]
#[command(version)]
pub(crate) struct Config {
    /// Folder to scan on startup
    #[arg()]
    pub folder: Option<PathBuf>,

    /// Initial volume, 0.0 to 1.0
    #[arg(long, default_value_t = DEFAULT_VOLUME, value_parser = parse_volume)]
    pub volume: f32,

    /// Start in shuffle mode
    #[arg(long)]
    pub shuffle: bool,

    /// Start with repeat on (replay the track when it ends)
    #[arg(long)]
    pub repeat: bool,

    /// Stop when a track ends instead of playing the next one
    #[arg(long)]
    pub no_auto_advance: bool,

    /// Log filter, e.g. "debug" or "fastplay=trace" (FASTPLAY_LOG overrides)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn initial_modes(&self) -> PlayModes {
        PlayModes {
            shuffle: self.shuffle,
            repeat: self.repeat,
            auto_advance: !self.no_auto_advance,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder: None,
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: false,
            no_auto_advance: false,
            log_level: "info".to_string(),
        }
    }
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let v: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("volume must be between 0.0 and 1.0, got {v}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_start() {
        let cfg = Config::try_parse_from(["fastplay"]).unwrap();
        assert_eq!(cfg.folder, None);
        assert_eq!(cfg.volume, DEFAULT_VOLUME);
        assert_eq!(cfg.initial_modes(), PlayModes::default());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn flags_set_modes_and_folder() {
        let cfg = Config::try_parse_from([
            "fastplay",
            "/music",
            "--volume",
            "0.8",
            "--shuffle",
            "--repeat",
            "--no-auto-advance",
        ])
        .unwrap();

        assert_eq!(cfg.folder, Some(PathBuf::from("/music")));
        assert_eq!(cfg.volume, 0.8);
        assert_eq!(
            cfg.initial_modes(),
            PlayModes {
                shuffle: true,
                repeat: true,
                auto_advance: false,
            }
        );
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        assert!(Config::try_parse_from(["fastplay", "--volume", "1.5"]).is_err());
        assert!(Config::try_parse_from(["fastplay", "--volume", "loud"]).is_err());
    }
}
