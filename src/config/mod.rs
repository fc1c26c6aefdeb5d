// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the kiosk configuration file: where the image and
//! sound assets live, which file plays for each cue, and where logs go.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "quiz-kiosk";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub log_file: String,
    pub image_dir: String,
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            log_file: "quiz-kiosk.log".to_string(),
            image_dir: "images".to_string(),
            audio: AudioConfig::default(),
        }
    }
}

/// Sound asset locations, relative to `sound_dir`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sound_dir: String,
    /// Background music volume, 0 to 100.
    pub bgm_volume: f64,
    pub bgm: String,
    pub push: String,
    pub correct: String,
    pub incorrect: String,
    pub fanfare: String,
    pub voice: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_dir: "sound".to_string(),
            bgm_volume: 30.0,
            bgm: "bgm.mp3".to_string(),
            push: "push.mp3".to_string(),
            correct: "seikai.mp3".to_string(),
            incorrect: "huseikai.mp3".to_string(),
            fanfare: "fanfare.mp3".to_string(),
            voice: "voice.wav".to_string(),
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

/// Writes the configuration back, filling in any settings missing from an
/// older file.
pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
