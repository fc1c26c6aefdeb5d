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

//! MPV-backed audio output.
//!
//! [`MpvAudio`] is a command proxy: it sends [`AudioCommand`]s to a single
//! background worker thread which owns the `libmpv` context used for the
//! looping background track. Because every request goes through the one
//! channel, a stop always lands after any start issued before it.
//!
//! One-shot effects are handed to the worker too, but each one is played by
//! its own short-lived thread and MPV context, so effects overlap freely and
//! never wait on one another.

use std::{
    path::Path,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread,
};

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::{
    audio::{AudioError, AudioOutput, LoopTrack},
    config::AudioConfig,
    game::SoundEffect,
};

// Seconds to wait for MPV events on each pass of the worker loop.
const EVENT_WAIT: f64 = 0.05;

#[derive(Debug)]
enum AudioCommand {
    StartLoop(String),
    StopLoop,
    PlayOnce(String),
}

pub(crate) struct MpvAudio {
    config: AudioConfig,
    command_tx: Sender<AudioCommand>,
}

impl MpvAudio {
    /// Spawns the audio worker thread and returns a handle to it.
    ///
    /// Failing to initialise MPV is not fatal; the worker logs the failure
    /// and every later request reports [`AudioError::WorkerUnavailable`].
    pub(crate) fn new(config: &AudioConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel();

        spawn_audio_worker(config.bgm_volume, command_rx);

        Self {
            config: config.clone(),
            command_tx,
        }
    }

    fn send(&self, command: AudioCommand) -> Result<(), AudioError> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::WorkerUnavailable)
    }

    fn effect_path(&self, effect: SoundEffect) -> String {
        let file = match effect {
            SoundEffect::ButtonPress => &self.config.push,
            SoundEffect::Correct => &self.config.correct,
            SoundEffect::Incorrect => &self.config.incorrect,
            SoundEffect::Fanfare => &self.config.fanfare,
            SoundEffect::ResultVoice => &self.config.voice,
        };
        self.resolve(file)
    }

    fn resolve(&self, file: &str) -> String {
        Path::new(&self.config.sound_dir)
            .join(file)
            .to_string_lossy()
            .into_owned()
    }
}

impl AudioOutput for MpvAudio {
    fn play_once(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        let path = self.effect_path(effect);
        self.send(AudioCommand::PlayOnce(path))
    }

    fn start_loop(&mut self, track: LoopTrack) -> Result<(), AudioError> {
        let path = match track {
            LoopTrack::BackgroundMusic => self.resolve(&self.config.bgm),
        };
        self.send(AudioCommand::StartLoop(path))
    }

    fn stop_loop(&mut self, _track: LoopTrack) -> Result<(), AudioError> {
        self.send(AudioCommand::StopLoop)
    }
}

fn spawn_audio_worker(volume: f64, command_rx: Receiver<AudioCommand>) {
    thread::spawn(move || {
        if let Err(e) = audio_worker(volume, command_rx) {
            error!("MPV audio worker failure: {:#}", e);
        }
    });
}

fn create_handler() -> Result<mpv::MpvHandler> {
    let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
    builder
        .set_option("vo", "null")
        .context("Failed to set no video output")?;
    builder
        .set_option("idle", "yes")
        .context("Failed to set idle mode")?;
    builder.build().context("Failed to build MPV handler")
}

/// Runs until every [`MpvAudio`] handle has been dropped.
fn audio_worker(volume: f64, command_rx: Receiver<AudioCommand>) -> Result<()> {
    let mut handler = create_handler()?;
    handler
        .set_property("loop-file", "inf")
        .context("Failed to enable looping")?;
    handler
        .set_property("volume", volume)
        .context("Failed to set background volume")?;

    info!("Audio worker started");

    while process_commands(&mut handler, &command_rx) {
        process_mpv_events(&mut handler);
    }

    info!("Audio worker stopped");
    Ok(())
}

/// Drains pending commands, returning `false` once the channel is closed.
fn process_commands(handler: &mut mpv::MpvHandler, command_rx: &Receiver<AudioCommand>) -> bool {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        };

        debug!(?command, "audio command");

        let result = match command {
            AudioCommand::StartLoop(filename) => handler
                .command(&["loadfile", &filename, "replace"])
                .with_context(|| format!("Failed to load file: {}", filename))
                .and_then(|_| handler.set_property("pause", false).context("Failed to unpause")),
            // Unloading the file means the next start plays from the top.
            AudioCommand::StopLoop => handler.command(&["stop"]).context("Failed to stop"),
            AudioCommand::PlayOnce(filename) => {
                spawn_one_shot(filename);
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!("{:#}", e);
        }
    }
}

fn process_mpv_events(handler: &mut mpv::MpvHandler) {
    if let Some(mpv::Event::EndFile(result)) = handler.wait_event(EVENT_WAIT) {
        match result {
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => {
                warn!("Background music ended with an error")
            }
            Ok(_) => {}
            Err(e) => warn!("Background music playback failed: {:?}", e),
        }
    }
}

fn spawn_one_shot(filename: String) {
    thread::spawn(move || {
        if let Err(e) = play_to_end(&filename) {
            warn!("Audio play failed for {}: {:#}", filename, e);
        }
    });
}

fn play_to_end(filename: &str) -> Result<()> {
    let mut handler = create_handler()?;
    handler
        .command(&["loadfile", filename])
        .with_context(|| format!("Failed to load file: {}", filename))?;

    loop {
        match handler.wait_event(1.0) {
            Some(mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR))) => {
                anyhow::bail!("playback ended with an error");
            }
            Some(mpv::Event::EndFile(Ok(_))) | Some(mpv::Event::Shutdown) => break,
            Some(mpv::Event::EndFile(Err(e))) => {
                anyhow::bail!("playback failed: {:?}", e);
            }
            _ => {}
        }
    }

    debug!(filename, "one-shot finished");
    Ok(())
}
