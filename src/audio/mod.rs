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

//! Audio policy for the kiosk.
//!
//! The [`AudioCoordinator`] maps game [`Effect`]s onto requests against an
//! [`AudioOutput`]. It is the only component that issues audio requests, and
//! it runs on the main event loop, so requests arrive at the output in the
//! same order the game produced them.
//!
//! Background music plays in every phase except [`Phase::Result`]. Leaving a
//! phase stops it (rewinding to the start), and entering the result screen
//! plays the fanfare instead. Sound effects are fire-and-forget.
//!
//! Audio failures never reach the game: they are logged and dropped.

mod mpv;

pub(crate) use mpv::MpvAudio;

use thiserror::Error;
use tracing::{debug, warn};

use crate::game::{Effect, Phase, SoundEffect};

/// A looping audio track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopTrack {
    BackgroundMusic,
}

#[derive(Debug, Error)]
pub(crate) enum AudioError {
    #[error("audio worker is not running")]
    WorkerUnavailable,
}

/// Destination for audio requests.
///
/// Implementations must not block: a request is issued and its outcome is
/// observed elsewhere.
pub(crate) trait AudioOutput {
    fn play_once(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
    fn start_loop(&mut self, track: LoopTrack) -> Result<(), AudioError>;
    fn stop_loop(&mut self, track: LoopTrack) -> Result<(), AudioError>;
}

pub(crate) struct AudioCoordinator<O: AudioOutput> {
    output: O,
    music_playing: bool,
}

impl<O: AudioOutput> AudioCoordinator<O> {
    pub(crate) fn new(output: O) -> Self {
        Self {
            output,
            music_playing: false,
        }
    }

    /// Applies the audio policy for each effect, in order.
    pub(crate) fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::PhaseExited(phase) => {
                    debug!(?phase, "phase exited");
                    self.stop_music();
                }
                Effect::PhaseEntered(Phase::Result) => {
                    self.stop_music();
                    self.play(SoundEffect::Fanfare);
                }
                Effect::PhaseEntered(phase) => {
                    debug!(?phase, "phase entered");
                    self.start_music();
                }
                Effect::Sound(sound) => self.play(sound),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &O {
        &self.output
    }

    fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        // Flag first: the desired state wins even if the request fails.
        self.music_playing = true;
        if let Err(e) = self.output.start_loop(LoopTrack::BackgroundMusic) {
            warn!("Failed to start background music: {}", e);
        }
    }

    fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        if let Err(e) = self.output.stop_loop(LoopTrack::BackgroundMusic) {
            warn!("Failed to stop background music: {}", e);
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        if let Err(e) = self.output.play_once(effect) {
            warn!(?effect, "Failed to play sound effect: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameCommand, GameStateMachine, QUESTION_COUNT};

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Once(SoundEffect),
        Start(LoopTrack),
        Stop(LoopTrack),
    }

    #[derive(Default)]
    struct RecordingOutput {
        calls: Vec<Call>,
        looping: bool,
        fail: bool,
    }

    impl RecordingOutput {
        fn result(&self) -> Result<(), AudioError> {
            if self.fail {
                Err(AudioError::WorkerUnavailable)
            } else {
                Ok(())
            }
        }

        fn fanfares(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| **c == Call::Once(SoundEffect::Fanfare))
                .count()
        }
    }

    impl AudioOutput for RecordingOutput {
        fn play_once(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
            self.calls.push(Call::Once(effect));
            self.result()
        }

        fn start_loop(&mut self, track: LoopTrack) -> Result<(), AudioError> {
            self.calls.push(Call::Start(track));
            self.looping = true;
            self.result()
        }

        fn stop_loop(&mut self, track: LoopTrack) -> Result<(), AudioError> {
            self.calls.push(Call::Stop(track));
            self.looping = false;
            self.result()
        }
    }

    fn run(
        game: &mut GameStateMachine,
        audio: &mut AudioCoordinator<RecordingOutput>,
        commands: &[GameCommand],
    ) {
        for command in commands {
            let effects = game.apply(*command);
            audio.apply(&effects);
        }
    }

    fn started() -> (GameStateMachine, AudioCoordinator<RecordingOutput>) {
        let game = GameStateMachine::new();
        let mut audio = AudioCoordinator::new(RecordingOutput::default());
        audio.apply(&game.initial_effects());
        (game, audio)
    }

    fn play_through(game: &mut GameStateMachine, audio: &mut AudioCoordinator<RecordingOutput>) {
        run(game, audio, &[GameCommand::Advance; 3]);
        for _ in 0..QUESTION_COUNT {
            run(game, audio, &[GameCommand::MarkCorrect, GameCommand::Advance]);
        }
    }

    const BGM: LoopTrack = LoopTrack::BackgroundMusic;

    #[test]
    fn music_starts_on_intro() {
        let (_, audio) = started();

        assert_eq!(audio.output().calls, vec![Call::Start(BGM)]);
        assert!(audio.output().looping);
    }

    #[test]
    fn music_is_not_restarted_within_a_phase() {
        let (mut game, mut audio) = started();

        run(&mut game, &mut audio, &[GameCommand::Advance, GameCommand::Advance]);
        run(&mut game, &mut audio, &[GameCommand::Reset]);

        assert_eq!(audio.output().calls, vec![Call::Start(BGM)]);
    }

    #[test]
    fn phase_change_stops_before_restarting() {
        let (mut game, mut audio) = started();

        run(&mut game, &mut audio, &[GameCommand::Advance; 3]);

        assert_eq!(
            audio.output().calls,
            vec![Call::Start(BGM), Call::Stop(BGM), Call::Start(BGM)]
        );
    }

    #[test]
    fn question_sounds_are_forwarded() {
        let (mut game, mut audio) = started();
        run(&mut game, &mut audio, &[GameCommand::Advance; 3]);

        run(
            &mut game,
            &mut audio,
            &[
                GameCommand::AcknowledgePress,
                GameCommand::MarkCorrect,
                GameCommand::MarkIncorrect,
            ],
        );

        assert_eq!(
            audio.output().calls[3..],
            [
                Call::Once(SoundEffect::ButtonPress),
                Call::Once(SoundEffect::Correct),
                Call::Once(SoundEffect::Incorrect),
            ]
        );
    }

    #[test]
    fn result_is_silent_apart_from_fanfare_and_voice() {
        let (mut game, mut audio) = started();
        play_through(&mut game, &mut audio);

        assert!(!audio.output().looping);
        assert_eq!(audio.output().fanfares(), 1);

        let before = audio.output().calls.len();
        run(&mut game, &mut audio, &[GameCommand::Advance; 3]);

        assert!(!audio.output().looping);
        assert_eq!(
            audio.output().calls[before..],
            [Call::Once(SoundEffect::ResultVoice)]
        );
    }

    #[test]
    fn fanfare_fires_once_per_result_entry() {
        let (mut game, mut audio) = started();

        play_through(&mut game, &mut audio);
        run(&mut game, &mut audio, &[GameCommand::Reset]);
        assert!(audio.output().looping);

        play_through(&mut game, &mut audio);

        assert_eq!(audio.output().fanfares(), 2);
        assert!(!audio.output().looping);
    }

    #[test]
    fn failures_do_not_stop_policy() {
        let output = RecordingOutput {
            fail: true,
            ..Default::default()
        };
        let mut game = GameStateMachine::new();
        let mut audio = AudioCoordinator::new(output);
        audio.apply(&game.initial_effects());

        play_through(&mut game, &mut audio);

        assert_eq!(game.view().phase, Phase::Result);
        assert_eq!(audio.output().fanfares(), 1);
        assert!(!audio.output().looping);
    }
}
