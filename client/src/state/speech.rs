//! "Audio Support" page: read text aloud through a platform speech engine.
//!
//! DESIGN
//! ======
//! The player owns the engine and mirrors its playback state from the
//! `Started`/`Ended` events the engine reports back, the same way a browser
//! speech API signals through utterance callbacks. Only English and Swedish
//! voices are offered. Dropping the player cancels any speech in progress.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

use proto::Subject;
use tracing::debug;

use crate::i18n::Translations;

pub const MIN_RATE: f32 = 0.5;
pub const MAX_RATE: f32 = 2.0;
pub const DEFAULT_RATE: f32 = 1.0;

const SUPPORTED_LANG_PREFIXES: [&str; 2] = ["en-", "sv-"];

const VOICE_HELP_URL_EN: &str = "https://www.google.com/search?q=install+text-to-speech+voices+windows+macos";
const VOICE_HELP_URL_SV: &str = "https://www.google.com/search?q=installera+text-till-tal-r%C3%B6ster+windows+macos";

// =============================================================================
// ENGINE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    /// Stable identifier used for selection.
    pub uri: String,
    pub name: String,
    /// BCP-47 tag, e.g. `sv-SE`.
    pub lang: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
}

/// Playback notifications from the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
}

/// Platform text-to-speech.
pub trait SpeechEngine {
    /// Every voice the platform has installed.
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, utterance: Utterance);
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
}

/// What the primary button does right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackAction {
    Play,
    Pause,
    Resume,
}

impl PlaybackAction {
    #[must_use]
    pub fn label(self, t: &Translations) -> &'static str {
        match self {
            Self::Play => t.play,
            Self::Pause => t.pause,
            Self::Resume => t.resume,
        }
    }
}

// =============================================================================
// PLAYER
// =============================================================================

pub struct AudioPlayer<E: SpeechEngine> {
    engine: E,
    pub text: String,
    subject: Subject,
    voices: Vec<Voice>,
    selected_voice: Option<String>,
    rate: f32,
    speaking: bool,
    paused: bool,
}

impl<E: SpeechEngine> AudioPlayer<E> {
    pub fn new(engine: E, subject: Subject) -> Self {
        let mut player = Self {
            engine,
            text: String::new(),
            subject,
            voices: Vec::new(),
            selected_voice: None,
            rate: DEFAULT_RATE,
            speaking: false,
            paused: false,
        };
        player.refresh_voices();
        player
    }

    /// Reload the voice list, e.g. on the platform's voices-changed signal.
    /// An empty list from the engine keeps the current one.
    pub fn refresh_voices(&mut self) {
        let voices: Vec<Voice> = self
            .engine
            .voices()
            .into_iter()
            .filter(|v| SUPPORTED_LANG_PREFIXES.iter().any(|p| v.lang.starts_with(p)))
            .collect();
        if !voices.is_empty() {
            debug!(count = voices.len(), "speech: voices loaded");
            self.voices = voices;
        }
        self.ensure_subject_voice();
    }

    pub fn set_subject(&mut self, subject: Subject) {
        self.subject = subject;
        self.ensure_subject_voice();
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Every supported voice, both languages.
    #[must_use]
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Voices offered in the selector for the current subject.
    #[must_use]
    pub fn subject_voices(&self) -> Vec<&Voice> {
        let prefix = self.subject.lang_prefix();
        self.voices.iter().filter(|v| v.lang.starts_with(prefix)).collect()
    }

    #[must_use]
    pub fn selected_voice(&self) -> Option<&Voice> {
        let uri = self.selected_voice.as_deref()?;
        self.voices.iter().find(|v| v.uri == uri)
    }

    /// Stop playback and switch voice.
    pub fn select_voice(&mut self, uri: &str) {
        self.stop();
        self.selected_voice = Some(uri.to_string());
    }

    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set the speaking rate, clamped to [`MIN_RATE`, `MAX_RATE`]. Applies to
    /// the next utterance.
    pub fn set_rate(&mut self, rate: f32) {
        if rate.is_nan() {
            return;
        }
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start reading the text, or resume if paused. No-op on blank text.
    pub fn play(&mut self) {
        if self.text.trim().is_empty() {
            return;
        }
        if self.paused {
            self.engine.resume();
            self.paused = false;
            return;
        }
        self.stop();
        let utterance = Utterance {
            text: self.text.clone(),
            voice: self.selected_voice().cloned(),
            rate: self.rate,
        };
        self.engine.speak(utterance);
    }

    /// Pause, only while speaking and not already paused.
    pub fn pause(&mut self) {
        if self.speaking && !self.paused {
            self.engine.pause();
            self.paused = true;
        }
    }

    pub fn stop(&mut self) {
        self.engine.cancel();
        self.speaking = false;
        self.paused = false;
    }

    /// The primary button: pause while speaking, otherwise play or resume.
    pub fn toggle(&mut self) {
        match self.primary_action() {
            PlaybackAction::Pause => self.pause(),
            PlaybackAction::Play | PlaybackAction::Resume => self.play(),
        }
    }

    pub fn handle_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => self.speaking = true,
            SpeechEvent::Ended => self.speaking = false,
        }
        self.paused = false;
    }

    /// Whether the primary button is enabled.
    #[must_use]
    pub fn can_play(&self) -> bool {
        !self.text.trim().is_empty() && !self.subject_voices().is_empty()
    }

    /// Whether the stop button is enabled.
    #[must_use]
    pub fn can_stop(&self) -> bool {
        self.speaking
    }

    #[must_use]
    pub fn primary_action(&self) -> PlaybackAction {
        if self.speaking && !self.paused {
            PlaybackAction::Pause
        } else if self.paused {
            PlaybackAction::Resume
        } else {
            PlaybackAction::Play
        }
    }

    /// Where to learn how to install voices for the current subject.
    #[must_use]
    pub fn voice_help_url(&self) -> &'static str {
        voice_help_url(self.subject)
    }

    // Keep the selection when it already matches the subject's language;
    // otherwise take the first voice for the subject, else the first voice.
    fn ensure_subject_voice(&mut self) {
        let prefix = self.subject.lang_prefix();
        if self.selected_voice().is_some_and(|v| v.lang.starts_with(prefix)) {
            return;
        }
        let fallback = self
            .voices
            .iter()
            .find(|v| v.lang.starts_with(prefix))
            .or_else(|| self.voices.first());
        if let Some(voice) = fallback {
            self.selected_voice = Some(voice.uri.clone());
        }
    }
}

impl<E: SpeechEngine> Drop for AudioPlayer<E> {
    fn drop(&mut self) {
        self.engine.cancel();
    }
}

#[must_use]
pub fn voice_help_url(subject: Subject) -> &'static str {
    match subject {
        Subject::English => VOICE_HELP_URL_EN,
        Subject::Swedish => VOICE_HELP_URL_SV,
    }
}
