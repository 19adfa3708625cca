//! Audio cues
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into cues
//! for whatever actually plays sound; loading and mixing live outside the core.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Start the looping tyre squeal
    DriftLoopStart,
    /// Stop the tyre squeal
    DriftLoopStop,
    /// One-shot crash
    Crash,
}

impl AudioCue {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::DriftStarted => Some(AudioCue::DriftLoopStart),
            GameEvent::DriftStopped => Some(AudioCue::DriftLoopStop),
            GameEvent::Crashed { .. } => Some(AudioCue::Crash),
            GameEvent::SessionStarted { .. } => None,
        }
    }

    /// Whether the cue loops until stopped
    pub fn is_looping(&self) -> bool {
        matches!(self, AudioCue::DriftLoopStart)
    }
}

/// Something that can play cues
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

/// Collects cues in order (handy for headless hosts)
impl CueSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}

/// Logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogSink {
    muted: bool,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        if !self.muted {
            log::debug!("audio cue: {:?}", cue);
        }
    }
}

/// Forward every cue-bearing event to `sink`, in order
pub fn dispatch<S: CueSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for cue in events.iter().filter_map(AudioCue::for_event) {
        sink.play(cue);
    }
}
