//! Sound adapter that logs cues instead of playing audio.

use crate::ports::outbound::SoundPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSound;

impl SoundPort for TracingSound {
    fn play_beep(&self) {
        tracing::trace!(cue = "beep", "Sound");
    }

    fn play_fanfare(&self) {
        tracing::info!(cue = "fanfare", "Sound");
    }

    fn play_trombone(&self) {
        tracing::info!(cue = "trombone", "Sound");
    }
}
