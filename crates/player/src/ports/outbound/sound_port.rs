//! Sound-effect collaborator. Side effects only, nothing comes back.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Before every scheduled frame
    Beep,
    /// The roll settled
    Fanfare,
    /// Fetching candidates failed
    Trombone,
}

#[cfg_attr(test, mockall::automock)]
pub trait SoundPort: Send + Sync {
    fn play_beep(&self);
    fn play_fanfare(&self);
    fn play_trombone(&self);
}

/// Dispatch a cue to the matching port method.
pub fn play(sound: &dyn SoundPort, cue: SoundCue) {
    match cue {
        SoundCue::Beep => sound.play_beep(),
        SoundCue::Fanfare => sound.play_fanfare(),
        SoundCue::Trombone => sound.play_trombone(),
    }
}
