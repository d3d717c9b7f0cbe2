use thiserror::Error;

/// Failures surfaced by the output driver
///
/// A failed `play()` leaves the synthesizer stopped; callers may retry
/// later. Nothing here is ever raised on the render thread.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output device available")]
    NoDevice,

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start playback: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}
