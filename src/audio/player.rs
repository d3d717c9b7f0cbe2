use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::source::AudioSource;
use crate::error::PlayerError;

/// Output stream driver consumed by the synthesizer
///
/// `play` opens and starts a hardware stream whose callback pulls one
/// sample per frame from the audio source; `stop` tears the stream down
/// and notifies the source. Implementations own their stream lifecycle,
/// including cleanup of a prior stream when `play` is called again.
pub trait AudioPlayer {
    fn play(&mut self) -> Result<(), PlayerError>;
    fn stop(&mut self);
}

/// cpal-backed output driver
///
/// Builds a mono f32 output stream on the default device. Each callback
/// pulls single samples from the shared source and replicates them
/// across all channels of the frame.
pub struct CpalAudioPlayer {
    source: Arc<dyn AudioSource>,
    sample_rate: u32,
    stream: Option<cpal::Stream>,
}

impl CpalAudioPlayer {
    pub fn new(source: Arc<dyn AudioSource>, sample_rate: u32) -> Self {
        Self {
            source,
            sample_rate,
            stream: None,
        }
    }

    fn open_stream(&self) -> Result<cpal::Stream, PlayerError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(PlayerError::NoDevice)?;

        let config = cpal::StreamConfig {
            channels: 1,
            sample_rate: self.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };
        let channels = config.channels as usize;
        let source = self.source.clone();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let sample = source.get_sample();
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}

impl AudioPlayer for CpalAudioPlayer {
    fn play(&mut self) -> Result<(), PlayerError> {
        // Replace any stream left over from a previous play() call
        self.stream = None;

        let stream = self.open_stream()?;
        stream.play()?;
        self.stream = Some(stream);

        log::debug!("Output stream started at {} Hz", self.sample_rate);
        Ok(())
    }

    fn stop(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("Output stream closed");
        }
        self.source.on_playback_stopped();
    }
}
