use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cpal::traits::{DeviceTrait, HostTrait};
use std::{sync::Arc, thread, time::Duration};

use wavetable_synth::{
    A4Oscillator, AudioPlayer, AudioSynthesizer, CpalAudioPlayer, DemoConfig, Waveform,
    SAMPLE_RATE,
};

/// Real-time wavetable synthesizer demo
#[derive(Parser, Debug)]
#[command(name = "wavetable-synth")]
#[command(about = "Plays a wavetable-synthesized tone", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<std::path::PathBuf>,

    /// List available audio output devices and exit
    #[arg(short = 'l', long = "list")]
    list_devices: bool,

    /// Waveform: sine, triangle, square, or saw
    #[arg(short = 'w', long = "wave")]
    wave: Option<String>,

    /// Frequency in Hz
    #[arg(short = 'f', long = "frequency")]
    frequency: Option<f32>,

    /// Volume in dB (0 is unity gain)
    #[arg(short = 'v', long = "volume")]
    volume: Option<f32>,

    /// Playback duration in seconds
    #[arg(short = 'd', long = "duration")]
    duration: Option<f32>,

    /// Play the fixed 440 Hz reference oscillator instead
    #[arg(long = "reference")]
    reference: bool,
}

/// List available audio output devices
fn list_audio_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();

    let devices: Vec<String> = host
        .output_devices()?
        .filter_map(|device| {
            device
                .description()
                .ok()
                .map(|desc| desc.name().to_string())
        })
        .collect();

    if devices.is_empty() {
        return Err(anyhow!("No audio output devices found"));
    }

    Ok(devices)
}

fn parse_wave(name: &str) -> Result<Waveform> {
    match name.to_lowercase().as_str() {
        "sine" => Ok(Waveform::Sine),
        "triangle" => Ok(Waveform::Triangle),
        "square" => Ok(Waveform::Square),
        "saw" => Ok(Waveform::Saw),
        other => Err(anyhow!("Unknown waveform: {}", other)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_devices {
        println!("Available Audio Output Devices:");
        for (i, device) in list_audio_devices()?.iter().enumerate() {
            println!("  {}: {}", i, device);
        }
        return Ok(());
    }

    // Start from the config file (or defaults), then apply flag overrides
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(wave) = &args.wave {
        config.wave = parse_wave(wave)?;
    }
    if let Some(frequency) = args.frequency {
        config.frequency = frequency;
    }
    if let Some(volume) = args.volume {
        config.volume_db = volume;
    }
    if let Some(duration) = args.duration {
        config.duration = duration;
    }
    config.validate()?;

    if args.reference {
        return run_reference(config.duration);
    }

    let synth = AudioSynthesizer::new();
    synth.set_waveform(config.wave);
    synth.set_frequency(config.frequency);
    synth.set_volume(config.volume_db);

    println!(
        "Playing {:?} at {} Hz, {} dB for {}s",
        config.wave, config.frequency, config.volume_db, config.duration
    );
    synth.play().context("Failed to start playback")?;
    thread::sleep(Duration::from_secs_f32(config.duration));
    synth.stop();

    Ok(())
}

/// Play the fixed 440 Hz half-amplitude reference tone
fn run_reference(duration: f32) -> Result<()> {
    let source = Arc::new(A4Oscillator::new(SAMPLE_RATE as f32));
    let mut player = CpalAudioPlayer::new(source, SAMPLE_RATE);

    println!("Playing A4 reference tone for {}s", duration);
    player.play().context("Failed to start playback")?;
    thread::sleep(Duration::from_secs_f32(duration));
    player.stop();

    Ok(())
}
