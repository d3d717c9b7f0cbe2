pub mod factory;
pub mod oscillator;
pub mod params;
pub mod player;
pub mod source;
pub mod synthesizer;
pub mod wavetable;
