//! Sprout Synthesis
//!
//! Procedural synthesis for the garden's sound effects. Nothing here is
//! sampled: every effect is built at trigger time from oscillators, biquad
//! filters, and gain envelopes.
//!
//! # Overview
//!
//! Rendering is split in two steps:
//!
//! 1. **Planning** - [`synthesis::plan`] turns a [`SoundDefinition`](sprout_spec::SoundDefinition) and an
//!    effective volume into a [`SoundPlan`], a list of timed voices. Recipes
//!    with missing parameters fall back to a single tone.
//! 2. **Rendering** - [`render_plan`] sums the voices into mono samples.
//!
//! # Determinism
//!
//! Texture recipes jitter pitch and timing. All jitter is drawn from a PCG32
//! passed in by the caller, so the same seed always produces the same
//! samples. [`rng::sound_rng`] derives an independent stream per sound with
//! BLAKE3.
//!
//! # Example
//!
//! ```
//! use sprout_spec::{Catalog, SoundId};
//! use sprout_synth::{render_sound, rng::sound_rng};
//!
//! let catalog = Catalog::garden();
//! let def = catalog.get(SoundId::PlantWater).unwrap();
//! let sound = render_sound(def, def.volume, 44100, &mut sound_rng(42, def.id)).unwrap();
//! assert!(sound.peak() > 0.0);
//! ```
//!
//! # Crate Structure
//!
//! - [`envelope`] - Gain curves that end on a non-zero floor
//! - [`filter`] - Biquad filters
//! - [`oscillator`] - Basic waveform generators
//! - [`render`] - Plan rendering and soft clipping
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`synthesis`] - Recipes for every algorithm
//! - [`wav`] - Deterministic WAV file writer

pub mod envelope;
pub mod error;
pub mod filter;
pub mod oscillator;
pub mod render;
pub mod rng;
pub mod synthesis;
pub mod wav;

pub use error::{SynthError, SynthResult};
pub use render::{render_plan, render_sound, RenderedSound};
pub use synthesis::{plan, SoundPlan, Voice};
pub use wav::WavResult;
