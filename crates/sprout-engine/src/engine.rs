//! The `SoundEngine` facade.
//!
//! One engine owns a catalog, an audio backend, a settings store, and the
//! music loop. Hosts construct it explicitly, call [`SoundEngine::on_user_gesture`]
//! from their input handlers, and move time forward with
//! [`SoundEngine::advance`] from their frame or timer loop. Every `play*`
//! call is fire-and-forget: failures are logged and reported as a
//! [`Playback::Skipped`] outcome, never as an error.

use std::time::Duration;

use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info, warn};

use sprout_spec::{AchievementKind, Catalog, PlantKind, SoundCategory, SoundId, UiKind};
use sprout_synth::render_sound;
use sprout_synth::rng::create_rng;

use crate::backend::{AudioBackend, BackendEvent, CaptureBackend};
use crate::config::EngineConfig;
use crate::context::{AudioContext, ContextState};
use crate::error::EngineResult;
use crate::mixer::{clamp_unit, MixerSettings};
use crate::music::{BackgroundMusicState, MusicPlayer, MusicTrack, RateBand};
use crate::scheduler::{Action, Scheduler, Sequence};
use crate::settings::{keys, load_settings, persist, SettingsStore};

/// Frames rendered between polls for backend events.
pub const RENDER_BLOCK_FRAMES: usize = 512;

/// Opaque receipt for a started sound.
///
/// Tokens are not unique: two triggers of the same sound within one engine
/// tick compare equal. There is no way to stop a fired effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackToken {
    sound: SoundId,
    at: Duration,
}

impl PlaybackToken {
    /// Sound that was started.
    pub fn sound(&self) -> SoundId {
        self.sound
    }
}

/// Why a trigger produced no sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The global switch is off.
    AudioDisabled,
    /// The output context could not be constructed.
    Unavailable,
    /// The output context is not running yet.
    ContextNotReady,
    /// The sound's category is disabled or its gain is zero.
    Muted,
    /// The catalog has no definition for the sound.
    NotInCatalog,
    /// The music track could not be started.
    MusicUnavailable,
    /// Rendering failed.
    RenderFailed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AudioDisabled => "audio_disabled",
            SkipReason::Unavailable => "unavailable",
            SkipReason::ContextNotReady => "context_not_ready",
            SkipReason::Muted => "muted",
            SkipReason::NotInCatalog => "not_in_catalog",
            SkipReason::MusicUnavailable => "music_unavailable",
            SkipReason::RenderFailed => "render_failed",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Started(PlaybackToken),
    Skipped(SkipReason),
}

impl Playback {
    pub fn is_started(&self) -> bool {
        matches!(self, Playback::Started(_))
    }

    pub fn token(&self) -> Option<PlaybackToken> {
        match self {
            Playback::Started(token) => Some(*token),
            Playback::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Playback::Started(_) => None,
            Playback::Skipped(reason) => Some(*reason),
        }
    }
}

/// Diagnostic snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub sound_count: usize,
    pub available_sounds: Vec<String>,
    pub master_volume: f64,
    pub audio_enabled: bool,
    pub debug_mode: bool,
}

/// Procedural sound engine.
pub struct SoundEngine<B: AudioBackend, S: SettingsStore> {
    config: EngineConfig,
    catalog: Catalog,
    backend: B,
    store: S,
    settings: MixerSettings,
    context: AudioContext,
    music: MusicPlayer,
    scheduler: Scheduler,
    rng: Pcg32,
    seed: u32,
    clock: Duration,
    pending_frames: f64,
    gesture_handled: bool,
}

impl<S: SettingsStore> SoundEngine<CaptureBackend, S> {
    /// Builds an engine that renders into memory at the configured rate.
    pub fn offline(config: EngineConfig, catalog: Catalog, store: S) -> EngineResult<Self> {
        let backend = CaptureBackend::new(config.sample_rate);
        Self::new(config, catalog, backend, store)
    }
}

impl<B: AudioBackend, S: SettingsStore> SoundEngine<B, S> {
    /// Builds an engine. Settings are read from `store` once, here.
    pub fn new(config: EngineConfig, catalog: Catalog, backend: B, store: S) -> EngineResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let settings = load_settings(&store);
        let music = MusicPlayer::new(
            config.music.asset(catalog.music()),
            RateBand::new(config.music.rate_min, config.music.rate_max),
        );
        for warning in catalog.warnings() {
            warn!(code = %warning.code, sound = %warning.sound, "{}", warning.message);
        }
        debug!(
            seed,
            sounds = catalog.len(),
            sample_rate = backend.sample_rate(),
            "sound engine created"
        );

        Ok(Self {
            config,
            catalog,
            backend,
            store,
            settings,
            context: AudioContext::new(),
            music,
            scheduler: Scheduler::new(),
            rng: create_rng(seed),
            seed,
            clock: Duration::ZERO,
            pending_frames: 0.0,
            gesture_handled: false,
        })
    }

    /// Uses an already-decoded music track instead of the catalog asset.
    pub fn with_music_track(mut self, track: MusicTrack) -> Self {
        let asset = self.config.music.asset(self.catalog.music());
        self.music = MusicPlayer::new(asset, self.music.band()).with_track(track);
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Opens and resumes the output context if needed. Idempotent.
    pub fn ensure_ready(&mut self) -> bool {
        self.context.ensure_ready(&mut self.backend)
    }

    /// Current output context state.
    pub fn context_state(&self) -> ContextState {
        self.context.state()
    }

    /// Call from every user input handler.
    ///
    /// Readies the context. The first gesture also schedules the music bed
    /// when autoplay is on.
    pub fn on_user_gesture(&mut self) -> bool {
        let ready = self.ensure_ready();
        if !self.gesture_handled {
            self.gesture_handled = true;
            if self.settings.music_autoplay {
                self.schedule_music_start();
            }
        }
        ready
    }

    /// Moves engine time forward, firing due sequence cues and rendering
    /// backend output for the elapsed span.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.clock + elapsed;
        while let Some(due) = self.scheduler.next_due(target) {
            self.run_output(due.saturating_sub(self.clock));
            self.clock = self.clock.max(due);
            for action in self.scheduler.take_due(self.clock) {
                self.run_action(action);
            }
        }
        self.run_output(target.saturating_sub(self.clock));
        self.clock = target;
    }

    /// Engine time.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Actions waiting for their time.
    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    fn run_output(&mut self, span: Duration) {
        self.pending_frames += span.as_secs_f64() * self.backend.sample_rate() as f64;
        let mut frames = self.pending_frames.floor() as usize;
        self.pending_frames -= frames as f64;

        while frames > 0 {
            let block = frames.min(RENDER_BLOCK_FRAMES);
            self.backend.render(block);
            frames -= block;
            self.handle_backend_events();
        }
    }

    /// Draws at most one music rate per poll. A track shorter than one
    /// render block can end several loops in a single poll; they share the
    /// one new rate.
    fn handle_backend_events(&mut self) {
        let loops_ended = self
            .backend
            .poll_events()
            .into_iter()
            .filter(|event| matches!(event, BackendEvent::MusicLoopEnded))
            .count();
        if loops_ended == 0 {
            return;
        }
        if loops_ended > 1 {
            debug!(loops_ended, "several music loops ended in one block");
        }
        self.music.on_loop_end(
            &mut self.backend,
            self.settings.variations_enabled,
            &mut self.rng,
        );
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::Play(id) => {
                self.play(id);
            }
            Action::StartMusic => {
                self.start_background_music();
            }
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Plays a sound now.
    ///
    /// Does not resume the context: before a successful
    /// [`ensure_ready`](Self::ensure_ready) every trigger is skipped.
    pub fn play(&mut self, id: SoundId) -> Playback {
        let outcome = if id == SoundId::BackgroundMusic {
            if self.start_background_music() {
                Playback::Started(self.token(id))
            } else {
                Playback::Skipped(SkipReason::MusicUnavailable)
            }
        } else {
            self.trigger(id)
        };
        self.log_outcome(id, &outcome);
        outcome
    }

    /// Plays a UI sound.
    pub fn play_ui(&mut self, kind: UiKind) -> Playback {
        self.play(kind.sound_id())
    }

    /// Plays a plant-action sound.
    pub fn play_plant(&mut self, kind: PlantKind) -> Playback {
        self.play(kind.sound_id())
    }

    /// Plays an achievement or XP sound.
    pub fn play_achievement(&mut self, kind: AchievementKind) -> Playback {
        self.play(kind.sound_id())
    }

    /// Plays water, grow, and XP, plus a stage-up flourish from stage 3.
    pub fn play_growth_sequence(&mut self, stage: Option<u32>) -> Sequence {
        let sequence = Sequence::growth(stage);
        self.play_sequence(&sequence);
        sequence
    }

    /// Plays the XP sparkle, plus a streak fanfare above 50 XP.
    pub fn play_xp_gain_sequence(&mut self, amount: u32) -> Sequence {
        let sequence = Sequence::xp_gain(amount);
        self.play_sequence(&sequence);
        sequence
    }

    /// Plays cues at offset zero now and schedules the rest.
    pub fn play_sequence(&mut self, sequence: &Sequence) {
        for cue in sequence.cues().iter().filter(|c| c.at.is_zero()) {
            self.play(cue.sound);
        }
        self.scheduler.schedule_sequence(self.clock, sequence);
    }

    fn token(&self, sound: SoundId) -> PlaybackToken {
        PlaybackToken {
            sound,
            at: self.clock,
        }
    }

    fn trigger(&mut self, id: SoundId) -> Playback {
        if !self.settings.audio_enabled {
            return Playback::Skipped(SkipReason::AudioDisabled);
        }
        if self.context.is_unavailable() {
            return Playback::Skipped(SkipReason::Unavailable);
        }
        if !self.context.is_running() {
            return Playback::Skipped(SkipReason::ContextNotReady);
        }
        let Some(def) = self.catalog.get(id) else {
            return Playback::Skipped(SkipReason::NotInCatalog);
        };

        let gain = self.settings.effective_gain(id.category(), def.volume);
        if gain <= 0.0 {
            return Playback::Skipped(SkipReason::Muted);
        }

        match render_sound(def, gain, self.backend.sample_rate(), &mut self.rng) {
            Ok(sound) => {
                self.backend.submit(sound);
                Playback::Started(self.token(id))
            }
            Err(e) => {
                warn!(sound = %id, code = e.code(), error = %e, "failed to render sound");
                Playback::Skipped(SkipReason::RenderFailed)
            }
        }
    }

    fn log_outcome(&self, id: SoundId, outcome: &Playback) {
        let debug_mode = self.settings.debug_mode;
        match outcome {
            Playback::Started(_) => {
                let gain = self.effective_gain(id);
                if debug_mode {
                    info!(sound = %id, gain, "sound triggered");
                } else {
                    debug!(sound = %id, gain, "sound triggered");
                }
            }
            Playback::Skipped(reason) => {
                if debug_mode {
                    info!(sound = %id, reason = %reason, "sound skipped");
                } else {
                    debug!(sound = %id, reason = %reason, "sound skipped");
                }
            }
        }
    }

    /// Gain `id` would play at right now.
    pub fn effective_gain(&self, id: SoundId) -> f64 {
        if id == SoundId::BackgroundMusic {
            if self.settings.audio_enabled && self.settings.music.enabled {
                return self.settings.music_gain();
            }
            return 0.0;
        }
        self.catalog
            .get(id)
            .map_or(0.0, |def| self.settings.effective_gain(id.category(), def.volume))
    }

    // ------------------------------------------------------------------
    // Background music
    // ------------------------------------------------------------------

    /// Starts the music loop. No-op when already playing.
    ///
    /// Unlike [`play`](Self::play) this readies the context itself. Returns
    /// true when music is playing afterwards.
    pub fn start_background_music(&mut self) -> bool {
        if !self.settings.audio_enabled || !self.settings.music.enabled {
            debug!("music start ignored, music is disabled");
            return false;
        }
        if !self.ensure_ready() {
            return false;
        }
        self.music.start(
            &mut self.backend,
            self.settings.music_gain(),
            self.settings.variations_enabled,
            &mut self.rng,
        );
        self.music.is_playing()
    }

    /// Stops the music loop and drops any scheduled start. Idempotent.
    pub fn stop_background_music(&mut self) {
        self.scheduler.cancel(Action::StartMusic);
        self.music.stop(&mut self.backend);
    }

    /// True while the music loop is active.
    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }

    /// Music state snapshot.
    pub fn music_state(&self) -> BackgroundMusicState {
        BackgroundMusicState {
            enabled: self.settings.music.enabled,
            volume: self.settings.music.volume,
            is_playing: self.music.is_playing(),
            current_playback_rate: self.music.rate(),
        }
    }

    fn schedule_music_start(&mut self) {
        self.scheduler.cancel(Action::StartMusic);
        self.scheduler.schedule(
            self.clock + self.config.music.start_delay(),
            Action::StartMusic,
        );
    }

    fn apply_music_volume(&mut self) {
        let gain = self.settings.music_gain();
        self.music.set_volume(&mut self.backend, gain);
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_master_volume(&mut self, volume: f64) {
        self.settings.master_volume = clamp_unit(volume);
        persist(&mut self.store, keys::MASTER_VOLUME, self.settings.master_volume);
        self.apply_music_volume();
    }

    pub fn master_volume(&self) -> f64 {
        self.settings.master_volume
    }

    /// Sets the global switch. Turning it off also stops the music.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.audio_enabled = enabled;
        persist(&mut self.store, keys::SOUND_ENABLED, enabled);
        if !enabled {
            self.stop_background_music();
        }
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.settings.audio_enabled
    }

    /// Sets one category's volume.
    pub fn set_category_volume(&mut self, category: SoundCategory, volume: f64) {
        let level = self.settings.category_mut(category);
        level.volume = clamp_unit(volume);
        let volume = level.volume;
        persist(&mut self.store, keys::volume(category), volume);
        if category == SoundCategory::Music {
            self.apply_music_volume();
        }
    }

    pub fn category_volume(&self, category: SoundCategory) -> f64 {
        self.settings.category(category).volume
    }

    /// Enables or disables one category.
    pub fn set_category_enabled(&mut self, category: SoundCategory, enabled: bool) {
        if category == SoundCategory::Music {
            self.set_background_music_enabled(enabled);
            return;
        }
        self.settings.category_mut(category).enabled = enabled;
        persist(&mut self.store, keys::enabled(category), enabled);
    }

    pub fn is_category_enabled(&self, category: SoundCategory) -> bool {
        self.settings.category(category).enabled
    }

    pub fn set_background_music_volume(&mut self, volume: f64) {
        self.set_category_volume(SoundCategory::Music, volume);
    }

    pub fn background_music_volume(&self) -> f64 {
        self.settings.music.volume
    }

    /// Enables or disables music.
    ///
    /// Enabling while audio is on schedules a start after the configured
    /// delay; disabling stops the loop.
    pub fn set_background_music_enabled(&mut self, enabled: bool) {
        self.settings.music.enabled = enabled;
        persist(&mut self.store, keys::MUSIC_ENABLED, enabled);
        if !enabled {
            self.stop_background_music();
        } else if self.settings.audio_enabled {
            self.schedule_music_start();
        }
    }

    pub fn is_background_music_enabled(&self) -> bool {
        self.settings.music.enabled
    }

    /// Sets the effects group volume and copies it to all three effect
    /// categories.
    pub fn set_sound_effects_volume(&mut self, volume: f64) {
        let volume = clamp_unit(volume);
        self.settings.sound_effects.volume = volume;
        persist(&mut self.store, keys::SOUND_EFFECTS_VOLUME, volume);
        for category in SoundCategory::EFFECTS {
            self.set_category_volume(category, volume);
        }
    }

    /// Last volume set for the effects group.
    pub fn sound_effects_volume(&self) -> f64 {
        self.settings.sound_effects_volume()
    }

    /// Switches every effect category on or off without touching their own
    /// flags.
    pub fn set_sound_effects_enabled(&mut self, enabled: bool) {
        self.settings.sound_effects.enabled = enabled;
        persist(&mut self.store, keys::SOUND_EFFECTS_ENABLED, enabled);
    }

    pub fn are_sound_effects_enabled(&self) -> bool {
        self.settings.sound_effects_enabled()
    }

    /// Turns per-loop music rate jitter on or off, from the next loop.
    pub fn set_audio_variations_enabled(&mut self, enabled: bool) {
        self.settings.variations_enabled = enabled;
        persist(&mut self.store, keys::VARIATIONS_ENABLED, enabled);
    }

    pub fn are_audio_variations_enabled(&self) -> bool {
        self.settings.variations_enabled
    }

    /// Whether the first gesture starts the music.
    pub fn set_music_autoplay(&mut self, autoplay: bool) {
        self.settings.music_autoplay = autoplay;
        persist(&mut self.store, keys::MUSIC_AUTOPLAY, autoplay);
    }

    pub fn music_autoplay(&self) -> bool {
        self.settings.music_autoplay
    }

    /// Logs every trigger and skip at `info` while on.
    pub fn enable_debug_mode(&mut self, enabled: bool) {
        self.settings.debug_mode = enabled;
        persist(&mut self.store, keys::DEBUG_MODE, enabled);
        info!(enabled, "sound debug mode changed");
    }

    pub fn is_debug_mode(&self) -> bool {
        self.settings.debug_mode
    }

    /// Diagnostic snapshot.
    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            sound_count: self.catalog.len(),
            available_sounds: self.catalog.available_sounds(),
            master_volume: self.settings.master_volume,
            audio_enabled: self.settings.audio_enabled,
            debug_mode: self.settings.debug_mode,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &MixerSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed the engine's RNG started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine, returning its backend and store.
    pub fn into_parts(self) -> (B, S) {
        (self.backend, self.store)
    }
}
