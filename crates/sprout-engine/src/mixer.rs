//! Mixer settings and effective gain.

use serde::Serialize;

use sprout_spec::SoundCategory;

/// Default music category volume.
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.2;

/// Volume and enable flag of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryLevel {
    pub volume: f64,
    pub enabled: bool,
}

impl CategoryLevel {
    pub fn new(volume: f64, enabled: bool) -> Self {
        Self {
            volume: clamp_unit(volume),
            enabled,
        }
    }

    /// Gain this category contributes: its volume, or 0 when disabled.
    pub fn gain(&self) -> f64 {
        if self.enabled {
            self.volume
        } else {
            0.0
        }
    }
}

impl Default for CategoryLevel {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

/// Every user-adjustable playback setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixerSettings {
    pub master_volume: f64,
    /// Global switch; off silences every trigger and music start.
    pub audio_enabled: bool,
    pub ui: CategoryLevel,
    pub plant: CategoryLevel,
    pub achievement: CategoryLevel,
    pub music: CategoryLevel,
    /// Group setting over the three effect categories. Its flag gates every
    /// effect; its volume is the last value set for the group.
    pub sound_effects: CategoryLevel,
    /// Per-loop rate jitter for the music bed.
    pub variations_enabled: bool,
    pub debug_mode: bool,
    /// Start music on the first user gesture.
    pub music_autoplay: bool,
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            audio_enabled: true,
            ui: CategoryLevel::default(),
            plant: CategoryLevel::default(),
            achievement: CategoryLevel::default(),
            music: CategoryLevel::new(DEFAULT_MUSIC_VOLUME, true),
            sound_effects: CategoryLevel::default(),
            variations_enabled: true,
            debug_mode: false,
            music_autoplay: false,
        }
    }
}

impl MixerSettings {
    /// Settings of one category.
    pub fn category(&self, category: SoundCategory) -> &CategoryLevel {
        match category {
            SoundCategory::Ui => &self.ui,
            SoundCategory::Plant => &self.plant,
            SoundCategory::Achievement => &self.achievement,
            SoundCategory::Music => &self.music,
        }
    }

    /// Mutable settings of one category.
    pub fn category_mut(&mut self, category: SoundCategory) -> &mut CategoryLevel {
        match category {
            SoundCategory::Ui => &mut self.ui,
            SoundCategory::Plant => &mut self.plant,
            SoundCategory::Achievement => &mut self.achievement,
            SoundCategory::Music => &mut self.music,
        }
    }

    /// Gain a sound of `category` with definition volume `volume` plays at.
    ///
    /// `master × category × volume`, clamped to `[0, 1]` after each product.
    /// A disabled category, the global switch, or the effects group switch
    /// (for non-music categories) being off gives 0.
    pub fn effective_gain(&self, category: SoundCategory, volume: f64) -> f64 {
        if !self.audio_enabled {
            return 0.0;
        }
        if category != SoundCategory::Music && !self.sound_effects.enabled {
            return 0.0;
        }
        let gain = clamp_unit(self.master_volume * self.category(category).gain());
        clamp_unit(gain * volume)
    }

    /// Gain of the music loop: music volume × master.
    pub fn music_gain(&self) -> f64 {
        clamp_unit(self.music.volume * self.master_volume)
    }

    /// Stored volume of the effects group.
    pub fn sound_effects_volume(&self) -> f64 {
        self.sound_effects.volume
    }

    /// Stored flag of the effects group.
    pub fn sound_effects_enabled(&self) -> bool {
        self.sound_effects.enabled
    }
}

/// Clamps to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
