//! Sound identifiers, categories, and the short semantic kinds used by the facade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Mixer category a sound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    /// Interface feedback (clicks, modals, tabs).
    Ui,
    /// Plant actions (water, grow, harvest).
    Plant,
    /// Task, XP, and achievement rewards.
    Achievement,
    /// The looping background track.
    Music,
}

impl SoundCategory {
    /// All categories in mixer order.
    pub const ALL: [SoundCategory; 4] = [
        SoundCategory::Ui,
        SoundCategory::Plant,
        SoundCategory::Achievement,
        SoundCategory::Music,
    ];

    /// The three categories that hold one-shot effects.
    pub const EFFECTS: [SoundCategory; 3] = [
        SoundCategory::Ui,
        SoundCategory::Plant,
        SoundCategory::Achievement,
    ];

    /// Returns the snake_case name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCategory::Ui => "ui",
            SoundCategory::Plant => "plant",
            SoundCategory::Achievement => "achievement",
            SoundCategory::Music => "music",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundCategory {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SpecError::UnknownKind {
                category: "category",
                kind: s.to_string(),
            })
    }
}

/// Identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    UiClick,
    UiButton,
    UiHover,
    UiModalOpen,
    UiModalClose,
    UiTabSwitch,
    UiDropdownOpen,
    UiDropdownClose,
    UiZoomIn,
    UiZoomOut,
    UiSuccess,
    UiError,
    UiNotification,
    PlantClick,
    PlantWater,
    PlantGrow,
    PlantStageUp,
    PlantHarvest,
    PlantWilt,
    PlantCreate,
    TaskComplete,
    TaskCreate,
    TaskDelete,
    XpGain,
    Achievement,
    LevelUp,
    StreakMilestone,
    BackgroundMusic,
}

impl SoundId {
    /// Every sound id, one-shots first, music last.
    pub const ALL: [SoundId; 28] = [
        SoundId::UiClick,
        SoundId::UiButton,
        SoundId::UiHover,
        SoundId::UiModalOpen,
        SoundId::UiModalClose,
        SoundId::UiTabSwitch,
        SoundId::UiDropdownOpen,
        SoundId::UiDropdownClose,
        SoundId::UiZoomIn,
        SoundId::UiZoomOut,
        SoundId::UiSuccess,
        SoundId::UiError,
        SoundId::UiNotification,
        SoundId::PlantClick,
        SoundId::PlantWater,
        SoundId::PlantGrow,
        SoundId::PlantStageUp,
        SoundId::PlantHarvest,
        SoundId::PlantWilt,
        SoundId::PlantCreate,
        SoundId::TaskComplete,
        SoundId::TaskCreate,
        SoundId::TaskDelete,
        SoundId::XpGain,
        SoundId::Achievement,
        SoundId::LevelUp,
        SoundId::StreakMilestone,
        SoundId::BackgroundMusic,
    ];

    /// Returns the stable snake_case name of this id.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::UiClick => "ui_click",
            SoundId::UiButton => "ui_button",
            SoundId::UiHover => "ui_hover",
            SoundId::UiModalOpen => "ui_modal_open",
            SoundId::UiModalClose => "ui_modal_close",
            SoundId::UiTabSwitch => "ui_tab_switch",
            SoundId::UiDropdownOpen => "ui_dropdown_open",
            SoundId::UiDropdownClose => "ui_dropdown_close",
            SoundId::UiZoomIn => "ui_zoom_in",
            SoundId::UiZoomOut => "ui_zoom_out",
            SoundId::UiSuccess => "ui_success",
            SoundId::UiError => "ui_error",
            SoundId::UiNotification => "ui_notification",
            SoundId::PlantClick => "plant_click",
            SoundId::PlantWater => "plant_water",
            SoundId::PlantGrow => "plant_grow",
            SoundId::PlantStageUp => "plant_stage_up",
            SoundId::PlantHarvest => "plant_harvest",
            SoundId::PlantWilt => "plant_wilt",
            SoundId::PlantCreate => "plant_create",
            SoundId::TaskComplete => "task_complete",
            SoundId::TaskCreate => "task_create",
            SoundId::TaskDelete => "task_delete",
            SoundId::XpGain => "xp_gain",
            SoundId::Achievement => "achievement",
            SoundId::LevelUp => "level_up",
            SoundId::StreakMilestone => "streak_milestone",
            SoundId::BackgroundMusic => "background_music",
        }
    }

    /// Returns the mixer category this sound is routed through.
    pub fn category(&self) -> SoundCategory {
        match self {
            SoundId::UiClick
            | SoundId::UiButton
            | SoundId::UiHover
            | SoundId::UiModalOpen
            | SoundId::UiModalClose
            | SoundId::UiTabSwitch
            | SoundId::UiDropdownOpen
            | SoundId::UiDropdownClose
            | SoundId::UiZoomIn
            | SoundId::UiZoomOut
            | SoundId::UiSuccess
            | SoundId::UiError
            | SoundId::UiNotification => SoundCategory::Ui,
            SoundId::PlantClick
            | SoundId::PlantWater
            | SoundId::PlantGrow
            | SoundId::PlantStageUp
            | SoundId::PlantHarvest
            | SoundId::PlantWilt
            | SoundId::PlantCreate => SoundCategory::Plant,
            SoundId::TaskComplete
            | SoundId::TaskCreate
            | SoundId::TaskDelete
            | SoundId::XpGain
            | SoundId::Achievement
            | SoundId::LevelUp
            | SoundId::StreakMilestone => SoundCategory::Achievement,
            SoundId::BackgroundMusic => SoundCategory::Music,
        }
    }

    /// Returns true for synthesized one-shot effects.
    pub fn is_one_shot(&self) -> bool {
        !matches!(self, SoundId::BackgroundMusic)
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundId {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SpecError::UnknownSoundId(s.to_string()))
    }
}

/// Interface sounds addressable through `play_ui`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiKind {
    Click,
    Button,
    Hover,
    ModalOpen,
    ModalClose,
    TabSwitch,
    DropdownOpen,
    DropdownClose,
    ZoomIn,
    ZoomOut,
    Success,
    Error,
    Notification,
}

impl UiKind {
    /// Every UI kind.
    pub const ALL: [UiKind; 13] = [
        UiKind::Click,
        UiKind::Button,
        UiKind::Hover,
        UiKind::ModalOpen,
        UiKind::ModalClose,
        UiKind::TabSwitch,
        UiKind::DropdownOpen,
        UiKind::DropdownClose,
        UiKind::ZoomIn,
        UiKind::ZoomOut,
        UiKind::Success,
        UiKind::Error,
        UiKind::Notification,
    ];

    /// Maps the kind to its catalog id.
    pub fn sound_id(&self) -> SoundId {
        match self {
            UiKind::Click => SoundId::UiClick,
            UiKind::Button => SoundId::UiButton,
            UiKind::Hover => SoundId::UiHover,
            UiKind::ModalOpen => SoundId::UiModalOpen,
            UiKind::ModalClose => SoundId::UiModalClose,
            UiKind::TabSwitch => SoundId::UiTabSwitch,
            UiKind::DropdownOpen => SoundId::UiDropdownOpen,
            UiKind::DropdownClose => SoundId::UiDropdownClose,
            UiKind::ZoomIn => SoundId::UiZoomIn,
            UiKind::ZoomOut => SoundId::UiZoomOut,
            UiKind::Success => SoundId::UiSuccess,
            UiKind::Error => SoundId::UiError,
            UiKind::Notification => SoundId::UiNotification,
        }
    }
}

impl FromStr for UiKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiKind::ALL
            .into_iter()
            .find(|k| k.sound_id().as_str().strip_prefix("ui_") == Some(s))
            .ok_or_else(|| SpecError::UnknownKind {
                category: "ui",
                kind: s.to_string(),
            })
    }
}

/// Plant action sounds addressable through `play_plant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    Click,
    Water,
    Grow,
    StageUp,
    Harvest,
    Wilt,
    Create,
}

impl PlantKind {
    /// Every plant kind.
    pub const ALL: [PlantKind; 7] = [
        PlantKind::Click,
        PlantKind::Water,
        PlantKind::Grow,
        PlantKind::StageUp,
        PlantKind::Harvest,
        PlantKind::Wilt,
        PlantKind::Create,
    ];

    /// Maps the kind to its catalog id.
    pub fn sound_id(&self) -> SoundId {
        match self {
            PlantKind::Click => SoundId::PlantClick,
            PlantKind::Water => SoundId::PlantWater,
            PlantKind::Grow => SoundId::PlantGrow,
            PlantKind::StageUp => SoundId::PlantStageUp,
            PlantKind::Harvest => SoundId::PlantHarvest,
            PlantKind::Wilt => SoundId::PlantWilt,
            PlantKind::Create => SoundId::PlantCreate,
        }
    }
}

impl FromStr for PlantKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlantKind::ALL
            .into_iter()
            .find(|k| k.sound_id().as_str().strip_prefix("plant_") == Some(s))
            .ok_or_else(|| SpecError::UnknownKind {
                category: "plant",
                kind: s.to_string(),
            })
    }
}

/// Reward sounds addressable through `play_achievement`.
///
/// Achievement ids carry no prefix, so the kind name equals the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    TaskComplete,
    TaskCreate,
    TaskDelete,
    XpGain,
    Achievement,
    LevelUp,
    StreakMilestone,
}

impl AchievementKind {
    /// Every achievement kind.
    pub const ALL: [AchievementKind; 7] = [
        AchievementKind::TaskComplete,
        AchievementKind::TaskCreate,
        AchievementKind::TaskDelete,
        AchievementKind::XpGain,
        AchievementKind::Achievement,
        AchievementKind::LevelUp,
        AchievementKind::StreakMilestone,
    ];

    /// Maps the kind to its catalog id.
    pub fn sound_id(&self) -> SoundId {
        match self {
            AchievementKind::TaskComplete => SoundId::TaskComplete,
            AchievementKind::TaskCreate => SoundId::TaskCreate,
            AchievementKind::TaskDelete => SoundId::TaskDelete,
            AchievementKind::XpGain => SoundId::XpGain,
            AchievementKind::Achievement => SoundId::Achievement,
            AchievementKind::LevelUp => SoundId::LevelUp,
            AchievementKind::StreakMilestone => SoundId::StreakMilestone,
        }
    }
}

impl FromStr for AchievementKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AchievementKind::ALL
            .into_iter()
            .find(|k| k.sound_id().as_str() == s)
            .ok_or_else(|| SpecError::UnknownKind {
                category: "achievement",
                kind: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_id_round_trips_through_str() {
        for id in SoundId::ALL {
            assert_eq!(id.as_str().parse::<SoundId>().unwrap(), id);
        }
    }

    #[test]
    fn test_sound_id_serde_matches_as_str() {
        for id in SoundId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_unknown_sound_id() {
        let err = "ui_boing".parse::<SoundId>().unwrap_err();
        assert!(matches!(err, SpecError::UnknownSoundId(_)));
    }

    #[test]
    fn test_categories_follow_prefixes() {
        assert_eq!(SoundId::UiZoomOut.category(), SoundCategory::Ui);
        assert_eq!(SoundId::PlantWilt.category(), SoundCategory::Plant);
        assert_eq!(SoundId::StreakMilestone.category(), SoundCategory::Achievement);
        assert_eq!(SoundId::BackgroundMusic.category(), SoundCategory::Music);
        assert!(!SoundId::BackgroundMusic.is_one_shot());
    }

    #[test]
    fn test_kinds_map_into_their_category() {
        for kind in UiKind::ALL {
            assert_eq!(kind.sound_id().category(), SoundCategory::Ui);
        }
        for kind in PlantKind::ALL {
            assert_eq!(kind.sound_id().category(), SoundCategory::Plant);
        }
        for kind in AchievementKind::ALL {
            assert_eq!(kind.sound_id().category(), SoundCategory::Achievement);
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("modal_open".parse::<UiKind>().unwrap(), UiKind::ModalOpen);
        assert_eq!("stage_up".parse::<PlantKind>().unwrap(), PlantKind::StageUp);
        assert_eq!(
            "xp_gain".parse::<AchievementKind>().unwrap(),
            AchievementKind::XpGain
        );
        assert!("water".parse::<UiKind>().is_err());
        assert_eq!("plant".parse::<SoundCategory>().unwrap(), SoundCategory::Plant);
    }
}
