//! Multi-sound sequences and delayed actions.
//!
//! A [`Sequence`] is a list of sounds at offsets from the moment it is
//! scheduled. The [`Scheduler`] holds pending actions against the engine
//! clock, which the host moves forward; nothing here waits for audio to
//! finish or promises sample accuracy.

use std::time::Duration;

use serde::Serialize;

use sprout_spec::SoundId;

/// Stage from which a growth sequence ends with `plant_stage_up`.
pub const STAGE_UP_MIN_STAGE: u32 = 3;

/// XP amount above which an XP sequence adds `streak_milestone`.
pub const STREAK_XP_THRESHOLD: u32 = 50;

/// One sound in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cue {
    /// Offset from the start of the sequence.
    pub at: Duration,
    pub sound: SoundId,
}

impl Cue {
    pub fn new(at_ms: u64, sound: SoundId) -> Self {
        Self {
            at: Duration::from_millis(at_ms),
            sound,
        }
    }
}

/// Sounds at fixed offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sequence {
    cues: Vec<Cue>,
}

impl Sequence {
    /// Builds a sequence; cues are kept in offset order.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|c| c.at);
        Self { cues }
    }

    /// Water, grow, and XP, plus a stage-up flourish from stage 3.
    pub fn growth(stage: Option<u32>) -> Self {
        let mut cues = vec![
            Cue::new(0, SoundId::PlantWater),
            Cue::new(500, SoundId::PlantGrow),
            Cue::new(1000, SoundId::XpGain),
        ];
        if stage.is_some_and(|s| s >= STAGE_UP_MIN_STAGE) {
            cues.push(Cue::new(1200, SoundId::PlantStageUp));
        }
        Self::new(cues)
    }

    /// XP sparkle, plus a streak fanfare for large amounts.
    pub fn xp_gain(amount: u32) -> Self {
        let mut cues = vec![Cue::new(0, SoundId::XpGain)];
        if amount > STREAK_XP_THRESHOLD {
            cues.push(Cue::new(200, SoundId::StreakMilestone));
        }
        Self::new(cues)
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Work the scheduler can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(SoundId),
    StartMusic,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    order: u64,
    action: Action,
}

/// Pending actions keyed by engine time.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_order: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` to run at engine time `due`.
    pub fn schedule(&mut self, due: Duration, action: Action) {
        self.pending.push(Pending {
            due,
            order: self.next_order,
            action,
        });
        self.next_order += 1;
    }

    /// Queues every cue of `sequence` with a non-zero offset, relative to
    /// `now`. Cues at offset zero are left for the caller to play.
    pub fn schedule_sequence(&mut self, now: Duration, sequence: &Sequence) {
        for cue in sequence.cues().iter().filter(|c| !c.at.is_zero()) {
            self.schedule(now + cue.at, Action::Play(cue.sound));
        }
    }

    /// Earliest due time no later than `until`.
    pub fn next_due(&self, until: Duration) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due)
            .filter(|&due| due <= until)
            .min()
    }

    /// Removes and returns every action due at or before `now`, earliest
    /// first and in scheduling order for ties.
    pub fn take_due(&mut self, now: Duration) -> Vec<Action> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.order));
        due.into_iter().map(|p| p.action).collect()
    }

    /// Drops every pending action of one kind.
    pub fn cancel(&mut self, action: Action) {
        self.pending.retain(|p| p.action != action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
