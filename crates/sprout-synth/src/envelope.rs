//! Gain envelopes.
//!
//! A [`GainCurve`] is a list of ramps starting from silence at time zero,
//! evaluated like an automation lane: each ramp runs from the previous
//! point's value to its own target. Exponential ramps are undefined at zero,
//! so their endpoints are held at or above [`DECAY_FLOOR`] and every recipe
//! ends its curve on the floor rather than on silence.

/// Smallest gain an exponential ramp may start from or end on.
pub const DECAY_FLOOR: f64 = 0.001;

/// Ramp shape between two curve points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    Exponential,
}

/// One point on a gain curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainPoint {
    /// Time in seconds from the start of the voice.
    pub time: f64,
    /// Gain reached at `time`.
    pub value: f64,
    /// How the curve gets here from the previous point.
    pub ramp: Ramp,
}

/// Piecewise gain automation for one voice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GainCurve {
    points: Vec<GainPoint>,
}

impl GainCurve {
    /// Creates a curve that sits at zero.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Ramps linearly to `value` at `time`.
    pub fn linear_to(mut self, value: f64, time: f64) -> Self {
        self.push(value.max(0.0), time, Ramp::Linear);
        self
    }

    /// Ramps exponentially to `value` at `time`; `value` is raised to the floor.
    pub fn exponential_to(mut self, value: f64, time: f64) -> Self {
        self.push(value.max(DECAY_FLOOR), time, Ramp::Exponential);
        self
    }

    /// Ramps exponentially down to [`DECAY_FLOOR`] at `time`.
    pub fn decay_to_floor(self, time: f64) -> Self {
        self.exponential_to(DECAY_FLOOR, time)
    }

    fn push(&mut self, value: f64, time: f64, ramp: Ramp) {
        // Points must not go back in time
        let time = self.end_time().max(time);
        self.points.push(GainPoint { time, value, ramp });
    }

    /// The curve's points in time order.
    pub fn points(&self) -> &[GainPoint] {
        &self.points
    }

    /// Time of the last point.
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    /// Highest gain anywhere on the curve.
    pub fn peak(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    /// Gain the curve settles on after its last point.
    pub fn terminal_value(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.value)
    }

    /// Evaluates the curve at `t` seconds.
    pub fn value_at(&self, t: f64) -> f64 {
        let mut prev_time = 0.0;
        let mut prev_value = 0.0;

        for point in &self.points {
            if t < point.time {
                let span = point.time - prev_time;
                let progress = if span > 0.0 {
                    ((t - prev_time) / span).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                return match point.ramp {
                    Ramp::Linear => prev_value + (point.value - prev_value) * progress,
                    Ramp::Exponential => {
                        let from = prev_value.max(DECAY_FLOOR);
                        let to = point.value.max(DECAY_FLOOR);
                        from * (to / from).powf(progress)
                    }
                };
            }
            prev_time = point.time;
            prev_value = point.value;
        }

        prev_value
    }
}

/// Attack-then-decay envelope: linear rise to `peak`, exponential fall to `floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Gain reached at the end of the attack.
    pub peak: f64,
    /// Gain the decay ends on.
    pub floor: f64,
}

impl Envelope {
    /// Creates an envelope decaying to [`DECAY_FLOOR`].
    pub fn new(attack: f64, peak: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            peak: peak.max(0.0),
            floor: DECAY_FLOOR,
        }
    }

    /// Builds the curve, reaching the floor at `decay_end` seconds.
    pub fn curve(&self, decay_end: f64) -> GainCurve {
        GainCurve::new()
            .linear_to(self.peak, self.attack)
            .exponential_to(self.floor, decay_end.max(self.attack))
    }

    /// Builds a curve that eases from `peak` to `sustain` at `hold_end`
    /// before decaying to the floor at `decay_end`.
    pub fn curve_with_hold(&self, sustain: f64, hold_end: f64, decay_end: f64) -> GainCurve {
        GainCurve::new()
            .linear_to(self.peak, self.attack)
            .linear_to(sustain, hold_end.max(self.attack))
            .exponential_to(self.floor, decay_end.max(hold_end))
    }
}
