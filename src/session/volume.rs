//! Volume with logarithmic scaling.
//!
//! Levels are 0-100 and map to -60 dB..0 dB so the dial tracks perceived
//! loudness. The dial is clamped to a floor level; only the mute switch
//! can take the output to true silence.

#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100).
    level: u8,
    /// Lowest level the dial may reach.
    floor: u8,
    /// Mute state (preserves the level).
    muted: bool,
    /// Cached linear gain multiplier.
    linear_gain: f32,
}

impl Volume {
    pub fn new(level: u8, floor: u8) -> Self {
        let floor = floor.min(100);
        let level = level.clamp(floor, 100);
        Self {
            level,
            floor,
            muted: false,
            linear_gain: Self::linear_gain_for(level),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Move the level by `detents * step`, clamped to `floor..=100`.
    pub fn nudge(&mut self, detents: i32, step: u8) {
        let delta = detents.saturating_mul(step as i32);
        let level = (self.level as i32 + delta).clamp(self.floor as i32, 100) as u8;
        self.level = level;
        self.linear_gain = Self::linear_gain_for(level);
    }

    /// Toggle the mute switch; returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Linear gain multiplier: 0.0 when muted, otherwise the dB mapping.
    pub fn gain(&self) -> f32 {
        if self.muted { 0.0 } else { self.linear_gain }
    }

    /// level% -> gain = 10^((level - 100) * 0.6 / 20), i.e. 100% is unity
    /// and each level down loses 0.6 dB. Level 0 is hard silence.
    fn linear_gain_for(level: u8) -> f32 {
        if level == 0 {
            return 0.0;
        }
        let db = (level as f32 - 100.0) * 0.6;
        10f32.powf(db / 20.0)
    }
}
