//! Experience points and level thresholds.

/// Cumulative XP needed to reach each level, indexed by `level - 1`.
pub const XP_REQUIREMENTS: [u32; 5] = [0, 100, 250, 500, 1000];
pub const MAX_LEVEL: u32 = XP_REQUIREMENTS.len() as u32;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experience {
    pub xp: u32,
    pub level: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
        }
    }
}

impl Experience {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds XP and applies every level threshold crossed. Returns whether at
    /// least one level was gained. XP stops accruing at the level cap.
    pub fn add_xp(&mut self, amount: u32) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }
        self.xp = self.xp.saturating_add(amount);

        let mut leveled_up = false;
        while let Some(needed) = self.xp_for_next_level() {
            if self.xp < needed {
                break;
            }
            self.level += 1;
            leveled_up = true;
        }
        leveled_up
    }

    /// Cumulative XP for the next level, `None` at the cap.
    pub fn xp_for_next_level(&self) -> Option<u32> {
        XP_REQUIREMENTS.get(self.level as usize).copied()
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }
}
