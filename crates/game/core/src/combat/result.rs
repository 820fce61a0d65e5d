//! Combat result types.

use crate::grid::Position;
use crate::monster::MonsterKind;

/// Result of one warrior attack attempt.
///
/// `crit` is decided outside the rules and forwarded untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub success: bool,
    pub damage: u32,
    pub crit: bool,
}

impl AttackOutcome {
    pub const FAILED: Self = Self {
        success: false,
        damage: 0,
        crit: false,
    };

    pub const fn landed(damage: u32, crit: bool) -> Self {
        Self {
            success: true,
            damage,
            crit,
        }
    }
}

/// Who struck the blow an [`AttackEffect`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSource {
    Warrior,
    Monster(MonsterKind),
}

/// Anchor for an optional hit effect: the struck tile, its pixel centre, and
/// the crit flag. Monster hits never crit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEffect {
    pub source: EffectSource,
    pub target: Position,
    pub screen_center: (i32, i32),
    pub damage: u32,
    pub crit: bool,
}
