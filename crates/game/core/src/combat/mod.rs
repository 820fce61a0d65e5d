//! Combat resolution system.
//!
//! Pure predicates and result types. Damage itself is applied by
//! [`Entity::attack_for`](crate::entity::Entity::attack_for); this module
//! decides whether an attack may be attempted and describes how it went.
//!
//! # Core Functions
//!
//! - `effective_attack_range`: per-actor range, or the global melee fallback
//! - `is_in_attack_range`: Manhattan distance against that range
//! - `mitigated_damage`: incoming damage after the defender's defense

pub mod damage;
pub mod range;
pub mod result;

pub use damage::mitigated_damage;
pub use range::{DEFAULT_MELEE_RANGE, effective_attack_range, is_in_attack_range};
pub use result::{AttackEffect, AttackOutcome, EffectSource};
