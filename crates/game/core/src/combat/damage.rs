//! Damage mitigation.

/// Damage left after a flat defense reduction.
///
/// ```text
/// mitigated = max(1, damage - defense)   when damage > 0
/// ```
///
/// Armor never turns a landed hit into a miss.
pub fn mitigated_damage(damage: u32, defense: u32) -> u32 {
    if damage == 0 {
        return 0;
    }
    damage.saturating_sub(defense).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_subtracts_with_a_floor_of_one() {
        assert_eq!(mitigated_damage(12, 0), 12);
        assert_eq!(mitigated_damage(12, 5), 7);
        assert_eq!(mitigated_damage(12, 40), 1);
        assert_eq!(mitigated_damage(0, 5), 0);
    }
}
