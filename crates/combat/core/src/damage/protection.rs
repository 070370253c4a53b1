//! Total-immunity checks that run before armor.
//!
//! [`evaluate_protection`] is a pure function of its query so the ordering of
//! the checks can be tested without a world.

use crate::env::ProtectionCue;

/// Everything the evaluator looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtectionQuery {
    pub has_client: bool,
    /// Warmup, intermission or a paused match.
    pub combat_disabled: bool,
    /// The mode never lets players hurt each other.
    pub mode_no_damage: bool,
    pub no_protection: bool,
    /// Self-inflicted hit while the rules turn self damage off.
    pub self_damage_disabled: bool,
    pub battle_suit: bool,
    pub radius: bool,
    pub god_mode: bool,
    pub invincible: bool,
    pub pain_debounce_expired: bool,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ProtectionReason {
    CombatDisabled,
    NoDamageMode,
    SelfDamageDisabled,
    BattleSuit,
    GodMode,
    Invincible,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtectionVerdict {
    pub prevented: bool,
    pub reason: Option<ProtectionReason>,
    pub cue: Option<ProtectionCue>,
    /// The target should not play another protection sound for a while.
    pub reset_pain_debounce: bool,
}

impl ProtectionVerdict {
    const ALLOWED: Self = Self {
        prevented: false,
        reason: None,
        cue: None,
        reset_pain_debounce: false,
    };

    fn prevented(reason: ProtectionReason) -> Self {
        Self {
            prevented: true,
            reason: Some(reason),
            ..Self::ALLOWED
        }
    }

    fn with_cue(mut self, cue: ProtectionCue) -> Self {
        self.cue = Some(cue);
        self
    }
}

pub fn evaluate_protection(query: &ProtectionQuery) -> ProtectionVerdict {
    use ProtectionReason::*;

    if query.has_client && query.combat_disabled {
        return ProtectionVerdict::prevented(CombatDisabled);
    }
    if query.has_client && query.mode_no_damage {
        return ProtectionVerdict::prevented(NoDamageMode);
    }
    if query.no_protection {
        return ProtectionVerdict::ALLOWED;
    }
    if query.self_damage_disabled {
        return ProtectionVerdict::prevented(SelfDamageDisabled);
    }
    if query.battle_suit && query.radius {
        return ProtectionVerdict::prevented(BattleSuit).with_cue(ProtectionCue::BattleSuit);
    }
    if query.god_mode {
        return ProtectionVerdict::prevented(GodMode);
    }
    if query.invincible {
        let mut verdict = ProtectionVerdict::prevented(Invincible);
        if query.pain_debounce_expired {
            verdict = verdict.with_cue(ProtectionCue::Invulnerable);
            verdict.reset_pain_debounce = true;
        }
        return verdict;
    }

    ProtectionVerdict::ALLOWED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprotected_target_takes_damage() {
        let verdict = evaluate_protection(&ProtectionQuery::default());
        assert!(!verdict.prevented);
        assert_eq!(verdict.cue, None);
    }

    #[test]
    fn no_protection_bypasses_god_mode_but_not_disabled_combat() {
        let bypass = ProtectionQuery {
            god_mode: true,
            invincible: true,
            no_protection: true,
            ..ProtectionQuery::default()
        };
        assert!(!evaluate_protection(&bypass).prevented);

        let warmup = ProtectionQuery {
            has_client: true,
            combat_disabled: true,
            ..bypass
        };
        assert_eq!(
            evaluate_protection(&warmup).reason,
            Some(ProtectionReason::CombatDisabled)
        );
    }

    #[test]
    fn combat_disabled_only_protects_clients() {
        let query = ProtectionQuery {
            combat_disabled: true,
            ..ProtectionQuery::default()
        };
        assert!(!evaluate_protection(&query).prevented);
    }

    #[test]
    fn battle_suit_blocks_splash_with_cue() {
        let splash = ProtectionQuery {
            battle_suit: true,
            radius: true,
            ..ProtectionQuery::default()
        };
        let verdict = evaluate_protection(&splash);
        assert_eq!(verdict.reason, Some(ProtectionReason::BattleSuit));
        assert_eq!(verdict.cue, Some(ProtectionCue::BattleSuit));

        let direct = ProtectionQuery {
            radius: false,
            ..splash
        };
        assert!(!evaluate_protection(&direct).prevented);
    }

    #[test]
    fn invulnerable_cue_waits_for_pain_debounce() {
        let query = ProtectionQuery {
            invincible: true,
            ..ProtectionQuery::default()
        };
        let quiet = evaluate_protection(&query);
        assert!(quiet.prevented);
        assert_eq!(quiet.cue, None);
        assert!(!quiet.reset_pain_debounce);

        let loud = evaluate_protection(&ProtectionQuery {
            pain_debounce_expired: true,
            ..query
        });
        assert_eq!(loud.cue, Some(ProtectionCue::Invulnerable));
        assert!(loud.reset_pain_debounce);
    }

    #[test]
    fn self_damage_rule_precedes_god_mode() {
        let query = ProtectionQuery {
            self_damage_disabled: true,
            god_mode: true,
            ..ProtectionQuery::default()
        };
        assert_eq!(
            evaluate_protection(&query).reason,
            Some(ProtectionReason::SelfDamageDisabled)
        );
    }
}
