use crate::config::{GameMode, MatchRules};
use crate::state::{Combatant, GameTime, TimedEffectKind};

/// Decides whether two combatants fight on the same side.
pub trait TeamOracle {
    fn same_team(&self, a: &Combatant, b: &Combatant, now: GameTime) -> bool;
}

/// Team rules derived from the match mode.
///
/// Only players have teammates. With quad hog enabled, whoever carries quad
/// damage is everybody's enemy. Cooperative play makes all players allies;
/// team modes compare red/blue affiliation.
#[derive(Clone, Copy, Debug)]
pub struct ModeTeams {
    mode: GameMode,
    quad_hog: bool,
}

impl ModeTeams {
    pub fn new(rules: &MatchRules) -> Self {
        Self {
            mode: rules.mode,
            quad_hog: rules.quad_hog,
        }
    }
}

impl TeamOracle for ModeTeams {
    fn same_team(&self, a: &Combatant, b: &Combatant, now: GameTime) -> bool {
        if !a.is_player() || !b.is_player() {
            return false;
        }
        if self.quad_hog
            && (a.effects.has(TimedEffectKind::QuadDamage, now)
                || b.effects.has(TimedEffectKind::QuadDamage, now))
        {
            return false;
        }
        if self.mode == GameMode::Cooperative {
            return true;
        }
        self.mode.is_team_mode() && a.team.is_side() && a.team == b.team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use crate::state::{EntityId, Team};

    fn rules(mode: GameMode) -> MatchRules {
        MatchRules::new(mode, Ruleset::Quake2)
    }

    #[test]
    fn cooperative_players_are_allies() {
        let teams = ModeTeams::new(&rules(GameMode::Cooperative));
        let a = Combatant::player(EntityId(1));
        let b = Combatant::player(EntityId(2));
        assert!(teams.same_team(&a, &b, GameTime::ZERO));
        assert!(!teams.same_team(&a, &Combatant::monster(EntityId(3)), GameTime::ZERO));
    }

    #[test]
    fn team_modes_compare_sides() {
        let teams = ModeTeams::new(&rules(GameMode::TeamDeathmatch));
        let red = Combatant::player(EntityId(1)).with_team(Team::Red);
        let red2 = Combatant::player(EntityId(2)).with_team(Team::Red);
        let blue = Combatant::player(EntityId(3)).with_team(Team::Blue);
        assert!(teams.same_team(&red, &red2, GameTime::ZERO));
        assert!(!teams.same_team(&red, &blue, GameTime::ZERO));
    }

    #[test]
    fn free_for_all_has_no_teammates() {
        let teams = ModeTeams::new(&rules(GameMode::FreeForAll));
        let a = Combatant::player(EntityId(1)).with_team(Team::Red);
        let b = Combatant::player(EntityId(2)).with_team(Team::Red);
        assert!(!teams.same_team(&a, &b, GameTime::ZERO));
    }

    #[test]
    fn quad_hog_holder_is_nobodys_teammate() {
        let mut match_rules = rules(GameMode::Cooperative);
        match_rules.quad_hog = true;
        let teams = ModeTeams::new(&match_rules);
        let hog = Combatant::player(EntityId(1))
            .with_effect(TimedEffectKind::QuadDamage, GameTime(30_000));
        let other = Combatant::player(EntityId(2));
        assert!(!teams.same_team(&other, &hog, GameTime(100)));
        assert!(teams.same_team(&other, &hog, GameTime(30_000)));
    }
}
