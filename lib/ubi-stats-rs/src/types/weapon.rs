use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
    },
    decoder::DecodeOptions,
    types::{
        PerGameMode,
        StatsWindow,
        TeamRole,
    },
    wire::{
        WeaponBlock,
        WeaponSection,
        WeaponSlotsBlock,
        WeaponTypesBlock,
    },
    StatsResult,
};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Per weapon stats, per game mode and team role.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeaponStats {
    /// The date range covered, if the response states it
    pub window: Option<StatsWindow>,

    pub game_modes: PerGameMode<WeaponTeamRoles>,
}

/// The weapon slots of each team role in a game mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeaponTeamRoles {
    pub all: Option<WeaponSlots>,
    pub attack: Option<WeaponSlots>,
    pub defence: Option<WeaponSlots>,
}

impl WeaponTeamRoles {
    /// Get the weapon slots of a team role
    pub fn get(&self, team_role: TeamRole) -> Option<&WeaponSlots> {
        match team_role {
            TeamRole::All => self.all.as_ref(),
            TeamRole::Attacker => self.attack.as_ref(),
            TeamRole::Defender => self.defence.as_ref(),
        }
    }
}

/// Primary and secondary weapons. A slot missing from the response is `None`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeaponSlots {
    pub primary_weapons: Option<WeaponTypes>,
    pub secondary_weapons: Option<WeaponTypes>,
}

/// Weapon groups keyed by weapon type name, in wire order.
pub type WeaponTypes = IndexMap<String, WeaponGroup>;

/// The weapons of a weapon type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum WeaponGroup {
    /// Weapon names were unique, so weapons are keyed by name
    Unique(IndexMap<String, WeaponNamedStats>),

    /// Weapon names repeat, so weapons are kept in wire order
    Listed(Vec<WeaponNamedStats>),
}

impl WeaponGroup {
    fn from_weapons(weapons: Vec<WeaponNamedStats>) -> Self {
        let unique = {
            let mut seen = HashSet::with_capacity(weapons.len());
            weapons.iter().all(|weapon| seen.insert(weapon.name.as_str()))
        };

        if unique {
            Self::Unique(
                weapons
                    .into_iter()
                    .map(|weapon| (weapon.name.clone(), weapon))
                    .collect(),
            )
        } else {
            tracing::debug!("weapon names repeat within a weapon type, keeping a list");
            Self::Listed(weapons)
        }
    }

    /// Get the first weapon with the given name
    pub fn get(&self, name: &str) -> Option<&WeaponNamedStats> {
        match self {
            Self::Unique(weapons) => weapons.get(name),
            Self::Listed(weapons) => weapons.iter().find(|weapon| weapon.name == name),
        }
    }

    /// Iterate over the weapons, in wire order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &WeaponNamedStats> + '_> {
        match self {
            Self::Unique(weapons) => Box::new(weapons.values()),
            Self::Listed(weapons) => Box::new(weapons.iter()),
        }
    }

    /// The number of weapons
    pub fn len(&self) -> usize {
        match self {
            Self::Unique(weapons) => weapons.len(),
            Self::Listed(weapons) => weapons.len(),
        }
    }

    /// Whether there are no weapons
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether weapons are keyed by name
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique(_))
    }
}

/// The stats of one weapon.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct WeaponNamedStats {
    pub name: String,
    pub headshots: u64,
    pub kills: u64,
    pub rounds_played: u64,
    pub rounds_won: u64,
    pub rounds_lost: u64,
    pub rounds_with_kill: f64,
    pub rounds_with_multikill: f64,
    pub headshot_accuracy: f64,
}

impl From<WeaponBlock> for WeaponNamedStats {
    fn from(block: WeaponBlock) -> Self {
        Self {
            name: block.weapon_name,
            headshots: block.headshots,
            kills: block.kills,
            rounds_played: block.rounds_played,
            rounds_won: block.rounds_won,
            rounds_lost: block.rounds_lost,
            rounds_with_kill: block.rounds_with_kill,
            rounds_with_multikill: block.rounds_with_multikill,
            headshot_accuracy: block.headshot_accuracy,
        }
    }
}

/// Group the weapon types of a slot.
///
/// A weapon type listed twice has its weapons merged in wire order.
fn weapon_types(block: WeaponTypesBlock) -> WeaponTypes {
    let mut grouped: IndexMap<String, Vec<WeaponNamedStats>> = IndexMap::new();
    for weapon_type in block.weapon_types {
        grouped
            .entry(weapon_type.weapon_type)
            .or_default()
            .extend(weapon_type.weapons.into_iter().map(WeaponNamedStats::from));
    }

    grouped
        .into_iter()
        .map(|(name, weapons)| (name, WeaponGroup::from_weapons(weapons)))
        .collect()
}

impl From<WeaponSlotsBlock> for WeaponSlots {
    fn from(block: WeaponSlotsBlock) -> Self {
        Self {
            primary_weapons: block.primary.map(weapon_types),
            secondary_weapons: block.secondary.map(weapon_types),
        }
    }
}

impl Aggregation for WeaponStats {
    const KIND: AggregationKind = AggregationKind::Weapons;
    type Section = WeaponSection;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        _options: &DecodeOptions,
    ) -> StatsResult<Self> {
        let game_modes = sections.sections.map(|_, section| WeaponTeamRoles {
            all: section.all.map(WeaponSlots::from),
            attack: section.attacker.map(WeaponSlots::from),
            defence: section.defender.map(WeaponSlots::from),
        });

        Ok(Self {
            window: sections.window,
            game_modes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        Decoder,
        GameMode,
    };

    const WEAPONS: &str = include_str!("../../test_data/weapons.json");

    #[test]
    fn assault_rifle() {
        let stats: WeaponStats = Decoder::new().decode(WEAPONS.as_bytes()).unwrap();
        assert_eq!(stats.window.unwrap().start.to_string(), "2024-03-12");

        let casual = stats.game_modes.get(GameMode::Casual).unwrap();
        let attack = casual.get(TeamRole::Attacker).unwrap();
        let primary = attack.primary_weapons.as_ref().unwrap();
        assert!(attack.secondary_weapons.is_none());

        let rifles = &primary["Assault Rifles"];
        assert!(rifles.is_unique());
        assert_eq!(
            rifles.get("R4-C"),
            Some(&WeaponNamedStats {
                name: "R4-C".to_string(),
                headshots: 3,
                kills: 20,
                ..WeaponNamedStats::default()
            })
        );

        assert!(casual.defence.is_none());
        assert!(casual.all.is_none());
    }

    #[test]
    fn combined_game_mode_and_repeated_names() {
        let stats: WeaponStats = Decoder::new().decode(WEAPONS.as_bytes()).unwrap();

        let all = stats.game_modes.all.as_ref().unwrap().all.as_ref().unwrap();
        let secondary = all.secondary_weapons.as_ref().unwrap();
        let types: Vec<_> = secondary.keys().map(String::as_str).collect();
        assert_eq!(types, ["Handguns", "Shotguns"]);

        // Handguns are listed twice on the wire and share a weapon name.
        let handguns = &secondary["Handguns"];
        assert!(!handguns.is_unique());
        assert_eq!(handguns.len(), 3);
        let kills: Vec<_> = handguns.iter().map(|weapon| weapon.kills).collect();
        assert_eq!(kills, [4, 1, 2]);
        assert_eq!(handguns.get("P226 Mk 25").unwrap().kills, 4);

        assert!(all.primary_weapons.is_none());
        assert!(stats.game_modes.ranked.is_none());
    }
}
