use crate::{
    normalize::wrapped_f64,
    types::TeamRole,
    vocabulary::{
        SectionShape,
        Vocabulary,
    },
    wire::SectionPayload,
    Error,
    Location,
    StatsResult,
};

/// Stats for a single weapon.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WeaponBlock {
    #[serde(rename = "weaponName")]
    pub weapon_name: String,

    pub headshots: u64,
    pub kills: u64,

    #[serde(rename = "roundsPlayed")]
    pub rounds_played: u64,

    #[serde(rename = "roundsWon")]
    pub rounds_won: u64,

    #[serde(rename = "roundsLost")]
    pub rounds_lost: u64,

    #[serde(rename = "roundsWithAKill", deserialize_with = "wrapped_f64")]
    pub rounds_with_kill: f64,

    #[serde(rename = "roundsWithMultikill", deserialize_with = "wrapped_f64")]
    pub rounds_with_multikill: f64,

    #[serde(rename = "headshotAccuracy", deserialize_with = "wrapped_f64")]
    pub headshot_accuracy: f64,
}

/// The weapons of one weapon type.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WeaponTypeBlock {
    #[serde(rename = "weaponType")]
    pub weapon_type: String,

    pub weapons: Vec<WeaponBlock>,
}

/// The weapon types of one weapon slot.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WeaponTypesBlock {
    #[serde(rename = "weaponTypes")]
    pub weapon_types: Vec<WeaponTypeBlock>,
}

/// The primary and secondary weapon slots of a team role.
///
/// A slot absent on the wire stays `None`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WeaponSlotsBlock {
    #[serde(rename = "primaryWeapons")]
    pub primary: Option<WeaponTypesBlock>,

    #[serde(rename = "secondaryWeapons")]
    pub secondary: Option<WeaponTypesBlock>,
}

impl WeaponSlotsBlock {
    /// Whether neither slot is present
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawWeaponRole {
    #[serde(rename = "weaponSlots")]
    weapon_slots: Option<WeaponSlotsBlock>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawWeaponRoles {
    all: Option<RawWeaponRole>,

    #[serde(alias = "Attacker")]
    attacker: Option<RawWeaponRole>,

    #[serde(alias = "Defender")]
    defender: Option<RawWeaponRole>,
}

#[derive(Debug, serde::Deserialize)]
struct RawWeaponSection {
    #[serde(rename = "teamRoles", default)]
    team_roles: RawWeaponRoles,
}

/// The weapon slots of every team role in a game mode section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponSection {
    pub all: Option<WeaponSlotsBlock>,
    pub attacker: Option<WeaponSlotsBlock>,
    pub defender: Option<WeaponSlotsBlock>,
}

impl WeaponSection {
    /// Get the weapon slots of a team role
    pub fn get(&self, team_role: TeamRole) -> Option<&WeaponSlotsBlock> {
        match team_role {
            TeamRole::All => self.all.as_ref(),
            TeamRole::Attacker => self.attacker.as_ref(),
            TeamRole::Defender => self.defender.as_ref(),
        }
    }
}

impl SectionPayload for WeaponSection {
    const SHAPE: SectionShape = SectionShape::TeamRoleWeapons;

    fn decode(
        value: &serde_json::Value,
        location: Location,
        _vocabulary: &Vocabulary,
        team_roles: &[TeamRole],
    ) -> StatsResult<Self> {
        let raw: RawWeaponSection = serde::Deserialize::deserialize(value)
            .map_err(|error| Error::malformed(location, error))?;
        let RawWeaponRoles {
            all,
            attacker,
            defender,
        } = raw.team_roles;

        let wanted = |team_role: TeamRole, role: Option<RawWeaponRole>| {
            if team_roles.contains(&team_role) {
                role.and_then(|role| role.weapon_slots)
            } else {
                None
            }
        };

        Ok(Self {
            all: wanted(TeamRole::All, all),
            attacker: wanted(TeamRole::Attacker, attacker),
            defender: wanted(TeamRole::Defender, defender),
        })
    }

    fn has_data_for(&self, team_roles: &[TeamRole]) -> bool {
        team_roles.iter().any(|team_role| {
            self.get(*team_role)
                .map_or(false, |slots| !slots.is_empty())
        })
    }
}
