//! Public result types, one per aggregation kind.

pub mod bombsite;
pub mod detailed;
pub mod game_mode;
pub mod moving_trend;
pub mod named;
pub mod summarized;
pub mod weapon;

pub use self::{
    bombsite::{
        BombsiteEntry,
        BombsiteStats,
        BombsiteTeamRoles,
    },
    detailed::{
        Counter,
        DetailedStats,
        MatchStats,
    },
    game_mode::{
        GameMode,
        PerGameMode,
        StatsWindow,
        TeamRole,
    },
    moving_trend::{
        MovingTrend,
        MovingTrendEntry,
        MovingTrendStats,
        MovingTrendTeamRoles,
    },
    named::{
        MapStats,
        NamedStats,
        NamedTeamRoles,
        OperatorStats,
    },
    summarized::{
        SummarizedGameModeStats,
        SummarizedStats,
    },
    weapon::{
        WeaponGroup,
        WeaponNamedStats,
        WeaponSlots,
        WeaponStats,
        WeaponTeamRoles,
        WeaponTypes,
    },
};
