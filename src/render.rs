use crate::util::AsciiTable;
use std::fmt::Write;
use ubi_stats::{
    types::{
        BombsiteEntry,
        Counter,
        MovingTrend,
        MovingTrendEntry,
        WeaponSlots,
        WeaponTypes,
    },
    BombsiteStats,
    DetailedStats,
    GameMode,
    MapStats,
    MovingTrendStats,
    NamedStats,
    OperatorStats,
    StatsWindow,
    SummarizedStats,
    TeamRole,
    WeaponStats,
};

const MISSING: &str = "-";

fn ratio(value: f64) -> String {
    format!("{value:.2}")
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn role_name(team_role: TeamRole) -> &'static str {
    match team_role {
        TeamRole::All => "All",
        TeamRole::Attacker => "Attack",
        TeamRole::Defender => "Defence",
    }
}

/// The result of rendering a table
pub type RenderResult = Result<String, std::fmt::Error>;

fn heading(out: &mut String, title: &str, window: Option<&StatsWindow>) -> std::fmt::Result {
    match window {
        Some(window) => writeln!(out, "{title} ({} to {})", window.start, window.end),
        None => writeln!(out, "{title}"),
    }
}

fn game_mode_heading(
    out: &mut String,
    game_mode: GameMode,
    team_role: Option<TeamRole>,
) -> std::fmt::Result {
    writeln!(out)?;
    match team_role {
        Some(team_role) => writeln!(out, "[{}] {}", game_mode.as_str(), role_name(team_role)),
        None => writeln!(out, "[{}]", game_mode.as_str()),
    }
}

/// The column names of a detailed stats row
const DETAILED_HEADER: [&str; 8] = [
    "Name", "Kills", "Deaths", "K/D", "Rounds", "Won", "HS %", "KOST %",
];

fn detailed_row<C: Counter>(name: &str, stats: &DetailedStats<C>) -> [String; 8] {
    [
        name.to_string(),
        stats.kills.to_string(),
        stats.deaths.to_string(),
        stats.kd().map_or_else(|| MISSING.to_string(), ratio),
        stats.rounds_played.to_string(),
        stats.rounds_won.to_string(),
        percent(stats.headshot_accuracy),
        percent(stats.rounds_with_kost),
    ]
}

/// Render a summary as one table per game mode.
pub fn summary(stats: &SummarizedStats) -> RenderResult {
    let mut out = String::new();
    heading(&mut out, &format!("Summary {}", stats.season_slug), stats.window.as_ref())?;

    for (game_mode, summary) in stats.game_modes.iter() {
        game_mode_heading(&mut out, game_mode, None)?;

        let mut table = AsciiTable::new(DETAILED_HEADER);
        for (team_role, side) in [
            (TeamRole::Attacker, summary.attack.as_ref()),
            (TeamRole::Defender, summary.defence.as_ref()),
        ] {
            if let Some(side) = side {
                table.push_row(detailed_row(role_name(team_role), side));
            }
        }
        write!(out, "{table}")?;

        let matches = summary.matches;
        writeln!(
            out,
            "Matches: {} played, {} won, {} lost",
            matches.played, matches.won, matches.lost
        )?;
    }

    Ok(out)
}

fn named(title: &str, stats: &NamedStats) -> RenderResult {
    let mut out = String::new();
    heading(&mut out, &format!("{title} {}", stats.season_slug), stats.window.as_ref())?;

    for (game_mode, team_roles) in stats.game_modes.iter() {
        for team_role in TeamRole::ALL {
            let entries = match team_roles.get(team_role) {
                Some(entries) => entries,
                None => continue,
            };

            game_mode_heading(&mut out, game_mode, Some(team_role))?;
            let mut table = AsciiTable::new(DETAILED_HEADER);
            for (name, stats) in entries.iter() {
                table.push_row(detailed_row(name, stats));
            }
            write!(out, "{table}")?;
        }
    }

    Ok(out)
}

/// Render operator stats as one table per game mode and team role.
pub fn operators(stats: &OperatorStats) -> RenderResult {
    named("Operators", stats)
}

/// Render map stats as one table per game mode and team role.
pub fn maps(stats: &MapStats) -> RenderResult {
    named("Maps", stats)
}

/// Render bombsite stats as one table per game mode and team role.
pub fn bombsites(stats: &BombsiteStats) -> RenderResult {
    let mut out = String::new();
    heading(&mut out, &format!("Bombsites {}", stats.season_slug), stats.window.as_ref())?;

    for (game_mode, team_roles) in stats.game_modes.iter() {
        for team_role in TeamRole::ALL {
            let entries = match team_roles.get(team_role) {
                Some(entries) => entries,
                None => continue,
            };

            game_mode_heading(&mut out, game_mode, Some(team_role))?;
            let mut table = AsciiTable::new(DETAILED_HEADER);
            for BombsiteEntry { name, stats } in entries {
                table.push_row(detailed_row(name, stats));
            }
            write!(out, "{table}")?;
        }
    }

    Ok(out)
}

fn weapon_types(table: &mut AsciiTable, slot: &str, weapon_types: &WeaponTypes) {
    for (weapon_type, group) in weapon_types.iter() {
        for weapon in group.iter() {
            table.push_row([
                weapon.name.clone(),
                slot.to_string(),
                weapon_type.clone(),
                weapon.kills.to_string(),
                weapon.headshots.to_string(),
                weapon.rounds_played.to_string(),
                percent(weapon.rounds_with_kill),
                percent(weapon.headshot_accuracy),
            ]);
        }
    }
}

/// Render weapon stats as one table per game mode and team role.
pub fn weapons(stats: &WeaponStats) -> RenderResult {
    let mut out = String::new();
    heading(&mut out, "Weapons", stats.window.as_ref())?;

    for (game_mode, team_roles) in stats.game_modes.iter() {
        for team_role in TeamRole::ALL {
            let WeaponSlots {
                primary_weapons,
                secondary_weapons,
            } = match team_roles.get(team_role) {
                Some(slots) => slots,
                None => continue,
            };

            game_mode_heading(&mut out, game_mode, Some(team_role))?;
            let mut table = AsciiTable::new([
                "Weapon",
                "Slot",
                "Type",
                "Kills",
                "Headshots",
                "Rounds",
                "Kill Rounds %",
                "HS %",
            ]);
            if let Some(primary_weapons) = primary_weapons {
                weapon_types(&mut table, "Primary", primary_weapons);
            }
            if let Some(secondary_weapons) = secondary_weapons {
                weapon_types(&mut table, "Secondary", secondary_weapons);
            }
            write!(out, "{table}")?;
        }
    }

    Ok(out)
}

fn trend_row(table: &mut AsciiTable, name: &str, entry: &MovingTrendEntry) {
    let last = |points: &[f64]| points.last().copied().map_or_else(|| MISSING.to_string(), ratio);

    table.push_row([
        name.to_string(),
        ratio(entry.low),
        ratio(entry.average),
        ratio(entry.high),
        last(&entry.actuals),
        last(&entry.trend),
    ]);
}

fn trend_table(trend: &MovingTrend) -> AsciiTable {
    let mut table = AsciiTable::new(["Series", "Low", "Average", "High", "Last", "Last Trend"]);
    for (name, entry) in [
        ("K/D", &trend.kill_death_ratio),
        ("W/L", &trend.win_loss_ratio),
        ("Kills / Round", &trend.kills_per_round),
        ("Headshot %", &trend.headshot_accuracy),
        ("Distance / Round", &trend.distance_per_round),
        ("Time Alive Ratio", &trend.ratio_time_alive_per_match),
        ("Survived", &trend.rounds_survived),
        ("Kill Rounds", &trend.rounds_with_kill),
        ("KOST", &trend.rounds_with_kost),
        ("Multikill Rounds", &trend.rounds_with_multikill),
        ("Opening Death Rounds", &trend.rounds_with_opening_death),
        ("Opening Kill Rounds", &trend.rounds_with_opening_kill),
    ] {
        trend_row(&mut table, name, entry);
    }
    table
}

/// Render moving trends as one table per game mode and team role.
pub fn moving_trends(stats: &MovingTrendStats) -> RenderResult {
    let mut out = String::new();
    heading(&mut out, "Moving Trends", stats.window.as_ref())?;

    for (game_mode, team_roles) in stats.game_modes.iter() {
        for team_role in TeamRole::ALL {
            let trend = match team_roles.get(team_role) {
                Some(trend) => trend,
                None => continue,
            };

            game_mode_heading(&mut out, game_mode, Some(team_role))?;
            writeln!(out, "Moving points: {}", trend.moving_points)?;
            write!(out, "{}", trend_table(trend))?;
        }
    }

    Ok(out)
}
