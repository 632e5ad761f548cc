// Derived per-player metrics: rate stats, trend, and the WAR / efficiency
// approximations shown on the advanced analytics view.
//
// The WAR and efficiency constants are tuning values, not sabermetric
// theory. They must stay as they are so scores line up with earlier
// dashboards.

use diamond_core::model::{
    player_id, BattingLine, DerivedStats, FieldingLine, PitchingLine, PlayerRecord, Trend,
};

use crate::join::JoinedPlayer;

/// Batting average above which a player is trending up.
pub const TREND_UP_AVG: f64 = 0.350;
/// Batting average below which a player is trending down.
pub const TREND_DOWN_AVG: f64 = 0.200;

/// ERA a pitcher is measured against in the WAR and efficiency scores.
const REPLACEMENT_ERA: f64 = 4.00;
const REPLACEMENT_AVG: f64 = 0.25;
const REPLACEMENT_FIELDING: f64 = 0.95;
/// Games a WAR score is normalized to.
const WAR_SEASON_GAMES: f64 = 20.0;

/// `num / den`, or 0 when the denominator is zero or the result is not
/// finite.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    let value = num / den;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Rate stats
// ---------------------------------------------------------------------------

pub fn batting_average(b: &BattingLine) -> f64 {
    safe_div(b.hits as f64, b.at_bats as f64)
}

/// `(H + BB) / (AB + BB)`.
pub fn on_base_percentage(b: &BattingLine) -> f64 {
    safe_div((b.hits + b.walks) as f64, (b.at_bats + b.walks) as f64)
}

pub fn total_bases(b: &BattingLine) -> f64 {
    b.singles as f64 + 2.0 * b.doubles as f64 + 3.0 * b.triples as f64 + 4.0 * b.home_runs as f64
}

pub fn slugging_percentage(b: &BattingLine) -> f64 {
    safe_div(total_bases(b), b.at_bats as f64)
}

pub fn ops(b: &BattingLine) -> f64 {
    on_base_percentage(b) + slugging_percentage(b)
}

/// Weighted on-base approximation over `AB + BB`.
pub fn woba(b: &BattingLine) -> f64 {
    let weighted = 0.89 * b.singles as f64
        + 1.27 * b.doubles as f64
        + 1.62 * b.triples as f64
        + 2.10 * b.home_runs as f64;
    safe_div(weighted, (b.at_bats + b.walks) as f64)
}

/// Earned runs per nine innings; `None` without innings pitched.
pub fn era(p: &PitchingLine) -> Option<f64> {
    if p.innings_pitched > 0.0 {
        Some(safe_div(p.earned_runs as f64 * 9.0, p.innings_pitched))
    } else {
        None
    }
}

/// Walks plus hits per inning; `None` without innings pitched.
pub fn whip(p: &PitchingLine) -> Option<f64> {
    if p.innings_pitched > 0.0 {
        Some(safe_div(
            (p.walks_allowed + p.hits_allowed) as f64,
            p.innings_pitched,
        ))
    } else {
        None
    }
}

/// `(PO + A) / TC`.
pub fn fielding_percentage(f: &FieldingLine) -> f64 {
    safe_div((f.putouts + f.assists) as f64, f.total_chances as f64)
}

pub fn trend(batting_avg: f64) -> Trend {
    if batting_avg > TREND_UP_AVG {
        Trend::Up
    } else if batting_avg < TREND_DOWN_AVG {
        Trend::Down
    } else {
        Trend::Stable
    }
}

// ---------------------------------------------------------------------------
// Composite scores
// ---------------------------------------------------------------------------

/// ERA that counts toward the pitching components: present and above zero.
fn scoring_era(era: Option<f64>) -> Option<f64> {
    era.filter(|e| *e > 0.0)
}

/// Heuristic WAR: batting, pitching and fielding components summed, scaled
/// by games played over a 20-game season, rounded to one decimal.
pub fn war_approximation(
    batting: &BattingLine,
    pitching: &PitchingLine,
    batting_avg: f64,
    era: Option<f64>,
    fielding_pct: f64,
) -> f64 {
    if batting.games_played == 0 {
        return 0.0;
    }
    let games = batting.games_played as f64;
    let mut war = 0.0;

    if batting_avg > 0.0 {
        war += ((batting_avg - REPLACEMENT_AVG) * 100.0).max(0.0);
        if batting.rbis > 0 {
            war += (batting.rbis as f64 / games) * 0.5;
        }
        if batting.stolen_bases > 0 {
            war += (batting.stolen_bases as f64 / games) * 0.3;
        }
    }

    if let Some(era) = scoring_era(era) {
        war += ((REPLACEMENT_ERA - era) * (pitching.innings_pitched / 9.0) * 0.8).max(0.0);
        if pitching.wins > 0 {
            war += pitching.wins as f64 * 0.2;
        }
        if pitching.strikeouts > 0 {
            war += (pitching.strikeouts as f64 / games) * 0.1;
        }
    }

    if fielding_pct > 0.0 {
        war += ((fielding_pct - REPLACEMENT_FIELDING) * 200.0).max(0.0);
    }

    war *= games / WAR_SEASON_GAMES;
    (war * 10.0).round() / 10.0
}

/// Efficiency score, rounded to an integer. Each term only counts when its
/// input is present and non-zero.
pub fn efficiency_score(
    batting: &BattingLine,
    batting_avg: f64,
    era: Option<f64>,
    fielding_pct: f64,
) -> i64 {
    if batting.games_played == 0 {
        return 0;
    }
    let mut efficiency = 0.0;

    if batting_avg > 0.0 {
        efficiency += batting_avg * 50.0;
    }
    if batting.rbis > 0 {
        efficiency += (batting.rbis as f64 / batting.games_played as f64) * 10.0;
    }
    if fielding_pct > 0.0 {
        efficiency += fielding_pct * 30.0;
    }
    if let Some(era) = scoring_era(era) {
        efficiency += ((REPLACEMENT_ERA - era) * 10.0).max(0.0);
    }

    efficiency.round() as i64
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn derive_stats(
    batting: &BattingLine,
    pitching: &PitchingLine,
    fielding: &FieldingLine,
) -> DerivedStats {
    let batting_avg = batting_average(batting);
    let on_base_pct = on_base_percentage(batting);
    let slugging_pct = slugging_percentage(batting);
    let era = era(pitching);
    let fielding_pct = fielding_percentage(fielding);

    DerivedStats {
        batting_avg,
        on_base_pct,
        slugging_pct,
        ops: on_base_pct + slugging_pct,
        woba: woba(batting),
        era,
        whip: whip(pitching),
        fielding_pct,
        trend: trend(batting_avg),
        war: war_approximation(batting, pitching, batting_avg, era, fielding_pct),
        efficiency: efficiency_score(batting, batting_avg, era, fielding_pct),
    }
}

/// Turn a joined player into its final record.
pub fn build_player(joined: JoinedPlayer) -> PlayerRecord {
    let derived = derive_stats(&joined.batting, &joined.pitching, &joined.fielding);
    PlayerRecord {
        id: player_id(&joined.name),
        name: joined.name,
        position: joined.position,
        batting: joined.batting,
        pitching: joined.pitching,
        fielding: joined.fielding,
        catching: joined.catching,
        derived,
    }
}
