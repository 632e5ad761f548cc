// Column labels used by the league's spreadsheet exports.
//
// Labels embed a short code and a description ("AVG=Batting average") and
// are matched verbatim after header trimming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the four exports a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Offense,
    Pitching,
    Defense,
    Catching,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::Offense,
        StatCategory::Pitching,
        StatCategory::Defense,
        StatCategory::Catching,
    ];

    /// The three categories joined onto the offense rows.
    pub const SECONDARY: [StatCategory; 3] = [
        StatCategory::Pitching,
        StatCategory::Defense,
        StatCategory::Catching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatCategory::Offense => "offense",
            StatCategory::Pitching => "pitching",
            StatCategory::Defense => "defense",
            StatCategory::Catching => "catching",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PLAYER_NAME: &str = "Player Name";

/// Footer row carrying column sums; never a player.
pub const TOTALS_MARKER: &str = "Totals";

pub mod offense {
    pub const GAMES_PLAYED: &str = "GP=Games played";
    pub const PLATE_APPEARANCES: &str = "PA=Plate appearances";
    pub const AT_BATS: &str = "AB=At bats";
    pub const HITS: &str = "H=Hits";
    pub const SINGLES: &str = "1B=Singles";
    pub const DOUBLES: &str = "2B=Doubles";
    pub const TRIPLES: &str = "3B=Triples";
    pub const HOME_RUNS: &str = "HR=Home runs";
    pub const RBIS: &str = "RBI=Runs batted in";
    pub const RUNS: &str = "R=Runs scored";
    pub const WALKS: &str = "BB=Base on balls (walks)";
    pub const STRIKEOUTS: &str = "SO=Strikeouts";
    pub const STOLEN_BASES: &str = "SB=Stolen bases";
    pub const CAUGHT_STEALING: &str = "CS=Caught stealing";
}

pub mod pitching {
    pub const INNINGS_PITCHED: &str = "IP=Innings pitched";
    pub const WINS: &str = "W=Wins";
    pub const LOSSES: &str = "L=Losses";
    pub const SAVES: &str = "SV=Saves";
    pub const HITS_ALLOWED: &str = "H=Hits allowed";
    pub const EARNED_RUNS: &str = "ER=Earned runs allowed";
    pub const WALKS: &str = "BB=Base on balls (walks)";
    pub const STRIKEOUTS: &str = "SO=Strikeouts";
}

pub mod defense {
    pub const TOTAL_CHANCES: &str = "TC=Total Chances";
    pub const ASSISTS: &str = "A=Assists";
    pub const PUTOUTS: &str = "PO=Putouts";
    pub const ERRORS: &str = "E=Errors";
    pub const DOUBLE_PLAYS: &str = "DP=Double Plays";
}

pub mod catching {
    pub const INNINGS_CAUGHT: &str = "INN=Innings played as catcher";
    pub const PASSED_BALLS: &str = "PB=Passed balls allowed";
    pub const STOLEN_BASES_ALLOWED: &str = "SB=Stolen bases allowed";
    pub const CAUGHT_STEALING: &str = "CS=Runners caught stealing";
}

/// Labels a usable export of `category` must carry.
pub fn expected_headers(category: StatCategory) -> &'static [&'static str] {
    match category {
        StatCategory::Offense => &[
            PLAYER_NAME,
            offense::GAMES_PLAYED,
            offense::AT_BATS,
            offense::HITS,
        ],
        StatCategory::Pitching => &[
            PLAYER_NAME,
            pitching::INNINGS_PITCHED,
            pitching::EARNED_RUNS,
        ],
        StatCategory::Defense => &[
            PLAYER_NAME,
            defense::TOTAL_CHANCES,
            defense::ASSISTS,
            defense::PUTOUTS,
        ],
        StatCategory::Catching => &[PLAYER_NAME, catching::INNINGS_CAUGHT],
    }
}
