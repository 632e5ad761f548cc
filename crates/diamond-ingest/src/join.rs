// Player joiner: one joined player per offense row.
//
// Secondary exports are matched on the exact, case-sensitive player name.
// A miss is not an error: the player simply has an empty line for that
// category.

use std::collections::{BTreeMap, HashMap, HashSet};

use diamond_core::model::{BattingLine, CatchingLine, FieldingLine, PitchingLine, Position};
use serde::Serialize;
use tracing::{debug, warn};

use crate::columns::{catching, defense, offense, pitching, StatCategory};
use crate::record::{RawRecord, RawTable};

/// Typed stat lines for one player, before derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPlayer {
    pub name: String,
    pub position: Position,
    pub batting: BattingLine,
    pub pitching: PitchingLine,
    pub fielding: FieldingLine,
    pub catching: CatchingLine,
}

/// Names that failed to line up across exports.
///
/// Purely informational: the joined output is the same whether or not
/// anything is reported here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinDiagnostics {
    /// Offense players with no row in the given export.
    pub missing: BTreeMap<StatCategory, Vec<String>>,
    /// Rows in the given export whose name matches no offense player.
    pub orphaned: BTreeMap<StatCategory, Vec<String>>,
}

impl JoinDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.missing.values().all(Vec::is_empty) && self.orphaned.values().all(Vec::is_empty)
    }

    pub fn orphan_count(&self) -> usize {
        self.orphaned.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Stat line extraction
// ---------------------------------------------------------------------------

pub fn batting_line(row: &RawRecord) -> BattingLine {
    let hits = row.count(offense::HITS);
    let doubles = row.count(offense::DOUBLES);
    let triples = row.count(offense::TRIPLES);
    let home_runs = row.count(offense::HOME_RUNS);
    let singles = if row.has_value(offense::SINGLES) {
        row.count(offense::SINGLES)
    } else {
        hits.saturating_sub(doubles)
            .saturating_sub(triples)
            .saturating_sub(home_runs)
    };

    BattingLine {
        games_played: row.count(offense::GAMES_PLAYED),
        plate_appearances: row.count(offense::PLATE_APPEARANCES),
        at_bats: row.count(offense::AT_BATS),
        hits,
        singles,
        doubles,
        triples,
        home_runs,
        rbis: row.count(offense::RBIS),
        runs: row.count(offense::RUNS),
        walks: row.count(offense::WALKS),
        strikeouts: row.count(offense::STRIKEOUTS),
        stolen_bases: row.count(offense::STOLEN_BASES),
        caught_stealing: row.count(offense::CAUGHT_STEALING),
    }
}

pub fn pitching_line(row: &RawRecord) -> PitchingLine {
    PitchingLine {
        innings_pitched: row.number(pitching::INNINGS_PITCHED),
        wins: row.count(pitching::WINS),
        losses: row.count(pitching::LOSSES),
        saves: row.count(pitching::SAVES),
        hits_allowed: row.count(pitching::HITS_ALLOWED),
        earned_runs: row.count(pitching::EARNED_RUNS),
        walks_allowed: row.count(pitching::WALKS),
        strikeouts: row.count(pitching::STRIKEOUTS),
    }
}

pub fn fielding_line(row: &RawRecord) -> FieldingLine {
    FieldingLine {
        total_chances: row.count(defense::TOTAL_CHANCES),
        assists: row.count(defense::ASSISTS),
        putouts: row.count(defense::PUTOUTS),
        errors: row.count(defense::ERRORS),
        double_plays: row.count(defense::DOUBLE_PLAYS),
    }
}

pub fn catching_line(row: &RawRecord) -> CatchingLine {
    CatchingLine {
        innings_caught: row.number(catching::INNINGS_CAUGHT),
        passed_balls: row.count(catching::PASSED_BALLS),
        stolen_bases_allowed: row.count(catching::STOLEN_BASES_ALLOWED),
        caught_stealing: row.count(catching::CAUGHT_STEALING),
    }
}

/// Pitched beats caught; everyone else is the infield placeholder.
pub fn infer_position(pitching: &PitchingLine, catching: &CatchingLine) -> Position {
    if pitching.innings_pitched > 0.0 {
        Position::Pitcher
    } else if catching.innings_caught > 0.0 {
        Position::Catcher
    } else {
        Position::Infield
    }
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Index rows by exact name. The first row with a given name wins.
fn index_by_name(table: &RawTable) -> HashMap<&str, &RawRecord> {
    let mut index = HashMap::with_capacity(table.len());
    for row in &table.rows {
        if index.contains_key(row.key()) {
            debug!("duplicate {} row for '{}', keeping the first", table.category, row.key());
            continue;
        }
        index.insert(row.key(), row);
    }
    index
}

/// Join the three secondary exports onto the offense rows.
///
/// Produces exactly one `JoinedPlayer` per offense row, in offense order.
pub fn join_players(
    offense: &RawTable,
    pitching: &RawTable,
    defense: &RawTable,
    catching: &RawTable,
) -> (Vec<JoinedPlayer>, JoinDiagnostics) {
    let pitching_index = index_by_name(pitching);
    let defense_index = index_by_name(defense);
    let catching_index = index_by_name(catching);

    let players: Vec<JoinedPlayer> = offense
        .rows
        .iter()
        .map(|row| {
            let name = row.key();
            let pitching = pitching_index
                .get(name)
                .map(|r| pitching_line(r))
                .unwrap_or_default();
            let fielding = defense_index
                .get(name)
                .map(|r| fielding_line(r))
                .unwrap_or_default();
            let catching = catching_index
                .get(name)
                .map(|r| catching_line(r))
                .unwrap_or_default();

            JoinedPlayer {
                name: name.to_string(),
                position: infer_position(&pitching, &catching),
                batting: batting_line(row),
                pitching,
                fielding,
                catching,
            }
        })
        .collect();

    let diagnostics = diagnose(offense, &[pitching, defense, catching]);
    if diagnostics.orphan_count() > 0 {
        for (category, names) in &diagnostics.orphaned {
            if !names.is_empty() {
                warn!(
                    "{} {} row(s) match no offense player: {}",
                    names.len(),
                    category,
                    names.join(", ")
                );
            }
        }
    }

    (players, diagnostics)
}

fn diagnose(offense: &RawTable, secondaries: &[&RawTable]) -> JoinDiagnostics {
    let offense_names: HashSet<&str> = offense.rows.iter().map(RawRecord::key).collect();
    let mut diagnostics = JoinDiagnostics::default();

    for table in secondaries {
        let names: HashSet<&str> = table.rows.iter().map(RawRecord::key).collect();

        let missing: Vec<String> = offense
            .rows
            .iter()
            .map(RawRecord::key)
            .filter(|name| !names.contains(name))
            .map(str::to_string)
            .collect();
        let orphaned: Vec<String> = table
            .rows
            .iter()
            .map(RawRecord::key)
            .filter(|name| !offense_names.contains(name))
            .map(str::to_string)
            .collect();

        diagnostics.missing.insert(table.category, missing);
        diagnostics.orphaned.insert(table.category, orphaned);
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_table;

    fn table(category: StatCategory, text: &str) -> RawTable {
        parse_table(category, text).unwrap()
    }

    fn empty(category: StatCategory) -> RawTable {
        table(category, "Player Name")
    }

    #[test]
    fn one_player_per_offense_row_with_empty_secondaries() {
        let offense = table(
            StatCategory::Offense,
            "\
Player Name,GP=Games played,AB=At bats,H=Hits
Jane Doe,10,10,3
Amy Lee,8,20,5",
        );

        let (players, diagnostics) = join_players(
            &offense,
            &empty(StatCategory::Pitching),
            &empty(StatCategory::Defense),
            &empty(StatCategory::Catching),
        );
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Jane Doe");
        assert_eq!(players[1].name, "Amy Lee");
        assert_eq!(players[0].pitching, PitchingLine::default());
        assert_eq!(players[0].fielding, FieldingLine::default());
        assert_eq!(players[0].position, Position::Infield);
        assert_eq!(diagnostics.missing[&StatCategory::Pitching].len(), 2);
    }

    #[test]
    fn join_is_exact_and_case_sensitive() {
        let offense = table(StatCategory::Offense, "Player Name,AB=At bats\nJane Doe,10");
        let pitching = table(
            StatCategory::Pitching,
            "Player Name,IP=Innings pitched\njane doe,5\nJane Doe ,6",
        );

        let (players, diagnostics) = join_players(
            &offense,
            &pitching,
            &empty(StatCategory::Defense),
            &empty(StatCategory::Catching),
        );
        assert_eq!(players[0].pitching.innings_pitched, 0.0);
        assert_eq!(players[0].position, Position::Infield);
        assert_eq!(
            diagnostics.orphaned[&StatCategory::Pitching],
            vec!["jane doe".to_string(), "Jane Doe ".to_string()]
        );
        assert!(!diagnostics.is_clean());
    }

    #[test]
    fn pitching_takes_precedence_over_catching() {
        let offense = table(StatCategory::Offense, "Player Name,AB=At bats\nJane Doe,10\nAmy Lee,5");
        let pitching = table(
            StatCategory::Pitching,
            "Player Name,IP=Innings pitched\nJane Doe,5\nAmy Lee,0",
        );
        let catching = table(
            StatCategory::Catching,
            "Player Name,INN=Innings played as catcher\nJane Doe,12\nAmy Lee,30",
        );

        let (players, _) = join_players(&offense, &pitching, &empty(StatCategory::Defense), &catching);
        assert_eq!(players[0].position, Position::Pitcher);
        assert_eq!(players[1].position, Position::Catcher);
    }

    #[test]
    fn first_duplicate_secondary_row_wins() {
        let offense = table(StatCategory::Offense, "Player Name,AB=At bats\nJane Doe,10");
        let defense = table(
            StatCategory::Defense,
            "Player Name,TC=Total Chances,A=Assists,PO=Putouts\nJane Doe,10,4,5\nJane Doe,99,1,1",
        );

        let (players, _) = join_players(
            &offense,
            &empty(StatCategory::Pitching),
            &defense,
            &empty(StatCategory::Catching),
        );
        assert_eq!(players[0].fielding.total_chances, 10);
    }

    #[test]
    fn singles_fall_back_to_hits_minus_extra_base_hits() {
        let with_column = table(
            StatCategory::Offense,
            "Player Name,H=Hits,1B=Singles,2B=Doubles\nA,9,8,0",
        );
        assert_eq!(batting_line(&with_column.rows[0]).singles, 8);

        let without_column = table(
            StatCategory::Offense,
            "Player Name,H=Hits,2B=Doubles,3B=Triples,HR=Home runs\nA,10,2,1,1",
        );
        assert_eq!(batting_line(&without_column.rows[0]).singles, 6);
    }

    #[test]
    fn placeholder_fields_become_zero_counts() {
        let offense = table(
            StatCategory::Offense,
            "Player Name,GP=Games played,AVG=Batting average\nInvalid Player,-,N/A",
        );
        let line = batting_line(&offense.rows[0]);
        assert_eq!(line.games_played, 0);
        assert_eq!(line.at_bats, 0);
    }
}
