use chrono::{DateTime, Utc};

use super::{PlayerStatLine, StatLine, StatsError, TeamStatLine};

/// Result of merging one submission into a side's player lines
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub line: PlayerStatLine,
    /// New counters minus old counters; what career totals must absorb
    pub stats_delta: StatLine,
    pub points_delta: i32,
    /// The player had no line on this side before this submission
    pub first_line_for_player: bool,
    /// The side had no player lines at all before this submission
    pub first_line_for_team: bool,
}

/// Adds `delta` onto the player's line, creating the line if needed.
///
/// Nothing is written when the submission is empty, would drive a counter
/// below zero, or would push a counter or the point total out of range.
pub fn merge_player_stats(
    lines: &mut Vec<PlayerStatLine>,
    team_id: &str,
    player_id: &str,
    delta: StatLine,
    now: DateTime<Utc>,
) -> Result<MergeOutcome, StatsError> {
    if delta.is_zero() {
        return Err(StatsError::EmptySubmission);
    }

    let first_line_for_team = lines.is_empty();
    let position = lines.iter().position(|line| line.player_id == player_id);

    let previous = position.map(|index| lines[index].clone());
    let (old_stats, old_points) = previous
        .as_ref()
        .map(|line| (line.stats, line.total_points))
        .unwrap_or_default();

    let merged = old_stats
        .checked_add(delta)
        .map_err(|field| StatsError::CounterOverflow { field })?;
    if let Some((field, value)) = merged.first_negative() {
        return Err(StatsError::NegativeCounter { field, value });
    }
    let total_points = merged
        .checked_total_points()
        .ok_or(StatsError::CounterOverflow {
            field: "total_points",
        })?;

    let mut line = previous.unwrap_or_else(|| PlayerStatLine::new(team_id, player_id, now));
    line.stats = merged;
    line.total_points = total_points;
    line.submissions += 1;
    line.last_submitted_at = now;

    match position {
        Some(index) => lines[index] = line.clone(),
        None => lines.push(line.clone()),
    }

    Ok(MergeOutcome {
        stats_delta: delta,
        points_delta: total_points - old_points,
        first_line_for_player: position.is_none(),
        first_line_for_team,
        line,
    })
}

/// Full recompute of a side's team line from its player lines
pub fn team_stat_line(team_id: &str, lines: &[PlayerStatLine]) -> Result<TeamStatLine, StatsError> {
    let mut team = TeamStatLine {
        team_id: team_id.to_string(),
        ..TeamStatLine::default()
    };

    for line in lines {
        team.stats = team
            .stats
            .checked_add(line.stats)
            .map_err(|field| StatsError::CounterOverflow { field })?;
        team.total_points = team
            .total_points
            .checked_add(line.total_points)
            .ok_or(StatsError::CounterOverflow {
                field: "total_points",
            })?;
    }

    Ok(team)
}
