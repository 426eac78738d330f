// Match lifecycle transitions
//
// Pure functions over a loaded `Match`. The service owns locking and
// persistence; everything here is synchronous and side-effect free apart
// from mutating the document it is given.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::models::{Match, MatchStatus, TimesSwitched};
use crate::registry::MatchFormat;
use crate::shared::AppError;

/// What the outcome resolver decided when a match completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub match_id: String,
    pub league_id: String,
    pub format: MatchFormat,
    pub team_a: String,
    pub team_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub winning_team: Option<String>,
}

/// Rejects any mutation of a completed match
pub fn ensure_not_completed(m: &Match, operation: &str) -> Result<(), AppError> {
    if m.status() == MatchStatus::Completed {
        return Err(AppError::InvalidState(format!(
            "Cannot {} on completed match {}",
            operation, m.id
        )));
    }
    Ok(())
}

/// Explicit kickoff of an upcoming match
pub fn start(m: &mut Match, now: DateTime<Utc>) -> Result<(), AppError> {
    match m.status() {
        MatchStatus::Upcoming => {
            m.kicked_off_at = Some(now);
            Ok(())
        }
        status => Err(AppError::InvalidState(format!(
            "Match {} is already {}",
            m.id, status
        ))),
    }
}

/// Sets initial sides. Only allowed before the first scoring play and
/// before any side switch.
pub fn coin_toss(m: &mut Match, offense_team_id: &str) -> Result<(), AppError> {
    ensure_not_completed(m, "toss the coin")?;

    if m.has_actions() || m.times_switched != TimesSwitched::None {
        return Err(AppError::InvalidState(format!(
            "Sides for match {} can only be set before play begins",
            m.id
        )));
    }

    let offense = m.require_side_mut(offense_team_id)?;
    offense.side = super::Side::Offense;

    let defense = if m.side_a.team_id == offense_team_id {
        &mut m.side_b
    } else {
        &mut m.side_a
    };
    defense.side = super::Side::Defense;

    Ok(())
}

/// Applies a half-time, full-time or overtime marker. Only `side` and
/// `times_switched` are touched.
pub fn switch_sides(m: &mut Match, marker: TimesSwitched) -> Result<(), AppError> {
    if m.status() != MatchStatus::Live {
        return Err(AppError::InvalidState(format!(
            "Sides can only be switched while match {} is live (currently {})",
            m.id,
            m.status()
        )));
    }

    if marker == TimesSwitched::None {
        return Err(AppError::Validation(
            "Switch marker must be halfTime, fullTime or overtime".to_string(),
        ));
    }

    if marker <= m.times_switched {
        return Err(AppError::InvalidState(format!(
            "Match {} is already at {}; cannot apply {}",
            m.id, m.times_switched, marker
        )));
    }

    if matches!(marker, TimesSwitched::HalfTime | TimesSwitched::FullTime) {
        m.side_a.side = m.side_a.side.flipped();
        m.side_b.side = m.side_b.side.flipped();
    }
    m.times_switched = marker;

    Ok(())
}

/// Outcome resolver: decides win/loss/draw from ledger scores and
/// completes the match. A second call fails with `AlreadyFinalized`.
pub fn finalize(m: &mut Match, now: DateTime<Utc>) -> Result<MatchOutcome, AppError> {
    match m.status() {
        MatchStatus::Completed => {
            return Err(AppError::AlreadyFinalized(format!(
                "Match {} was completed at {}",
                m.id,
                m.completed_at.map(|at| at.to_rfc3339()).unwrap_or_default()
            )))
        }
        MatchStatus::Upcoming => {
            return Err(AppError::InvalidState(format!(
                "Match {} has not started",
                m.id
            )))
        }
        MatchStatus::Live => {}
    }

    debug_assert_eq!(m.side_a.score, m.side_a.ledger_points());
    debug_assert_eq!(m.side_b.score, m.side_b.ledger_points());

    let (score_a, score_b) = (m.side_a.score, m.side_b.score);
    let winning_team = match score_a.cmp(&score_b) {
        Ordering::Greater => {
            m.side_a.win = Some(true);
            m.side_b.win = Some(false);
            Some(m.side_a.team_id.clone())
        }
        Ordering::Less => {
            m.side_a.win = Some(false);
            m.side_b.win = Some(true);
            Some(m.side_b.team_id.clone())
        }
        Ordering::Equal => {
            m.side_a.win = None;
            m.side_b.win = None;
            None
        }
    };

    m.winning_team = winning_team.clone();
    m.completed_at = Some(now);

    Ok(MatchOutcome {
        match_id: m.id.clone(),
        league_id: m.league_id.clone(),
        format: m.format,
        team_a: m.side_a.team_id.clone(),
        team_b: m.side_b.team_id.clone(),
        score_a,
        score_b,
        winning_team,
    })
}
