use super::models::{RankedStanding, StandingEntry};

/// Orders standings by league points, then point difference, then points
/// scored, all descending. The sort is stable, so rows still tied after
/// all three keys keep their input order.
pub fn rank_standings(mut entries: Vec<StandingEntry>) -> Vec<RankedStanding> {
    entries.sort_by(|a, b| {
        b.league_points
            .cmp(&a.league_points)
            .then_with(|| b.point_difference.cmp(&a.point_difference))
            .then_with(|| b.points_scored.cmp(&a.points_scored))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedStanding {
            position: index + 1,
            entry,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn entry(team_id: &str, league_points: i32, difference: i64, scored: i64) -> StandingEntry {
        StandingEntry {
            league_points,
            point_difference: difference,
            points_scored: scored,
            points_against: scored - difference,
            ..StandingEntry::new("league", team_id, Utc::now())
        }
    }

    fn order(entries: Vec<StandingEntry>) -> Vec<String> {
        rank_standings(entries)
            .into_iter()
            .map(|row| row.entry.team_id)
            .collect()
    }

    #[rstest]
    #[case::league_points_first(
        vec![entry("low", 3, 40, 90), entry("high", 6, -5, 10)],
        vec!["high", "low"]
    )]
    #[case::difference_beats_scored(
        vec![entry("plus-two", 3, 2, 80), entry("plus-five", 3, 5, 20)],
        vec!["plus-five", "plus-two"]
    )]
    #[case::scored_breaks_remaining_tie(
        vec![entry("fewer", 3, 5, 20), entry("more", 3, 5, 35)],
        vec!["more", "fewer"]
    )]
    #[case::full_tie_keeps_input_order(
        vec![entry("first", 0, 0, 0), entry("second", 0, 0, 0), entry("third", 0, 0, 0)],
        vec!["first", "second", "third"]
    )]
    fn orders_by_points_difference_scored(
        #[case] entries: Vec<StandingEntry>,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(order(entries), expected);
    }

    #[test]
    fn positions_are_one_based() {
        let ranked = rank_standings(vec![entry("b", 0, 0, 0), entry("a", 3, 1, 7)]);
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[0].entry.team_id, "a");
        assert_eq!(ranked[1].position, 2);
    }
}
