mod utils;

use axum::{body::Body, http::Request};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use flagleague::{AppError, MatchFormat};
use utils::{MatchBuilder, TestSetup, TestSetupBuilder, HOME, SEASON, VISITORS};

const RAVENS: &str = "ravens";

async fn play(setup: &TestSetup, team_a: &str, team_b: &str, plays: &[(&str, &str, &str)]) {
    let mut builder = MatchBuilder::new().between(team_a, team_b).started();
    for (team, player, action) in plays {
        builder = builder.with_action(team, player, action);
    }
    let m = builder.build_with_setup(setup).await;
    setup
        .state
        .match_service
        .finalize(&m.id)
        .await
        .expect("match should finalize");
}

fn touchdown_and_one<'a>(team: &'a str, player: &'a str) -> Vec<(&'a str, &'a str, &'a str)> {
    vec![
        (team, player, "touchdown"),
        (team, player, "extra_point_five_yard"),
        (team, player, "touchdown"),
        (team, player, "extra_point_five_yard"),
    ]
}

fn three_teams() -> TestSetupBuilder {
    TestSetupBuilder::new()
        .with_two_teams()
        .with_team(RAVENS, vec!["r1", "r2"])
}

#[tokio::test]
async fn tie_gives_both_teams_a_draw() {
    let setup = TestSetupBuilder::new().with_two_teams().build().await;

    let mut plays = touchdown_and_one(HOME, "h1");
    plays.extend(touchdown_and_one(VISITORS, "w2"));
    play(&setup, HOME, VISITORS, &plays).await;

    let table = setup
        .state
        .leaderboard_service
        .compute_standings(SEASON)
        .await
        .unwrap();

    assert_eq!(table.standings.len(), 2);
    for row in &table.standings {
        assert_eq!(row.entry.draws, 1);
        assert_eq!(row.entry.wins, 0);
        assert_eq!(row.entry.league_points, 0);
        assert_eq!(row.entry.points_scored, 14);
        assert_eq!(row.entry.point_difference, 0);
    }

    // Nobody won a game
    let career = &setup.state.career_service;
    assert_eq!(career.get_team_career(HOME).await.unwrap().games_won.seven_v_seven, 0);
    assert_eq!(career.get_player_career("w2").await.unwrap().games_won.seven_v_seven, 0);
}

#[tokio::test]
async fn draw_points_follow_configuration() {
    let setup = TestSetupBuilder::new()
        .with_two_teams()
        .with_draw_points(1)
        .build()
        .await;
    play(&setup, HOME, VISITORS, &[]).await;

    let table = setup
        .state
        .leaderboard_service
        .compute_standings(SEASON)
        .await
        .unwrap();
    assert!(table.standings.iter().all(|row| row.entry.league_points == 1));
}

#[tokio::test]
async fn point_difference_breaks_ties_on_league_points() {
    let setup = three_teams().build().await;

    // Hawks win by 2 (safety), ravens win by 6 (touchdown) but score less overall
    play(
        &setup,
        HOME,
        VISITORS,
        &[
            (HOME, "h1", "touchdown"),
            (HOME, "h1", "touchdown"),
            (HOME, "h2", "safety"),
            (VISITORS, "w1", "touchdown"),
            (VISITORS, "w1", "touchdown"),
        ],
    )
    .await;
    play(&setup, RAVENS, VISITORS, &[(RAVENS, "r1", "touchdown")]).await;

    let table = setup
        .state
        .leaderboard_service
        .compute_standings(SEASON)
        .await
        .unwrap();
    let order: Vec<(&str, i32, i64, usize)> = table
        .standings
        .iter()
        .map(|row| {
            (
                row.entry.team_id.as_str(),
                row.entry.league_points,
                row.entry.point_difference,
                row.position,
            )
        })
        .collect();

    assert_eq!(
        order,
        vec![(RAVENS, 3, 6, 1), (HOME, 3, 2, 2), (VISITORS, 0, -8, 3)]
    );

    for row in &table.standings {
        assert_eq!(
            row.entry.point_difference,
            row.entry.points_scored - row.entry.points_against
        );
    }
}

#[tokio::test]
async fn registered_teams_appear_before_playing() {
    let setup = three_teams().build().await;
    let leaderboard = &setup.state.leaderboard_service;

    leaderboard.register_team(SEASON, RAVENS).await.unwrap();
    leaderboard.register_team(SEASON, HOME).await.unwrap();

    let table = leaderboard.compute_standings(SEASON).await.unwrap();
    let teams: Vec<&str> = table
        .standings
        .iter()
        .map(|row| row.entry.team_id.as_str())
        .collect();
    assert_eq!(teams, vec![RAVENS, HOME]);

    let delivered = setup.notifications.wait_for(2).await;
    assert!(delivered.iter().all(|n| n.kind == "team_joined_league"));
}

#[tokio::test]
async fn winner_roster_gets_format_specific_game_wins() {
    let setup = TestSetupBuilder::new()
        .with_format(MatchFormat::FiveVFive)
        .with_two_teams()
        .build()
        .await;

    let m = MatchBuilder::new()
        .in_format(MatchFormat::FiveVFive)
        .with_action(VISITORS, "w1", "defensive_conversion")
        .build_with_setup(&setup)
        .await;
    setup.state.match_service.finalize(&m.id).await.unwrap();

    let career = &setup.state.career_service;
    for player in ["w1", "w2", "w3"] {
        let totals = career.get_player_career(player).await.unwrap();
        assert_eq!(totals.games_won.five_v_five, 1, "{} should be credited", player);
        assert_eq!(totals.games_won.seven_v_seven, 0);
    }
    assert_eq!(career.get_team_career(VISITORS).await.unwrap().games_won.five_v_five, 1);
    assert_eq!(career.get_player_career("h1").await.unwrap().games_won.five_v_five, 0);
}

#[tokio::test]
async fn league_winner_is_set_once_and_credits_roster() {
    let setup = TestSetupBuilder::new().with_two_teams().build().await;
    let career = &setup.state.career_service;

    career.set_league_winner(SEASON, VISITORS).await.unwrap();

    let err = career.set_league_winner(SEASON, HOME).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyFinalized(_)));

    let response = setup
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/teams/{}/career", VISITORS))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let team: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(team["leagues_won"]["7v7"], 1);

    assert_eq!(
        career.get_player_career("w3").await.unwrap().leagues_won.seven_v_seven,
        1
    );
    assert_eq!(
        career.get_player_career("h1").await.unwrap().leagues_won.seven_v_seven,
        0
    );
}
