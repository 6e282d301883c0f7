//! Integration tests for the playoff bracket: seeding, overlay, derivation, topology.

use esports_season::{
    build_bracket, Bracket, build_standings, sort_teams, unknown_playoff_ids, Feed, MatchResult,
    MatchResults, MatchStatus, Participant, PhaseFilter, Placeholder, Score, SeasonConfig, Side,
    SlotId, SlotState, SortBy, Teams, TOPOLOGY,
};
use serde_json::json;

fn finished(home: &str, away: &str, home_maps: u32, away_maps: u32) -> MatchResult {
    MatchResult {
        status: MatchStatus::Finished,
        teams: Some(Teams {
            home: home.to_string(),
            away: away.to_string(),
        }),
        score: Some(Score::new(home_maps, away_maps)),
        ..MatchResult::default()
    }
}

fn playoff(
    id: &str,
    home: &str,
    away: &str,
    home_maps: u32,
    away_maps: u32,
    winner: Side,
) -> MatchResult {
    MatchResult {
        playoff_match_id: Some(id.to_string()),
        winner: Some(winner),
        ..finished(home, away, home_maps, away_maps)
    }
}

/// Qualification where Team A..Team H finish ranked 1..8.
fn qualification() -> Vec<MatchResult> {
    vec![
        finished("Team A", "Team H", 4, 0),
        finished("Team B", "Team G", 3, 0),
        finished("Team C", "Team F", 2, 0),
        finished("Team D", "Team E", 1, 0),
    ]
}

fn with_playoffs(playoffs: Vec<MatchResult>) -> MatchResults {
    let mut matches = qualification();
    matches.extend(playoffs);
    MatchResults::from_matches(matches)
}

fn team(name: &str) -> Participant {
    Participant::Team(name.to_string())
}

fn labels(p: &Participant) -> String {
    p.label()
}

#[test]
fn seeds_one_vs_eight() {
    let bracket = build_bracket(&with_playoffs(vec![]), &SeasonConfig::default());
    let pairs: Vec<_> = bracket
        .upper_quarterfinals
        .iter()
        .map(|m| (labels(&m.top), labels(&m.bottom)))
        .collect();
    assert_eq!(
        pairs,
        [
            ("Team A".to_string(), "Team H".to_string()),
            ("Team B".to_string(), "Team G".to_string()),
            ("Team C".to_string(), "Team F".to_string()),
            ("Team D".to_string(), "Team E".to_string()),
        ]
    );
    assert!(bracket.upper_quarterfinals.iter().all(|m| m.state() == SlotState::Pending));
}

#[test]
fn unplayed_slots_get_feeder_placeholders() {
    let bracket = build_bracket(&with_playoffs(vec![]), &SeasonConfig::default());
    assert_eq!(labels(&bracket.upper_semifinals[0].top), "W1");
    assert_eq!(labels(&bracket.upper_semifinals[1].bottom), "W4");
    assert_eq!(labels(&bracket.upper_final.top), "W5");
    assert_eq!(labels(&bracket.lower_round1[0].top), "L1");
    assert_eq!(labels(&bracket.lower_round1[1].bottom), "L4");
    assert_eq!(labels(&bracket.lower_round2[0].top), "W-L1");
    assert_eq!(labels(&bracket.lower_round2[1].bottom), "L6");
    assert_eq!(labels(&bracket.lower_round3[1].bottom), "L7");
    assert_eq!(labels(&bracket.bronze_final.top), "W-L6");
    assert_eq!(labels(&bracket.bronze_final.bottom), "L7");
    assert_eq!(labels(&bracket.grand_final.top), "W7");
    assert_eq!(
        bracket.grand_final.bottom,
        Participant::Placeholder(Placeholder::WinnerOf(SlotId::L6))
    );
    assert_eq!(bracket.grand_final.score, None);
}

#[test]
fn finished_playoff_match_fills_slot_and_advances() {
    let results = with_playoffs(vec![playoff("G1", "Team A", "Team H", 1, 0, Side::Home)]);
    let bracket = build_bracket(&results, &SeasonConfig::default());

    let g1 = &bracket.upper_quarterfinals[0];
    assert_eq!(g1.score.as_deref(), Some("1:0"));
    assert_eq!(g1.winner.as_deref(), Some("Team A"));
    assert_eq!(g1.loser.as_deref(), Some("Team H"));
    assert_eq!(g1.state(), SlotState::Played);
    assert_eq!(bracket.upper_semifinals[0].top, team("Team A"));
    assert_eq!(bracket.lower_round1[0].top, team("Team H"));
    assert_eq!(labels(&bracket.lower_round1[0].bottom), "L2");
}

#[test]
fn winner_inferred_from_score_when_not_given() {
    let mut m = playoff("G2", "Team B", "Team G", 0, 2, Side::Home);
    m.winner = None;
    let bracket = build_bracket(&with_playoffs(vec![m]), &SeasonConfig::default());
    assert_eq!(bracket.upper_quarterfinals[1].winner.as_deref(), Some("Team G"));
    assert_eq!(bracket.upper_semifinals[0].bottom, team("Team G"));
    assert_eq!(bracket.lower_round1[0].bottom, team("Team B"));
}

#[test]
fn playoff_results_do_not_change_seeding() {
    let results = with_playoffs(vec![
        playoff("G1", "Team H", "Team A", 2, 0, Side::Home),
        playoff("G2", "Team G", "Team B", 2, 0, Side::Home),
    ]);
    let config = SeasonConfig::default();

    let qualified = sort_teams(
        &build_standings(&results, &config, PhaseFilter::Qualification),
        SortBy::Points,
    );
    let baseline = sort_teams(
        &build_standings(&with_playoffs(vec![]), &config, PhaseFilter::Qualification),
        SortBy::Points,
    );
    assert_eq!(qualified, baseline);

    let bracket = build_bracket(&results, &config);
    assert_eq!(bracket.upper_quarterfinals[2].top, team("Team C"));
    assert_eq!(bracket.upper_quarterfinals[2].bottom, team("Team F"));
    assert_eq!(bracket.upper_quarterfinals[3].top, team("Team D"));
    assert_eq!(bracket.upper_quarterfinals[3].bottom, team("Team E"));
}

#[test]
fn drawn_playoff_match_advances_nobody() {
    let mut m = playoff("G1", "Team A", "Team H", 2, 2, Side::Home);
    m.winner = None;
    let bracket = build_bracket(&with_playoffs(vec![m]), &SeasonConfig::default());

    let g1 = &bracket.upper_quarterfinals[0];
    assert_eq!(g1.score.as_deref(), Some("2:2"));
    assert_eq!(g1.winner, None);
    assert_eq!(g1.loser, None);
    assert_eq!(g1.state(), SlotState::Played);
    assert_eq!(
        bracket.upper_semifinals[0].top,
        Participant::Placeholder(Placeholder::WinnerOf(SlotId::G1))
    );
    assert_eq!(labels(&bracket.lower_round1[0].top), "L1");
}

#[test]
fn lower_bracket_winner_climbs_to_grand_final() {
    let mut playoffs = vec![playoff("L1", "Team X", "Team Y", 2, 0, Side::Home)];
    let bracket = build_bracket(&with_playoffs(playoffs.clone()), &SeasonConfig::default());
    assert_eq!(bracket.lower_round2[0].top, team("Team X"));
    assert_eq!(labels(&bracket.lower_round3[0].top), "W-L3");

    playoffs.push(playoff("L3", "Team X", "Team Q", 2, 1, Side::Home));
    let bracket = build_bracket(&with_playoffs(playoffs.clone()), &SeasonConfig::default());
    assert_eq!(bracket.lower_round3[0].top, team("Team X"));
    assert_eq!(labels(&bracket.lower_round3[1].top), "W-L5");

    playoffs.push(playoff("L5", "Team P", "Team X", 0, 2, Side::Away));
    let bracket = build_bracket(&with_playoffs(playoffs.clone()), &SeasonConfig::default());
    assert_eq!(bracket.lower_round3[1].top, team("Team X"));
    assert_eq!(labels(&bracket.grand_final.bottom), "W-L6");

    playoffs.push(playoff("L6", "Team X", "Team S", 2, 1, Side::Home));
    let bracket = build_bracket(&with_playoffs(playoffs), &SeasonConfig::default());
    assert_eq!(bracket.grand_final.bottom, team("Team X"));
    assert_eq!(bracket.bronze_final.top, team("Team X"));
    assert_eq!(labels(&bracket.grand_final.top), "W7");
}

#[test]
fn participants_serialise_with_their_label() {
    let results = with_playoffs(vec![playoff("G2", "Team B", "Team G", 2, 0, Side::Home)]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    let value = serde_json::to_value(&bracket).unwrap();

    assert_eq!(
        value["upperSemifinals"][0]["top"],
        json!({ "kind": "placeholder", "hint": "winner_of", "slot": "G1", "label": "W1" })
    );
    assert_eq!(
        value["upperSemifinals"][0]["bottom"],
        json!({ "kind": "team", "label": "Team B" })
    );
    assert_eq!(
        value["lowerRound1"][0]["bottom"],
        json!({ "kind": "team", "label": "Team G" })
    );
    assert_eq!(
        value["lowerRound2"][0]["top"],
        json!({ "kind": "placeholder", "hint": "winner_of", "slot": "L1", "label": "W-L1" })
    );

    let back: Bracket = serde_json::from_value(value).unwrap();
    assert_eq!(back, bracket);
}

#[test]
fn unseeded_participant_serialises_with_dash_label() {
    let value = serde_json::to_value(Participant::Placeholder(Placeholder::Unseeded)).unwrap();
    assert_eq!(value, json!({ "kind": "placeholder", "hint": "unseeded", "label": "—" }));

    let missing_slot = json!({ "kind": "placeholder", "hint": "loser_of", "label": "L5" });
    assert!(serde_json::from_value::<Participant>(missing_slot).is_err());
}

#[test]
fn grand_final_takes_lower_bracket_winner_not_bronze() {
    let results = with_playoffs(vec![
        playoff("L6", "Team X", "Team Y", 2, 1, Side::Home),
        playoff("G7", "Team A", "Team B", 2, 0, Side::Home),
        playoff("BF", "Team Z", "Team C", 2, 0, Side::Home),
    ]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    assert_eq!(bracket.grand_final.top, team("Team A"));
    assert_eq!(bracket.grand_final.bottom, team("Team X"));
    assert_eq!(bracket.bronze_final.top, team("Team Z"));
}

#[test]
fn real_result_is_never_overwritten_by_derivation() {
    let results = with_playoffs(vec![
        playoff("G1", "Team A", "Team H", 2, 0, Side::Home),
        playoff("G5", "Team Q", "Team R", 2, 1, Side::Home),
    ]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    assert_eq!(bracket.upper_semifinals[0].top, team("Team Q"));
    assert_eq!(bracket.upper_semifinals[0].bottom, team("Team R"));
    assert_eq!(bracket.upper_final.top, team("Team Q"));
    assert_eq!(bracket.lower_round2[0].bottom, team("Team R"));
}

#[test]
fn first_finished_match_per_slot_wins() {
    let mut scheduled = playoff("G3", "Team F", "Team C", 0, 0, Side::Home);
    scheduled.status = MatchStatus::Scheduled;
    let results = with_playoffs(vec![
        scheduled,
        playoff("G3", "Team C", "Team F", 2, 0, Side::Home),
        playoff("G3", "Team C", "Team F", 0, 2, Side::Away),
    ]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    assert_eq!(bracket.upper_quarterfinals[2].winner.as_deref(), Some("Team C"));
    assert_eq!(bracket.upper_quarterfinals[2].score.as_deref(), Some("2:0"));
}

#[test]
fn fewer_than_eight_teams_returns_skeleton() {
    let results = MatchResults::from_matches(vec![
        finished("A", "B", 1, 0),
        playoff("G1", "A", "B", 2, 0, Side::Home),
    ]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    for slot in bracket.slots() {
        assert_eq!(slot.top, Participant::Placeholder(Placeholder::Unseeded));
        assert_eq!(slot.bottom, Participant::Placeholder(Placeholder::Unseeded));
        assert_eq!(slot.score, None);
        assert_eq!(slot.state(), SlotState::Unseeded);
    }
    assert_eq!(labels(&bracket.upper_quarterfinals[0].top), "—");
    assert_eq!(labels(&bracket.grand_final.bottom), "—");
}

#[test]
fn deductions_shift_seeding() {
    let config = SeasonConfig::default().with_deduction("Team A", 10);
    let bracket = build_bracket(&with_playoffs(vec![]), &config);
    assert_eq!(bracket.upper_quarterfinals[0].top, team("Team B"));
    assert_eq!(bracket.upper_quarterfinals[0].bottom, team("Team A"));
}

#[test]
fn build_is_idempotent() {
    let results = with_playoffs(vec![playoff("G4", "Team D", "Team E", 2, 1, Side::Home)]);
    let config = SeasonConfig::default();
    assert_eq!(build_bracket(&results, &config), build_bracket(&results, &config));
}

#[test]
fn topology_is_ordered_and_complete() {
    let ids: Vec<SlotId> = TOPOLOGY.iter().map(|n| n.id).collect();
    assert_eq!(ids, SlotId::ALL);
    for (i, node) in TOPOLOGY.iter().enumerate() {
        for feed in [node.top, node.bottom] {
            if let Some(source) = feed.source() {
                let pos = ids.iter().position(|id| *id == source).unwrap();
                assert!(pos < i, "{} is fed by later slot {}", node.id, source);
            }
        }
    }
    assert_eq!(TOPOLOGY[14].bottom, Feed::Winner(SlotId::L6));
    assert_eq!(TOPOLOGY[13].bottom, Feed::Loser(SlotId::G7));
}

#[test]
fn slot_ids_round_trip_through_text() {
    for id in SlotId::ALL {
        assert_eq!(id.to_string().parse::<SlotId>(), Ok(id));
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(id.as_str()));
    }
    assert!("G8".parse::<SlotId>().is_err());
    assert_eq!(SlotId::G3.title(), "Game 3");
    assert_eq!(SlotId::L2.title(), "Lower bracket 2");
    assert_eq!(SlotId::GrandFinal.title(), "Grand final");
}

#[test]
fn reports_unknown_playoff_ids() {
    let results = with_playoffs(vec![
        playoff("QF9", "Team A", "Team B", 2, 0, Side::Home),
        playoff("G1", "Team A", "Team H", 2, 0, Side::Home),
        playoff("QF9", "Team A", "Team B", 2, 0, Side::Home),
    ]);
    assert_eq!(unknown_playoff_ids(&results), ["QF9".to_string()]);
    let bracket = build_bracket(&results, &SeasonConfig::default());
    assert_eq!(bracket.upper_quarterfinals[0].winner.as_deref(), Some("Team A"));
}

#[test]
fn placeholder_labels() {
    assert_eq!(Placeholder::WinnerOf(SlotId::G3).label(), "W3");
    assert_eq!(Placeholder::LoserOf(SlotId::L2).label(), "L-L2");
    assert_eq!(Placeholder::WinnerOf(SlotId::L1).label(), "W-L1");
    assert_eq!(Placeholder::LoserOf(SlotId::G5).label(), "L5");
    assert_eq!(Placeholder::Unseeded.label(), "—");
}
