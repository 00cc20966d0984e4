//! Rule scenarios played through the public API.

use jass_engine::cards::{Card, CardSet, Rank, Suit};
use jass_engine::core::{PlayerId, TeamId};
use jass_engine::error::JassError;
use jass_engine::rules::{Score, Trick, TurnState};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

fn set(cards: &[Card]) -> CardSet {
    cards.iter().copied().collect()
}

// =============================================================================
// Playable Cards
// =============================================================================

#[test]
fn test_must_overtrump_or_follow() {
    // Trump hearts: spade king led, then cut with the nine of hearts
    let trick = Trick::first_empty(Suit::Heart, PlayerId::PLAYER_1)
        .with_added_card(c(Suit::Spade, Rank::King))
        .unwrap()
        .with_added_card(c(Suit::Heart, Rank::Nine))
        .unwrap();
    let hand = set(&[
        c(Suit::Heart, Rank::Six),
        c(Suit::Heart, Rank::Jack),
        c(Suit::Spade, Rank::Ace),
    ]);

    assert_eq!(
        trick.playable_cards(hand),
        set(&[c(Suit::Heart, Rank::Jack), c(Suit::Spade, Rank::Ace)])
    );
}

#[test]
fn test_bour_never_forced() {
    let trick = Trick::first_empty(Suit::Club, PlayerId::PLAYER_2)
        .with_added_card(c(Suit::Club, Rank::Six))
        .unwrap();
    let hand = set(&[c(Suit::Club, Rank::Jack), c(Suit::Diamond, Rank::Ten)]);

    // Only trump held is the jack: anything goes
    assert_eq!(trick.playable_cards(hand), hand);
}

#[test]
fn test_weak_trumps_only_may_undertrump() {
    let trick = Trick::first_empty(Suit::Diamond, PlayerId::PLAYER_3)
        .with_added_card(c(Suit::Spade, Rank::Six))
        .unwrap()
        .with_added_card(c(Suit::Diamond, Rank::Ace))
        .unwrap();
    let hand = set(&[c(Suit::Diamond, Rank::Six), c(Suit::Diamond, Rank::Seven)]);

    assert_eq!(trick.playable_cards(hand), hand);
}

#[test]
fn test_no_undertrump_when_other_cards_held() {
    let trick = Trick::first_empty(Suit::Diamond, PlayerId::PLAYER_3)
        .with_added_card(c(Suit::Spade, Rank::Six))
        .unwrap()
        .with_added_card(c(Suit::Diamond, Rank::Ace))
        .unwrap();
    let hand = set(&[c(Suit::Diamond, Rank::Six), c(Suit::Club, Rank::Seven)]);

    assert_eq!(trick.playable_cards(hand), set(&[c(Suit::Club, Rank::Seven)]));
}

// =============================================================================
// Whole Turns
// =============================================================================

/// Player 1 holds every trump and leads one each trick.
#[test]
fn test_sweep_scores_match_bonus() {
    let hands = [Suit::Heart, Suit::Spade, Suit::Diamond, Suit::Club].map(CardSet::suit);
    let mut state = TurnState::initial(Suit::Heart, Score::INITIAL, PlayerId::PLAYER_1);

    for _ in 0..9 {
        for seat in PlayerId::ALL {
            assert_eq!(state.next_player().unwrap(), seat);
            let playable = state.trick().playable_cards(
                hands[seat.index()].intersection(state.unplayed_cards()),
            );
            state = state.play_card(playable.first().unwrap()).unwrap();
        }
        assert_eq!(state.trick().winning_player(), PlayerId::PLAYER_1);
        state = state.collect_trick().unwrap();
    }

    assert!(state.is_terminal());
    let score = state.score();
    assert_eq!(score.turn_tricks(TeamId::Team1), 9);
    assert_eq!(score.turn_points(TeamId::Team1), 257);
    assert_eq!(score.turn_points(TeamId::Team2), 0);

    let next = score.next_turn();
    assert_eq!(next.game_points(TeamId::Team1), 257);
    assert_eq!(next.turn_tricks(TeamId::Team1), 0);
    assert_eq!(next.turn_points(TeamId::Team1), 0);
}

#[test]
fn test_next_turn_accumulates() {
    let score = Score::new((4, 60, 300), (5, 97, 480)).unwrap();
    let next = score.next_turn();

    assert_eq!(next, Score::new((0, 0, 360), (0, 0, 577)).unwrap());
    assert_eq!(next.total_points(TeamId::Team2), 577);
}

// =============================================================================
// State Machine Errors
// =============================================================================

#[test]
fn test_illegal_states() {
    let state = TurnState::initial(Suit::Spade, Score::INITIAL, PlayerId::PLAYER_4);
    assert!(matches!(
        state.collect_trick(),
        Err(JassError::IllegalState(_))
    ));

    let ace = c(Suit::Club, Rank::Ace);
    let state = state.play_card(ace).unwrap();
    assert!(matches!(
        state.play_card(ace),
        Err(JassError::InvalidArgument(_))
    ));

    let mut full = state;
    for rank in [Rank::Six, Rank::Seven, Rank::Eight] {
        full = full.play_card(c(Suit::Club, rank)).unwrap();
    }
    assert!(matches!(full.next_player(), Err(JassError::IllegalState(_))));
    assert!(matches!(
        full.play_card(c(Suit::Heart, Rank::Six)),
        Err(JassError::IllegalState(_))
    ));

    // Player 4 led the ace of clubs and keeps the lead
    let next = full.collect_trick().unwrap();
    assert_eq!(next.next_player().unwrap(), PlayerId::PLAYER_4);
    assert_eq!(next.score().turn_points(TeamId::Team2), 11);
}

#[test]
fn test_packed_components_round_trip() {
    let state = TurnState::initial(Suit::Diamond, Score::INITIAL, PlayerId::PLAYER_2)
        .play_card(c(Suit::Diamond, Rank::Jack))
        .unwrap();

    let rebuilt = TurnState::from_packed_components(
        state.score().packed(),
        state.unplayed_cards().packed(),
        state.trick().packed(),
    )
    .unwrap();
    assert_eq!(rebuilt, state);

    assert!(TurnState::from_packed_components(0, 1 << 9, state.trick().packed()).is_err());
}
