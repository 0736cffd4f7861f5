//! Strategist properties across every difficulty tier.

use playroom::{bingo, xo, BingoCard, CardError, Difficulty, MarkedNumbers, Mark, XoBoard};
use rand::seq::IndexedRandom;
use rand::Rng;

const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

#[test]
fn test_xo_bot_always_plays_a_legal_square() {
    let mut rng = rand::rng();

    // Random partial boards with at least one empty square.
    for _ in 0..50 {
        let mut board = XoBoard::new();
        let marks = rng.random_range(0..8);
        for _ in 0..marks {
            let empty = board.empty_indices();
            let idx = *empty.choose(&mut rng).unwrap();
            let mark = if rng.random_bool(0.5) { Mark::X } else { Mark::O };
            let mut probe: Vec<Option<Mark>> = board.clone().into();
            probe[idx] = Some(mark);
            board = XoBoard::try_from(probe).unwrap();
        }

        for tier in TIERS {
            for mark in [Mark::X, Mark::O] {
                let idx = xo::choose_move(&board, mark, tier, &mut rng)
                    .expect("board has empty squares");
                assert!(board.is_empty(idx));
            }
        }
    }
}

#[test]
fn test_xo_medium_wins_before_blocking() {
    use Mark::{O, X};
    // X can win at 2; O also threatens at 5. Winning takes priority.
    let board = XoBoard::try_from(vec![
        Some(X),
        Some(X),
        None,
        Some(O),
        Some(O),
        None,
        None,
        None,
        None,
    ])
    .unwrap();
    let mut rng = rand::rng();
    for _ in 0..10 {
        assert_eq!(
            xo::choose_move(&board, X, Difficulty::Medium, &mut rng),
            Some(2)
        );
    }
}

#[test]
fn test_xo_medium_blocks_the_opponent() {
    use Mark::{O, X};
    // X has no win; O threatens the middle row at 5.
    let board = XoBoard::try_from(vec![
        Some(X),
        None,
        None,
        Some(O),
        Some(O),
        None,
        None,
        None,
        None,
    ])
    .unwrap();
    let mut rng = rand::rng();
    for _ in 0..10 {
        assert_eq!(
            xo::choose_move(&board, X, Difficulty::Medium, &mut rng),
            Some(5)
        );
    }
}

#[test]
fn test_bingo_bot_always_calls_a_legal_number() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let card = BingoCard::deal(75, &mut rng);
        // Mark a random half of the card plus some off-card numbers.
        let mut marked = MarkedNumbers::new();
        for &number in card.cells().iter().step_by(2) {
            marked.push(number);
        }
        marked.push(74);
        marked.push(75);

        for tier in TIERS {
            let number = bingo::choose_number(&card, &marked, tier, &mut rng)
                .expect("card has unmarked cells");
            assert!(!marked.contains(number));
            assert!(card.position_of(number).is_some());
        }
    }
}

#[test]
fn test_bingo_hard_takes_the_immediate_win() {
    let card = BingoCard::try_from((1..=25).collect::<Vec<u8>>()).unwrap();
    // Row 3 holds 16-20; mark four of the five.
    let marked: MarkedNumbers = [16, 17, 18, 19].into_iter().collect();
    let mut rng = rand::rng();
    for _ in 0..20 {
        assert_eq!(
            bingo::choose_number(&card, &marked, Difficulty::Hard, &mut rng),
            Some(20)
        );
    }
}

#[test]
fn test_malformed_card_is_rejected_outright() {
    // The strategist's 25-cell precondition is enforced at the type boundary:
    // a wrong-sized card is unrepresentable.
    let err = BingoCard::try_from((1..=24).collect::<Vec<u8>>()).unwrap_err();
    assert_eq!(err, CardError::WrongCellCount { got: 24 });

    let mut cells: Vec<u8> = (1..=25).collect();
    cells[0] = 25;
    let err = BingoCard::try_from(cells).unwrap_err();
    assert_eq!(err, CardError::DuplicateNumber { number: 25 });
}
