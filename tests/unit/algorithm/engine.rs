//! Tests for board construction, queries and the move orchestrator

#[cfg(test)]
mod tests {
    use matchgrid::BoardError;
    use matchgrid::algorithm::engine::{Board, BoardConfig, BoardEvent};
    use matchgrid::algorithm::matching::ScanDirection;
    use matchgrid::algorithm::source::{ConstantSource, CycleSource, QueueSource};
    use matchgrid::spatial::grid::{Grid, Position};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn letters(rows: &[&str]) -> Grid<char> {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(Some).collect())
                .collect(),
        )
        .unwrap()
    }

    fn board(rows: &[&str], refill: &str, config: BoardConfig) -> Board<char, QueueSource<char>> {
        Board::from_grid(letters(rows), QueueSource::new(refill.chars()), config).unwrap()
    }

    const fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    // Tests construction draws tokens row by row
    // Verified by filling columns first
    #[test]
    fn test_new_fills_row_major() {
        let board = Board::new(QueueSource::new("ABCDEF".chars()), 3, 2).unwrap();

        assert_eq!(board.grid(), &letters(&["ABC", "DEF"]));
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert!(board.is_settled());
    }

    // Tests bad dimensions and short sources fail construction
    // Verified by clamping zero dimensions to one
    #[test]
    fn test_new_rejects_invalid_input() {
        assert!(matches!(
            Board::new(ConstantSource::new('A'), 0, 3),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Board::new(QueueSource::new("AB".chars()), 2, 2),
            Err(BoardError::SourceExhausted { drawn: 2 })
        ));
    }

    // Tests grids with holes are refused
    // Verified by removing the empty cell check
    #[test]
    fn test_from_grid_requires_full_grid() {
        let mut grid = letters(&["AB"]);
        grid.set(p(0, 0), None).unwrap();

        let result = Board::from_grid(grid, ConstantSource::new('Z'), BoardConfig::default());
        assert!(matches!(result, Err(BoardError::InvalidParameter { .. })));
    }

    // Tests piece lookups including out-of-range probes
    // Verified by panicking on negative coordinates
    #[test]
    fn test_piece_queries() {
        let board = board(&["AB", "CD"], "", BoardConfig::default());

        assert_eq!(board.piece(p(1, 1)), Some(&'D'));
        assert_eq!(board.piece(p(-1, 0)), None);
        assert_eq!(board.piece(p(0, 2)), None);
    }

    // Tests board-level adjacency also requires both cells on the board
    // Verified by delegating to the pure predicate only
    #[test]
    fn test_can_move_checks_bounds() {
        let board = board(&["AB", "CD"], "", BoardConfig::default());

        assert!(board.can_move(p(0, 0), p(0, 1)));
        assert!(board.can_move(p(1, 1), p(0, 1)));
        assert!(!board.can_move(p(0, 0), p(1, 1)));
        assert!(!board.can_move(p(0, 0), p(0, 0)));
        assert!(!board.can_move(p(0, 1), p(0, 2)));
        assert!(!board.can_move(p(-1, 0), p(0, 0)));
    }

    // Tests a matching swap emits the match then a single refill
    // Verified by emitting the refill before the matches
    #[test]
    fn test_matching_move_events_and_grid() {
        let mut board = board(&["XAZW", "ABAA", "CDEF"], "1234", BoardConfig::default());

        let events = board.apply_move(p(1, 1), p(0, 1)).unwrap();

        assert_eq!(events.len(), 2);
        let found = events[0].as_match().unwrap();
        assert_eq!(found.token, 'A');
        assert_eq!(found.positions, vec![p(1, 0), p(1, 1), p(1, 2), p(1, 3)]);
        assert_eq!(events[1], BoardEvent::Refill);

        // Row 0 becomes X B Z W after the swap and then drops one row
        assert_eq!(board.grid(), &letters(&["1234", "XBZW", "CDEF"]));
    }

    // Tests a non-matching swap stands and still ends with one refill
    // Verified by reverting non-matching swaps by default
    #[test]
    fn test_non_matching_move_keeps_swap() {
        let mut board = board(&["ABA"], "", BoardConfig::default());

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        assert_eq!(events, vec![BoardEvent::Refill]);
        assert_eq!(board.grid(), &letters(&["BAA"]));
    }

    // Tests revert mode undoes a swap that matched nothing
    // Verified by ignoring the revert flag
    #[test]
    fn test_revert_on_no_match() {
        let config = BoardConfig {
            revert_on_no_match: true,
            ..BoardConfig::default()
        };
        let mut board = board(&["ABA"], "", config);

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        assert_eq!(events, vec![BoardEvent::Refill]);
        assert_eq!(board.grid(), &letters(&["ABA"]));
    }

    // Tests invalid moves are rejected before any mutation
    // Verified by swapping before validation
    #[test]
    fn test_invalid_moves_leave_board_untouched() {
        let mut board = board(&["AB", "CD"], "", BoardConfig::default());

        assert!(matches!(
            board.apply_move(p(0, 0), p(1, 1)),
            Err(BoardError::InvalidMove { .. })
        ));
        assert!(matches!(
            board.apply_move(p(0, 1), p(0, 2)),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert!(matches!(
            board.apply_move(p(0, 0), p(0, 0)),
            Err(BoardError::InvalidMove { .. })
        ));
        assert_eq!(board.grid(), &letters(&["AB", "CD"]));
    }

    // Tests a refill failure rolls the whole move back
    // Verified by committing the working grid before refill
    #[test]
    fn test_exhausted_source_rolls_back_move() {
        let mut board = board(&["ABAA"], "Z", BoardConfig::default());

        let error = board.apply_move(p(0, 0), p(0, 1)).unwrap_err();

        assert!(matches!(error, BoardError::SourceExhausted { drawn: 1 }));
        assert_eq!(board.grid(), &letters(&["ABAA"]));
    }

    // Tests listeners see the same ordered events the move returns
    // Verified by notifying listeners before matches are collected
    #[test]
    fn test_listeners_receive_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut board = Board::new(ConstantSource::new('Z'), 3, 1).unwrap();
        board.add_listener(move |event| sink.borrow_mut().push(event.clone()));

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        assert_eq!(*seen.borrow(), events);
        assert!(format!("{board:?}").contains("listeners: 1"));
    }

    // Tests vertical scanning clears a column run when enabled
    // Verified by scanning rows only regardless of configuration
    #[test]
    fn test_vertical_scan_clears_columns() {
        let config = BoardConfig {
            scan: ScanDirection::RowsAndColumns,
            ..BoardConfig::default()
        };
        let mut board = board(&["AB", "BA", "BC"], "XYZ", config);

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        let found = events[0].as_match().unwrap();
        assert_eq!(found.token, 'B');
        assert_eq!(found.positions, vec![p(0, 0), p(1, 0), p(2, 0)]);
        assert_eq!(board.grid(), &letters(&["XA", "YA", "ZC"]));
    }

    // Tests cascade mode keeps settling while refills create runs
    // Verified by stopping after the first pass in cascade mode
    #[test]
    fn test_cascade_repeats_until_stable() {
        let config = BoardConfig {
            cascade: true,
            ..BoardConfig::default()
        };
        let mut board = board(&["ABAA"], "AAAXYX", config);

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        let kinds: Vec<bool> = events.iter().map(|e| e.as_match().is_some()).collect();
        assert_eq!(kinds, vec![true, false, true, false]);
        assert_eq!(board.grid(), &letters(&["BXYX"]));
    }

    // Tests cascade mode stops at the pass limit with a constant source
    // Verified by looping until no runs remain
    #[test]
    fn test_cascade_respects_pass_limit() {
        let config = BoardConfig {
            cascade: true,
            max_cascade_passes: 3,
            ..BoardConfig::default()
        };
        let mut board = Board::with_config(CycleSource::new(vec!['Z']), 3, 1, config).unwrap();

        let events = board.apply_move(p(0, 0), p(0, 1)).unwrap();

        let refills = events.iter().filter(|e| **e == BoardEvent::Refill).count();
        assert_eq!(refills, 3);
        assert_eq!(events.len(), 6);
        assert!(board.is_settled());
        assert_eq!(board.config(), config);
    }
}
