#[cfg(test)]
mod tests {
    use kanbo::libs::board::{Board, Column, Task};
    use kanbo::libs::resolver::{resolve_column_move, resolve_task_move, DropTarget};
    use kanbo::libs::store::BoardState;
    use uuid::Uuid;

    /// Builds a board with the given columns, each holding the given number
    /// of tasks, positions already dense.
    fn board_with(columns: &[(&str, usize)]) -> Board {
        let mut board = Board::new("alice", "Test board", None);
        for (index, (name, task_count)) in columns.iter().enumerate() {
            let mut column = Column::new(board.id, name, index as i64);
            for task_index in 0..*task_count {
                let task = Task::new(
                    board.id,
                    column.id,
                    &format!("{} task {}", name, task_index + 1),
                    task_index as i64,
                );
                column.tasks.push(task);
            }
            board.columns.push(column);
        }
        board
    }

    fn column_names(state: &BoardState) -> Vec<String> {
        state.board().columns.iter().map(|c| c.name.clone()).collect()
    }

    fn task_titles(state: &BoardState, column_index: usize) -> Vec<String> {
        state.board().columns[column_index]
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn assert_dense(state: &BoardState) {
        for (index, column) in state.board().columns.iter().enumerate() {
            assert_eq!(column.position, index as i64);
            for (task_index, task) in column.tasks.iter().enumerate() {
                assert_eq!(task.position, task_index as i64);
                assert_eq!(task.column_id, column.id);
            }
        }
    }

    #[test]
    fn test_new_sorts_children_by_position() {
        let mut board = board_with(&[("A", 2), ("B", 0)]);
        board.columns.swap(0, 1);
        board.columns[1].tasks.swap(0, 1);

        let state = BoardState::new(board);
        assert_eq!(column_names(&state), vec!["A", "B"]);
        assert_eq!(task_titles(&state, 0), vec!["A task 1", "A task 2"]);
    }

    #[test]
    fn test_column_move_to_end_shifts_others_left() {
        // [A, B, C], drag A onto C -> [B, C, A]
        let board = board_with(&[("A", 0), ("B", 0), ("C", 0)]);
        let a = board.columns[0].id;
        let c = board.columns[2].id;
        let mut state = BoardState::new(board);

        let mv = resolve_column_move(state.board(), a, DropTarget::Column(c)).unwrap();
        state.apply_column_move(&mv);

        assert_eq!(column_names(&state), vec!["B", "C", "A"]);
        assert_dense(&state);
    }

    #[test]
    fn test_column_move_backward_shifts_others_right() {
        let board = board_with(&[("A", 0), ("B", 0), ("C", 0)]);
        let c = board.columns[2].id;
        let a = board.columns[0].id;
        let mut state = BoardState::new(board);

        let mv = resolve_column_move(state.board(), c, DropTarget::Column(a)).unwrap();
        state.apply_column_move(&mv);

        assert_eq!(column_names(&state), vec!["C", "A", "B"]);
        assert_dense(&state);
    }

    #[test]
    fn test_forward_task_move_lands_past_target() {
        // [T1, T2, T3], drag T1 onto T3 -> [T2, T3, T1]
        let board = board_with(&[("Work", 3)]);
        let t1 = board.columns[0].tasks[0].id;
        let t3 = board.columns[0].tasks[2].id;
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), t1, DropTarget::Task(t3)).unwrap();
        state.apply_task_move(&mv);

        assert_eq!(task_titles(&state, 0), vec!["Work task 2", "Work task 3", "Work task 1"]);
        assert_dense(&state);
    }

    #[test]
    fn test_backward_task_move_takes_target_slot() {
        let board = board_with(&[("Work", 3)]);
        let t3 = board.columns[0].tasks[2].id;
        let t1 = board.columns[0].tasks[0].id;
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), t3, DropTarget::Task(t1)).unwrap();
        state.apply_task_move(&mv);

        assert_eq!(task_titles(&state, 0), vec!["Work task 3", "Work task 1", "Work task 2"]);
        assert_dense(&state);
    }

    #[test]
    fn test_cross_column_move_renumbers_both_columns() {
        let board = board_with(&[("A", 3), ("B", 2)]);
        let moved = board.columns[0].tasks[1].id;
        let over = board.columns[1].tasks[0].id;
        let b = board.columns[1].id;
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), moved, DropTarget::Task(over)).unwrap();
        state.apply_task_move(&mv);

        assert_eq!(task_titles(&state, 0), vec!["A task 1", "A task 3"]);
        assert_eq!(task_titles(&state, 1), vec!["A task 2", "B task 1", "B task 2"]);
        assert_eq!(state.board().columns[1].tasks[0].column_id, b);
        assert_dense(&state);
    }

    #[test]
    fn test_move_into_other_column_body_appends() {
        // Lone task dragged onto the open area of a filled column.
        let board = board_with(&[("Backlog", 1), ("Done", 2)]);
        let t5 = board.columns[0].tasks[0].id;
        let done = board.columns[1].id;
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), t5, DropTarget::ColumnBody(done)).unwrap();
        state.apply_task_move(&mv);

        assert!(state.board().columns[0].tasks.is_empty());
        assert_eq!(
            task_titles(&state, 1),
            vec!["Done task 1", "Done task 2", "Backlog task 1"]
        );
        assert_dense(&state);
    }

    #[test]
    fn test_task_move_with_unknown_column_leaves_state_unchanged() {
        let board = board_with(&[("A", 2)]);
        let task = board.columns[0].tasks[0].id;
        let mut state = BoardState::new(board);

        let mut mv = resolve_task_move(state.board(), task, DropTarget::Task(state.board().columns[0].tasks[1].id)).unwrap();
        mv.to_column = Uuid::new_v4();
        state.apply_task_move(&mv);

        assert_eq!(task_titles(&state, 0), vec!["A task 1", "A task 2"]);
    }

    #[test]
    fn test_column_order_payload_covers_every_column() {
        let board = board_with(&[("A", 0), ("B", 0), ("C", 0)]);
        let a = board.columns[0].id;
        let c = board.columns[2].id;
        let board_id = board.id;
        let mut state = BoardState::new(board);

        let mv = resolve_column_move(state.board(), a, DropTarget::Column(c)).unwrap();
        state.apply_column_move(&mv);

        let payload = state.column_order();
        assert_eq!(payload.board_id, board_id);
        assert_eq!(payload.columns.len(), 3);
        for (index, entry) in payload.columns.iter().enumerate() {
            assert_eq!(entry.position, index as i64);
            assert_eq!(entry.id, state.board().columns[index].id);
        }
    }

    #[test]
    fn test_task_order_payload_spans_all_columns() {
        let board = board_with(&[("A", 2), ("B", 1)]);
        let moved = board.columns[0].tasks[0].id;
        let b = board.columns[1].id;
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), moved, DropTarget::ColumnBody(b)).unwrap();
        state.apply_task_move(&mv);

        let payload = state.task_order();
        assert_eq!(payload.tasks.len(), 3);
        let for_moved = payload.tasks.iter().find(|t| t.id == moved).unwrap();
        assert_eq!(for_moved.column_id, b);
        assert_eq!(for_moved.position, 1);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_reload_replaces_mirror() {
        let board = board_with(&[("A", 2)]);
        let t1 = board.columns[0].tasks[0].id;
        let t2 = board.columns[0].tasks[1].id;
        let fresh = board.clone();
        let mut state = BoardState::new(board);

        let mv = resolve_task_move(state.board(), t1, DropTarget::Task(t2)).unwrap();
        state.apply_task_move(&mv);
        assert_eq!(task_titles(&state, 0), vec!["A task 2", "A task 1"]);

        state.reload(fresh);
        assert_eq!(task_titles(&state, 0), vec!["A task 1", "A task 2"]);
    }
}
