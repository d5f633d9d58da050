#[cfg(test)]
mod tests {
    use kanbo::db::boards::Boards;
    use kanbo::db::columns::Columns;
    use kanbo::db::tasks::Tasks;
    use kanbo::db::StoreError;
    use kanbo::libs::board::{Board, Task};
    use kanbo::libs::ordering::{ColumnOrder, ReorderColumnsRequest};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ColumnTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ColumnTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ColumnTestContext { _temp_dir: temp_dir }
        }
    }

    fn column_names(board: &Board) -> Vec<String> {
        board.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn assert_dense_columns(board: &Board) {
        for (index, column) in board.columns.iter().enumerate() {
            assert_eq!(column.position, index as i64);
        }
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_create_appends_at_end(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_append_owner", "Append board", None).unwrap();
        let column = columns.create("col_append_owner", board.id, "  Blocked  ").unwrap();

        assert_eq!(column.name, "Blocked");
        assert_eq!(column.position, 4);

        let board = boards.fetch("col_append_owner", board.id).unwrap().unwrap();
        assert_eq!(board.columns.len(), 5);
        assert_eq!(board.columns[4].name, "Blocked");
        assert_dense_columns(&board);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_create_requires_ownership(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_gate_owner", "Gated board", None).unwrap();
        let err = columns.create("col_gate_stranger", board.id, "Intruder").unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::BoardNotFound)));
        let board = boards.fetch("col_gate_owner", board.id).unwrap().unwrap();
        assert_eq!(board.columns.len(), 4);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_rename_keeps_position(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_rename_owner", "Rename board", None).unwrap();
        let review = board.columns[2].clone();

        let renamed = columns.rename("col_rename_owner", review.id, "QA").unwrap();
        assert_eq!(renamed.name, "QA");
        assert_eq!(renamed.position, review.position);

        let board = boards.fetch("col_rename_owner", board.id).unwrap().unwrap();
        assert_eq!(column_names(&board), vec!["Backlog", "In Progress", "QA", "Done"]);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_rename_rejects_empty_name(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_rename_empty_owner", "Rename board", None).unwrap();
        let err = columns.rename("col_rename_empty_owner", board.columns[0].id, "   ").unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Validation(_))));
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_delete_renumbers_survivors(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_delete_owner", "Delete board", None).unwrap();
        columns.delete("col_delete_owner", board.columns[1].id).unwrap();

        let board = boards.fetch("col_delete_owner", board.id).unwrap().unwrap();
        assert_eq!(column_names(&board), vec!["Backlog", "Review", "Done"]);
        assert_dense_columns(&board);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_delete_removes_its_tasks(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("col_delete_tasks_owner", "Delete board", None).unwrap();
        let backlog = board.columns[0].id;
        tasks
            .create("col_delete_tasks_owner", &Task::new(board.id, backlog, "Goes down with the ship", 0))
            .unwrap();

        columns.delete("col_delete_tasks_owner", backlog).unwrap();

        let board = boards.fetch("col_delete_tasks_owner", board.id).unwrap().unwrap();
        assert!(board.find_task("Goes down with the ship").is_none());
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_reorder_round_trip(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_reorder_owner", "Reorder board", None).unwrap();

        // Reverse the default order
        let request = ReorderColumnsRequest {
            board_id: board.id,
            columns: board
                .columns
                .iter()
                .rev()
                .enumerate()
                .map(|(position, column)| ColumnOrder {
                    id: column.id,
                    position: position as i64,
                })
                .collect(),
        };
        columns.reorder("col_reorder_owner", &request).unwrap();

        let board = boards.fetch("col_reorder_owner", board.id).unwrap().unwrap();
        assert_eq!(column_names(&board), vec!["Done", "Review", "In Progress", "Backlog"]);
        assert_dense_columns(&board);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_reorder_rejects_foreign_column(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_foreign_owner", "Main board", None).unwrap();
        let other = boards.create("col_foreign_owner", "Other board", None).unwrap();

        // Valid shape, but one id belongs to the other board
        let mut entries: Vec<ColumnOrder> = board
            .columns
            .iter()
            .map(|column| ColumnOrder {
                id: column.id,
                position: column.position,
            })
            .collect();
        entries[3] = ColumnOrder {
            id: other.columns[0].id,
            position: 3,
        };

        let err = columns
            .reorder(
                "col_foreign_owner",
                &ReorderColumnsRequest {
                    board_id: board.id,
                    columns: entries,
                },
            )
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::ColumnNotFound)));

        // Neither board moved
        let board = boards.fetch("col_foreign_owner", board.id).unwrap().unwrap();
        let other = boards.fetch("col_foreign_owner", other.id).unwrap().unwrap();
        assert_eq!(column_names(&board), vec!["Backlog", "In Progress", "Review", "Done"]);
        assert_eq!(column_names(&other), vec!["Backlog", "In Progress", "Review", "Done"]);
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_reorder_rejects_empty_payload(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_empty_owner", "Empty payload board", None).unwrap();
        let err = columns
            .reorder(
                "col_empty_owner",
                &ReorderColumnsRequest {
                    board_id: board.id,
                    columns: vec![],
                },
            )
            .unwrap_err();

        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Validation(message)) => assert_eq!(message, "Column list must not be empty"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test_context(ColumnTestContext)]
    #[test]
    fn test_column_reorder_requires_ownership(_ctx: &mut ColumnTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut columns = Columns::new().unwrap();

        let board = boards.create("col_reorder_gate_owner", "Gated board", None).unwrap();
        let request = ReorderColumnsRequest {
            board_id: board.id,
            columns: board
                .columns
                .iter()
                .map(|column| ColumnOrder {
                    id: column.id,
                    position: column.position,
                })
                .collect(),
        };

        let err = columns.reorder("col_reorder_gate_stranger", &request).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::BoardNotFound)));
    }
}
