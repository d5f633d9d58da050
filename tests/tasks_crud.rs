#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use kanbo::db::boards::Boards;
    use kanbo::db::tasks::{TaskUpdate, Tasks};
    use kanbo::db::StoreError;
    use kanbo::libs::board::{Board, Task};
    use kanbo::libs::ordering::{ReorderTasksRequest, TaskOrder};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TaskTestContext { _temp_dir: temp_dir }
        }
    }

    fn task_titles(board: &Board, column_index: usize) -> Vec<String> {
        board.columns[column_index].tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_appends_and_trims(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_create_owner", "Create board", None).unwrap();
        let backlog = board.columns[0].id;

        let first = tasks
            .create("task_create_owner", &Task::new(board.id, backlog, "First task", 0))
            .unwrap();
        let second = tasks
            .create("task_create_owner", &Task::new(board.id, backlog, "  Second task  ", 0))
            .unwrap();

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert_eq!(second.title, "Second task");

        let board = boards.fetch("task_create_owner", board.id).unwrap().unwrap();
        assert_eq!(task_titles(&board, 0), vec!["First task", "Second task"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_cross_board_column(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_cross_owner", "Main board", None).unwrap();
        let other = boards.create("task_cross_owner", "Other board", None).unwrap();

        // Column belongs to the other board
        let foreign_column = other.columns[0].id;
        let err = tasks
            .create("task_cross_owner", &Task::new(board.id, foreign_column, "Misfiled task", 0))
            .unwrap_err();

        match err.downcast_ref::<StoreError>() {
            Some(StoreError::InvalidColumn(id)) => assert_eq!(*id, foreign_column),
            other => panic!("expected invalid column error, got {:?}", other),
        }

        let board = boards.fetch("task_cross_owner", board.id).unwrap().unwrap();
        assert_eq!(board.task_count(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_create_rejects_empty_title(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_empty_owner", "Empty title board", None).unwrap();
        let err = tasks
            .create("task_empty_owner", &Task::new(board.id, board.columns[0].id, "   ", 0))
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Validation(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_merges_fields(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_update_owner", "Update board", None).unwrap();
        let mut task = Task::new(board.id, board.columns[0].id, "Ship it", 0);
        task.description = Some("Cut the release".to_string());
        task.due_date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap().and_hms_opt(0, 0, 0);
        task.assignee = Some("alice".to_string());
        let task = tasks.create("task_update_owner", &task).unwrap();

        // Title only; everything else must survive
        let updated = tasks
            .update(
                "task_update_owner",
                task.id,
                &TaskUpdate {
                    title: Some("Ship it already".to_string()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Ship it already");
        assert_eq!(updated.description.as_deref(), Some("Cut the release"));
        assert_eq!(updated.due_date, task.due_date);
        assert_eq!(updated.assignee.as_deref(), Some("alice"));
        assert_eq!(updated.position, task.position);

        // Clearing the assignee
        let updated = tasks
            .update(
                "task_update_owner",
                task.id,
                &TaskUpdate {
                    assignee: Some(None),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.assignee, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update_requires_ownership(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_gate_owner", "Gated board", None).unwrap();
        let task = tasks
            .create("task_gate_owner", &Task::new(board.id, board.columns[0].id, "Guarded task", 0))
            .unwrap();

        let err = tasks
            .update(
                "task_gate_stranger",
                task.id,
                &TaskUpdate {
                    title: Some("Hijacked".to_string()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::BoardNotFound)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_delete_renumbers_column(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_delete_owner", "Delete board", None).unwrap();
        let backlog = board.columns[0].id;
        for title in ["T1", "T2", "T3"] {
            tasks
                .create("task_delete_owner", &Task::new(board.id, backlog, title, 0))
                .unwrap();
        }
        let board = boards.fetch("task_delete_owner", board.id).unwrap().unwrap();
        let middle = board.columns[0].tasks[1].id;

        tasks.delete("task_delete_owner", middle).unwrap();

        let board = boards.fetch("task_delete_owner", board.id).unwrap().unwrap();
        assert_eq!(task_titles(&board, 0), vec!["T1", "T3"]);
        assert_eq!(board.columns[0].tasks[0].position, 0);
        assert_eq!(board.columns[0].tasks[1].position, 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_reorder_moves_across_columns(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_reorder_owner", "Reorder board", None).unwrap();
        let backlog = board.columns[0].id;
        let done = board.columns[3].id;
        for title in ["T1", "T2", "T3"] {
            tasks
                .create("task_reorder_owner", &Task::new(board.id, backlog, title, 0))
                .unwrap();
        }
        let board = boards.fetch("task_reorder_owner", board.id).unwrap().unwrap();
        let backlog_tasks = &board.columns[0].tasks;

        // Move T2 to the head of Done, complete flattened ordering
        let request = ReorderTasksRequest {
            board_id: board.id,
            tasks: vec![
                TaskOrder {
                    id: backlog_tasks[1].id,
                    column_id: done,
                    position: 0,
                },
                TaskOrder {
                    id: backlog_tasks[0].id,
                    column_id: backlog,
                    position: 0,
                },
                TaskOrder {
                    id: backlog_tasks[2].id,
                    column_id: backlog,
                    position: 1,
                },
            ],
        };
        tasks.reorder("task_reorder_owner", &request).unwrap();

        let board = boards.fetch("task_reorder_owner", board.id).unwrap().unwrap();
        assert_eq!(task_titles(&board, 0), vec!["T1", "T3"]);
        assert_eq!(task_titles(&board, 3), vec!["T2"]);
        assert_eq!(board.columns[3].tasks[0].column_id, done);
        assert_eq!(board.columns[3].tasks[0].position, 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_reorder_rejects_foreign_task(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_foreign_owner", "Main board", None).unwrap();
        let other = boards.create("task_foreign_owner", "Other board", None).unwrap();
        let mine = tasks
            .create("task_foreign_owner", &Task::new(board.id, board.columns[0].id, "Mine", 0))
            .unwrap();
        let theirs = tasks
            .create("task_foreign_owner", &Task::new(other.id, other.columns[0].id, "Theirs", 0))
            .unwrap();

        let err = tasks
            .reorder(
                "task_foreign_owner",
                &ReorderTasksRequest {
                    board_id: board.id,
                    tasks: vec![
                        TaskOrder {
                            id: mine.id,
                            column_id: board.columns[0].id,
                            position: 1,
                        },
                        TaskOrder {
                            id: theirs.id,
                            column_id: board.columns[0].id,
                            position: 0,
                        },
                    ],
                },
            )
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::TaskNotFound)));

        // Zero mutation on either board
        let board = boards.fetch("task_foreign_owner", board.id).unwrap().unwrap();
        let other = boards.fetch("task_foreign_owner", other.id).unwrap().unwrap();
        assert_eq!(board.columns[0].tasks[0].position, 0);
        assert_eq!(other.columns[0].tasks[0].position, 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_reorder_rejects_cross_board_column(_ctx: &mut TaskTestContext) {
        let mut boards = Boards::new().unwrap();
        let mut tasks = Tasks::new().unwrap();

        let board = boards.create("task_badcol_owner", "Main board", None).unwrap();
        let other = boards.create("task_badcol_owner", "Other board", None).unwrap();
        let task = tasks
            .create("task_badcol_owner", &Task::new(board.id, board.columns[0].id, "Stay home", 0))
            .unwrap();

        let foreign_column = other.columns[0].id;
        let err = tasks
            .reorder(
                "task_badcol_owner",
                &ReorderTasksRequest {
                    board_id: board.id,
                    tasks: vec![TaskOrder {
                        id: task.id,
                        column_id: foreign_column,
                        position: 0,
                    }],
                },
            )
            .unwrap_err();

        match err.downcast_ref::<StoreError>() {
            Some(StoreError::InvalidColumn(id)) => assert_eq!(*id, foreign_column),
            other => panic!("expected invalid column error, got {:?}", other),
        }

        let board = boards.fetch("task_badcol_owner", board.id).unwrap().unwrap();
        assert_eq!(board.columns[0].tasks[0].column_id, board.columns[0].id);
    }
}
