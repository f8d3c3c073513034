#[cfg(test)]
mod tests {
    use staffdesk::db::db::Db;
    use staffdesk::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            MigrationTestContext {
                path: temp_dir.path().join("staffdesk.db"),
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_init(ctx: &mut MigrationTestContext) {
        let db = Db::init(&ctx.path).unwrap();

        assert_eq!(get_db_version(&db.conn).unwrap(), 2);
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.path).unwrap();

        assert_eq!(get_db_version(&db.conn).unwrap(), 0);
        assert!(needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut db = Db::open(&ctx.path).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut db.conn).unwrap();

        let history = manager.get_migration_history(&db.conn).unwrap();
        let names: Vec<(u32, &str)> = history.iter().map(|(version, name, _)| (*version, name.as_str())).collect();
        assert_eq!(names, vec![(1, "create_tables"), (2, "add_lookup_indexes")]);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unreadable_migrations_table_is_an_error(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.path).unwrap();
        db.conn.execute("CREATE TABLE migrations (id INTEGER PRIMARY KEY)", []).unwrap();

        assert!(get_db_version(&db.conn).is_err());
        assert!(needs_migration(&db.conn).is_err());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut db = Db::open(&ctx.path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut db.conn).unwrap();
        manager.run_migrations(&mut db.conn).unwrap();

        assert_eq!(manager.get_migration_history(&db.conn).unwrap().len(), 2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_tables_exist(ctx: &mut MigrationTestContext) {
        let db = Db::init(&ctx.path).unwrap();

        for table in ["user", "position", "department", "employee", "count_dep_pos_employee"] {
            let count: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1", [table], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }
}
