use toshi_config::Postgres;
use toshi_storage::{Error, db::Db, models::NewUser, queries};
use toshi_testkit::TestDatabase;

async fn bootstrapped_db() -> Option<(TestDatabase, Db)> {
	let test_db =
		TestDatabase::from_env("storage").await.expect("Failed to create test database.")?;
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	Some((test_db, db))
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set TOSHI_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some((test_db, db)) = bootstrapped_db().await else {
		return;
	};

	db.ensure_schema().await.expect("Failed to re-run schema bootstrap.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'users'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set TOSHI_PG_DSN to run."]
async fn inserts_apply_column_defaults() {
	let Some((test_db, db)) = bootstrapped_db().await else {
		return;
	};
	let toshi_id = "0x0000000000000000000000000000000000000001";

	queries::insert_user(&db, &NewUser::new(toshi_id).username("bobsmith"))
		.await
		.expect("Failed to insert user.");

	let (active, is_public, review_count): (bool, bool, i32) = sqlx::query_as(
		"SELECT active, is_public, review_count FROM users WHERE toshi_id = $1",
	)
	.bind(toshi_id)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to read user.");

	assert!(active);
	assert!(!is_public);
	assert_eq!(review_count, 0);
	assert_eq!(queries::count_users(&db.pool).await.expect("Failed to count users."), 1);
	assert!(queries::set_active(&db.pool, toshi_id, false).await.expect("Failed to deactivate."));

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set TOSHI_PG_DSN to run."]
async fn duplicate_username_is_a_conflict() {
	let Some((test_db, db)) = bootstrapped_db().await else {
		return;
	};
	let users = vec![
		NewUser::new("0x0000000000000000000000000000000000000001").username("bobsmith"),
		NewUser::new("0x0000000000000000000000000000000000000002").username("bobsmith"),
	];
	let err = queries::insert_users(&db, &users).await.expect_err("Expected conflict.");

	assert!(matches!(err, Error::Conflict(_)), "Unexpected error: {err:?}");
	assert_eq!(queries::count_users(&db.pool).await.expect("Failed to count users."), 0);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set TOSHI_PG_DSN to run."]
async fn bulk_insert_spans_batches() {
	let Some((test_db, db)) = bootstrapped_db().await else {
		return;
	};
	let users: Vec<NewUser> = (0..2_500)
		.map(|i| NewUser::new(format!("0x{i:040x}")).username(format!("user{i}")))
		.collect();

	queries::insert_users(&db, &users).await.expect("Failed to insert users.");

	assert_eq!(queries::count_users(&db.pool).await.expect("Failed to count users."), 2_500);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
