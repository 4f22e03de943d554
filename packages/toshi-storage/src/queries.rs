use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::{Error, Result, db::Db, models::NewUser};

// Nine binds per row keeps each batch well under the Postgres limit of 65,535 parameters.
const INSERT_BATCH_ROWS: usize = 1_000;

pub async fn insert_user(db: &Db, user: &NewUser) -> Result<()> {
	insert_users(db, std::slice::from_ref(user)).await
}

pub async fn insert_users(db: &Db, users: &[NewUser]) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	for batch in users.chunks(INSERT_BATCH_ROWS) {
		let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
			"INSERT INTO users (toshi_id, username, name, payment_address, is_app, is_public, active, reputation_score, review_count) ",
		);

		builder.push_values(batch, |mut row, user| {
			row.push_bind(user.toshi_id.as_str())
				.push_bind(user.username.as_deref())
				.push_bind(user.name.as_deref())
				.push_bind(user.payment_address.as_deref())
				.push_bind(user.is_app)
				.push_bind(user.is_public)
				.push_bind(user.active)
				.push_bind(user.reputation_score)
				.push_bind(user.review_count);
		});
		builder.build().execute(&mut *tx).await.map_err(map_unique_violation)?;
	}

	tx.commit().await?;

	Ok(())
}

pub async fn set_active<'e, E>(executor: E, toshi_id: &str, active: bool) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("UPDATE users SET active = $1, updated = now() WHERE toshi_id = $2")
		.bind(active)
		.bind(toshi_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() == 1)
}

pub async fn count_users<'e, E>(executor: E) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count = sqlx::query_scalar("SELECT count(*) FROM users").fetch_one(executor).await?;

	Ok(count)
}

fn map_unique_violation(err: sqlx::Error) -> Error {
	if let Some(db_err) = err.as_database_error()
		&& db_err.is_unique_violation()
	{
		return Error::Conflict(db_err.constraint().unwrap_or("users").to_string());
	}

	Error::Sqlx(err)
}
