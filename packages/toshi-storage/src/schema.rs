pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

/// Inlines the `\ir` directives of `init.sql` so the schema can be sent without `psql`.
fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		match line.trim().strip_prefix("\\ir ").map(str::trim) {
			Some("00_extensions.sql") => out.push_str(include_str!("../../../sql/00_extensions.sql")),
			Some("tables/001_users.sql") =>
				out.push_str(include_str!("../../../sql/tables/001_users.sql")),
			_ => out.push_str(line),
		}

		out.push('\n');
	}

	out
}
