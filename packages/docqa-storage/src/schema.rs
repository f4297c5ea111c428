pub fn render_schema() -> String {
	let mut out = String::new();

	out.push_str(include_str!("../../../sql/tables/001_documents.sql"));
	out.push('\n');
	out.push_str(include_str!("../../../sql/tables/002_query_history.sql"));
	out.push('\n');
	out.push_str(include_str!("../../../sql/tables/003_vectorize_outbox.sql"));
	out.push('\n');

	out
}
