use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = docqa_api::Args::parse();
	docqa_api::run(args).await
}
