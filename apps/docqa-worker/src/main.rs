use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = docqa_worker::Args::parse();
	docqa_worker::run(args).await
}
