use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = toshi_api::Args::parse();

	toshi_api::run(args).await
}
