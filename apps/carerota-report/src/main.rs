// crates.io
use clap::Parser;
// self
use carerota_report::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	carerota_report::run(args)
}
