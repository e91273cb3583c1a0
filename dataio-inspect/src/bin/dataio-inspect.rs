// Command-line inspector for dataio byte formats.
// - hex / unpack / bidi: decode bytes given as hex
// - pack: encode values as packed longs
// - parity-set / parity-get: stamp or validate pointer check bits
use anyhow::Result;
use clap::Parser;
use dataio_inspect::common::{cli, inspect, utils};
use log::info;

fn main() -> Result<()> {
    let args = cli::InspectCli::parse();
    utils::init_logging(&args.log_level);
    info!("running {:?}", args.command);

    let report = inspect::run(&args.command)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
