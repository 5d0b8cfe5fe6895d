mod cli;

use std::process::ExitCode;

use cli::{Behavior, USAGE};
use tqutil_base32::{Decoder, Encoder};
use tqutil_core::UtilConfig;
use tqutil_tsid::TsidGenerator;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli::parse(std::env::args().skip(1)) {
        Behavior::Help => print!("{USAGE}"),
        Behavior::Version => println!("tqutil {}", env!("CARGO_PKG_VERSION")),
        Behavior::Tsid(count) => {
            let config_path =
                std::env::var("TQUTIL_CONFIG").unwrap_or_else(|_| "config/tqutil.toml".to_string());
            let config = UtilConfig::load(&config_path)?;
            let generator = TsidGenerator::from_config(&config.tsid);
            tracing::info!("generating {count} TSIDs on node {}", generator.node());
            for _ in 0..count {
                println!("{}", generator.generate()?);
            }
        }
        Behavior::Encode(text) => println!("{}", Encoder.encode_to_string(text)),
        Behavior::Decode(text) => println!("{}", Decoder.decode_to_string(text)?),
        Behavior::Number(text) => println!("{}", Decoder.decode_to_number(text)?),
        Behavior::Invalid(reason) => {
            eprintln!("{reason}\n\n{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
