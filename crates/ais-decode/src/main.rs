use ais_core::prelude::*;
use clap::Parser;
use color_eyre::eyre::Result;

#[derive(Debug, Parser)]
#[command(
    name = "ais-decode",
    version,
    about = "Decode AIS VHF demodulated raw I/Q samples"
)]
struct Options {
    /// Address of the raw I/Q sample source (RTL-SDR-over-TCP convention)
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port of the sample source
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Emit newline-delimited JSON instead of the aligned text table
    #[arg(long, default_value = "false")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let options = Options::parse();
    let server_address = format!("{}:{}", options.host, options.port);

    let source = TcpSource::connect(&server_address).await?;
    let mut sink = if options.json {
        TextSink::new_json(std::io::stdout())
    } else {
        TextSink::new(std::io::stdout())
    };

    let orchestrator = Orchestrator::new();
    orchestrator.run(source, &mut sink).await?;

    Ok(())
}
