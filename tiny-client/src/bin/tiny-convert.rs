//! Command-line front for the converter: uploads one WEBP file to a tiny
//! tools server and saves the result next to it as `<name>.svg`.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiny_client::{
    Converter, DirectoryDownloadSink, HttpConversionApi, SelectedFile,
};
use tiny_core::detect_content_type;

#[derive(Parser, Debug)]
#[command(name = "tiny-convert")]
#[command(about = "Convert a WEBP image to SVG using a tiny tools server")]
struct Cli {
    /// WEBP file to convert
    file: PathBuf,

    /// Base URL of the server
    #[arg(
        long,
        env = "TINY_TOOLS_SERVER",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Directory for the converted file (defaults to the input's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Request timeout, e.g. `30s` or `2m`
    #[arg(
        long,
        default_value = "30s",
        value_parser = humantime::parse_duration
    )]
    timeout: Duration,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let file = read_selection(&cli.file).await?;
    let out_dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None => cli
            .file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default(),
    };

    let api = HttpConversionApi::new(&cli.server, cli.timeout)?;
    let sink = DirectoryDownloadSink::new(out_dir).overwrite(cli.force);
    let mut converter = Converter::new(api, sink);

    converter
        .select(vec![file])
        .with_context(|| format!("cannot convert {}", cli.file.display()))?;

    info!(
        server = %cli.server,
        timeout = %humantime::format_duration(cli.timeout),
        "converting {}",
        cli.file.display()
    );

    match converter.submit().await {
        Some(Ok(path)) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(Err(err)) => Err(err.into()),
        None => bail!("nothing to convert"),
    }
}

async fn read_selection(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?
        .to_string();
    let content_type = detect_content_type(&bytes).map(str::to_owned);

    Ok(SelectedFile::new(name, content_type, bytes))
}
