use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use push4_emitter::{deployed_layout, render_proxy, render_push4, DEFAULT_AUTHORIZED_ADDRESS};
use push4_mining::{MinerWorker, MiningOrchestrator};
use push4_selectors::{ImageData, PixelSelector};
use push4_store::{FunctionRecord, ProgressLedger, SelectorCache};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod verify;

const CACHE_FILE: &str = "mined-selectors-db.json";
const PROGRESS_FILE: &str = "selector-mining-progress.json";
const METADATA_FILE: &str = "selector-contract-metadata.json";

#[derive(Parser)]
#[command(name = "push4")]
#[command(about = "Selector mining pipeline for on-chain pixel art", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine selectors for a pixel grid and emit the PUSH4 contract
    Generate(GenerateArgs),

    /// Emit the proxy lookup contract for a known selector layout
    Proxy(ProxyArgs),

    /// Re-verify mined selectors against their recorded signatures
    Verify(VerifyArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Pixel data JSON file ({width, height, pixels})
    #[arg(long, default_value = "data/pixel-data.json")]
    pixels: PathBuf,

    /// Output path for the generated contract
    #[arg(long, default_value = "src/PUSH4.sol")]
    out: PathBuf,

    /// Directory holding the accelerated miner
    #[arg(long, default_value = "function-selector-miner-cuda")]
    miner_dir: PathBuf,

    /// Directory for the cache, progress, and metadata files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Authorized caller address baked into the contract
    #[arg(long, default_value = DEFAULT_AUTHORIZED_ADDRESS)]
    address: String,
}

#[derive(Args)]
struct ProxyArgs {
    /// Pixel data JSON file ({width, height, pixels})
    #[arg(long, default_value = "data/pixel-data.json")]
    pixels: PathBuf,

    /// Output path for the generated contract
    #[arg(long, default_value = "src/PUSH4ProxyTemplate.sol")]
    out: PathBuf,

    /// Selector layout file (JSON array of 0x-prefixed hexes); defaults to
    /// the deployed PUSH4 layout
    #[arg(long)]
    layout: Option<PathBuf>,
}

#[derive(Args)]
struct VerifyArgs {
    /// Directory holding the progress file to verify
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional selector list to compare against (one 0x-hex per line)
    #[arg(long)]
    selectors: Option<PathBuf>,
}

/// Metadata emitted alongside the contract, mirroring the pixel input and
/// the resolved function table.
#[derive(Serialize)]
struct Metadata {
    width: usize,
    height: usize,
    pixels: Vec<String>,
    selectors: Vec<String>,
    functions: Vec<FunctionRecord>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    // Interruption is a clean shutdown point: every resolved selector has
    // already been flushed, so there is nothing left to save here.
    let outcome = tokio::select! {
        outcome = dispatch(cli.command) => outcome,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted. Progress has been saved; run the tool again to resume.");
            std::process::exit(1);
        }
    };

    if let Err(err) = outcome {
        eprintln!("Error: {err:#}");
        eprintln!("Progress has been saved. Run the tool again to resume.");
        std::process::exit(1);
    }
    Ok(())
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Proxy(args) => run_proxy(args).await,
        Commands::Verify(args) => run_verify(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    log::info!("using authorized address: {}", args.address);

    let image = ImageData::load(&args.pixels)
        .with_context(|| format!("Failed to read pixel data from {}", args.pixels.display()))?;
    log::info!(
        "image: {}x{} pixels, {} selectors total",
        image.width,
        image.height,
        image.pixels.len()
    );

    let targets = image.derive_targets().context("Invalid pixel data")?;

    let mut cache = SelectorCache::load(args.data_dir.join(CACHE_FILE)).await;
    let ledger = ProgressLedger::new(args.data_dir.join(PROGRESS_FILE));

    let worker = MinerWorker::new(&args.miner_dir);
    let mut orchestrator = MiningOrchestrator::new(worker);
    let functions = orchestrator
        .resolve_all(&targets, &mut cache, &ledger)
        .await?;

    log::info!("generating Solidity contract");
    let contract = render_push4(&functions, &args.address);
    backup_existing(&args.out).await?;
    write_artifact(&args.out, &contract).await?;

    let metadata = Metadata {
        width: image.width,
        height: image.height,
        pixels: image.pixels.clone(),
        selectors: targets.iter().map(PixelSelector::to_prefixed_hex).collect(),
        functions: functions.clone(),
    };
    let metadata_path = args.data_dir.join(METADATA_FILE);
    tokio::fs::create_dir_all(&args.data_dir).await?;
    tokio::fs::write(&metadata_path, serde_json::to_vec_pretty(&metadata)?)
        .await
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

    log::info!(
        "contract generated: {} ({} functions, {} bytes of pixel data)",
        args.out.display(),
        functions.len(),
        image.pixels.len() * 4
    );
    Ok(())
}

async fn run_proxy(args: ProxyArgs) -> Result<()> {
    let image = ImageData::load(&args.pixels)
        .with_context(|| format!("Failed to read pixel data from {}", args.pixels.display()))?;

    let layout = match &args.layout {
        Some(path) => load_layout(path)?,
        None => deployed_layout(),
    };
    log::info!(
        "rendering proxy lookup for {} selectors over a {}x{} grid",
        layout.len(),
        image.width,
        image.height
    );

    let contract = render_proxy(&image, &layout)?;
    backup_existing(&args.out).await?;
    write_artifact(&args.out, &contract).await?;

    log::info!("proxy contract generated: {}", args.out.display());
    Ok(())
}

async fn run_verify(args: VerifyArgs) -> Result<()> {
    let ledger = ProgressLedger::new(args.data_dir.join(PROGRESS_FILE));
    let snapshot = ledger.load().await.with_context(|| {
        format!(
            "no mining progress found in {}; run `push4 generate` first",
            args.data_dir.display()
        )
    })?;

    let mut report = verify::check_snapshot(&snapshot);
    if let Some(path) = &args.selectors {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read selector list from {}", path.display()))?;
        let external: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        report.comparison = Some(verify::compare(&snapshot.selectors_data, &external));
    }

    println!(
        "Checked {} mined selectors ({} targets in run)",
        report.checked, snapshot.total
    );
    for failure in &report.hash_failures {
        println!("HASH MISMATCH: {failure}");
    }
    for name in &report.duplicate_names {
        println!("DUPLICATE NAME: {name}");
    }

    if let Some(comparison) = &report.comparison {
        println!(
            "Comparison: {} correct, {} false positives, {} missing",
            comparison.correct.len(),
            comparison.false_positives.len(),
            comparison.missing.len()
        );
        for selector in &comparison.false_positives {
            println!("FALSE POSITIVE: 0x{selector}");
            for line in verify::describe_false_positive(selector, &snapshot.selectors_data) {
                println!("{line}");
            }
        }
        for selector in &comparison.missing {
            println!("MISSING: 0x{selector}");
        }
    }

    if report.is_clean() {
        println!("All selectors verified successfully.");
        Ok(())
    } else {
        println!("Verification found discrepancies.");
        std::process::exit(1);
    }
}

fn load_layout(path: &Path) -> Result<Vec<PixelSelector>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout from {}", path.display()))?;
    let hexes: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Layout {} is not a JSON array of hex strings", path.display()))?;
    hexes
        .iter()
        .enumerate()
        .map(|(i, hex)| {
            PixelSelector::from_hex(i, hex)
                .with_context(|| format!("Layout entry {i} is not a selector: {hex:?}"))
        })
        .collect()
}

/// Keep a copy of any pre-existing artifact before overwriting it.
async fn backup_existing(path: &Path) -> Result<()> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }
    let mut backup = path.as_os_str().to_os_string();
    backup.push(".backup");
    let backup = PathBuf::from(backup);
    tokio::fs::rename(path, &backup)
        .await
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    log::info!("backed up existing artifact to {}", backup.display());
    Ok(())
}

async fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
