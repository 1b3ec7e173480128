use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use markerpick::api;
use markerpick::assets::{AssetCategory, AssetLoader};
use markerpick::models::AppConfig;
use markerpick::server;
use markerpick::services::ColorAnalysis;

#[derive(Parser)]
#[command(name = "markerpick")]
#[command(about = "Click a pixel, get the closest Copic marker colors")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Rank the catalog against a color from the terminal
    Match {
        /// Color as RRGGBB or RGB, '#' optional
        #[arg(long, conflicts_with = "url")]
        hex: Option<String>,

        /// Image URL to sample
        #[arg(long, requires_all = ["x", "y"])]
        url: Option<String>,

        /// Pixel column in the original image
        #[arg(short, long)]
        x: Option<u32>,

        /// Pixel row in the original image
        #[arg(short, long)]
        y: Option<u32>,

        /// Number of markers to list (default from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Print the loaded reference catalog
    Catalog,
    /// Read a name,hex CSV and write it back with precomputed Lab columns
    BuildCatalog {
        /// Input CSV, JSON or Parquet catalog
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, Parquet when it ends in .parquet, otherwise CSV (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract catalog.csv
        #[arg(long)]
        catalog: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
    /// Show configuration and asset sources
    Status,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Markerpick API",
        description = "Closest Copic marker colors for a clicked image pixel",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_load_image,
        api::handle_preview,
        api::handle_pick,
        api::handle_match,
        api::handle_catalog,
    ),
    components(schemas(
        api::LoadImageRequest,
        api::LoadImageResponse,
        api::PickRequest,
        api::PickResponse,
        api::SelectedColor,
        api::PixelPosition,
        api::ColorInfo,
        api::RgbValue,
        api::LabValue,
        api::MatchEntry,
        api::MatchResponse,
        api::CatalogEntry,
        api::CatalogResponse,
    )),
    tags(
        (name = "Images", description = "Image loading and previews"),
        (name = "Picker", description = "Click-to-match"),
        (name = "Catalog", description = "Reference catalog queries")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Match {
            hex,
            url,
            x,
            y,
            count,
        }) => run_match_command(hex, url, x, y, count).await,
        Some(Commands::Catalog) => run_catalog_command().await,
        Some(Commands::BuildCatalog { input, output }) => {
            run_build_catalog_command(&input, output.as_deref())
        }
        Some(Commands::Init {
            config,
            catalog,
            all,
            force,
            list,
        }) => run_init_command(config, catalog, all, force, list),
        Some(Commands::Status) => {
            run_status_command();
            Ok(())
        }
        Some(Commands::Serve) | None => run_server().await,
    }
}

/// Minimal logging for one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "markerpick=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Config from CONFIG_FILE (or embedded), with CATALOG_URL applied
fn load_config() -> AppConfig {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let loader = AssetLoader::new(config_file);
    AppConfig::load_from_assets(&loader).with_catalog_source(std::env::var("CATALOG_URL").ok())
}

/// Rank the catalog against a hex color or an image pixel
async fn run_match_command(
    hex: Option<String>,
    url: Option<String>,
    x: Option<u32>,
    y: Option<u32>,
    count: Option<usize>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let mut config = load_config();
    if let Some(count) = count {
        config.matching.count = count;
    }
    let state = server::create_app_state(config)?;
    let picker = &state.picker;

    let analysis = match (hex, url, x, y) {
        (Some(hex), _, _, _) => {
            let color = hex
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid color '{hex}': {e}"))?;
            picker.analyze(color).await?
        }
        (None, Some(url), Some(x), Some(y)) => {
            let image = picker.load_image(&url).await?;
            let color = image.pixel(x, y).ok_or_else(|| {
                anyhow::anyhow!(
                    "Pixel ({x}, {y}) is outside the {}x{} image",
                    image.viewport.width,
                    image.viewport.height
                )
            })?;
            picker.analyze(color).await?
        }
        _ => anyhow::bail!("Pass either --hex or --url with -x and -y"),
    };

    print_analysis(&analysis);
    Ok(())
}

fn print_analysis(analysis: &ColorAnalysis) {
    let c = analysis.color;
    let lab = analysis.lab;
    println!(
        "Selected {}  rgb({}, {}, {})  Lab({:.2}, {:.2}, {:.2})\n",
        c.to_hex(),
        c.r,
        c.g,
        c.b,
        lab.l,
        lab.a,
        lab.b
    );

    let width = analysis
        .matches
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);
    for (i, m) in analysis.matches.iter().enumerate() {
        println!(
            "  {}. {:<width$}  {}  dE {:.2}",
            i + 1,
            m.name.to_uppercase(),
            m.hex,
            m.distance
        );
    }
}

/// Print the loaded catalog
async fn run_catalog_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let state = server::create_app_state(load_config())?;
    let catalog = state.picker.catalog().await?;

    println!(
        "Catalog: {} ({} entries, {})\n",
        state.picker.catalog_source(),
        catalog.len(),
        catalog.metric().name()
    );
    for entry in catalog.entries() {
        println!(
            "  {:<28} {}  L {:>7.3}  a {:>8.3}  b {:>8.3}",
            entry.name, entry.hex, entry.lab.l, entry.lab.a, entry.lab.b
        );
    }
    Ok(())
}

/// Precompute Lab columns for a catalog file
fn run_build_catalog_command(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    use markerpick::services::{parse_catalog, write_catalog_csv, write_catalog_parquet};

    init_cli_tracing();

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let entries = parse_catalog(&bytes)?;
    if entries.is_empty() {
        anyhow::bail!("{} contains no entries", input.display());
    }

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            if path.extension().is_some_and(|ext| ext == "parquet") {
                write_catalog_parquet(&entries, file)?;
            } else {
                write_catalog_csv(&entries, file)?;
            }
            eprintln!("Wrote {} entries to {}", entries.len(), path.display());
        }
        None => write_catalog_csv(&entries, std::io::stdout().lock())?,
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    catalog: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nCatalog:");
        for f in AssetLoader::list_embedded(AssetCategory::Catalog) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || catalog {
        categories.push(AssetCategory::Catalog);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --catalog");
        eprintln!("\nRun 'markerpick init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let loader = AssetLoader::new(config_file);

    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let catalog_url = std::env::var("CATALOG_URL").ok();

    println!("Markerpick v{VERSION}");
    println!("Click a pixel, get the closest Copic marker colors\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CATALOG_URL = {}",
        catalog_url.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    let config = load_config();

    println!("\nSources:");
    println!("  Config:  {config_source}");
    println!("  Catalog: {}", config.catalog.source);
    println!(
        "  Metric:  {:?}, {} matches",
        config.matching.metric, config.matching.count
    );

    println!("\nCommands:");
    println!("  markerpick serve          Start the HTTP server");
    println!("  markerpick match          Rank a color from the terminal");
    println!("  markerpick catalog        Print the reference catalog");
    println!("  markerpick build-catalog  Precompute Lab columns for a catalog");
    println!("  markerpick init           Extract embedded assets");
    println!("\nRun 'markerpick --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "markerpick=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = load_config();

    tracing::info!(
        config = %std::env::var("CONFIG_FILE").unwrap_or_else(|_| "embedded".to_string()),
        catalog = %config.catalog.source,
        "Configuration sources"
    );

    let state = server::create_app_state(config)?;
    state.preload_catalog().await;

    // OpenAPI documentation (binary only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Markerpick server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
