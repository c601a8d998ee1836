use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pxt", about = "Proxy card sheet tools", version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log slot and cut line coordinates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate print-ready proxy card PDFs from a list of image URLs
    Generate(GenerateArgs),

    /// Write the default configuration as JSON
    InitConfig {
        /// Output JSON file
        path: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// File with one image URL per line ('#' starts a comment)
    #[arg(short, long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Use the built-in sample cards instead of an input file
    #[arg(long)]
    sample: bool,

    /// Directory the PDF files are written to
    #[arg(short, long, default_value = "proxy_cards")]
    output_dir: PathBuf,

    /// JSON configuration file providing the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// How images are fitted into card slots
    #[arg(long, value_enum)]
    fit: Option<FitArg>,

    /// What to do when an image cannot be downloaded
    #[arg(long, value_enum)]
    on_failure: Option<FailureArg>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Card width in mm
    #[arg(long)]
    card_width: Option<f32>,

    /// Card height in mm
    #[arg(long)]
    card_height: Option<f32>,

    /// Page margin in mm (uniform on all sides)
    #[arg(long)]
    margin: Option<f32>,

    /// Gap between cards in mm
    #[arg(long)]
    gap: Option<f32>,

    /// Pages per output file
    #[arg(long)]
    pages_per_file: Option<usize>,

    /// Download timeout in seconds (also the wait between retries)
    #[arg(long)]
    timeout: Option<f32>,

    /// Retries after a failed download
    #[arg(long)]
    retries: Option<usize>,

    /// Pause between downloads in seconds
    #[arg(long)]
    delay: Option<f32>,

    /// Leave out the dashed cut lines
    #[arg(long)]
    no_cut_lines: bool,

    /// Show statistics only, don't download or generate anything
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    Stretch,
    Crop,
}

#[derive(Clone, Copy, ValueEnum)]
enum FailureArg {
    Abort,
    Placeholder,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl From<FitArg> for proxy_pdf::FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Stretch => Self::Stretch,
            FitArg::Crop => Self::Crop,
        }
    }
}

impl From<FailureArg> for proxy_pdf::FailurePolicy {
    fn from(arg: FailureArg) -> Self {
        match arg {
            FailureArg::Abort => Self::Abort,
            FailureArg::Placeholder => Self::Placeholder,
        }
    }
}

impl From<PaperArg> for proxy_pdf::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

fn seconds_to_ms(seconds: f32) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

impl GenerateArgs {
    async fn options(&self) -> Result<proxy_pdf::ProxyOptions> {
        let mut options = match &self.config {
            Some(path) => proxy_pdf::ProxyOptions::load(path).await?,
            None => proxy_pdf::ProxyOptions::default(),
        };

        if let Some(fit) = self.fit {
            options.fit_mode = fit.into();
        }
        if let Some(on_failure) = self.on_failure {
            options.on_fetch_failure = on_failure.into();
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(width) = self.card_width {
            options.card_width_mm = width;
        }
        if let Some(height) = self.card_height {
            options.card_height_mm = height;
        }
        if let Some(margin) = self.margin {
            options.margin_mm = margin;
        }
        if let Some(gap) = self.gap {
            options.gap_mm = gap;
        }
        if let Some(pages) = self.pages_per_file {
            options.pages_per_file = pages;
        }
        if let Some(timeout) = self.timeout {
            options.fetch_timeout_ms = seconds_to_ms(timeout);
        }
        if let Some(retries) = self.retries {
            options.fetch_max_retries = retries;
        }
        if let Some(delay) = self.delay {
            options.download_delay_ms = seconds_to_ms(delay);
        }
        if self.no_cut_lines {
            options.cut_lines = false;
        }

        options.validate()?;
        Ok(options)
    }

    async fn urls(&self) -> Result<Vec<String>> {
        let urls = match &self.input {
            Some(path) => {
                let urls = proxy_pdf::read_url_file(path).await?;
                log::info!("Read {} URL(s) from {}", urls.len(), path.display());
                urls
            }
            None => {
                log::info!("Using the built-in sample cards");
                proxy_pdf::sample_urls()
            }
        };

        if urls.is_empty() {
            bail!("No image URLs given");
        }
        Ok(urls)
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Generate(args) => {
            let options = args.options().await?;
            let urls = args.urls().await?;

            // Calculate and show statistics
            let stats = proxy_pdf::calculate_statistics(urls.len(), &options)?;
            println!("Proxy Sheet Statistics:");
            println!("  Cards: {}", stats.cards);
            println!("  Pages: {}", stats.pages);
            println!("  Files: {}", stats.documents);
            println!("  Pages per file: {:?}", stats.pages_per_document);
            println!("  Empty slots on last page: {}", stats.empty_slots);

            if args.stats_only {
                return Ok(());
            }

            let report = proxy_pdf::generate(&urls, &options, &args.output_dir).await?;

            println!("Generated {} file(s):", report.documents.len());
            for doc in &report.documents {
                println!(
                    "  {}: {} page(s), {:.1}MB ({} bytes)",
                    doc.path.display(),
                    doc.page_count,
                    proxy_pdf::megabytes(doc.byte_size),
                    doc.byte_size
                );
            }
            println!(
                "Total: {} file(s), {} page(s), {:.1}MB ({} bytes) → {}",
                report.documents.len(),
                report.total_pages,
                proxy_pdf::megabytes(report.total_bytes),
                report.total_bytes,
                args.output_dir.display()
            );
        }

        Commands::InitConfig { path } => {
            proxy_pdf::ProxyOptions::default().save(&path).await?;
            println!("Default configuration → {}", path.display());
        }
    }

    Ok(())
}
