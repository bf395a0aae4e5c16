use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::info;

use jardiet::bundle::JAR_EXTENSION;
use jardiet::model::{CLASS_EXTENSION, SOURCE_EXTENSION};
use jardiet::{
    ClassArtifact, ClassName, Config, ConcurrentSourceResolver, Files, IndexedStrategy,
    JarExploder, JarMaker, LinearStrategy, MinimizationResult, MinimizationStrategy,
    MinimizeOptions, ReportFormat, Reporter, SourceArtifact, UnanimousMatcher,
};

/// jardiet - Shrink Java library jars by tree-shaking unused classes
#[derive(Parser, Debug)]
#[command(name = "jardiet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the Java sources (defaults to the configured one)
    sources: Option<PathBuf>,

    /// Directory holding the library jars
    #[arg(short, long)]
    libs: Option<PathBuf>,

    /// Path of the minimized output jar
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimization strategy
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Qualified class name to keep even when unreferenced (repeatable)
    #[arg(long, value_name = "CLASS")]
    force_include: Vec<String>,

    /// Jar whose classes are kept wholesale (repeatable)
    #[arg(long, value_name = "JAR")]
    force_include_jar: Vec<PathBuf>,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Report file (for json format)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Working directory for extracted jars (linear strategy)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Seconds to wait for the source resolution batch
    #[arg(long)]
    timeout: Option<u64>,

    /// Worker threads for source resolution (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Query a trie index built over the library jars
    Indexed,
    /// Scan a candidate pool of extracted class files
    Linear,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Terminal,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("jardiet v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_minimization(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(Path::new("."))?
    };

    // CLI flags override the file
    if let Some(sources) = &cli.sources {
        config.sources = sources.clone();
    }
    if let Some(libs) = &cli.libs {
        config.libs = libs.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = match strategy {
            Strategy::Indexed => "indexed".to_string(),
            Strategy::Linear => "linear".to_string(),
        };
    }
    if let Some(timeout) = cli.timeout {
        config.resolve_timeout_secs = timeout;
    }
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(work_dir) = &cli.work_dir {
        config.work_dir = Some(work_dir.clone());
    }
    config.force_include.extend(cli.force_include.clone());
    config
        .force_include_jars
        .extend(cli.force_include_jar.clone());

    Ok(config)
}

fn run_minimization(config: &Config, cli: &Cli) -> Result<()> {
    info!("Discovering sources in {}", config.sources.display());
    let source_files = Files::under(&config.sources)
        .with_extension(SOURCE_EXTENSION)
        .list();
    if source_files.is_empty() {
        println!(
            "{}",
            format!("No Java sources found under {}.", config.sources.display()).yellow()
        );
    }

    let sources: Vec<SourceArtifact> = source_files
        .iter()
        .map(|path| SourceArtifact::from_file(path))
        .collect::<std::result::Result<_, _>>()
        .into_diagnostic()?;

    info!("Discovering libraries in {}", config.libs.display());
    let jars = Files::under(&config.libs)
        .with_extension(JAR_EXTENSION)
        .list();
    info!("Found {} sources and {} jars", sources.len(), jars.len());

    let pool = Arc::new(
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .into_diagnostic()?,
    );
    let resolver = ConcurrentSourceResolver::new(pool)
        .with_timeout(Duration::from_secs(config.resolve_timeout_secs));

    let options = build_options(config)?;

    let spinner = progress_spinner(cli.quiet);
    spinner.set_message("Minimizing...");

    let result = match config.strategy.as_str() {
        "linear" => run_linear(config, resolver, options, sources, jars)?,
        "indexed" => IndexedStrategy::new(resolver)
            .with_options(options)
            .minimize(sources, jars)
            .into_diagnostic()?,
        other => {
            return Err(miette::miette!(
                "unknown strategy {other:?}, expected \"indexed\" or \"linear\""
            ))
        }
    };
    spinner.finish_and_clear();

    JarMaker::new(&config.output)
        .make(result.artifacts())
        .into_diagnostic()
        .wrap_err("could not write the output jar")?;

    let format = match cli.format {
        OutputFormat::Terminal => ReportFormat::Terminal,
        OutputFormat::Json => ReportFormat::Json,
    };
    if !cli.quiet {
        Reporter::new(format, cli.report.clone()).report(&result, &config.output)?;
    }
    Ok(())
}

fn run_linear(
    config: &Config,
    resolver: ConcurrentSourceResolver,
    options: MinimizeOptions,
    sources: Vec<SourceArtifact>,
    jars: Vec<PathBuf>,
) -> Result<MinimizationResult> {
    let work_dir = match &config.work_dir {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join("jardiet-work"),
    };

    info!("Extracting {} jars to {}", jars.len(), work_dir.display());
    let exploded = JarExploder::new(&work_dir)
        .explode_all(&jars)
        .into_diagnostic()?;

    let mut candidates: Vec<ClassArtifact> = Vec::new();
    for jar in &exploded {
        for path in Files::under(&jar.extracted_to)
            .with_extension(CLASS_EXTENSION)
            .list()
        {
            let file_name = path.file_name().map(|n| n.to_string_lossy());
            if file_name.as_deref() == Some("module-info.class")
                || file_name.as_deref() == Some("package-info.class")
            {
                continue;
            }
            if path.strip_prefix(&jar.extracted_to).is_ok_and(|rel| {
                rel.components().next().is_some_and(|c| c.as_os_str() == "META-INF")
            }) {
                continue;
            }
            candidates.push(ClassArtifact::from_file(&path).into_diagnostic()?);
        }
    }

    LinearStrategy::new(UnanimousMatcher::standard(), resolver)
        .with_options(options)
        .minimize(sources, candidates)
        .into_diagnostic()
}

fn build_options(config: &Config) -> Result<MinimizeOptions> {
    let mut options = MinimizeOptions::default();
    for raw in &config.force_include {
        let name = ClassName::new(raw.clone())
            .into_diagnostic()
            .wrap_err_with(|| format!("invalid --force-include class name {raw:?}"))?;
        options = options.force_class(name);
    }
    for jar in &config.force_include_jars {
        options = options.force_jar(jar);
    }
    Ok(options)
}

fn progress_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
