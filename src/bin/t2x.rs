//! tabledraw CLI - Markdown/HTML/CSV tables → Excalidraw diagrams

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use log::debug;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::Path;
#[cfg(feature = "cli")]
use tabledraw::{
    convert_table_with, detect_format, ConversionResult, LayoutConfig, LayoutOptions, LayoutStyle,
    RandomIds, TableFormat,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "t2x")]
#[command(version)]
#[command(about = "tabledraw - Convert Markdown, HTML and CSV tables to Excalidraw diagrams", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Input table format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Visual style preset (defaults to the config file's style, then hand-drawn)
    #[arg(short, long, value_enum)]
    style: Option<StyleArg>,

    /// Use colors for a dark canvas
    #[arg(long)]
    dark: bool,

    /// Shade the first row as a header
    #[arg(long)]
    header: bool,

    /// TOML file overriding layout options
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for element ids and stroke jitter, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Detect and print the input format without converting
    #[arg(long)]
    detect: bool,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Show version and supported formats
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Auto-detect based on file extension or content
    Auto,
    Markdown,
    Html,
    Csv,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    /// Sketchy strokes and hachure fill
    HandDrawn,
    /// Clean strokes, solid fill and a shaded header row
    Solid,
}

#[cfg(feature = "cli")]
impl From<StyleArg> for LayoutStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::HandDrawn => LayoutStyle::HandDrawn,
            StyleArg::Solid => LayoutStyle::Solid,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> ConversionResult<()> {
    // Handle subcommands first
    if let Some(Commands::Info) = cli.command {
        print_info();
        return Ok(());
    }

    // Read input
    let (input, filename) = match cli.input_file {
        Some(ref path) => (fs::read_to_string(path)?, Some(path.clone())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, None)
        }
    };

    // If detect mode, just print format and exit
    if cli.detect {
        match detect_format(&input) {
            Some(format) => println!("{}", format),
            None => println!("unknown"),
        }
        return Ok(());
    }

    let options = build_options(&cli)?;
    let mut ids = match cli.seed {
        Some(seed) => RandomIds::from_seed(seed),
        None => RandomIds::new(),
    };
    let timestamp = chrono::Utc::now().timestamp_millis();

    let conversion = match cli.format {
        FormatArg::Auto => match filename.as_deref().and_then(extension_hint) {
            Some(hint) => {
                match convert_table_with(&input, Some(hint), &options, &mut ids, timestamp) {
                    Err(e) if e.is_parse_failure() => {
                        debug!("not a {} table despite the extension, detecting", hint);
                        convert_table_with(&input, None, &options, &mut ids, timestamp)?
                    }
                    result => result?,
                }
            }
            None => convert_table_with(&input, None, &options, &mut ids, timestamp)?,
        },
        forced => convert_table_with(
            &input,
            forced_format(forced),
            &options,
            &mut ids,
            timestamp,
        )?,
    };

    let result = if cli.compact {
        conversion.document.to_json()?
    } else {
        conversion.document.to_json_pretty()?
    };

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", result)?;
            eprintln!(
                "✓ {} table ({} rows x {} columns) written to: {}",
                conversion.format, conversion.rows, conversion.columns, path
            );
        }
        None => {
            println!("{}", result);
        }
    }

    Ok(())
}

/// Resolve layout options: style preset, then config file, then flags
#[cfg(feature = "cli")]
fn build_options(cli: &Cli) -> ConversionResult<LayoutOptions> {
    let config = match cli.config {
        Some(ref path) => LayoutConfig::from_toml(&fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };

    let style = cli
        .style
        .map(LayoutStyle::from)
        .or(config.style)
        .unwrap_or_default();
    let mut options = config.apply_to(style.options())?;

    if cli.dark && options.theme != "dark" {
        options = options.dark();
    }
    if cli.header {
        options = options.with_header();
    }
    Ok(options)
}

#[cfg(feature = "cli")]
fn forced_format(format: FormatArg) -> Option<TableFormat> {
    match format {
        FormatArg::Auto => None,
        FormatArg::Markdown => Some(TableFormat::Markdown),
        FormatArg::Html => Some(TableFormat::Html),
        FormatArg::Csv => Some(TableFormat::Csv),
    }
}

/// Format suggested by the file extension; `.txt` and unknown extensions suggest nothing
#[cfg(feature = "cli")]
fn extension_hint(filename: &str) -> Option<TableFormat> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let hint = TableFormat::from_extension(ext);
    if hint.is_none() && !ext.eq_ignore_ascii_case("txt") {
        debug!("unrecognised extension '.{}', detecting from content", ext);
    }
    hint
}

#[cfg(feature = "cli")]
fn print_info() {
    println!("tabledraw - Convert tables to Excalidraw diagrams");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Input formats:");
    for format in TableFormat::ALL {
        println!("  ✓ {}", format);
    }
    println!();
    println!("Input file extensions: .csv .md .markdown .html .htm .txt");
    println!("Styles: hand-drawn, solid (with --dark and --header)");
    println!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tabledraw --features cli");
    eprintln!("  t2x [OPTIONS] [INPUT_FILE]");
}
