//! notemark CLI - render Markdown + LaTeX note content from the terminal

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use notemark::{
    check_content_with_options, diagnostics::format_diagnostics, process_math_with_options,
    render_block_with_options, render_inline_with_options, to_plain_text, RenderOptions,
    RenderResult, Run,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, IsTerminal, Read, Write};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "notemark")]
#[command(version)]
#[command(about = "Render Markdown with embedded LaTeX math to a styled text tree", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Render as a single inline line, skipping block classification
    #[arg(long)]
    inline: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Join multi-line `$$` / `\[` display math into one block
    #[arg(long)]
    join_display_math: bool,

    /// Maximum nesting depth for structural math rewrites
    #[arg(long)]
    max_math_depth: Option<usize>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a LaTeX math fragment (without delimiters) to Unicode
    Math {
        /// LaTeX source, e.g. '\frac{1}{2}'
        latex: String,
    },

    /// Check content for spots that will render in a degraded way
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Plain text with list markers
    Text,
    /// Render tree as JSON
    Json,
}

#[cfg(feature = "cli")]
fn main() -> RenderResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = RenderOptions::default().with_join_display_math(cli.join_display_math);
    if let Some(depth) = cli.max_math_depth {
        options = options.with_max_math_depth(depth);
    }

    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &options);
    }

    let input = read_input(cli.input_file.as_deref())?;
    tracing::debug!(bytes = input.len(), inline = cli.inline, "rendering input");

    let rendered = if cli.inline {
        let runs = render_inline_with_options(&input, &options);
        match cli.format {
            Format::Text => runs.iter().map(Run::text).collect::<String>(),
            Format::Json => serde_json::to_string_pretty(&runs)?,
        }
    } else {
        let blocks = render_block_with_options(&input, &options);
        match cli.format {
            Format::Text => to_plain_text(&blocks),
            Format::Json => serde_json::to_string_pretty(&blocks)?,
        }
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", rendered))?;
            eprintln!("✓ Rendered to {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, options: &RenderOptions) -> RenderResult<()> {
    match cmd {
        Commands::Math { latex } => {
            println!("{}", process_math_with_options(&latex, options));
        }

        Commands::Check { input, no_color } => {
            let content = read_input(input.as_deref())?;
            let result = check_content_with_options(&content, options);
            let use_color = !no_color && io::stdout().is_terminal();
            println!("{}", format_diagnostics(&result, use_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("notemark - Markdown + LaTeX math renderer");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Blocks:");
            println!("  headers, paragraphs, blockquotes, rules");
            println!("  bullet, numbered and task list items");
            println!("  fenced code blocks");
            println!();
            println!("Inline:");
            println!("  **bold**, *italic*, ***both***, `code`, ~~strike~~");
            println!("  math in $..$, $$..$$, \\(..\\), \\[..\\]");
            println!();
            println!("Math:");
            println!("  fractions, roots, super/subscripts, Greek letters,");
            println!("  {} symbol commands", notemark::symbols::MATH_SYMBOLS.len());
            println!();
        }
    }

    Ok(())
}

/// Read a file, or stdin when no path is given
#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install notemark --features cli");
    eprintln!("  notemark [OPTIONS] [INPUT_FILE]");
}
