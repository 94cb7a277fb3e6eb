//! texclean CLI - LaTeX to Markdown / Plain Text / HTML

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use texclean::{
    diagnostics::{check_latex_with_symbols, format_diagnostics},
    load_symbols, CleanOptions, ConversionWarning, Download, LatexCleaner, OutputFormat,
    SymbolTable,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "texclean")]
#[command(version)]
#[command(about = "Convert LaTeX expressions to Markdown, Plain Text or HTML", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Use ASCII mnemonics (alpha, <=) instead of Unicode glyphs (α, ≤)
    #[arg(long)]
    ascii: bool,

    /// Extra symbol table (.json, .yaml, .toml or .csv)
    #[arg(short, long)]
    symbols: Option<String>,

    /// Save to converted_output.<ext> in the current directory
    #[arg(long)]
    save: bool,

    /// Check mode - report passthrough commands and stray delimiters without converting
    #[arg(long)]
    check: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check LaTeX for constructs that will not convert cleanly
    Check {
        /// Input file to check
        input: Option<String>,

        /// Extra symbol table
        #[arg(short, long)]
        symbols: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Convert a file (default action)
    Convert {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Use ASCII mnemonics
        #[arg(long)]
        ascii: bool,

        /// Extra symbol table
        #[arg(short, long)]
        symbols: Option<String>,
    },

    /// List the recognized commands
    Symbols {
        /// Extra symbol table to include
        #[arg(short, long)]
        symbols: Option<String>,
    },

    /// Batch convert every .tex file in a directory
    Batch {
        /// Input directory or single file
        input: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: String,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Use ASCII mnemonics
        #[arg(long)]
        ascii: bool,

        /// Extra symbol table
        #[arg(short, long)]
        symbols: Option<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Markdown (unchanged)
    Markdown,
    /// Plain text without `*`, `_` and backticks
    PlainText,
    /// HTML with <br> line breaks
    Html,
}

#[cfg(feature = "cli")]
impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::PlainText => OutputFormat::PlainText,
            Format::Html => OutputFormat::Html,
        }
    }
}

#[cfg(feature = "cli")]
const EMPTY_INPUT_WARNING: &str = "Please enter a LaTeX expression to convert.";

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;
    let symbols = symbol_table(cli.symbols.as_deref());

    // If check mode, analyze and report issues
    if cli.check {
        let result = check_latex_with_symbols(&input, &symbols);
        let output = format_diagnostics(&result, !cli.no_color);
        println!("{}", output);

        // Exit with error code if there are errors
        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let format = OutputFormat::from(cli.format);
    let cleaner = LatexCleaner::with_options(CleanOptions {
        use_unicode: !cli.ascii,
        format,
    })
    .with_symbols(symbols);

    let Some(converted) = cleaner.convert_with_diagnostics(&input) else {
        eprintln!("⚠ {}", EMPTY_INPUT_WARNING);
        std::process::exit(1);
    };

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && converted.has_warnings() {
        print_warnings_to_stderr(&converted.warnings, !cli.no_color);
    }

    // Check strict mode
    if cli.strict && converted.has_warnings() {
        eprintln!(
            "Error: {} conversion warning(s) in strict mode",
            converted.warnings.len()
        );
        std::process::exit(1);
    }

    let download = Download::new(converted.content, format);
    let target = match cli.output {
        Some(path) => Some(PathBuf::from(path)),
        None if cli.save => Some(PathBuf::from(&download.file_name)),
        None => None,
    };

    match target {
        Some(path) => {
            fs::write(&path, &download.data)?;
            if converted.warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path.display());
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path.display(),
                    converted.warnings.len()
                );
            }
        }
        None => {
            println!("{}", download.data);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check {
            input,
            symbols,
            no_color,
        } => {
            let content = read_input(input.as_deref())?;
            let symbols = symbol_table(symbols.as_deref());

            let result = check_latex_with_symbols(&content, &symbols);
            let output = format_diagnostics(&result, !no_color);
            println!("{}", output);

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Convert {
            input,
            output,
            format,
            ascii,
            symbols,
        } => {
            let content = read_input(input.as_deref())?;
            let cleaner = LatexCleaner::with_options(CleanOptions {
                use_unicode: !ascii,
                format: format.into(),
            })
            .with_symbols(symbol_table(symbols.as_deref()));

            let Some(result) = cleaner.convert(&content) else {
                eprintln!("⚠ {}", EMPTY_INPUT_WARNING);
                std::process::exit(1);
            };

            match output {
                Some(path) => {
                    fs::write(&path, &result)?;
                    eprintln!("✓ Output written to: {}", path);
                }
                None => {
                    println!("{}", result);
                }
            }
        }

        Commands::Symbols { symbols } => {
            let table = symbol_table(symbols.as_deref());
            let width = table
                .entries()
                .iter()
                .map(|(name, _)| name.len() + 1)
                .max()
                .unwrap_or(0);
            for (name, symbol) in table.entries() {
                println!(
                    "{:<width$}  {}  {}",
                    format!("\\{}", name),
                    symbol.unicode,
                    symbol.ascii,
                    width = width
                );
            }
            eprintln!("{} command(s)", table.len());
        }

        Commands::Batch {
            input,
            output_dir,
            format,
            ascii,
            symbols,
        } => {
            // Create output directory if it doesn't exist
            fs::create_dir_all(&output_dir)?;

            let format = OutputFormat::from(format);
            let cleaner = LatexCleaner::with_options(CleanOptions {
                use_unicode: !ascii,
                format,
            })
            .with_symbols(symbol_table(symbols.as_deref()));

            // Find input files
            let input_path = Path::new(&input);
            let files: Vec<_> = if input_path.is_dir() {
                fs::read_dir(input_path)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("tex"))
                    .collect()
            } else {
                // Single file
                vec![input_path.to_path_buf()]
            };

            let mut success_count = 0;
            let mut skipped_count = 0;
            let mut error_count = 0;

            for file_path in files {
                let filename = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");

                let output_path = Path::new(&output_dir)
                    .join(format!("{}.{}", filename, format.file_extension()));

                match fs::read_to_string(&file_path) {
                    Ok(content) => match cleaner.convert(&content) {
                        Some(result) => match fs::write(&output_path, &result) {
                            Ok(_) => {
                                eprintln!("✓ {}", output_path.display());
                                success_count += 1;
                            }
                            Err(e) => {
                                eprintln!("✗ {} - write error: {}", output_path.display(), e);
                                error_count += 1;
                            }
                        },
                        None => {
                            eprintln!("⚠ {} - empty input, skipped", file_path.display());
                            skipped_count += 1;
                        }
                    },
                    Err(e) => {
                        eprintln!("✗ {} - read error: {}", file_path.display(), e);
                        error_count += 1;
                    }
                }
            }

            eprintln!(
                "\nBatch conversion complete: {} succeeded, {} skipped, {} failed",
                success_count, skipped_count, error_count
            );

            if error_count > 0 {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("texclean - LaTeX to Markdown / Plain Text / HTML");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ $...$, $$...$$, \\(...\\) and \\[...\\] unwrapping");
            println!("  ✓ \\begin{{..}}...\\end{{..}} blocks kept verbatim");
            println!(
                "  ✓ {} built-in symbols (Unicode or ASCII)",
                texclean::SYMBOLS.len()
            );
            println!("  ✓ Extra symbols from JSON, YAML, TOML or CSV");
            println!("  ✓ Batch file processing");
            println!();
            println!("Output formats:");
            for format in OutputFormat::ALL {
                println!(
                    "  - {} (.{}, {})",
                    format,
                    format.file_extension(),
                    format.mime_type()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Read from `path`, or stdin when no path is given
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

/// Built-in table, plus the entries of `path` if given. Exits on a bad file.
#[cfg(feature = "cli")]
fn symbol_table(path: Option<&str>) -> SymbolTable {
    let Some(path) = path else {
        return SymbolTable::new();
    };
    match load_symbols(path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Print warnings to stderr with optional color coding.
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    eprintln!();
    eprintln!(
        "{}Conversion Warnings ({}):{}",
        if use_color { "\x1b[33m" } else { "" },
        warnings.len(),
        if use_color { "\x1b[0m" } else { "" }
    );
    eprintln!();

    for warning in warnings {
        eprintln!("  {}", warning);
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texclean --features cli");
    eprintln!("  texclean [OPTIONS] [INPUT_FILE]");
}
