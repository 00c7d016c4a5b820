use clap::{Parser, Subcommand};
use domscope_core::output::{self, OutlineConfig};
use domscope_core::BuildConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "domscope", about = "Reconstruct a page's layout tree from raw HTML")]
struct Cli {
    /// Log build details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an HTML file and print its page structure
    Parse {
        /// The HTML file to parse (use - for stdin)
        file: String,

        /// Output the full structure as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Width given to boxes without a parent
        #[arg(long, default_value_t = 1200.0)]
        viewport_width: f32,

        /// Height of the synthetic root when the document has no body
        #[arg(long, default_value_t = 800.0)]
        viewport_height: f32,
    },
    /// Print an indented tag outline
    Outline {
        /// The HTML file to parse (use - for stdin)
        file: String,

        /// Deepest level that is expanded
        #[arg(long, default_value_t = 4)]
        max_depth: usize,

        /// Children shown per node
        #[arg(long, default_value_t = 10)]
        max_children: usize,
    },
    /// Print the JSON export summary
    Export {
        /// The HTML file to parse (use - for stdin)
        file: String,

        /// URL recorded in the export
        #[arg(long)]
        url: Option<String>,
    },
    /// Fetch a URL and print its page structure
    Fetch {
        /// The URL to fetch
        url: String,

        /// Output the full structure as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: &str) -> std::io::Result<String> {
    let html = if file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    tracing::debug!(file, bytes = html.len(), "read input");
    Ok(html)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Parse {
            file,
            json,
            viewport_width,
            viewport_height,
        } => {
            let html = read_input(&file)?;
            let config = BuildConfig {
                viewport_width,
                viewport_height,
            };
            let structure = domscope_core::parse_with_config(&html, &config);
            print_structure(&structure, json)?;
        }
        Commands::Outline {
            file,
            max_depth,
            max_children,
        } => {
            let html = read_input(&file)?;
            let structure = domscope_core::parse(&html);
            let config = OutlineConfig {
                max_depth,
                max_children,
            };
            print!("{}", output::outline(&structure.root_node, &config));
        }
        Commands::Export { file, url } => {
            let html = read_input(&file)?;
            let structure = domscope_core::parse(&html);
            let summary = output::export_summary(&structure, url.as_deref());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Fetch { url, json, timeout } => {
            let config = domscope_core::fetch::FetchConfig {
                timeout_secs: timeout,
                ..Default::default()
            };
            let structure = domscope_core::fetch::fetch(&url, &config)?;
            print_structure(&structure, json)?;
        }
    }
    Ok(())
}

fn print_structure(
    structure: &domscope_core::PageStructure,
    as_json: bool,
) -> Result<(), serde_json::Error> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(structure)?);
    } else {
        println!(
            "{}",
            output::to_report_string(structure, &OutlineConfig::default())
        );
    }
    Ok(())
}
