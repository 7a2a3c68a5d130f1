use clap::{Parser, Subcommand};
use info_pages::generate::{self, BuildContext};
use info_pages::{config, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "info-pages")]
#[command(about = "Build the multilingual info page of a static site")]
#[command(long_about = "\
Build the multilingual info page of a static site

One HTML page is written per configured language. Sections and topics are
Markdown files with one +++ block per language.

Site structure:

  site/
  ├── config.toml                        # Optional, see 'gen-config'
  ├── content/
  │   ├── fragments/lang-toggle/meta.json  # Language toggle strings
  │   └── pages/info/
  │       ├── meta.json                  # Page title, edit button text, pageName
  │       ├── a-landing.md               # Landing section (not in the index)
  │       ├── a-landing/welcome.md
  │       ├── faq.md                     # Section, anchor #faq
  │       ├── faq/billing.md             # Topic, anchor #billing
  │       └── privacy.md                 # Section without topics
  └── styles/                            # Inlined into every page

Content file format:

  +++
  lang = \"en\"
  title = \"Billing\"
  +++
  Markdown body.

  +++
  lang = \"de\"
  title = \"Abrechnung\"
  +++
  Markdown-Text.

Sections and topics are ordered by file name.")]
#[command(version)]
struct Cli {
    /// Site root
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content and write one page per language
    Build,
    /// Scan and render every language without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);
            let ctx = BuildContext::load(&cli.source, site_config)?;

            println!("==> Scanning {}", ctx.content_dir.display());
            let tree = scan::scan(&ctx.content_dir, &ctx.config.languages)?;
            output::print_scan_output(&tree, ctx.config.languages[0], &ctx.config.landing_dir);

            println!("==> Generating HTML → {}", cli.output.display());
            let pages = generate::generate(&ctx, &tree, &cli.output)?;
            output::print_generate_output(&pages);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);
            let ctx = BuildContext::load(&cli.source, site_config)?;

            println!("==> Checking {}", ctx.content_dir.display());
            let tree = scan::scan(&ctx.content_dir, &ctx.config.languages)?;
            output::print_scan_output(&tree, ctx.config.languages[0], &ctx.config.landing_dir);
            generate::render_all(&ctx, &tree)?;
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
