// ABOUTME: CLI for the devsite page behaviors and the fluid type calculator.
// ABOUTME: Computes clamp() expressions and runs page adapters over HTML files, printing the result.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use devsite_fluid::{compute_raw, Field, RawFields};
use devsite_page::calculator::{CalculatorPanel, COPIED_MESSAGE};
use devsite_page::prefs::{LOCALE_KEY, THEME_KEY};
use devsite_page::{
    default_config_path, default_prefs_path, estimate_html, theme, Catalog, Clipboard,
    CommandClipboard, JsonFileStore, Page, PreferenceStore, SiteConfig, SiteOptions, Theme,
};
use tracing_subscriber::EnvFilter;

/// Exit status when the calculator declines to compute.
const EXIT_SKIPPED: u8 = 1;
/// Exit status for usage, I/O, and config errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "devsite")]
#[command(about = "Fluid type calculator and page behaviors for the devsite pages", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/devsite/config.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference file holding the saved theme and locale
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Translation catalog JSON (default: built-in English/Spanish)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a clamp() expression from five inputs
    Clamp(ClampArgs),

    /// Run the page-load sequence over an HTML file and print the page
    Page {
        /// HTML file, or "-" for stdin
        file: String,
        /// URL the page is served at
        #[arg(long)]
        url: String,
        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Estimate the read time of a blog post
    ReadTime {
        /// HTML file, or "-" for stdin
        file: String,
    },

    /// Show or change the saved theme
    Theme {
        #[command(subcommand)]
        action: PrefAction,
    },

    /// Show or change the saved locale
    Lang {
        #[command(subcommand)]
        action: PrefAction,
    },

    /// Apply one UI interaction to a page and print the page
    Toggle {
        target: ToggleTarget,
        /// HTML file, or "-" for stdin
        file: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the calculator panel over a calculator page
    Calc {
        /// HTML file, or "-" for stdin
        file: String,
        /// Restore the default inputs before computing
        #[arg(long)]
        reset: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct ClampArgs {
    /// Font size at the minimum viewport, in px
    #[arg(long, default_value = "16", allow_hyphen_values = true)]
    min_size: String,
    /// Font size at the maximum viewport, in px
    #[arg(long, default_value = "48", allow_hyphen_values = true)]
    max_size: String,
    /// Minimum viewport width, in px
    #[arg(long, default_value = "320", allow_hyphen_values = true)]
    min_vw: String,
    /// Maximum viewport width, in px
    #[arg(long, default_value = "1600", allow_hyphen_values = true)]
    max_vw: String,
    /// Root font size, in px
    #[arg(long, default_value = "16", allow_hyphen_values = true)]
    base_rem: String,
    /// Print a declaration for this property, e.g. font-size
    #[arg(long)]
    property: Option<String>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Pipe the expression into this clipboard command, e.g. "pbcopy"
    #[arg(long)]
    copy_cmd: Option<String>,
}

impl ClampArgs {
    fn raw_fields(&self) -> RawFields {
        let mut raw = RawFields::default();
        raw.set(Field::MinSize, self.min_size.as_str());
        raw.set(Field::MaxSize, self.max_size.as_str());
        raw.set(Field::MinViewport, self.min_vw.as_str());
        raw.set(Field::MaxViewport, self.max_vw.as_str());
        raw.set(Field::BaseRem, self.base_rem.as_str());
        raw
    }
}

#[derive(Subcommand, Debug)]
enum PrefAction {
    /// Print the saved value
    Get,
    /// Save a new value
    Set { value: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToggleTarget {
    /// Mobile navigation menu
    Menu,
    /// Documentation sidebar
    Sidebar,
    /// Close the documentation sidebar, as following a doc link does
    CloseSidebar,
    /// Theme checkbox
    Theme,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("devsite=debug,devsite_page=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devsite=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let opts = load_options(cli.config.as_deref())?;

    match cli.command {
        Command::Clamp(args) => run_clamp(&args),
        Command::Page { file, url, output } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let mut store = open_store(cli.prefs.as_deref())?;
            let mut page = Page::parse(&load_html(&file)?);
            let report = page.boot(&opts, &catalog, &mut store, &url)?;
            tracing::debug!(report = %serde_json::to_string(&report)?, "boot report");
            emit(&page.html(), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::ReadTime { file } => {
            let html = load_html(&file)?;
            let estimate = estimate_html(&html, opts.words_per_minute)
                .ok_or_else(|| anyhow!("{}: no .post-content element", file))?;
            println!("{}", estimate);
            Ok(ExitCode::SUCCESS)
        }
        Command::Theme { action } => {
            let mut store = open_store(cli.prefs.as_deref())?;
            match action {
                PrefAction::Get => println!("{}", theme::saved_theme(&store, opts.default_theme)),
                PrefAction::Set { value } => {
                    let theme: Theme = value.parse()?;
                    store.set(THEME_KEY, theme.as_str())?;
                    println!("{}", theme);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Lang { action } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let mut store = open_store(cli.prefs.as_deref())?;
            match action {
                PrefAction::Get => {
                    let locale = devsite_page::i18n::saved_locale(&store, &catalog)
                        .unwrap_or_else(|| opts.default_locale.clone());
                    println!("{}", locale);
                }
                PrefAction::Set { value } => {
                    if !catalog.has_locale(&value) {
                        bail!("unknown locale: {}", value);
                    }
                    store.set(LOCALE_KEY, &value)?;
                    println!("{}", value);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Toggle {
            target,
            file,
            output,
        } => {
            let mut page = Page::parse(&load_html(&file)?);
            let changed = match target {
                ToggleTarget::Menu => page.toggle_mobile_nav().is_some(),
                ToggleTarget::Sidebar => page.toggle_doc_sidebar().is_some(),
                ToggleTarget::CloseSidebar => page.close_doc_sidebar(),
                ToggleTarget::Theme => {
                    let mut store = open_store(cli.prefs.as_deref())?;
                    let current = theme::current_theme(page.document())
                        .unwrap_or_else(|| theme::saved_theme(&store, opts.default_theme));
                    page.set_theme(&mut store, current.toggled())?;
                    true
                }
            };
            if !changed {
                tracing::warn!(toggle = ?target, "page has no elements for this toggle");
            }
            emit(&page.html(), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Calc {
            file,
            reset,
            output,
        } => {
            let page = Page::parse(&load_html(&file)?);
            if !devsite_page::calculator::is_calculator_page(page.document()) {
                bail!("{}: not a calculator page (no #minSize input)", file);
            }
            let mut panel = CalculatorPanel::new(opts);
            let outcome = if reset {
                panel.reset_page(page.document()).map(|r| r.expression.clone())
            } else {
                panel.refresh(page.document()).map(|r| r.expression.clone())
            };
            emit(&page.html(), output.as_deref())?;
            match outcome {
                Ok(expression) => {
                    tracing::info!(%expression, "calculator updated");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("skipped ({}): {}", err.kind(), err);
                    Ok(ExitCode::from(EXIT_SKIPPED))
                }
            }
        }
    }
}

fn run_clamp(args: &ClampArgs) -> Result<ExitCode> {
    let result = match compute_raw(&args.raw_fields()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("skipped ({}): {}", err.kind(), err);
            return Ok(ExitCode::from(EXIT_SKIPPED));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(property) = &args.property {
        println!("{}", result.declaration(property));
    } else {
        println!("{}", result.expression);
    }

    if let Some(cmd) = &args.copy_cmd {
        let mut clipboard = CommandClipboard::from_command_line(cmd)
            .ok_or_else(|| anyhow!("--copy-cmd is empty"))?;
        clipboard.write_text(&result.expression)?;
        eprintln!("{}", COPIED_MESSAGE);
    }

    Ok(ExitCode::SUCCESS)
}

fn load_options(path: Option<&Path>) -> Result<SiteOptions> {
    let config = match path {
        Some(path) => {
            SiteConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => match default_config_path() {
            Some(path) => SiteConfig::load_optional(&path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SiteConfig::default(),
        },
    };
    Ok(config.into_options())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn open_store(path: Option<&Path>) -> Result<JsonFileStore> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_prefs_path()
            .ok_or_else(|| anyhow!("no config directory on this platform; pass --prefs"))?,
    };
    Ok(JsonFileStore::open(path)?)
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    fs::read_to_string(&path).with_context(|| format!("reading {}", target))
}

fn emit(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, html).with_context(|| format!("writing {}", path.display())),
        None => {
            println!("{}", html);
            Ok(())
        }
    }
}
