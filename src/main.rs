use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use url::Url;

use onboard::config::{OnboardPaths, Settings};
use onboard::display::{format_config, format_prefill_summary};
use onboard::prompt::{wait_for_redirect, Console, PromptWizard, RedirectTrigger};
use onboard::store::FormStore;
use onboard::wizard::build_redirect_url;
use onboard::wizard::redirect::open_in_browser;

#[derive(Parser)]
#[command(
    name = "onboard",
    version,
    about = "Terminal customer onboarding wizard",
    long_about = "Walks a new customer through account creation, identity verification \
                  and the letter of intent, then hands them off to the credit \
                  monitoring partner."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON array of store actions applied before the wizard starts
    #[arg(long, global = true, value_name = "FILE")]
    prefill: Option<PathBuf>,

    /// Partner landing page for the final redirect
    #[arg(long, global = true, env = "ONBOARD_PARTNER_URL", value_name = "URL")]
    partner_url: Option<String>,

    /// Seconds to wait on the final step before redirecting
    #[arg(long, global = true, value_name = "SECS")]
    redirect_delay: Option<u64>,

    /// Print the redirect URL instead of opening a browser
    #[arg(long, global = true)]
    no_browser: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Run the wizard as a series of line prompts
    Prompt,

    /// Show current configuration and paths
    Config,

    /// Write the settings file (including any overrides given)
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Print the redirect URL for the prefilled account details
    PreviewUrl,
}

impl Cli {
    /// Fold command-line overrides into the loaded settings
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.partner_url {
            settings.partner_url = url.clone();
        }
        if let Some(delay) = self.redirect_delay {
            settings.redirect_delay_secs = delay;
        }
        if self.no_browser {
            settings.open_browser = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = OnboardPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    cli.apply_overrides(&mut settings);

    let _log_guard = onboard::logging::init(&paths, &settings)?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "starting");

    let mut store = FormStore::new();
    store.subscribe(|kind, state| {
        tracing::info!(
            action = %kind,
            consented = state.customer_info.has_consented(),
            "form state updated"
        );
    });
    if let Some(path) = &cli.prefill {
        let count = store.load_prefill(path)?;
        tracing::info!(count, "prefill loaded");
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            let open_browser = settings.open_browser;
            match onboard::tui::run_tui(settings, store)? {
                Some(url) => hand_off(&url, open_browser),
                None => println!("Onboarding cancelled. Nothing was submitted."),
            }
        }
        Some(Commands::Prompt) => run_prompt(&settings, &mut store)?,
        Some(Commands::Config) => {
            println!("onboard-cli Configuration");
            println!("{}", format_config(&paths, &settings));
            if cli.prefill.is_some() {
                println!();
                println!("Prefilled form state");
                println!("{}", format_prefill_summary(store.state()));
            }
        }
        Some(Commands::Init { force }) => {
            if paths.is_initialized() && !force {
                println!(
                    "Already initialized at {} (use --force to overwrite)",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
            }
        }
        Some(Commands::PreviewUrl) => {
            let url = build_redirect_url(&settings, store.account_info())?;
            println!("{}", url);
        }
    }

    Ok(())
}

/// Line-prompt wizard, then the countdown with Enter as "leave now"
fn run_prompt(settings: &Settings, store: &mut FormStore) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    let result = {
        let mut console = Console::new(stdin.lock(), io::stdout()).interactive(interactive);
        PromptWizard::new(settings).run(&mut console, store, Local::now().date_naive())?
    };

    println!();
    println!(
        "Redirecting in {} seconds. Press Enter to leave now.",
        settings.redirect_delay_secs
    );

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        if matches!(io::stdin().lock().read_line(&mut line), Ok(n) if n > 0) {
            let _ = tx.send(());
        }
    });

    let trigger = wait_for_redirect(settings.redirect_delay(), &rx);
    tracing::info!(?trigger, "prompt redirect fired");
    if trigger == RedirectTrigger::LeaveNow {
        println!("Leaving now.");
    }

    hand_off(&result.redirect_url, settings.open_browser);
    Ok(())
}

/// Open the partner page, falling back to printing the address
fn hand_off(url: &Url, open_browser: bool) {
    if !open_browser {
        println!("{}", url);
        return;
    }

    match open_in_browser(url) {
        Ok(()) => println!("Opening {}", url),
        Err(e) => {
            tracing::warn!(error = %e, "browser launch failed");
            println!("Continue enrollment at: {}", url);
        }
    }
}
