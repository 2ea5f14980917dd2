//! phizy-stack CLI - create Next.js projects and extend them with modules

use anyhow::Result;
use clap::{Parser, Subcommand};
use phizy_core::config::SettingsArgs;
use phizy_core::{tui, ModuleRegistry, PackageManagerKind, Settings, StackError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "phizy-stack")]
#[command(about = "CLI to create Next.js projects and extend them with modules")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir", global = true)]
    pub template_dir: Option<PathBuf>,

    /// Package manager used to install and remove packages
    #[arg(long = "package-manager", value_enum, global = true)]
    pub package_manager: Option<PackageManagerKind>,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from the base template
    Create {
        /// Name of the project directory to create
        project_name: String,

        /// Do not run the package manager after copying the template
        #[arg(long = "skip-install")]
        skip_install: bool,
    },
    /// Add a module to the current project
    Add {
        /// Name of the module to add
        module_name: String,
    },
    /// Remove a module from the current project
    Remove {
        /// Name of the module to remove
        module_name: String,
    },
    /// List available modules
    Modules,
}

impl Args {
    fn settings_args(&self) -> SettingsArgs {
        SettingsArgs {
            project_dir: self.project_dir.clone(),
            template_dir: self.template_dir.clone(),
            package_manager: self.package_manager,
            yes: self.yes,
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let registry = ModuleRegistry::builtin()?;
    let settings = Settings::resolve(args.settings_args())?;
    tracing::debug!(
        root = %settings.project_root.display(),
        templates = %settings.templates.root().display(),
        package_manager = %settings.package_manager,
        "Resolved settings"
    );

    match args.command {
        Command::Create {
            project_name,
            skip_install,
        } => tui::run_create(&settings, &project_name, skip_install).await?,
        Command::Add { module_name } => tui::run_add(&registry, &settings, &module_name).await?,
        Command::Remove { module_name } => {
            tui::run_remove(&registry, &settings, &module_name).await?
        }
        Command::Modules => tui::run_modules(&registry, &settings)?,
    }

    Ok(())
}

/// Process exit status for a failed command; declining a prompt is not a failure
fn exit_status(err: &StackError) -> u8 {
    if err.is_cancelled() {
        0
    } else {
        1
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let result = run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<StackError>() {
            Some(stack_err) => {
                tui::report_error(stack_err);
                ExitCode::from(exit_status(stack_err))
            }
            None => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
