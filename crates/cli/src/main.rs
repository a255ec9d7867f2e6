mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pkgplan_lib::spec::{MergePolicy, Packaging};

use cmd::Project;
use output::{OutputFormat, print_error};

/// pkgplan - packaging plans and build orchestration
#[derive(Parser)]
#[command(name = "pkgplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Project root (discovered from the working directory by default)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Inspect packaging spec files
  Specs {
    #[command(subcommand)]
    command: SpecsCommand,
  },

  /// Resolve packaging profiles into a build plan
  Plan {
    /// Profiles to apply, in order
    #[arg(required = true)]
    profiles: Vec<Packaging>,
  },

  /// Print the build variables for the current environment
  Vars,

  /// Build the binary into the output directory
  Build,

  /// Remove the build output directory
  Clean,

  /// Manage the service stack
  Stack {
    #[command(subcommand)]
    command: StackCommand,
  },

  /// Packaging environment helpers
  Env {
    #[command(subcommand)]
    command: EnvCommand,
  },
}

#[derive(Subcommand)]
enum SpecsCommand {
  /// List the specs defined by the spec files
  List {
    /// Spec files (default: the project spec file)
    files: Vec<PathBuf>,

    /// How to combine several files
    #[arg(long)]
    merge: Option<MergePolicy>,
  },

  /// Resolve one spec and print its packages
  Show {
    /// Spec name
    name: String,

    /// Spec files (default: the project spec file)
    files: Vec<PathBuf>,

    /// How to combine several files
    #[arg(long)]
    merge: Option<MergePolicy>,
  },
}

#[derive(Subcommand)]
enum StackCommand {
  /// Deploy the stack
  Up {
    /// Agent version (default: from BEAT_VERSION or PKGPLAN_VERSION)
    #[arg(long)]
    version: Option<String>,

    /// Image archive under build/distributions
    #[arg(long, default_value = "elastic-agent-complete-linux-amd64.docker.tar.gz")]
    image: String,

    /// Agent image reference handed to the stack tool
    #[arg(long)]
    image_ref: Option<String>,
  },

  /// Tear the stack down
  Down,
}

#[derive(Subcommand)]
enum EnvCommand {
  /// Export and print the docker image staging defaults
  Defaults,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let output = cli.output;

  match cli.command {
    Commands::Vars => cmd::cmd_vars(output),
    Commands::Env {
      command: EnvCommand::Defaults,
    } => cmd::cmd_env_defaults(output),
    Commands::Specs { command } => {
      let project = Project::load(cli.root)?;
      match command {
        SpecsCommand::List { files, merge } => cmd::cmd_specs_list(&project, files, merge, output),
        SpecsCommand::Show { name, files, merge } => cmd::cmd_specs_show(&project, &name, files, merge, output),
      }
    }
    Commands::Plan { profiles } => cmd::cmd_plan(&Project::load(cli.root)?, &profiles, output),
    Commands::Build => cmd::cmd_build(&Project::load(cli.root)?),
    Commands::Clean => cmd::cmd_clean(&Project::load(cli.root)?),
    Commands::Stack { command } => {
      let project = Project::load(cli.root)?;
      match command {
        StackCommand::Up {
          version,
          image,
          image_ref,
        } => cmd::cmd_stack_up(&project, version, &image, image_ref.as_deref()),
        StackCommand::Down => cmd::cmd_stack_down(&project),
      }
    }
  }
}
