mod cmd;
mod launch;
mod logging;
mod picker;

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vnav", version, about = "Follow wikilinks in a markdown vault")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and report index status
    Doctor,

    /// Resolve the wikilink under a cursor and open its target
    Follow(FollowArgs),

    /// List files linking to a file
    Backlinks(BacklinksArgs),

    /// List every tag in the index
    Tags,

    /// List files carrying a tag
    Tagged(TaggedArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["line", "file"])))]
pub struct FollowArgs {
    /// Cursor column, 0-based characters
    #[arg(long)]
    pub col: usize,

    /// Text of the line under the cursor
    #[arg(long)]
    pub line: Option<String>,

    /// Read the line from this file instead
    #[arg(long, requires = "row")]
    pub file: Option<PathBuf>,

    /// Line number in --file, 1-based
    #[arg(long, requires = "file")]
    pub row: Option<usize>,

    /// Print `<kind>\t<path>` instead of opening the target
    #[arg(long, conflicts_with = "json")]
    pub print: bool,

    /// Print the resolution as JSON instead of opening the target
    #[arg(long)]
    pub json: bool,

    /// Never show a selector; take the first candidate
    #[arg(long)]
    pub no_interactive: bool,
}

#[derive(Debug, Args)]
pub struct BacklinksArgs {
    /// File (or path fragment) whose backlinks to list
    pub file: String,

    /// Pick one of the results and open it in the editor
    #[arg(long)]
    pub open: bool,

    /// Never show a selector; take the first candidate
    #[arg(long)]
    pub no_interactive: bool,
}

#[derive(Debug, Args)]
pub struct TaggedArgs {
    /// Tag name, without `#`
    pub tag: String,

    /// Pick one of the results and open it in the editor
    #[arg(long)]
    pub open: bool,

    /// Never show a selector; take the first candidate
    #[arg(long)]
    pub no_interactive: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    let code = match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Follow(args) => cmd::follow::run(config, profile, args),
        Commands::Backlinks(args) => cmd::backlinks::run(config, profile, args),
        Commands::Tags => cmd::tags::run_tags(config, profile),
        Commands::Tagged(args) => cmd::tags::run_tagged(config, profile, args),
    };

    logging::flush();
    std::process::exit(code);
}
