use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "upm",
    about = "Universal package manager",
    long_about = "One set of verbs for every language's package manager: upm drives poetry, yarn or cask depending on the project.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Language backend to use (autodetected when omitted)
    #[arg(short = 'l', long = "lang", global = true, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the backend that would handle this project
    WhichLanguage,

    /// List every supported backend
    ListLanguages,

    /// Search the registry for packages
    Search {
        #[arg(required = true, value_name = "QUERY")]
        queries: Vec<String>,
    },

    /// Show metadata for one package
    Info {
        #[arg(value_name = "PACKAGE")]
        package: String,
    },

    /// Declare dependencies in the specfile
    Add {
        /// "NAME" or "NAME SPEC", e.g. 'flask >=1.0'
        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Remove dependencies from the specfile
    Remove {
        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Regenerate the lockfile from the specfile
    Lock,

    /// Install what the lockfile describes
    Install,

    /// List declared (or, with --lock, resolved) dependencies
    List {
        /// List the lockfile instead of the specfile
        #[arg(long)]
        lock: bool,
    },

    /// Guess dependencies from the project's source code
    Guess,

    /// Print the specfile name
    ShowSpecfile,

    /// Print the lockfile name
    ShowLockfile,
}
