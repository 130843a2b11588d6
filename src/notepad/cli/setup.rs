use clap::{Parser, Subcommand, ValueEnum};
use notepad::api::ExportFormat;
use notepad::model::PageId;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notepad", bin_name = "notepad", version = get_version())]
#[command(about = "Multi-page rich-text notepad", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(short, long, global = true, env = "NOTEPAD_HOME")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Save at the end of the command even when autosave is off
    #[arg(short, long, global = true)]
    pub save: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pages
    #[command(alias = "ls")]
    List,

    /// Create a page and switch to it
    #[command(alias = "n")]
    New,

    /// Make a page the current one
    #[command(alias = "s")]
    Switch { id: PageId },

    /// Print the text of a page (the current one by default)
    #[command(alias = "v")]
    Show {
        id: Option<PageId>,

        /// Print the stored markup instead of plain text
        #[arg(long)]
        raw: bool,
    },

    /// Replace the content of a page
    #[command(alias = "w")]
    Write {
        id: PageId,

        /// New content, as markup
        content: String,
    },

    /// Rename a page
    Rename { id: PageId, name: String },

    /// Delete a page
    #[command(alias = "rm")]
    Delete { id: PageId },

    /// Empty the current page
    Clear,

    /// Format text on the current page
    Format {
        /// bold, italic, underline, fontSize, foreColor or hiliteColor
        command: String,

        /// Value for fontSize and the colour commands
        value: Option<String>,

        /// First character to format (defaults to the start)
        #[arg(long)]
        from: Option<usize>,

        /// Character after the last one to format (defaults to the end)
        #[arg(long)]
        to: Option<usize>,
    },

    /// Export every page
    Export {
        #[arg(value_enum)]
        format: ExportKind,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save now
    Save,

    /// Turn autosave on or off
    Autosave {
        /// on or off
        state: String,
    },

    /// Discard all pages and saved notes
    Reset,

    /// Get or set configuration
    Config {
        /// Configuration key (auto-save, autosave-interval, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ExportKind {
    Text,
    Html,
    Archive,
}

impl From<ExportKind> for ExportFormat {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Text => ExportFormat::Text,
            ExportKind::Html => ExportFormat::Html,
            ExportKind::Archive => ExportFormat::Archive,
        }
    }
}
