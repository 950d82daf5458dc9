use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memoz", bin_name = "memoz", version)]
#[command(about = "Local-first memo pad", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $MEMOZ_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Memo(MemoCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Share(ShareCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Filters and ordering shared by `list`, `search` and `print`.
#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Only this category (personal, work, ideas, todo, other, all)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only memos with a tag containing this text
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Sort field (title, category, created, updated)
    #[arg(long)]
    pub sort: Option<String>,

    /// Ascending order
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Descending order
    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Create a new memo
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Memo content (read from stdin when omitted)
        #[arg(long, short = 'm')]
        content: Option<String>,

        /// Category (personal, work, ideas, todo, other)
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Tag, repeatable
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Pin the new memo
        #[arg(long)]
        pin: bool,

        /// Start from a built-in template (see `memoz templates`)
        #[arg(long, conflicts_with_all = ["content", "category", "tags"])]
        template: Option<String>,

        /// Title words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// List memos
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only memos whose title or content contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// List the archive instead
        #[arg(long)]
        archived: bool,

        #[command(flatten)]
        filters: ListArgs,
    },

    /// Search with "exact phrases" and -excluded words
    #[command(display_order = 3)]
    Search {
        /// Query words; filters go before them
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        query: Vec<String>,

        #[command(flatten)]
        filters: ListArgs,
    },

    /// List built-in templates
    #[command(display_order = 4)]
    Templates,
}

#[derive(Subcommand, Debug)]
pub enum MemoCommands {
    /// Show a memo in full
    #[command(alias = "v", display_order = 10)]
    View { id: String },

    /// Change a memo's fields
    #[command(alias = "e", display_order = 11)]
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short = 'm')]
        content: Option<String>,

        /// New category, or `none` to clear it
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Replace the tags, repeatable
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Pin a memo
    #[command(alias = "p", display_order = 12)]
    Pin {
        id: String,

        /// Flip the current pin state instead
        #[arg(long)]
        toggle: bool,
    },

    /// Unpin a memo
    #[command(alias = "u", display_order = 13)]
    Unpin { id: String },

    /// Move memos to the trash
    #[command(alias = "rm", display_order = 14)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Move memos to the archive
    #[command(display_order = 15)]
    Archive {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Restore a memo from the trash (or the archive)
    #[command(display_order = 16)]
    Restore {
        /// Id in the trash or archive
        id: String,

        /// Restore from the archive
        #[arg(long)]
        archived: bool,
    },

    /// Copy a memo to the clipboard
    #[command(display_order = 17)]
    Copy { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// List the trash
    #[command(display_order = 20)]
    Trash,

    /// Permanently delete a trash entry
    #[command(display_order = 21)]
    Purge { id: String },

    /// Permanently delete everything in the trash
    #[command(display_order = 22)]
    EmptyTrash {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export memos to JSON or CSV
    #[command(display_order = 23)]
    Export {
        /// json or csv
        #[arg(long, short = 'f', default_value = "json")]
        format: String,

        /// Directory to write the file into
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,

        /// Ids to export (all memos when omitted)
        #[arg(num_args = 0..)]
        ids: Vec<String>,
    },

    /// Import memos from a JSON export file
    #[command(display_order = 24)]
    Import { file: PathBuf },

    /// Render memos as printable HTML
    #[command(display_order = 25)]
    Print {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Ids to print (the whole list when omitted)
        #[arg(num_args = 0..)]
        ids: Vec<String>,

        #[command(flatten)]
        filters: ListArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ShareCommands {
    /// Create a share link for a memo
    #[command(display_order = 30)]
    Share {
        id: String,

        /// Days until the link expires
        #[arg(long)]
        expires: Option<i64>,

        /// Also print a mailto: link
        #[arg(long)]
        email: bool,
    },

    /// Open a share link
    #[command(display_order = 31)]
    OpenShare { share: String },

    /// List share links
    #[command(display_order = 32)]
    Shares {
        /// Remove expired links first
        #[arg(long)]
        cleanup: bool,
    },

    /// Revoke a share link
    #[command(display_order = 33)]
    Unshare { share: String },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show statistics and insights
    #[command(display_order = 40)]
    Stats,

    /// Get or set configuration
    #[command(display_order = 41)]
    Config {
        /// Configuration key (default_sort, default_direction, share_expiry_days)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_title_words() {
        let cli = Cli::parse_from(["memoz", "create", "-m", "body", "-t", "a", "Hello", "world"]);
        match cli.command {
            Some(Commands::Core(CoreCommands::Create { title, content, tags, .. })) => {
                assert_eq!(title, vec!["Hello", "world"]);
                assert_eq!(content.as_deref(), Some("body"));
                assert_eq!(tags, vec!["a"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parses_bulk_delete_and_global_flags() {
        let cli = Cli::parse_from(["memoz", "rm", "1", "2", "--data-dir", "/tmp/x", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Memo(MemoCommands::Delete { ids })) => assert_eq!(ids, vec!["1", "2"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn search_keeps_excluded_words() {
        let cli = Cli::parse_from(["memoz", "search", "-c", "work", "report", "-draft"]);
        match cli.command {
            Some(Commands::Core(CoreCommands::Search { query, filters })) => {
                assert_eq!(query, vec!["report", "-draft"]);
                assert_eq!(filters.category.as_deref(), Some("work"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn asc_and_desc_conflict() {
        assert!(Cli::try_parse_from(["memoz", "list", "--asc", "--desc"]).is_err());
    }
}
