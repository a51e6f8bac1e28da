//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::services::ROOT_ID;
use crate::domain::Symbol;

/// Hierarchical outline editor: expand/collapse, insert, delete, indent/outdent and reorder nodes
#[derive(Parser, Debug)]
#[command(name = "outliner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Document to work on (default: `default_document` setting)
    #[arg(long, global = true, conflicts_with = "shared")]
    pub doc: Option<String>,

    /// Work on the shared document
    #[arg(long, global = true)]
    pub shared: bool,

    /// Edit inside this item's children instead of the whole document
    #[arg(long, global = true, default_value = ROOT_ID)]
    pub scope: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the outline as a tree
    Show {
        /// Also print children of collapsed nodes
        #[arg(short, long)]
        all: bool,
    },

    /// Enter on an item: new first child of an expanded parent, else new sibling
    Add {
        /// Item id
        id: String,
    },

    /// Append a new item at the end of the top level
    AddRoot,

    /// Replace an item's text
    Edit {
        /// Item id
        id: String,
        /// New text
        text: String,
    },

    /// Set an item's marker symbol
    Symbol {
        /// Item id
        id: String,
        /// One of: dot, naraba, therefore, because, equal, notEqual
        symbol: Symbol,
    },

    /// Expand or collapse an item
    Toggle {
        /// Item id
        id: String,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
        /// Also delete an item that has children, with its whole subtree
        #[arg(short, long)]
        force: bool,
    },

    /// Make an item the last child of its previous sibling
    Indent {
        /// Item id
        id: String,
    },

    /// Move an item out of its parent, right after it
    Outdent {
        /// Item id
        id: String,
    },

    /// Swap an item with its previous sibling
    Up {
        /// Item id
        id: String,
    },

    /// Id of the next visible item
    Next {
        /// Item id
        id: String,
    },

    /// Id of the previous visible item
    Prev {
        /// Item id
        id: String,
    },

    /// Show the path from the top level down to an item
    Path {
        /// Item id
        id: String,
    },

    /// Write the stored document as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Replace the document with a JSON forest
    Import {
        /// JSON file holding an array of items
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List stored documents
    List,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template config
    Template,
    /// Print the global config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_symbol_command_when_parsing_then_symbol_is_typed() {
        let cli = Cli::try_parse_from(["outliner", "symbol", "abc", "notEqual"]).unwrap();
        match cli.command {
            Some(Commands::Symbol { id, symbol }) => {
                assert_eq!(id, "abc");
                assert_eq!(symbol, Symbol::NotEqual);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_no_scope_when_parsing_then_defaults_to_root() {
        let cli = Cli::try_parse_from(["outliner", "show"]).unwrap();
        assert_eq!(cli.scope, ROOT_ID);
        assert_eq!(cli.debug, 0);
    }

    #[test]
    fn given_doc_and_shared_when_parsing_then_conflict() {
        assert!(Cli::try_parse_from(["outliner", "--doc", "a", "--shared", "show"]).is_err());
    }

    #[test]
    fn given_repeated_debug_when_parsing_then_counts() {
        let cli = Cli::try_parse_from(["outliner", "-ddd", "list"]).unwrap();
        assert_eq!(cli.debug, 3);
    }
}
