use clap::{Parser, Subcommand};

use std::path::PathBuf;

/// Daily briefing: recent mail, an AI summary and RSS headlines on one HTML page.
///
/// HTML goes to stdout; diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "daily-briefing")]
#[command(version)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the headline page. With two or more arguments the first one is
    /// an HTML snippet placed under the heading.
    Page {
        #[arg(value_name = "[SNIPPET] URL", required = true, num_args = 1..)]
        args: Vec<String>,
    },

    /// Summarize mail, generate the briefing and build the page around it
    Run {
        #[arg(value_name = "URL", required = true, num_args = 1..)]
        urls: Vec<String>,

        /// Mail window in hours (defaults to MAIL_WINDOW_HOURS)
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Print only the generated briefing block
    Briefing {
        /// Mail window in hours (defaults to MAIL_WINDOW_HOURS)
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Print the plain-text digest of recent mail
    Emails {
        /// Mail window in hours (defaults to MAIL_WINDOW_HOURS)
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Strip images from an HTML file and print the result
    Sanitize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Splits `page` arguments into the optional snippet and the feed URLs.
/// An empty snippet counts as none.
pub fn split_page_args(mut args: Vec<String>) -> (Option<String>, Vec<String>) {
    if args.len() < 2 {
        return (None, args);
    }
    let snippet = args.remove(0);
    (Some(snippet).filter(|s| !s.is_empty()), args)
}
