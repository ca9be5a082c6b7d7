//! Command-line definitions, shared by the binary and the Python bindings.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Autocorrect, DEFAULT_MIN_SIZE, PipelineConfig};
use crate::resources::ResourceOptions;

pub const DEFAULT_RESOURCE_DIR: &str = "include";
pub const DEFAULT_AUTOCORRECT_MIN_LEN: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "corpus-clean")]
#[command(about = "Tokenize and clean text lines for corpus preparation")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize and clean a file or stdin, one token per line
    Clean(CleanArgs),
    /// Count each distinct word and the documents it appears in
    Summary(SummaryArgs),
    /// Count the words of each document
    Doccount(SummaryArgs),
    /// Remove listed words from a cleaned file
    Filter(FilterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    /// Input file; stdin when omitted or "-"
    pub infile: Option<PathBuf>,

    /// Lowercase the text
    #[arg(short = 'l')]
    pub lowercase: bool,

    /// Strip digits
    #[arg(short = 'n')]
    pub strip_digits: bool,

    /// Strip punctuation
    #[arg(short = 'p')]
    pub strip_punct: bool,

    /// Strip roman numerals
    #[arg(short = 'r')]
    pub strip_roman: bool,

    /// Strip stopwords
    #[arg(short = 's')]
    pub strip_stopwords: bool,

    /// Strip words not found in the dictionary
    #[arg(short = 'd')]
    pub strip_nondict: bool,

    /// Tweet cleaning: emoji tags, retweet markers, quotes
    #[arg(short = 't')]
    pub tweet_mode: bool,

    /// Also load the additional stopword lists and dictionaries
    #[arg(long)]
    pub additional: bool,

    /// Replace urls, emails, phone numbers, prices, dates and times by tags
    #[arg(long = "tags")]
    pub tags: bool,

    /// Remove urls, emails, phone numbers, prices, dates and times
    #[arg(long = "no-tags", conflicts_with = "tags")]
    pub no_tags: bool,

    /// Remove @usernames
    #[arg(long)]
    pub no_usernames: bool,

    /// One output line per input line, tokens separated by spaces
    #[arg(long)]
    pub maintain_newlines: bool,

    /// Minimum token size to keep
    #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: usize,

    /// Emit the words rejected by the dictionary instead of the tokens
    #[arg(long)]
    pub rejects_only: bool,

    /// Drop words shorter than three characters during dictionary validation
    #[arg(long)]
    pub drop_short: bool,

    /// Try to merge a rejected word with the previous rejected word
    #[arg(long)]
    pub allow_merge: bool,

    /// Autocorrect rejected words when suggestion confidence exceeds PCT percent
    #[arg(long, value_name = "PCT", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub autocorrect: Option<u32>,

    /// Minimum word length for autocorrect
    #[arg(long, default_value_t = DEFAULT_AUTOCORRECT_MIN_LEN)]
    pub autocorrect_min_len: usize,

    /// Resource directory (stopwords, dictionaries, emoji table)
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,
}

impl CleanArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            lowercase: self.lowercase,
            strip_digits: self.strip_digits,
            strip_punct: self.strip_punct,
            strip_roman: self.strip_roman,
            strip_stopwords: self.strip_stopwords,
            strip_nondict: self.strip_nondict,
            tweet_mode: self.tweet_mode,
            tag_mode: self.tags,
            no_tag_mode: self.no_tags,
            no_usernames: self.no_usernames,
            maintain_newlines: self.maintain_newlines,
            min_size: self.min_size,
            emit_rejects_only: self.rejects_only,
            autocorrect: self.autocorrect.map(|threshold_pct| Autocorrect {
                threshold_pct,
                min_len: self.autocorrect_min_len,
            }),
            allow_merge: self.allow_merge,
            drop_short: self.drop_short,
        }
    }

    /// Resource directory: `--resources`, else `include/` next to the
    /// executable, else `include/` in the working directory.
    pub fn resource_options(&self) -> ResourceOptions {
        let dir = self.resources.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_RESOURCE_DIR)))
                .filter(|dir| dir.is_dir())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR))
        });
        ResourceOptions {
            dir,
            additional: self.additional,
        }
    }

    /// Input path, `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.infile.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

/// Parses only the `clean` flags, for embedding callers.
#[derive(Parser, Debug)]
#[command(name = "clean", no_binary_name = true)]
pub struct CleanInvocation {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Cleaned file, one document per line
    pub file: PathBuf,

    /// Treat the whole file as a single document
    #[arg(long)]
    pub single_doc: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// File of words to remove, one per line
    #[arg(long)]
    pub words: PathBuf,

    /// Cleaned file to filter
    pub infile: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_clean_flags_map_to_config() {
        let cli = parse(&[
            "corpus-clean",
            "clean",
            "-l",
            "-p",
            "-d",
            "--tags",
            "--allow-merge",
            "--autocorrect",
            "85",
            "--min-size",
            "3",
            "input.txt",
        ]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean subcommand");
        };
        let config = args.to_config();
        assert!(config.lowercase && config.strip_punct && config.strip_nondict);
        assert!(config.tag_mode && config.allow_merge);
        assert_eq!(config.min_size, 3);
        assert_eq!(
            config.autocorrect,
            Some(Autocorrect {
                threshold_pct: 85,
                min_len: DEFAULT_AUTOCORRECT_MIN_LEN
            })
        );
        assert_eq!(args.input_path(), Some(&PathBuf::from("input.txt")));
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["corpus-clean", "clean"]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean subcommand");
        };
        assert_eq!(args.to_config(), PipelineConfig::default());
        assert!(args.input_path().is_none());
    }

    #[test]
    fn test_stdin_dash() {
        let invocation = CleanInvocation::try_parse_from(["-s", "-"]).unwrap();
        assert!(invocation.args.input_path().is_none());
        assert!(invocation.args.strip_stopwords);
    }

    #[test]
    fn test_tag_flags_conflict() {
        assert!(Cli::try_parse_from(["corpus-clean", "clean", "--tags", "--no-tags"]).is_err());
    }

    #[test]
    fn test_autocorrect_range() {
        assert!(Cli::try_parse_from(["corpus-clean", "clean", "--autocorrect", "101"]).is_err());
    }

    #[test]
    fn test_global_verbosity() {
        let cli = parse(&["corpus-clean", "summary", "-vv", "counts.txt", "--single-doc"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Summary(SummaryArgs { single_doc: true, .. })));
    }
}
