use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::*;
use dialoguer::Confirm;
use spelltag::cli::output::{print_check_summary, print_report, OutputFormat, Report};
use spelltag::config::Overrides;
use spelltag::{Config, Dictionary, EditSession, SpellChecker, Tokenizer, WordPolicy};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

const SYSTEM_WORD_LIST: &str = "/usr/share/dict/words";

#[derive(Parser, Debug)]
#[command(name = "spelltag")]
#[command(version, about = "Tag misspellings and search matches in text files", long_about = None)]
struct Cli {
    /// Files to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Highlight every case-insensitive match of this query
    #[arg(long, value_name = "QUERY")]
    find: Option<String>,

    /// Replace every match of --find with this text
    #[arg(long, value_name = "TEXT", requires = "find")]
    replace: Option<String>,

    /// Write replaced text back to the file
    #[arg(long, requires = "replace")]
    write: bool,

    /// Word to ignore for this run (repeatable)
    #[arg(long, value_name = "WORD")]
    ignore: Vec<String>,

    /// Plain word list, one word per line
    #[arg(long, value_name = "PATH", conflicts_with = "dict")]
    words: Option<PathBuf>,

    /// Compiled dictionary built with `spelltag build-dict`
    #[arg(long, value_name = "PATH")]
    dict: Option<PathBuf>,

    /// Only ASCII letters form words
    #[arg(long)]
    ascii: bool,

    /// Ask whether to ignore each misspelled word
    #[arg(short, long)]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if misspellings are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a plain word list into a dictionary file
    BuildDict {
        /// Word list, one word per line
        wordlist: PathBuf,
        /// Output dictionary path
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spelltag", &mut io::stdout());
        return Ok(());
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let config = Config::load(Overrides {
        word_policy: cli.ascii.then_some(WordPolicy::Ascii),
        dictionary: cli.dict.clone().or_else(|| cli.words.clone()),
        ignore_words: cli.ignore.clone(),
    })?;
    let dictionary = load_dictionary(&config)?;
    info!(words = dictionary.len(), "dictionary loaded");

    let colored = !cli.no_color;
    let mut total_errors = 0;

    for file_path in &cli.files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            continue;
        }
        total_errors += process_file(file_path, &cli, &config, &dictionary)?;
    }

    if matches!(cli.format, OutputFormat::Text) {
        print_check_summary(total_errors, &cli.files, colored);
    }

    if total_errors > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn process_file(
    file_path: &Path,
    cli: &Cli,
    config: &Config,
    dictionary: &Dictionary,
) -> Result<usize> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let checker = SpellChecker::new(dictionary, Tokenizer::new(config.word_policy))
        .with_ignore_patterns(&config.ignore_patterns)?
        .with_ignored(config.ignore_words.iter().cloned());
    let mut session = EditSession::with_text(checker, content);

    let mut replacements = None;
    match (&cli.find, &cli.replace) {
        (Some(query), Some(replacement)) => {
            let count = session.replace_all(query, replacement);
            info!(file = %file_path.display(), count, "replaced");
            if cli.write && count > 0 {
                fs::write(file_path, session.text())
                    .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
            }
            replacements = Some(count);
        }
        (Some(query), None) => session.search(query),
        _ => {}
    }

    if cli.interactive {
        prompt_ignores(&mut session, !cli.no_color)?;
    }

    let mut report = Report::from_session(file_path, &session);
    report.replacements = replacements;
    print_report(&report, !cli.no_color, &cli.format);

    Ok(report.misspelled.len())
}

/// Offer each distinct misspelled word for ignoring, re-checking after
/// every accepted word.
fn prompt_ignores(session: &mut EditSession<&Dictionary>, colored: bool) -> Result<()> {
    let words: Vec<String> = session
        .checker()
        .misspelled_words(session.text())
        .into_iter()
        .map(str::to_string)
        .collect();

    for word in words {
        let prompt = if colored {
            format!("Ignore '{}'?", word.red().bold())
        } else {
            format!("Ignore '{}'?", word)
        };
        let ignore = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read answer")?;
        if ignore {
            session.ignore_word(&word);
        }
    }

    Ok(())
}

fn load_dictionary(config: &Config) -> Result<Dictionary> {
    let path = match &config.dictionary {
        Some(path) => path.clone(),
        None => PathBuf::from(SYSTEM_WORD_LIST),
    };

    if !path.exists() {
        anyhow::bail!(
            "Dictionary not found: {}. Pass --words or --dict, or set `dictionary` in {}.",
            path.display(),
            spelltag::config::LOCAL_CONFIG_FILE
        );
    }

    // A compiled dictionary is tried first; anything else is read as a word list.
    Dictionary::load_from_path(&path)
        .or_else(|_| Dictionary::load_word_list(&path))
        .with_context(|| format!("Failed to load dictionary: {}", path.display()))
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::BuildDict { wordlist, output } => {
            let content = fs::read_to_string(&wordlist)
                .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;
            let words: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect();
            let count = Dictionary::build_from_words(&words, &output)
                .with_context(|| format!("Failed to build dictionary: {}", output.display()))?;
            println!(
                "{} {} words to {}",
                "✓ Compiled".green().bold(),
                count,
                output.display()
            );
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
