use crate::annotations::{HIGHLIGHT, MISSPELLED};
use crate::checker::dictionary::KnownWords;
use crate::document::line_col;
use crate::session::EditSession;
use crate::span::TextSpan;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One tagged range, located for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedRange {
    pub word: String,
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

/// What a host shows for one file after a session has run over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub file: String,
    pub word_count: usize,
    pub misspelled: Vec<TaggedRange>,
    pub highlights: Vec<TaggedRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacements: Option<usize>,
}

impl Report {
    pub fn from_session<D: KnownWords>(file_path: &Path, session: &EditSession<D>) -> Self {
        let text = session.text();
        let locate = |spans: &[TextSpan]| -> Vec<TaggedRange> {
            spans
                .iter()
                .map(|span| {
                    let (line, column) = line_col(text, span.start);
                    TaggedRange {
                        word: span.slice(text).unwrap_or_default().to_string(),
                        line,
                        column,
                        start: span.start,
                        end: span.end,
                    }
                })
                .collect()
        };

        Self {
            file: file_path.display().to_string(),
            word_count: session.word_count(),
            misspelled: locate(session.tags().ranges(MISSPELLED)),
            highlights: locate(session.tags().ranges(HIGHLIGHT)),
            replacements: None,
        }
    }
}

pub fn print_report(report: &Report, colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print_text_report(report, colored_output),
        OutputFormat::Json => print_json_report(report),
    }
}

fn print_text_report(report: &Report, colored_output: bool) {
    if colored_output {
        println!(
            "\n{} {}",
            report.file.bold().underline(),
            format!("({} words)", report.word_count).dimmed()
        );
    } else {
        println!("\n{} ({} words)", report.file, report.word_count);
    }

    if let Some(count) = report.replacements {
        let noun = if count == 1 { "replacement" } else { "replacements" };
        if colored_output {
            println!("  {} {} {}", "↻".cyan(), count.to_string().cyan().bold(), noun);
        } else {
            println!("  ↻ {} {}", count, noun);
        }
    }

    for range in &report.misspelled {
        let line_info = format!("{}:{}", range.line, range.column);
        if colored_output {
            println!("  {} {}", line_info.blue().bold(), range.word.red().bold().underline());
        } else {
            println!("  {} {}", line_info, range.word);
        }
    }

    for range in &report.highlights {
        let line_info = format!("{}:{}", range.line, range.column);
        if colored_output {
            println!(
                "  {} {}",
                line_info.blue().bold(),
                range.word.black().on_yellow()
            );
        } else {
            println!("  {} [{}]", line_info, range.word);
        }
    }
}

fn print_json_report(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize report: {}", e),
    }
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "misspelling" } else { "misspellings" };
        let file_word = if files.len() == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files.len(),
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors,
                error_word,
                files.len(),
                file_word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::Dictionary;
    use crate::checker::tokenizer::Tokenizer;
    use crate::checker::SpellChecker;

    #[test]
    fn test_output_format_parse() {
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_locates_ranges() {
        let dict = Dictionary::from_words(["hello", "world"]).unwrap();
        let mut session = EditSession::with_text(
            SpellChecker::new(dict, Tokenizer::default()),
            "hello\nwrold world",
        );
        session.search("WORLD");

        let report = Report::from_session(Path::new("notes.txt"), &session);
        assert_eq!(report.word_count, 3);
        assert_eq!(
            report.misspelled,
            vec![TaggedRange {
                word: "wrold".to_string(),
                line: 2,
                column: 1,
                start: 6,
                end: 11,
            }]
        );
        assert_eq!(report.highlights.len(), 1);
        assert_eq!(report.highlights[0].column, 7);
    }

    #[test]
    fn test_report_json_omits_missing_replacements() {
        let report = Report {
            file: "a.txt".to_string(),
            word_count: 0,
            misspelled: Vec::new(),
            highlights: Vec::new(),
            replacements: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("replacements"));
    }
}
