mod output;

use anyhow::{Context, Result};
use clap::Parser;
use foldsub::{Deunicode, FoldReplace, PatternFlags, ReplaceOptions, Resolved, Search, Substitution};
use log::debug;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "foldsub")]
#[command(about = "Search and replace on transliterated text, keeping the original characters")]
struct Cli {
    /// Text (or pattern, with --regex) to search for; repeat for several searches
    #[arg(short, long = "search", required_unless_present = "check")]
    search: Vec<String>,

    /// Replacement: one for all searches, or one per search
    #[arg(short = 'r', long = "sub", conflicts_with = "wrap")]
    sub: Vec<String>,

    /// Surround matches with PREFIX and SUFFIX instead of replacing them
    #[arg(short, long, num_args = 2, value_names = ["PREFIX", "SUFFIX"])]
    wrap: Option<Vec<String>>,

    /// Treat searches as regular expressions
    #[arg(short = 'e', long)]
    regex: bool,

    /// Case-insensitive search
    #[arg(short, long)]
    ignore_case: bool,

    /// Keep overlapping matches
    #[arg(long)]
    overlaps: bool,

    /// Replace at most NUM matches per input
    #[arg(short = 'n', long, value_name = "NUM")]
    max_count: Option<usize>,

    /// Ignore matches starting before this byte offset
    #[arg(long, value_name = "OFFSET")]
    start: Option<usize>,

    /// Ignore matches reaching past this byte offset
    #[arg(long, value_name = "OFFSET")]
    end: Option<usize>,

    /// Search the text as-is, without transliteration
    #[arg(long)]
    no_fold: bool,

    /// Only match whole transliterated characters
    #[arg(long)]
    strict_boundaries: bool,

    /// Load default options from a JSON file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Rewrite files instead of printing the result
    #[arg(long)]
    in_place: bool,

    /// List the selected matches and their replacements instead of the result
    #[arg(long, conflicts_with = "in_place")]
    matches: bool,

    /// List characters that cannot be transliterated
    #[arg(long, conflicts_with_all = ["in_place", "matches"])]
    check: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Input files (stdin when none are given)
    files: Vec<PathBuf>,
}

impl Cli {
    fn replace_options(&self) -> Result<ReplaceOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => ReplaceOptions::default(),
        };

        if self.regex {
            options.use_pattern_search = true;
        }
        if self.ignore_case {
            options.case_sensitive = false;
            options.pattern_flags |= PatternFlags::CASE_INSENSITIVE;
        }
        if self.overlaps {
            options.allow_overlaps = true;
        }
        if self.no_fold {
            options.unidecoded_search = false;
        }
        if self.strict_boundaries {
            options.strict_boundaries = true;
        }
        if self.max_count.is_some() {
            options.max_count = self.max_count;
        }
        if self.start.is_some() {
            options.start_pos = self.start;
        }
        if self.end.is_some() {
            options.end_pos = self.end;
        }

        Ok(options)
    }

    fn substitutions(&self) -> Result<Vec<Substitution>> {
        match &self.wrap {
            Some(affixes) => match affixes.as_slice() {
                [prefix, suffix] => Ok(vec![Substitution::wrap(prefix.as_str(), suffix.as_str())]),
                _ => anyhow::bail!("--wrap takes a PREFIX and a SUFFIX"),
            },
            None if self.sub.is_empty() => anyhow::bail!("either --sub or --wrap is required"),
            None => Ok(self.sub.iter().map(|s| Substitution::text(s.as_str())).collect()),
        }
    }
}

/// Outcome of processing one input
struct Processed {
    path: Option<PathBuf>,
    text: String,
    matches: Vec<Resolved>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let engine = FoldReplace::new(Deunicode);

    if cli.check {
        return check(&engine, &cli);
    }

    let options = cli.replace_options()?;
    let searches: Vec<Search> = cli.search.iter().map(|s| Search::literal(s.as_str())).collect();
    let subs = cli.substitutions()?;

    let run = |path: Option<&Path>, text: String| -> Result<Processed> {
        let matches = engine
            .find(&text, searches.clone(), subs.clone(), &options)
            .with_context(|| match path {
                Some(path) => format!("Failed to process {}", path.display()),
                None => "Failed to process stdin".to_string(),
            })?;
        debug!("{} matches selected", matches.len());
        Ok(Processed {
            path: path.map(Path::to_path_buf),
            text,
            matches,
        })
    };

    let processed: Vec<Processed> = if cli.files.is_empty() {
        if cli.in_place {
            anyhow::bail!("--in-place needs at least one file");
        }
        vec![run(None, read_stdin()?)?]
    } else {
        cli.files
            .par_iter()
            .map(|path| {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                run(Some(path.as_path()), text)
            })
            .collect::<Result<Vec<_>>>()?
    };

    let show_paths = cli.files.len() > 1;
    let mut stdout = io::stdout().lock();
    for item in processed {
        let path = item.path.as_deref();
        if cli.matches {
            output::print_matches(
                path.filter(|_| show_paths),
                &item.text,
                &item.matches,
                !cli.no_color,
            )?;
            continue;
        }

        let result = foldsub::apply(&item.text, &item.matches);
        match path {
            Some(path) if cli.in_place => {
                if !item.matches.is_empty() {
                    fs::write(path, result)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
            }
            _ => stdout.write_all(result.as_bytes())?,
        }
    }

    Ok(())
}

fn check(engine: &FoldReplace, cli: &Cli) -> Result<()> {
    if cli.files.is_empty() {
        let text = read_stdin()?;
        output::print_unfoldable(None, &engine.unfoldable_chars(&text), !cli.no_color)?;
        return Ok(());
    }

    for path in &cli.files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        output::print_unfoldable(Some(path), &engine.unfoldable_chars(&text), !cli.no_color)?;
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}
