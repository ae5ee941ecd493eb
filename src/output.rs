//! Output formatting for match listings and fold checks

use foldsub::Resolved;
use std::collections::BTreeSet;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color && io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print every selected match in ripgrep-style `path:line:column:` format,
/// followed by its replacement
pub fn print_matches(
    path: Option<&Path>,
    text: &str,
    matches: &[Resolved],
    color: bool,
) -> io::Result<()> {
    let mut stdout = stdout(color);

    for m in matches {
        let line_start = memchr::memrchr(b'\n', &text.as_bytes()[..m.range.start])
            .map_or(0, |pos| pos + 1);
        let line_end = memchr::memchr(b'\n', &text.as_bytes()[m.range.start..])
            .map_or(text.len(), |pos| m.range.start + pos);
        let line_number = memchr::memchr_iter(b'\n', &text.as_bytes()[..line_start]).count() + 1;
        let column = text[line_start..m.range.start].chars().count() + 1;

        if let Some(path) = path {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(stdout, "{}", path.display())?;
            stdout.reset()?;
            write!(stdout, ":")?;
        }

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}:{}", line_number, column)?;
        stdout.reset()?;
        write!(stdout, ":")?;

        print_match_line(
            &mut stdout,
            &text[line_start..line_end],
            m.range.start - line_start,
            m.range.end.min(line_end) - line_start,
        )?;

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, " => ")?;
        stdout.reset()?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(stdout, "{}", m.replacement)?;
        stdout.reset()?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// Print a line with the matched part highlighted
fn print_match_line(
    stdout: &mut StandardStream,
    content: &str,
    match_start: usize,
    match_end: usize,
) -> io::Result<()> {
    // Text before match
    if match_start > 0 {
        write!(stdout, "{}", &content[..match_start])?;
    }

    // The match itself (highlighted)
    if match_end > match_start {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", &content[match_start..match_end])?;
        stdout.reset()?;
    }

    // Text after match
    if match_end < content.len() {
        write!(stdout, "{}", &content[match_end..])?;
    }

    Ok(())
}

/// Print the characters that cannot be transliterated, one per line
pub fn print_unfoldable(
    path: Option<&Path>,
    chars: &BTreeSet<char>,
    color: bool,
) -> io::Result<()> {
    let mut stdout = stdout(color);

    for ch in chars {
        if let Some(path) = path {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(stdout, "{}", path.display())?;
            stdout.reset()?;
            write!(stdout, ":")?;
        }
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", ch)?;
        stdout.reset()?;
        writeln!(stdout, " U+{:04X}", *ch as u32)?;
    }

    Ok(())
}
