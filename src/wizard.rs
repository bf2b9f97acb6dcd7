//! Interactive prompts behind `pratac init`.

use crate::config::{Configuration, DATE_FORMAT, parse_date};
use crate::error::{PratacError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prints `prompt` and reads one line. EOF is an error.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PratacError::InvalidConfig(
            "input ended before setup was finished".into(),
        ));
    }
    Ok(line.trim().to_string())
}

fn ask_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Vec<String>> {
    loop {
        let items = split_list(&ask(input, output, prompt)?);
        if !items.is_empty() {
            return Ok(items);
        }
        writeln!(output, "Please enter at least one value.")?;
    }
}

pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    let answer = ask(input, output, &format!("{prompt} [y/N]: "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Walks the user through participants, aliases, areas and the start date.
/// A blank start date means `today`.
pub fn prompt_configuration<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<Configuration> {
    writeln!(output, "Setting up a new cleaning rotation.")?;
    let participants = ask_list(input, output, "Participants (comma-separated): ")?;

    let mut aliases = BTreeMap::new();
    for name in &participants {
        let list = split_list(&ask(
            input,
            output,
            &format!("Aliases for {name} (comma-separated, blank for none): "),
        )?);
        if !list.is_empty() {
            aliases.insert(name.clone(), list);
        }
    }

    let areas = ask_list(input, output, "Cleaning areas in rotation order (comma-separated): ")?;

    let start_date = loop {
        let answer = ask(
            input,
            output,
            &format!("Start date [{}]: ", today.format(DATE_FORMAT)),
        )?;
        if answer.is_empty() {
            break today;
        }
        match parse_date(&answer) {
            Ok(date) => break date,
            Err(err) => writeln!(output, "{err}")?,
        }
    };

    let config = Configuration::new(participants, aliases, areas, start_date);
    config.validate()?;
    Ok(config)
}
