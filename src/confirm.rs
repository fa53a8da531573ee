//! Operator confirmation gate, asked twice before a sweep may start.
//!
//! The second prompt restates that the deletion cannot be undone. Only an
//! explicit `y`/`yes` accepts; anything else, including end of input,
//! declines.

use std::io::{self, BufRead, Write};

use crate::collections::CollectionSpec;

/// Ask both confirmation questions on `output`, reading answers from `input`.
///
/// Returns `Ok(false)` as soon as one answer is not a yes; the second
/// question is never asked after a first refusal.
///
/// # Errors
///
/// Returns an I/O error if writing a prompt or reading an answer fails.
pub fn confirm_twice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    collections: &[CollectionSpec],
    base_url: &str,
) -> io::Result<bool> {
    writeln!(output, "The following collections on {base_url} will be emptied:")?;
    for collection in collections {
        writeln!(output, "  - {} ({})", collection.label, collection.endpoint)?;
    }
    if !ask(input, output, "Delete ALL records in these collections? [y/N] ")? {
        return Ok(false);
    }
    ask(input, output, "This cannot be undone. Are you absolutely sure? [y/N] ")
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "confirm_test.rs"]
mod tests;
