//! Text and CSV rendering of evaluated guesses.

use std::cmp::Reverse;
use std::io::{self, Write};

use clap::ValueEnum;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::simulate::GuessReport;
use crate::stats::{answers_by_pool_size, rank_hardest};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One CSV line per guess
    Csv,
    /// Narrowest and widest pools per guess
    Basic,
    /// Guesses ranked by score
    Score,
    /// Every pool size per guess
    Verbose,
    /// Answers a guess identifies on its own
    Unambiguous,
    /// Answers ranked by average pool size over all guesses
    Hardest,
}

pub fn present<W: Write>(
    out: &mut W,
    format: OutputFormat,
    header: bool,
    reports: &[GuessReport],
) -> io::Result<()> {
    if header {
        write_header(out, format)?;
    }

    match format {
        OutputFormat::Basic => reports.iter().try_for_each(|report| write_basic(out, report)),
        OutputFormat::Verbose => reports.iter().try_for_each(|report| write_verbose(out, report)),
        OutputFormat::Csv => reports.iter().try_for_each(|report| write_csv(out, report)),
        OutputFormat::Unambiguous => reports
            .iter()
            .try_for_each(|report| write_unambiguous(out, report)),
        OutputFormat::Score => write_scores(out, reports),
        OutputFormat::Hardest => write_hardest(out, reports),
    }
}

fn write_header<W: Write>(out: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Basic | OutputFormat::Verbose => {
            writeln!(out, "Hero name")?;
            writeln!(out, "Narrowest plausible pool: integer")?;
            writeln!(out, "Narrowest plausible pool answers: list of heroes")?;
            writeln!(out, "Widest plausible pool: integer")?;
            writeln!(out, "Widest plausible pool answers: list of heroes")?;
            writeln!(out, "Average plausibles: float")?;
            writeln!(out, "Score: sum of 1/plausibles for all answers, float")?;
        }
        OutputFormat::Csv => {
            let columns = [
                "Hero",
                "Best case plausible amount",
                "Answers with best case plausibles",
                "Worst case plausible amount",
                "Answers with worst case plausibles",
                "Average pool size",
                "Score(sum of 1/pool size)",
            ];
            writeln!(out, "{}", columns.join(","))?;
        }
        OutputFormat::Unambiguous => {
            writeln!(out, "Guessed hero: ")?;
            writeln!(out, "Comma separated list of unambiguous answers")?;
        }
        OutputFormat::Score => writeln!(out, "Scores of heroes, bigger is better")?,
        OutputFormat::Hardest => {
            writeln!(out, "Average plausibles for each answer, bigger is harder")?
        }
    }

    writeln!(out)
}

fn write_basic<W: Write>(out: &mut W, report: &GuessReport) -> io::Result<()> {
    let stats = &report.stats;

    writeln!(out, "{}", report.guess)?;
    writeln!(out, "Narrowest plausible pool: {}", stats.best_case)?;
    writeln!(out, "Narrowest plausible pool answers: {}", name_list(&stats.best_answers))?;
    writeln!(out, "Widest plausible pool: {}", stats.worst_case)?;
    writeln!(out, "Widest plausible pool answers: {}", name_list(&stats.worst_answers))?;
    writeln!(out, "Average plausibles: {}", float(stats.average))?;
    writeln!(out, "Score: {}", float(stats.score))?;
    writeln!(out)
}

fn write_verbose<W: Write>(out: &mut W, report: &GuessReport) -> io::Result<()> {
    writeln!(out, "{}", report.guess)?;
    for (size, answers) in answers_by_pool_size(&report.pool) {
        writeln!(out, "{size}: {}", answers.join(", "))?;
    }
    writeln!(out, "Average plausibles: {}", float(report.stats.average))?;
    writeln!(out, "Score: {}", float(report.stats.score))?;
    writeln!(out)
}

fn write_csv<W: Write>(out: &mut W, report: &GuessReport) -> io::Result<()> {
    let stats = &report.stats;
    let line = [
        report.guess.clone(),
        stats.best_case.to_string(),
        stats.best_answers.join(";"),
        stats.worst_case.to_string(),
        stats.worst_answers.join(";"),
        float(stats.average),
        float(stats.score),
    ];

    writeln!(out, "{}", line.join(","))
}

fn write_unambiguous<W: Write>(out: &mut W, report: &GuessReport) -> io::Result<()> {
    writeln!(out, "{}: ", report.guess)?;
    writeln!(out, "{}", report.stats.unambiguous.join(", "))?;
    writeln!(out)
}

fn write_scores<W: Write>(out: &mut W, reports: &[GuessReport]) -> io::Result<()> {
    for report in reports
        .iter()
        .sorted_by_key(|report| Reverse(OrderedFloat(report.stats.score)))
    {
        writeln!(out, "{}: {}", report.guess, float(report.stats.score))?;
    }
    Ok(())
}

fn write_hardest<W: Write>(out: &mut W, reports: &[GuessReport]) -> io::Result<()> {
    for difficulty in rank_hardest(reports.iter().map(|report| &report.pool)) {
        writeln!(out, "{}: {}", difficulty.answer, float(difficulty.average()))?;
    }
    Ok(())
}

/// Shortest round-tripping form, always with a fractional part.
fn float(value: f64) -> String {
    format!("{value:?}")
}

/// Names rendered the way Python prints a list of strings.
fn name_list(names: &[String]) -> String {
    format!("[{}]", names.iter().map(|name| quoted(name)).join(", "))
}

fn quoted(name: &str) -> String {
    let quote = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for chr in name.chars() {
        match chr {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            chr if chr == quote => {
                out.push('\\');
                out.push(chr);
            }
            chr if chr.is_control() => out.push_str(&format!("\\x{:02x}", chr as u32)),
            chr => out.push(chr),
        }
    }
    out.push(quote);
    out
}
