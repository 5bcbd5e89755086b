//! Rendering of lookup results for the terminal.
//!
//! # Invariants
//! - Entries are written in input order.
//! - JSON output is an array of `{input, result}` objects so order survives.

use clap::ValueEnum;
use enlite_core::{
    AliasSet, BatchProjection, CanonicalRef, CompoundInfo, Namespace, ReactionInfo, Resolution,
};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Plain-text body of one entry, written under its input identifier.
pub trait TextReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

#[derive(Serialize)]
struct Entry<'a, T> {
    input: &'a str,
    result: &'a T,
}

/// Writes `entries` in the requested format.
pub fn write_report<'a, W, T, I>(
    out: &mut W,
    format: OutputFormat,
    header: Option<&str>,
    entries: I,
) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + TextReport + 'a,
    I: IntoIterator<Item = (&'a str, &'a T)>,
{
    match format {
        OutputFormat::Json => {
            let entries = entries
                .into_iter()
                .map(|(input, result)| Entry { input, result })
                .collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if let Some(header) = header {
                writeln!(out, "{header}")?;
            }
            for (input, result) in entries {
                writeln!(out, "{input}")?;
                result.write_text(&mut *out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_values(out: &mut dyn Write, values: &[String]) -> io::Result<()> {
    if values.is_empty() {
        return writeln!(out, "\t-");
    }
    for value in values {
        writeln!(out, "\t{value}")?;
    }
    Ok(())
}

fn write_alias_set(out: &mut dyn Write, set: &AliasSet) -> io::Result<()> {
    for namespace in Namespace::ALL {
        let aliases = set.aliases(namespace);
        let joined = if aliases.is_empty() {
            "-".to_string()
        } else {
            aliases.join(", ")
        };
        writeln!(out, "\t{namespace}: {joined}")?;
    }
    Ok(())
}

fn write_metacyc_forms(out: &mut dyn Write, lookup: &CanonicalRef) -> io::Result<()> {
    if lookup.normal_id.is_none() && lookup.mangled_id.is_none() {
        return Ok(());
    }
    write_field(out, "metacyc_id", lookup.normal_id.as_deref())?;
    write_field(out, "altered_id", lookup.mangled_id.as_deref())
}

fn write_field(out: &mut dyn Write, label: &str, value: Option<&str>) -> io::Result<()> {
    writeln!(out, "\t{label}: {}", value.unwrap_or("-"))
}

impl TextReport for Resolution {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Alias(alias) => writeln!(out, "\t{}", alias.as_deref().unwrap_or("-")),
            Self::All(set) => write_alias_set(out, set),
        }
    }
}

impl TextReport for BatchProjection {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Aliases(aliases) => write_values(out, aliases),
            Self::All(set) => write_alias_set(out, set),
        }
    }
}

impl TextReport for CompoundInfo {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let record = &self.record;
        write_metacyc_forms(out, &self.lookup)?;
        write_field(out, "cpd_id", Some(&record.canonical_id))?;
        write_field(out, "abbreviation", record.abbreviation.as_deref())?;
        write_field(out, "name", record.name.as_deref())?;
        write_field(out, "formula", record.formula.as_deref())?;
        write_field(out, "charge", record.charge.as_deref())?;
        write_field(out, "mass", record.mass.map(|m| m.to_string()).as_deref())?;
        write_field(out, "inchikey", record.inchikey.as_deref())
    }
}

impl TextReport for ReactionInfo {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let record = &self.record;
        write_metacyc_forms(out, &self.lookup)?;
        write_field(out, "rxn_id", Some(&record.canonical_id))?;
        write_field(out, "name", record.name.as_deref())?;
        write_field(out, "equation", record.equation.as_deref())?;
        write_field(out, "stoichiometry", record.stoichiometry.as_deref())?;
        write_field(out, "deltag", record.deltag.map(|g| g.to_string()).as_deref())
    }
}

impl TextReport for u32 {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\t{self}")
    }
}
