//! Identifier input: one id from the command line, or a list file.

use anyhow::Context;
use std::path::Path;

/// Returns the identifiers to process, in order.
///
/// With `is_list`, `value` is a file path; each line is trimmed and blank
/// lines are skipped.
pub fn collect_identifiers(value: &str, is_list: bool) -> anyhow::Result<Vec<String>> {
    if !is_list {
        return Ok(vec![value.trim().to_string()]);
    }

    let path = Path::new(value);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read identifier list {}", path.display()))?;
    Ok(parse_identifier_list(&text))
}

fn parse_identifier_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{collect_identifiers, parse_identifier_list};

    #[test]
    fn list_skips_blank_lines_and_trims() {
        let ids = parse_identifier_list("cpd00001\n\n  cpd00027 \r\n\t\ncpd00002");
        assert_eq!(ids, vec!["cpd00001", "cpd00027", "cpd00002"]);
    }

    #[test]
    fn list_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, "C00001\nC00031\n").unwrap();

        let ids = collect_identifiers(path.to_str().unwrap(), true).unwrap();
        assert_eq!(ids, vec!["C00001", "C00031"]);
    }

    #[test]
    fn single_value_is_not_treated_as_path() {
        let ids = collect_identifiers("ids.txt", false).unwrap();
        assert_eq!(ids, vec!["ids.txt"]);
        assert!(collect_identifiers("/no/such/ids.txt", true).is_err());
    }
}
