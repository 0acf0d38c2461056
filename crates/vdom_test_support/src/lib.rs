//! Helpers shared by the reconciliation test suites.

use std::fmt::Write;

pub mod fixtures;

const MISSING: &str = "<missing>";
const INDENT_STEP: usize = 2;

/// Side-by-side report of two tree snapshots around their first differing line.
///
/// Snapshot lines nest by indentation, so the report also names the chain of
/// expected elements enclosing the mismatch.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    fn line(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or(MISSING)
    }
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    let Some(first) = (0..max).find(|&i| line(expected, i) != line(actual, i)) else {
        let _ = writeln!(&mut out, "snapshots are identical ({} lines)", expected.len());
        return out;
    };

    let start = first.saturating_sub(2);
    let end = (first + 3).min(max);
    let _ = writeln!(
        &mut out,
        "first mismatch at line {} under {}:",
        first + 1,
        enclosing_path(expected, first)
    );
    for i in start..end {
        let marker = if i == first { ">" } else { " " };
        let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", i + 1, line(expected, i));
        let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", i + 1, line(actual, i));
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Tags of the elements enclosing line `at`, outermost first, e.g. `/ul/li`.
fn enclosing_path(lines: &[String], at: usize) -> String {
    let depth_of = |line: &str| (line.len() - line.trim_start().len()) / INDENT_STEP;
    let mut depth = lines.get(at).map_or(usize::MAX, |line| depth_of(line));
    let mut chain = Vec::new();
    for line in lines[..at.min(lines.len())].iter().rev() {
        let line_depth = depth_of(line);
        if line_depth >= depth || !line.trim_start().starts_with('<') {
            continue;
        }
        depth = line_depth;
        let tag = line
            .trim_start()
            .trim_start_matches('<')
            .split([' ', '>'])
            .next()
            .unwrap_or_default();
        chain.push(tag);
        if depth == 0 {
            break;
        }
    }
    if chain.is_empty() {
        return "/".to_string();
    }
    chain.reverse();
    format!("/{}", chain.join("/"))
}

#[cfg(test)]
mod tests {
    use super::diff_lines;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_enclosing_elements_of_first_mismatch() {
        let expected = lines(&["<ul>", "  <li a=\"1\">", "    \"one\"", "  <li>", "    \"two\""]);
        let actual = lines(&["<ul>", "  <li a=\"1\">", "    \"one\"", "  <li>", "    \"2\""]);
        let report = diff_lines(&expected, &actual);
        assert!(report.contains("first mismatch at line 5 under /ul/li:"), "{report}");
        assert!(report.contains(">    5    actual: \"2\""), "{report}");
    }

    #[test]
    fn missing_lines_are_marked() {
        let report = diff_lines(&lines(&["<ul>", "  <li>"]), &lines(&["<ul>"]));
        assert!(report.contains("actual: <missing>"), "{report}");
        assert!(report.contains("under /ul:"), "{report}");
        assert!(report.contains("expected 2 lines, actual 1 lines"), "{report}");
    }

    #[test]
    fn identical_snapshots_say_so() {
        let snapshot = lines(&["\"x\""]);
        assert_eq!(diff_lines(&snapshot, &snapshot), "snapshots are identical (1 lines)\n");
    }
}
