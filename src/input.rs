/*! Parser for the line-oriented task-set text format

A task set is described by an optional count header followed by one
task per line:

```text
3
T1 (0, 4, 2)
T2 (0, 4, 2)
T3 (5, 9, 1)
```

Each task line reads `NAME (release, deadline, computation)`. The
parser consumes a string; obtaining that string (from a file, the
network, or a literal) is the caller's concern.
*/

use std::collections::HashSet;

use thiserror::Error;

use crate::task::{InvalidTaskWindow, Task};
use crate::time::Time;

/// Error type describing why a task-set text could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line matched neither the count header nor the task shape.
    #[error("line {line}: cannot parse {text:?} as `NAME (release, deadline, computation)`")]
    MalformedLine { line: usize, text: String },
    /// A task's deadline does not lie strictly after its release.
    #[error("line {line}: {source}")]
    InvalidWindow {
        line: usize,
        source: InvalidTaskWindow,
    },
    /// Two tasks share a name.
    #[error("line {line}: duplicate task name {name:?}")]
    DuplicateName { line: usize, name: String },
    /// The count header disagrees with the number of task lines.
    #[error("header declares {declared} task(s), but {found} were given")]
    CountMismatch { declared: usize, found: usize },
}

/// Parse a task set from its textual description.
///
/// The format is line-oriented: an optional leading line holding a
/// bare integer declares how many tasks follow, and every other
/// non-blank line describes one task as `NAME (release, deadline,
/// computation)`. Whitespace around tokens is insignificant, blank
/// lines are skipped, and an empty input yields an empty task set.
///
/// Parsing is strict: malformed lines, duplicate task names, empty
/// task windows, and a count header that disagrees with the number
/// of task lines are all reported as errors rather than skipped, so
/// the scheduler never sees a task set that violates its input
/// contract.
pub fn parse_task_set(input: &str) -> Result<Vec<Task>, ParseError> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut names: HashSet<String> = HashSet::new();
    let mut declared: Option<usize> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;

        // an optional count header may precede the first task
        if declared.is_none() && tasks.is_empty() {
            if let Ok(count) = line.parse::<usize>() {
                declared = Some(count);
                continue;
            }
        }

        let (name, release, deadline, computation) =
            parse_task_line(line).ok_or_else(|| ParseError::MalformedLine {
                line: lineno,
                text: line.to_string(),
            })?;
        if !names.insert(name.clone()) {
            return Err(ParseError::DuplicateName { line: lineno, name });
        }
        let task = Task::new(name, release, deadline, computation)
            .map_err(|source| ParseError::InvalidWindow {
                line: lineno,
                source,
            })?;
        tasks.push(task);
    }

    if let Some(declared) = declared {
        if declared != tasks.len() {
            return Err(ParseError::CountMismatch {
                declared,
                found: tasks.len(),
            });
        }
    }
    Ok(tasks)
}

fn parse_task_line(line: &str) -> Option<(String, Time, Time, Time)> {
    let (name, rest) = line.split_once('(')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let args = rest.trim_end().strip_suffix(')')?;
    let mut fields = args.split(',').map(str::trim);
    let release = fields.next()?.parse().ok()?;
    let deadline = fields.next()?.parse().ok()?;
    let computation = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((name.to_string(), release, deadline, computation))
}

#[cfg(test)]
mod tests {
    use super::{parse_task_set, ParseError};
    use crate::tests::t;

    #[test]
    fn parses_headered_task_set() {
        let input = "2\nT1 (0, 4, 2)\nT2 (0, 4, 2)\n";
        let tasks = parse_task_set(input).unwrap();
        assert_eq!(tasks, vec![t("T1", 0, 4, 2), t("T2", 0, 4, 2)]);
    }

    #[test]
    fn header_is_optional() {
        let input = "T1 (0, 4, 2)";
        assert_eq!(parse_task_set(input).unwrap(), vec![t("T1", 0, 4, 2)]);
    }

    #[test]
    fn tolerates_blank_lines_and_spacing() {
        let input = "\n  2 \n\n  T1 ( 0 ,4,  2 ) \n\nT2 (1, 9, 3)\n\n";
        let tasks = parse_task_set(input).unwrap();
        assert_eq!(tasks, vec![t("T1", 0, 4, 2), t("T2", 1, 9, 3)]);
    }

    #[test]
    fn empty_input_is_an_empty_task_set() {
        assert_eq!(parse_task_set(""), Ok(vec![]));
        assert_eq!(parse_task_set("\n  \n"), Ok(vec![]));
    }

    #[test]
    fn malformed_lines_are_rejected_with_position() {
        let input = "T1 (0, 4, 2)\nT2 (0, 4)\n";
        assert_eq!(
            parse_task_set(input),
            Err(ParseError::MalformedLine {
                line: 2,
                text: "T2 (0, 4)".to_string(),
            })
        );
        assert!(matches!(
            parse_task_set("garbage"),
            Err(ParseError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            parse_task_set("T1 (0, 4, 2, 7)"),
            Err(ParseError::MalformedLine { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let input = "T1 (0, 4, 2)\nT1 (5, 9, 1)\n";
        assert_eq!(
            parse_task_set(input),
            Err(ParseError::DuplicateName {
                line: 2,
                name: "T1".to_string(),
            })
        );
    }

    #[test]
    fn empty_windows_are_rejected() {
        let input = "T1 (4, 4, 2)";
        assert!(matches!(
            parse_task_set(input),
            Err(ParseError::InvalidWindow { line: 1, .. })
        ));
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let input = "3\nT1 (0, 4, 2)\nT2 (0, 4, 2)\n";
        assert_eq!(
            parse_task_set(input),
            Err(ParseError::CountMismatch {
                declared: 3,
                found: 2,
            })
        );
    }
}
