//! Line sources: a stdin pipe, or a list of files streamed back to back.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::core::error::ChartError;

/// Streaming line input for ingest. Files are played in argument order;
/// a file that stops being readable is reported and skipped rather than
/// aborting the stream.
pub enum LineSource {
    Stdin(io::StdinLock<'static>),
    Files {
        pending: std::vec::IntoIter<String>,
        current: Option<(String, BufReader<File>)>,
    },
}

/// Resolve the `FILE` arguments into a source. No arguments means stdin.
/// Missing paths warn individually; when every given path is missing the
/// run is abandoned.
pub fn open(paths: Vec<String>) -> Result<LineSource, ChartError> {
    if paths.is_empty() {
        return Ok(LineSource::Stdin(io::stdin().lock()));
    }
    let mut found = Vec::new();
    for path in paths {
        if Path::new(&path).exists() {
            found.push(path);
        } else {
            eprintln!("{path}: No such file or directory");
        }
    }
    if found.is_empty() {
        return Err(ChartError::NoInput);
    }
    Ok(LineSource::Files {
        pending: found.into_iter(),
        current: None,
    })
}

impl LineSource {
    /// Next line with the terminator stripped; `None` at end of stream.
    /// An interrupted read ends the stream so the caller can report the
    /// partial load.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        match self {
            LineSource::Stdin(lock) => match take_line(lock) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
                other => other,
            },
            LineSource::Files { pending, current } => loop {
                if let Some((path, reader)) = current {
                    match take_line(reader) {
                        Ok(Some(line)) => return Ok(Some(line)),
                        Ok(None) => *current = None,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
                        Err(e) => {
                            eprintln!("Error reading {path}: {e}");
                            *current = None;
                        }
                    }
                } else {
                    let Some(path) = pending.next() else {
                        return Ok(None);
                    };
                    match File::open(&path) {
                        Ok(f) => *current = Some((path, BufReader::new(f))),
                        Err(e) => eprintln!("Error reading {path}: {e}"),
                    }
                }
            },
        }
    }
}

fn take_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn terminators_are_stripped() {
        let mut src = Cursor::new(b"one\ntwo\r\nthree".to_vec());
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some("one"));
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some("two"));
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some("three"));
        assert_eq!(take_line(&mut src).unwrap(), None);
    }

    #[test]
    fn blank_lines_survive() {
        let mut src = Cursor::new(b"\n\nx\n".to_vec());
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some(""));
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some(""));
        assert_eq!(take_line(&mut src).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn all_paths_missing_is_an_error() {
        let err = open(vec!["/nonexistent/uchart-test-a".into()]).err();
        assert!(matches!(err, Some(ChartError::NoInput)));
    }

    #[test]
    fn files_stream_in_argument_order() {
        let dir = std::env::temp_dir();
        let a = dir.join("uchart-input-a.txt");
        let b = dir.join("uchart-input-b.txt");
        std::fs::write(&a, "1\n2\n").unwrap();
        std::fs::write(&b, "3\n").unwrap();

        let mut src = open(vec![
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ])
        .unwrap();
        let mut lines = Vec::new();
        while let Some(line) = src.next_line().unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, ["1", "2", "3"]);

        std::fs::remove_file(a).ok();
        std::fs::remove_file(b).ok();
    }
}
