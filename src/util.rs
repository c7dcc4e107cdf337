use std::path::Path;

use anyhow::{Context, Result};

/// Resolves an input argument to raw bytes: the contents of `input` when it
/// names an existing file, the literal argument otherwise. Surrounding
/// whitespace (including a trailing newline) is stripped either way.
pub fn read_data(input: &str) -> Result<Vec<u8>> {
    let data = if file_exists(input) {
        std::fs::read(input).with_context(|| format!("cannot read {input}"))?
    } else {
        input.as_bytes().to_vec()
    };
    Ok(trim_whitespace(&data).to_vec())
}

pub fn file_exists(path: &str) -> bool {
    let path = Path::new(path);
    path.is_file()
}

/// Final component of a path, for log and default-output-file names.
pub fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Trims Unicode whitespace from text and falls back to ASCII-only
/// trimming when the bytes are not valid UTF-8.
fn trim_whitespace(data: &[u8]) -> &[u8] {
    match std::str::from_utf8(data) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => data.trim_ascii(),
    }
}

#[cfg(test)]
mod tests {
    use super::{base_name, file_exists, read_data};
    use tempfile::TempDir;

    #[test]
    fn literal_input_is_trimmed() {
        assert_eq!(read_data("  hello\n").unwrap(), b"hello");
        assert_eq!(read_data("").unwrap(), b"");
        assert_eq!(read_data(" \n\t ").unwrap(), b"");
        // Unicode whitespace such as NO-BREAK SPACE is trimmed too.
        assert_eq!(read_data("\u{a0}hello\u{a0}").unwrap(), b"hello");
    }

    #[test]
    fn binary_file_input_trims_ascii_whitespace_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, b" \xff\x00binary\xfe\n").unwrap();

        assert_eq!(
            read_data(&path.to_string_lossy()).unwrap(),
            b"\xff\x00binary\xfe"
        );
    }

    #[test]
    fn file_input_reads_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "payload\n").unwrap();

        let path = path.to_string_lossy().into_owned();
        assert!(file_exists(&path));
        assert_eq!(read_data(&path).unwrap(), b"payload");
    }

    #[test]
    fn directories_are_not_files() {
        let dir = TempDir::new().unwrap();
        assert!(!file_exists(&dir.path().to_string_lossy()));
    }

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("/tmp/some/archive.tar"), "archive.tar");
        assert_eq!(base_name("plain"), "plain");
    }
}
