//! Source file reading.

use std::path::Path;

/// Read a source extract as text.
///
/// Registry extracts are often produced by Windows tools, so bytes that are
/// not valid UTF-8 are decoded as Windows-1252.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            tracing::debug!(path = %path.display(), "input is not UTF-8, decoded as Windows-1252");
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("20100745683;RAZÓN SOCIAL\n".as_bytes()).unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "20100745683;RAZÓN SOCIAL\n");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"20100745683;RAZ\xD3N SOCIAL\n").unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "20100745683;RAZÓN SOCIAL\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_text(&dir.path().join("nope.txt")).is_err());
    }
}
