//! Input discovery
//!
//! Expands command-line inputs into the ordered list of documents to load.
//! Each argument is an existing file, a directory searched recursively for
//! `.xml` files, or a glob pattern.

use crate::constants::INPUT_EXTENSION;
use crate::error::{LoaderError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Resolve every input argument, keeping argument order
///
/// Files found under one directory or one pattern are sorted by path.
/// Repeated paths are kept as given.
pub fn discover_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        files.extend(expand_input(input.as_ref())?);
    }
    debug!("Discovered {} input documents", files.len());
    Ok(files)
}

fn expand_input(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if input.is_dir() {
        return discover_xml_files(input);
    }

    let pattern = input.to_string_lossy();
    if !is_pattern(&pattern) {
        return Err(LoaderError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let matches = expand_glob(&pattern)?;
    if matches.is_empty() {
        return Err(LoaderError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    Ok(matches)
}

/// Every `.xml` file below `dir`, sorted by path
pub fn discover_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && has_input_extension(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();

    debug!("Found {} documents in {}", files.len(), dir.display());
    Ok(files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|source| LoaderError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| LoaderError::FileAccess {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
}

fn is_pattern(value: &str) -> bool {
    value.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<Items/>").unwrap();
    }

    #[test]
    fn test_directory_is_walked_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("b.xml"));
        touch(&root.join("a.xml"));
        touch(&root.join("nested/c.XML"));
        touch(&root.join("notes.txt"));

        let files = discover_inputs(&[root]).unwrap();
        assert_eq!(
            files,
            vec![root.join("a.xml"), root.join("b.xml"), root.join("nested/c.XML")]
        );
    }

    #[test]
    fn test_plain_file_kept_regardless_of_extension() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("items.data");
        touch(&file);

        let files = discover_inputs(&[&file, &file]).unwrap();
        assert_eq!(files, vec![file.clone(), file]);
    }

    #[test]
    fn test_glob_pattern_is_expanded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("items-2.xml"));
        touch(&root.join("items-1.xml"));
        touch(&root.join("other.xml"));

        let pattern = root.join("items-*.xml");
        let files = discover_inputs(&[pattern]).unwrap();
        assert_eq!(files, vec![root.join("items-1.xml"), root.join("items-2.xml")]);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.xml");
        match discover_inputs(&[&missing]) {
            Err(LoaderError::InputNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound, got {:?}", other),
        }

        let no_match = temp_dir.path().join("*.xml");
        assert!(matches!(
            discover_inputs(&[no_match]),
            Err(LoaderError::InputNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(matches!(
            discover_inputs(&["items[.xml"]),
            Err(LoaderError::InvalidGlob { .. })
        ));
    }
}
