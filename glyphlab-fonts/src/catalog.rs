//! Font directory scanning.
//!
//! Lists the `.ttf` / `.otf` files directly inside a directory and, through
//! `fontdb`, the family name of the first face in each file.

use fontdb::{Database, Source};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// One font file found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFileEntry {
    pub path: PathBuf,
    /// Family of the first face, if fontdb could parse the file.
    pub family: Option<String>,
}

impl FontFileEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// True for paths with a `.ttf` or `.otf` extension, in any case.
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}

/// Regular font files directly inside `dir`, sorted by path.
pub fn list_font_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut output = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_font_file(&path) {
            output.push(path);
        }
    }
    output.sort();
    Ok(output)
}

/// The font files of one directory.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    dir: PathBuf,
    entries: Vec<FontFileEntry>,
}

impl FontCatalog {
    /// Scan `dir`. A missing directory yields an empty catalog.
    pub fn scan(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let mut catalog = Self {
            dir: dir.into(),
            entries: Vec::new(),
        };
        catalog.rescan()?;
        Ok(catalog)
    }

    /// Scan `dir`, or `fallback` when `dir` does not exist.
    pub fn scan_or_fallback(dir: &Path, fallback: &Path) -> io::Result<Self> {
        if dir.is_dir() {
            Self::scan(dir)
        } else {
            log::warn!(
                "Font directory {:?} does not exist, falling back to {:?}",
                dir,
                fallback
            );
            Self::scan(fallback)
        }
    }

    /// Re-read the directory, replacing the current entries.
    pub fn rescan(&mut self) -> io::Result<()> {
        if !self.dir.is_dir() {
            log::info!("Font directory {:?} not found", self.dir);
            self.entries.clear();
            return Ok(());
        }

        let paths = list_font_files(&self.dir)?;

        let mut db = Database::new();
        for path in &paths {
            if let Err(e) = db.load_font_file(path) {
                log::warn!("Could not read font file {:?}: {}", path, e);
            }
        }

        let mut families: HashMap<PathBuf, String> = HashMap::new();
        for face in db.faces() {
            let path = match &face.source {
                Source::File(path) | Source::SharedFile(path, _) => path,
                Source::Binary(_) => continue,
            };
            if let Some((family, _)) = face.families.first() {
                families.entry(path.clone()).or_insert_with(|| family.clone());
            }
        }

        self.entries = paths
            .into_iter()
            .map(|path| FontFileEntry {
                family: families.remove(&path),
                path,
            })
            .collect();

        log::info!(
            "Found {} font files in {:?}",
            self.entries.len(),
            self.dir
        );
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[FontFileEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FontFileEntry> {
        self.entries.get(index)
    }

    /// Find an entry by file name (case-insensitive), with or without extension.
    pub fn find(&self, name: &str) -> Option<&FontFileEntry> {
        self.entries.iter().find(|entry| {
            let file_name = entry.file_name();
            file_name.eq_ignore_ascii_case(name)
                || entry
                    .path
                    .file_stem()
                    .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case(name))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_font_file_case_insensitive() {
        assert!(is_font_file(Path::new("a.ttf")));
        assert!(is_font_file(Path::new("a.OTF")));
        assert!(is_font_file(Path::new("dir/b.TtF")));
        assert!(!is_font_file(Path::new("a.ttc")));
        assert!(!is_font_file(Path::new("ttf")));
        assert!(!is_font_file(Path::new("a.woff2")));
    }
}
