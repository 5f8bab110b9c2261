use autolobby_core::{FileKind, MapClassifier, MapLister};
use std::io;
use std::path::Path;

/// Filesystem enumeration through a glob pattern; returns file names only.
#[derive(Debug, Default)]
pub struct DirMapLister;

impl MapLister for DirMapLister {
    fn list(&self, pattern: &str) -> io::Result<Vec<String>> {
        let paths = glob::glob(pattern)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
        let mut names = Vec::new();
        for entry in paths {
            let Ok(path) = entry else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Classifies candidate files by extension alone.
#[derive(Debug, Default)]
pub struct ExtensionClassifier;

impl MapClassifier for ExtensionClassifier {
    fn classify(&self, path: &Path) -> FileKind {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("scx") || ext.eq_ignore_ascii_case("scm") => {
                FileKind::Playable
            }
            Some(_) => FileKind::NotMap,
            None => FileKind::Unknown,
        }
    }
}

/// Classifier returning the same verdict for every path.
#[derive(Debug)]
pub struct FixedClassifier(pub FileKind);

impl MapClassifier for FixedClassifier {
    fn classify(&self, _path: &Path) -> FileKind {
        self.0
    }
}

/// Canned enumeration results, optionally failing.
#[derive(Debug, Default)]
pub struct MemoryLister {
    names: Vec<String>,
    fail: bool,
}

impl MemoryLister {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            names: Vec::new(),
            fail: true,
        }
    }
}

impl MapLister for MemoryLister {
    fn list(&self, _pattern: &str) -> io::Result<Vec<String>> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        Ok(self.names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_classify_case_insensitively() {
        let files = ExtensionClassifier;
        assert_eq!(files.classify(Path::new("maps/a.scx")), FileKind::Playable);
        assert_eq!(files.classify(Path::new("maps/b.SCM")), FileKind::Playable);
        assert_eq!(files.classify(Path::new("maps/notes.txt")), FileKind::NotMap);
        assert_eq!(files.classify(Path::new("maps/README")), FileKind::Unknown);
    }
}
