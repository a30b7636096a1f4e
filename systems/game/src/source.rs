//! Ordered collections of level documents.

use std::{
    fs::{self, File},
    io::{self, Cursor, Read},
    path::PathBuf,
};

/// Ordered set of level documents a game can be played through.
pub trait LevelSource: Send {
    /// Human readable location used in diagnostics.
    fn location(&self) -> String;

    /// Identifiers of every level, in play order.
    fn enumerate(&self) -> io::Result<Vec<String>>;

    /// Opens the level stored under `identifier`.
    fn open(&self, identifier: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Levels stored as regular files in one directory, played in file name order.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn enumerate(&self) -> io::Result<Vec<String>> {
        let mut identifiers = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                identifiers.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        identifiers.sort();
        Ok(identifiers)
    }

    fn open(&self, identifier: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(identifier))?;
        Ok(Box::new(file))
    }
}

/// Levels held in memory, played in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    name: String,
    levels: Vec<(String, String)>,
}

impl MemorySource {
    /// Creates an empty source labelled `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: Vec::new(),
        }
    }

    /// Appends a level document.
    #[must_use]
    pub fn with_level(mut self, identifier: impl Into<String>, document: impl Into<String>) -> Self {
        self.levels.push((identifier.into(), document.into()));
        self
    }
}

impl LevelSource for MemorySource {
    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn enumerate(&self) -> io::Result<Vec<String>> {
        Ok(self.levels.iter().map(|(id, _)| id.clone()).collect())
    }

    fn open(&self, identifier: &str) -> io::Result<Box<dyn Read + '_>> {
        self.levels
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, document)| Box::new(Cursor::new(document.as_bytes())) as Box<dyn Read + '_>)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no level named {identifier}"),
                )
            })
    }
}
