// Workspace - sandboxed file access rooted at the generated project
//
// Every path the worker supplies is resolved inside the root; traversal
// outside it is rejected. Reads of absent files return empty content so
// a first edit to a new file looks like an edit to an empty one.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open (creating if needed) a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create workspace at {}", root.display()))?;
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace root {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a worker-supplied path inside the root.
    ///
    /// Accepts workspace-relative paths and absolute paths that already
    /// point inside the root (the model may echo the current-directory
    /// tool's output). Anything else is rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let candidate = Path::new(path);
        let relative = candidate.strip_prefix(&self.root).unwrap_or(candidate);

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir => bail!("path '{}' escapes the workspace", path),
                Component::RootDir | Component::Prefix(_) => {
                    bail!("absolute path '{}' is outside the workspace", path)
                }
            }
        }
        Ok(resolved)
    }

    /// Read a file's contents; an absent file reads as empty.
    pub fn read(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path)?;
        if !resolved.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&resolved).with_context(|| format!("Failed to read file: {}", path))
    }

    /// Write a file, creating parent directories as needed.
    ///
    /// Returns a one-line summary for the worker's tool result.
    pub fn write(&self, path: &str, content: &str) -> Result<String> {
        let resolved = self.resolve(path)?;
        let is_new = !resolved.exists();

        if let Some(parent) = resolved.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directories for: {}", path))?;
            }
        }

        fs::write(&resolved, content).with_context(|| format!("Failed to write file: {}", path))?;

        let line_count = content.lines().count();
        let verb = if is_new { "Created" } else { "Updated" };
        Ok(format!(
            "{} {} ({} line{})",
            verb,
            path,
            line_count,
            if line_count == 1 { "" } else { "s" }
        ))
    }

    /// List a directory's entries, sorted, directories marked with '/'.
    ///
    /// An absent directory lists as empty, mirroring `read`.
    pub fn list(&self, path: Option<&str>) -> Result<Vec<String>> {
        let dir = match path {
            Some(p) => self.resolve(p)?,
            None => self.root.clone(),
        };
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in
            fs::read_dir(&dir).with_context(|| format!("Failed to list {}", dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            entries.push(name);
        }
        entries.sort();
        Ok(entries)
    }
}
