//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Platform directories
//! - `fs` - File system operations (read, write, rename, exclusive create)
//! - `user` - User interaction (confirmation and choice prompts)

mod env;
mod fs;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` with `contents` only if it does not exist yet.
    /// Returns Ok(false) when the file was already there.
    fn create_exclusive(&self, path: &Path, contents: &[u8]) -> Result<bool>;

    // Directories
    fn data_dir(&self) -> Option<PathBuf>;

    // User interaction
    /// Prompt user for confirmation. Returns true if user confirms (y/yes), false otherwise.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Prompt user for a free-form answer. Returns the trimmed line.
    fn ask(&self, prompt: &str) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_exclusive(&self, path: &Path, contents: &[u8]) -> Result<bool> {
        self.create_exclusive_impl(path, contents)
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir_impl()
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirm_impl(prompt)
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        self.ask_impl(prompt)
    }
}
