//! # Tree Decryption
//!
//! Decrypt a single encrypted file, or every item below an encrypted folder,
//! into a destination folder. Names are decrypted with
//! [`decrypt_filename`](crate::decrypt_filename), contents with
//! [`decrypt_file`](crate::decrypt_file).
//!
//! A failing item never stops the walk: it is logged, recorded in
//! [`TreeReport::failures`] and skipped (for a folder, together with
//! everything below it).

use crate::aliases::PasswordString;
use crate::decryptor::decrypt_filename;
use crate::error::OdriveCryptError;
use crate::fs_ops::decrypt_file;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// One item that could not be decrypted.
#[derive(Debug)]
pub struct TreeFailure {
    pub path: PathBuf,
    pub error: OdriveCryptError,
}

/// Outcome of [`decrypt_tree`].
#[derive(Debug, Default)]
pub struct TreeReport {
    /// Files decrypted and written.
    pub files: usize,
    /// Folders whose name was decrypted and which now exist in the output.
    pub folders: usize,
    pub failures: Vec<TreeFailure>,
}

impl TreeReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decrypt `input` into the existing folder `out_dir`.
///
/// - `input` is a file: its name and contents are decrypted into `out_dir`.
/// - `input` is a folder: only its contents are decrypted (recursively); the
///   folder's own name is left alone.
///
/// # Errors
///
/// Only for problems with the two arguments themselves (missing `input`,
/// `out_dir` not a folder). Per-item failures are in the report.
pub fn decrypt_tree(
    input: &Path,
    out_dir: &Path,
    password: &PasswordString,
) -> Result<TreeReport, OdriveCryptError> {
    let input_meta = fs::metadata(input)?;
    if !fs::metadata(out_dir)?.is_dir() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} is not a folder", out_dir.display()),
        )
        .into());
    }

    let mut walker = TreeWalker {
        password,
        report: TreeReport::default(),
    };

    if input_meta.is_file() {
        walker.file(input, out_dir);
    } else if input_meta.is_dir() {
        walker.folder_contents(input, out_dir);
    } else {
        walker.fail(input, unsupported_item());
    }

    Ok(walker.report)
}

struct TreeWalker<'a> {
    password: &'a PasswordString,
    report: TreeReport,
}

impl TreeWalker<'_> {
    fn folder_contents(&mut self, dir: &Path, out_dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => return self.fail(dir, e.into()),
        };

        let mut children = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push(entry.path()),
                Err(e) => self.fail(dir, e.into()),
            }
        }
        // Deterministic order for logs and reports
        children.sort();

        for child in children {
            self.item(&child, out_dir);
        }
    }

    fn item(&mut self, path: &Path, out_dir: &Path) {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => self.file(path, out_dir),
            Ok(meta) if meta.is_dir() => self.folder(path, out_dir),
            Ok(_) => self.fail(path, unsupported_item()),
            Err(e) => self.fail(path, e.into()),
        }
    }

    fn file(&mut self, path: &Path, out_dir: &Path) {
        let name = match self.plain_name(path) {
            Ok(name) => name,
            Err(e) => return self.fail(path, e),
        };
        let out_path = out_dir.join(name);

        match decrypt_file(path, &out_path, self.password) {
            Ok(bytes) => {
                self.report.files += 1;
                info!(path = %out_path.display(), bytes, "decrypted file");
            }
            Err(e) => self.fail(path, e),
        }
    }

    fn folder(&mut self, path: &Path, out_dir: &Path) {
        let name = match self.plain_name(path) {
            Ok(name) => name,
            Err(e) => return self.fail(path, e),
        };
        let out_path = out_dir.join(name);

        match fs::create_dir(&out_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %out_path.display(), "folder already exists");
            }
            Err(e) => return self.fail(&out_path, e.into()),
        }
        self.report.folders += 1;
        info!(path = %out_path.display(), "decrypted folder");

        self.folder_contents(path, &out_path);
    }

    fn plain_name(&self, path: &Path) -> Result<String, OdriveCryptError> {
        let encoded = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            OdriveCryptError::Encoding(format!("{} has no UTF-8 file name", path.display()))
        })?;

        let name = decrypt_filename(encoded, self.password)?;
        if !is_plain_component(&name) {
            return Err(OdriveCryptError::Encoding(format!(
                "decrypted name {name:?} is not a single path component"
            )));
        }
        Ok(name)
    }

    fn fail(&mut self, path: &Path, error: OdriveCryptError) {
        warn!(path = %path.display(), error = %error, "could not decrypt item");
        self.report.failures.push(TreeFailure {
            path: path.to_path_buf(),
            error,
        });
    }
}

// Decrypted names come from the ciphertext; never let them escape out_dir.
// Separators are whatever the host path syntax says they are.
fn is_plain_component(name: &str) -> bool {
    if name.contains(['/', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(c)) if c == name)
        && components.next().is_none()
}

fn unsupported_item() -> OdriveCryptError {
    io::Error::new(ErrorKind::Unsupported, "unsupported folder item").into()
}
