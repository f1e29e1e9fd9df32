//! Writing results so that the output directory only ever holds one complete run.
//!
//! Images are encoded into a staging directory next to the output directory.
//! Committing swaps the staging directory into place with two renames,
//! so an interrupted run leaves the previous output untouched.

use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::{
    encode::{encode, EncodeOptions},
    error::PadError,
    image::Image,
};

/// Destination of the finished canvases.
pub trait OutputSink {
    fn write(&mut self, filename: &OsStr, image: &Image) -> Result<(), PadError>;
}

pub struct StagedOutput {
    target: PathBuf,
    staging: TempDir,
    options: EncodeOptions,
}

impl StagedOutput {
    /// Creates the staging directory. Nothing in `target` is touched until [`commit`](Self::commit).
    pub fn begin(target: &Path, options: EncodeOptions) -> Result<Self, PadError> {
        let output_err = |source| PadError::OutputDirectory {
            path: target.to_owned(),
            source,
        };
        // stage on the same filesystem so that the final rename cannot cross devices
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(output_err)?;
        let staging = tempfile::Builder::new()
            .prefix(".padframe-staging-")
            .tempdir_in(parent)
            .map_err(output_err)?;
        debug!(staging = %staging.path().display(), "staging output");
        Ok(Self {
            target: target.to_owned(),
            staging,
            options,
        })
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Replaces the target directory with everything written so far.
    pub fn commit(self) -> Result<(), PadError> {
        let Self {
            target, staging, ..
        } = self;
        let staged = staging.keep();
        swap_into_place(&staged, &target).map_err(|source| {
            let _ = fs::remove_dir_all(&staged);
            PadError::OutputDirectory {
                path: target.clone(),
                source,
            }
        })
    }
}

impl OutputSink for StagedOutput {
    fn write(&mut self, filename: &OsStr, image: &Image) -> Result<(), PadError> {
        let path = self.staging.path().join(filename);
        let result = encode(image, &path, &self.options);
        if result.is_err() {
            // a half-written file must not be committed
            let _ = fs::remove_file(&path);
        }
        result
    }
}

fn swap_into_place(staged: &Path, target: &Path) -> io::Result<()> {
    let previous = match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.is_dir() => {
            fs::set_permissions(staged, metadata.permissions())?;
            let mut retired = OsString::from(staged.as_os_str());
            retired.push(".previous");
            let retired = PathBuf::from(retired);
            fs::rename(target, &retired)?;
            Some(retired)
        }
        Ok(_) => {
            return Err(io::Error::other("output path exists and is not a directory"));
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            set_default_permissions(staged)?;
            None
        }
        Err(error) => return Err(error),
    };

    if let Err(error) = fs::rename(staged, target) {
        if let Some(retired) = &previous {
            if let Err(restore_error) = fs::rename(retired, target) {
                warn!(
                    path = %retired.display(),
                    error = %restore_error,
                    "unable to restore previous output, it is still at this path"
                );
            }
        }
        return Err(error);
    }

    if let Some(retired) = previous {
        // the new output is already in place, a leftover only wastes space
        if let Err(error) = fs::remove_dir_all(&retired) {
            warn!(path = %retired.display(), %error, "unable to delete previous output");
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    // tempfile creates private directories, the output is meant to be shared like any other
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
