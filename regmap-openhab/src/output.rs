//! Writing rendered artifacts to the configuration directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{OutputError, Result};
use crate::generator::Artifacts;

/// Suffix appended to the files of disabled groups so openHAB skips them.
pub const DISABLED_SUFFIX: &str = ".unused";

impl Artifacts {
    fn suffix(&self) -> &'static str {
        if self.disabled { DISABLED_SUFFIX } else { "" }
    }

    /// Things file path, relative to the configuration directory.
    pub fn things_path(&self) -> PathBuf {
        Path::new("things").join(format!("{}.things{}", self.name, self.suffix()))
    }

    /// Items file path, relative to the configuration directory.
    pub fn items_path(&self) -> PathBuf {
        Path::new("items").join(format!("{}.items{}", self.name, self.suffix()))
    }
}

/// Write every artifact below `dir`, returning the written paths.
///
/// Existing files are overwritten. The first I/O failure aborts.
pub fn write_all(dir: &Path, artifacts: &[Artifacts]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len() * 2);

    for artifact in artifacts {
        for (relative, contents) in [
            (artifact.things_path(), &artifact.things),
            (artifact.items_path(), &artifact.items),
        ] {
            let path = dir.join(relative);
            write_file(&path, contents)?;
            written.push(path);
        }
    }

    info!(dir = %dir.display(), files = written.len(), "Wrote openHAB configuration");
    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()
    };

    write().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts(disabled: bool) -> Artifacts {
        Artifacts {
            name: "sol".to_string(),
            disabled,
            things: "Bridge a {\n}\n".to_string(),
            items: "Group gModbus (gInfluxDB)\n\n".to_string(),
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(artifacts(false).things_path(), Path::new("things/sol.things"));
        assert_eq!(artifacts(false).items_path(), Path::new("items/sol.items"));
        assert_eq!(artifacts(true).things_path(), Path::new("things/sol.things.unused"));
        assert_eq!(artifacts(true).items_path(), Path::new("items/sol.items.unused"));
    }

    #[test]
    fn test_write_all_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_all(dir.path(), &[artifacts(false)]).unwrap();

        assert_eq!(written.len(), 2);
        let things = fs::read_to_string(dir.path().join("things/sol.things")).unwrap();
        assert_eq!(things, "Bridge a {\n}\n");
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the things directory should be.
        fs::write(dir.path().join("things"), "").unwrap();

        let err = write_all(dir.path(), &[artifacts(false)]).unwrap_err();
        assert!(matches!(err, OutputError::CreateDir { .. }));
        assert!(err.to_string().contains("things"));
    }
}
