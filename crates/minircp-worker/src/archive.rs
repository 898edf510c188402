// Archive rotation for processed events files
//
// A consumed file moves to archive_dir/basename.N where N is one past the
// highest numeric suffix already present. Deriving N from the suffixes (not
// from modification times) keeps the counter stable under clock skew. The
// single periodic worker is the only writer; concurrent rotation of the same
// basename is not supported.

use std::io;
use std::path::{Path, PathBuf};

use minircp_core::{RcpError, Result};

/// Move a processed source file into the next free archive generation.
///
/// Creates `archive_dir` if absent and never overwrites an existing archived
/// copy. When matching files exist but none carries a numeric suffix the
/// counter restarts at 1.
pub fn archive_file(source: &Path, archive_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(archive_dir)?;

    let base_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            RcpError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("source path has no usable file name: {}", source.display()),
            ))
        })?;

    let mut generation = next_generation(archive_dir, base_name)?;
    let mut dest = archive_dir.join(format!("{base_name}.{generation}"));
    // Skip forward over anything already occupying the slot; an archived
    // copy must never be overwritten.
    while dest.exists() {
        generation += 1;
        dest = archive_dir.join(format!("{base_name}.{generation}"));
    }

    if std::fs::rename(source, &dest).is_err() {
        // rename fails across filesystems; fall back to copy + delete
        std::fs::copy(source, &dest)?;
        std::fs::remove_file(source)?;
    }

    tracing::info!(source = %source.display(), dest = %dest.display(), "archived events file");
    Ok(dest)
}

/// One past the highest numeric `.N` suffix among `basename.*` entries,
/// or 1 when there is none.
fn next_generation(archive_dir: &Path, base_name: &str) -> Result<u64> {
    let prefix = format!("{base_name}.");
    let mut max_generation: Option<u64> = None;
    let mut unnumbered_matches = 0usize;

    for entry in std::fs::read_dir(archive_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(suffix) = name.strip_prefix(&prefix) else {
            continue;
        };
        match suffix.parse::<u64>() {
            Ok(n) => max_generation = Some(max_generation.map_or(n, |m| m.max(n))),
            Err(_) => unnumbered_matches += 1,
        }
    }

    if max_generation.is_none() && unnumbered_matches > 0 {
        tracing::warn!(
            base_name,
            unnumbered_matches,
            "archive holds matching files without numeric suffixes, restarting generations at 1"
        );
    }

    Ok(max_generation.map_or(1, |m| m + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn first_archive_gets_generation_one() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("PREvents.csv");
        touch(&source);
        let archive_dir = dir.path().join("archive");

        let dest = archive_file(&source, &archive_dir).unwrap();
        assert_eq!(dest, archive_dir.join("PREvents.csv.1"));
        assert!(!source.exists());
        assert!(dest.exists());
    }

    #[test]
    fn generations_strictly_increase() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("archive");
        let source = dir.path().join("PREvents.csv");

        for expected in 1..=3u64 {
            touch(&source);
            let dest = archive_file(&source, &archive_dir).unwrap();
            assert_eq!(dest, archive_dir.join(format!("PREvents.csv.{expected}")));
        }
    }

    #[test]
    fn prior_copies_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("archive");
        std::fs::create_dir_all(&archive_dir).unwrap();
        std::fs::write(archive_dir.join("PREvents.csv.5"), b"old").unwrap();

        let source = dir.path().join("PREvents.csv");
        touch(&source);
        let dest = archive_file(&source, &archive_dir).unwrap();

        assert_eq!(dest, archive_dir.join("PREvents.csv.6"));
        assert_eq!(std::fs::read(archive_dir.join("PREvents.csv.5")).unwrap(), b"old");
    }

    #[test]
    fn gap_free_numbering_not_required_max_wins() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("archive");
        std::fs::create_dir_all(&archive_dir).unwrap();
        std::fs::write(archive_dir.join("PREvents.csv.2"), b"x").unwrap();
        std::fs::write(archive_dir.join("PREvents.csv.10"), b"x").unwrap();

        let source = dir.path().join("PREvents.csv");
        touch(&source);
        let dest = archive_file(&source, &archive_dir).unwrap();
        assert_eq!(dest, archive_dir.join("PREvents.csv.11"));
    }

    #[test]
    fn non_numeric_suffixes_restart_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("archive");
        std::fs::create_dir_all(&archive_dir).unwrap();
        std::fs::write(archive_dir.join("PREvents.csv.bak"), b"x").unwrap();

        let source = dir.path().join("PREvents.csv");
        touch(&source);
        let dest = archive_file(&source, &archive_dir).unwrap();
        assert_eq!(dest, archive_dir.join("PREvents.csv.1"));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("archive");
        std::fs::create_dir_all(&archive_dir).unwrap();
        std::fs::write(archive_dir.join("Other.csv.9"), b"x").unwrap();

        let source = dir.path().join("PREvents.csv");
        touch(&source);
        let dest = archive_file(&source, &archive_dir).unwrap();
        assert_eq!(dest, archive_dir.join("PREvents.csv.1"));
    }

    #[test]
    fn creates_archive_dir_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let archive_dir = dir.path().join("deep").join("archive");
        let source = dir.path().join("PREvents.csv");
        touch(&source);

        let dest = archive_file(&source, &archive_dir).unwrap();
        assert!(dest.exists());
    }
}
