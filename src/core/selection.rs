// src/core/selection.rs

use crate::{
    core::paths::{self, PathError},
    models::{InvocationRequest, TargetKind},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Why a selection produced no [`InvocationRequest`].
#[derive(Error, Debug)]
pub enum SelectionError {
    /// A files trigger found no local file.
    #[error("No files selected.")]
    NoFiles,
    /// A folder trigger found no local folder.
    #[error("No folders selected.")]
    NoFolders,
    /// A target could not be made absolute.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl SelectionError {
    fn nothing_selected(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Files => Self::NoFiles,
            TargetKind::Folders => Self::NoFolders,
        }
    }

    /// `true` when the user simply selected nothing usable.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::NoFiles | Self::NoFolders)
    }
}

/// Turns what the user clicked into an [`InvocationRequest`].
///
/// A non-empty multi-selection wins over the primary target. Only local-file
/// targets survive (plain paths and `file://` URIs); for [`TargetKind::Files`]
/// entries ending in a path separator are dropped as well. Relative paths are
/// resolved against `base`. Order and duplicates are kept as given.
pub fn resolve_selection(
    primary: Option<&str>,
    selected: &[String],
    kind: TargetKind,
    recursive: bool,
    base: &Path,
) -> Result<InvocationRequest, SelectionError> {
    let candidates: Vec<&str> = if !selected.is_empty() {
        selected.iter().map(String::as_str).collect()
    } else {
        primary.into_iter().collect()
    };

    let mut targets = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let Some(local) = to_local_path(candidate) else {
            log::debug!("Dropping non-file target: {}", candidate);
            continue;
        };
        if kind == TargetKind::Files && ends_with_separator(&local) {
            log::debug!("Dropping folder-like target from a file selection: {}", local.display());
            continue;
        }
        targets.push(paths::absolutize(&local, base)?);
    }

    InvocationRequest::new(targets, recursive).ok_or_else(|| SelectionError::nothing_selected(kind))
}

/// Returns the local filesystem path named by `target`, or `None` if it
/// refers to something other than a local file.
///
/// `file:` URIs are decoded. Any other input is a plain path, unless it is a
/// URI with an authority (`scheme://...`) such as a remote editor resource.
/// A one-letter scheme is a Windows drive, not a URI.
fn to_local_path(target: &str) -> Option<PathBuf> {
    if target.is_empty() {
        return None;
    }
    match Url::parse(target) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        Ok(url) if url.scheme().len() > 1 && url.has_authority() => None,
        _ => Some(PathBuf::from(target)),
    }
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator)
}

/// Makes every workspace folder absolute, keeping their order.
pub fn resolve_workspace_folders(
    folders: &[String],
    base: &Path,
) -> Result<Vec<PathBuf>, SelectionError> {
    folders
        .iter()
        .filter_map(|f| to_local_path(f))
        .map(|f| paths::absolutize(&f, base).map_err(SelectionError::from))
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const BASE: &str = "/work";

    #[test]
    fn test_multi_selection_wins_over_primary() {
        let request = resolve_selection(
            Some("/work/clicked.pdb"),
            &strings(&["/work/a.pdb", "/work/b.cif"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(
            request.targets(),
            &[PathBuf::from("/work/a.pdb"), PathBuf::from("/work/b.cif")]
        );
        assert!(!request.recursive());
    }

    #[test]
    fn test_primary_used_when_selection_is_empty() {
        let request = resolve_selection(
            Some("/work/structures"),
            &[],
            TargetKind::Folders,
            true,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(request.targets(), &[PathBuf::from("/work/structures")]);
        assert!(request.recursive());
    }

    #[test]
    fn test_nothing_selected() {
        let err =
            resolve_selection(None, &[], TargetKind::Files, false, Path::new(BASE)).unwrap_err();
        assert!(err.is_empty_selection());
        assert_eq!(err.to_string(), "No files selected.");

        let err =
            resolve_selection(None, &[], TargetKind::Folders, true, Path::new(BASE)).unwrap_err();
        assert_eq!(err.to_string(), "No folders selected.");
    }

    #[test]
    fn test_non_file_schemes_are_dropped() {
        let err = resolve_selection(
            None,
            &strings(&["vscode-remote://wsl/a.pdb", "https://files.rcsb.org/1abc.pdb"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap_err();
        assert!(err.is_empty_selection());
    }

    #[test]
    fn test_colon_in_relative_name_is_a_path() {
        let request = resolve_selection(
            None,
            &strings(&["run2:final.pdb", "untitled:Untitled-1"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(
            request.targets(),
            &[
                PathBuf::from("/work/run2:final.pdb"),
                PathBuf::from("/work/untitled:Untitled-1")
            ]
        );
    }

    #[test]
    fn test_file_uris_are_decoded() {
        let request = resolve_selection(
            None,
            &strings(&["file:///data/my%20model.pdb", "FILE:///data/x.cif"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(
            request.targets(),
            &[PathBuf::from("/data/my model.pdb"), PathBuf::from("/data/x.cif")]
        );
    }

    #[test]
    fn test_file_selection_drops_trailing_separator() {
        let request = resolve_selection(
            None,
            &strings(&["/work/folder/", "/work/model.pdb"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(request.targets(), &[PathBuf::from("/work/model.pdb")]);
    }

    #[test]
    fn test_folder_selection_keeps_trailing_separator() {
        let request = resolve_selection(
            None,
            &strings(&["/work/folder/"]),
            TargetKind::Folders,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(request.targets().len(), 1);
    }

    #[test]
    fn test_relative_targets_become_absolute_in_order() {
        let request = resolve_selection(
            None,
            &strings(&["b.pdb", "sub/a.pdb", "b.pdb"]),
            TargetKind::Files,
            false,
            Path::new(BASE),
        )
        .unwrap();
        assert_eq!(
            request.targets(),
            &[
                PathBuf::from("/work/b.pdb"),
                PathBuf::from("/work/sub/a.pdb"),
                PathBuf::from("/work/b.pdb")
            ]
        );
    }

    #[test]
    fn test_file_uri_forms() {
        assert_eq!(to_local_path("file:///a/b"), Some(PathBuf::from("/a/b")));
        assert_eq!(to_local_path("file:/a/b"), Some(PathBuf::from("/a/b")));
        assert_eq!(to_local_path("file:///data/%C3%A9t%C3%A9.cif"), Some(PathBuf::from("/data/été.cif")));
        assert_eq!(to_local_path("file://server/share/x"), None);
        assert_eq!(to_local_path(""), None);
    }

    #[test]
    fn test_file_uri_keeps_trailing_separator() {
        let local = to_local_path("file:///work/folder/").unwrap();
        assert!(ends_with_separator(&local));
    }

    #[test]
    fn test_windows_drive_is_not_a_scheme() {
        assert_eq!(
            to_local_path("C:\\models\\a.pdb"),
            Some(PathBuf::from("C:\\models\\a.pdb"))
        );
    }

    #[test]
    fn test_workspace_folders() {
        let folders =
            resolve_workspace_folders(&strings(&["proj", "/abs"]), Path::new(BASE)).unwrap();
        assert_eq!(folders, vec![PathBuf::from("/work/proj"), PathBuf::from("/abs")]);
    }
}
