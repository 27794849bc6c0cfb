//! Logical path joining and cleanup.
//!
//! These functions never touch the filesystem: `..` is resolved lexically and
//! symlinks are not followed.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically.
///
/// Drops `.` segments and duplicate separators, and resolves `..` against the
/// preceding segment. Leading `..` segments of a relative path are kept; `..`
/// directly under the root is discarded.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    push_components(&mut out, path, true);
    out
}

/// Join two paths and normalize the result.
///
/// If either side is empty, the normalized other side is returned. An
/// absolute `right` is appended below `left` rather than replacing it.
#[must_use]
pub fn join(left: impl AsRef<Path>, right: impl AsRef<Path>) -> PathBuf {
    let left = left.as_ref();
    let right = right.as_ref();

    if left.as_os_str().is_empty() {
        return clean(right);
    }
    if right.as_os_str().is_empty() {
        return clean(left);
    }

    let mut out = clean(left);
    push_components(&mut out, right, false);
    out
}

fn push_components(out: &mut PathBuf, path: &Path, keep_root: bool) {
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                if keep_root {
                    out.push(component.as_os_str());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    out.push("..");
                }
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
}
