use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a UTF-8 file, returning `None` when it does not exist.
pub fn read_optional_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
    }
}

/// Replace the whole contents of `path`, creating parent directories.
///
/// The text goes to a temp file next to the target and is renamed over it, so
/// readers see either the old or the new contents. Existing permissions are
/// carried over; a new file gets mode 0644. A symlinked target is resolved
/// first so the link itself stays in place.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    persist_text(path, text, None)
}

/// Copy `template` to `target` when the target is absent and the template
/// exists. The copy takes the template's permissions. Returns whether a copy
/// happened.
pub fn bootstrap_from_template(target: &Path, template: &Path) -> Result<bool> {
    if target.exists() {
        return Ok(false);
    }
    let Some(text) = read_optional_text(template)? else {
        return Ok(false);
    };
    let permissions = fs::metadata(template)
        .with_context(|| format!("stat {}", template.display()))?
        .permissions();
    persist_text(target, &text, Some(permissions))?;
    Ok(true)
}

fn persist_text(path: &Path, text: &str, new_permissions: Option<fs::Permissions>) -> Result<()> {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(text.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_permissions.or_else(default_permissions),
    };
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("set permissions of {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_optional_text_treats_missing_as_none() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("nope.txt");
        assert!(read_optional_text(&missing).expect("read").is_none());
    }

    #[test]
    fn write_text_creates_parents_and_replaces_contents() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested/deeper/out.txt");
        write_text(&path, "first").expect("first write");
        write_text(&path, "second").expect("second write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "second");
        let leftovers: Vec<_> = fs::read_dir(path.parent().expect("parent"))
            .expect("list dir")
            .collect();
        assert_eq!(leftovers.len(), 1, "temp files must not be left behind");
    }

    #[cfg(unix)]
    #[test]
    fn write_text_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("run.sh");
        fs::write(&path, "echo ${NAME}\n").expect("seed file");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");

        write_text(&path, "echo hi\n").expect("rewrite");
        let mode = fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("fresh/config.json");
        write_text(&path, "{}\n").expect("write");
        let mode = fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn bootstrap_takes_template_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("create temp dir");
        let template = dir.path().join("settings.template.yaml");
        let target = dir.path().join("settings.yaml");
        fs::write(&template, "service:\n").expect("write template");
        fs::set_permissions(&template, fs::Permissions::from_mode(0o640)).expect("chmod");

        assert!(bootstrap_from_template(&target, &template).expect("bootstrap"));
        let mode = fs::metadata(&target).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn write_text_goes_through_symlinks() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let real = dir.path().join("shared/config.json");
        let link = dir.path().join("config.json");
        fs::create_dir_all(real.parent().expect("parent")).expect("create dir");
        fs::write(&real, "{}").expect("seed");
        std::os::unix::fs::symlink(&real, &link).expect("symlink");

        write_text(&link, "{\"a\": 1}\n").expect("write through link");

        let link_meta = fs::symlink_metadata(&link).expect("lstat");
        assert!(link_meta.file_type().is_symlink(), "link was replaced");
        assert_eq!(fs::read_to_string(&real).expect("read"), "{\"a\": 1}\n");
    }

    #[test]
    fn bootstrap_copies_template_only_when_target_absent() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let template = dir.path().join("config.template.json");
        let target = dir.path().join("config.json");
        fs::write(&template, "{\"api\": {}}\n").expect("write template");

        assert!(bootstrap_from_template(&target, &template).expect("bootstrap"));
        assert_eq!(
            fs::read_to_string(&target).expect("read target"),
            "{\"api\": {}}\n"
        );

        fs::write(&target, "{}").expect("overwrite target");
        assert!(!bootstrap_from_template(&target, &template).expect("second bootstrap"));
        assert_eq!(fs::read_to_string(&target).expect("read target"), "{}");
    }

    #[test]
    fn bootstrap_skips_missing_template() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let target = dir.path().join("config.json");
        let template = dir.path().join("missing.json");
        assert!(!bootstrap_from_template(&target, &template).expect("bootstrap"));
        assert!(!target.exists());
    }
}
