use std::path::Path;

const MASK_KEEP_LAST: usize = 4;

/// Hide all but the last four characters of a secret.
pub fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    let hidden = count.saturating_sub(MASK_KEEP_LAST);
    let mut masked = "*".repeat(hidden);
    masked.extend(secret.chars().skip(hidden));
    masked
}

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}
