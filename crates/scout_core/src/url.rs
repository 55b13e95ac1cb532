const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Normalize a user-entered site into an absolute URL.
///
/// Returns `None` for blank input. Anything not already starting with
/// `http://` or `https://` (ASCII case-insensitive) gets `https://` prepended;
/// no other validation is done.
pub fn normalize_target_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if SCHEMES.iter().any(|scheme| has_prefix_ignore_case(trimmed, scheme)) {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

fn has_prefix_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
