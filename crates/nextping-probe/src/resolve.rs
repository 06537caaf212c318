/// Reduces a URL or bare hostname to the host part handed to probes.
///
/// Only `http://` and `https://` inputs are rewritten: the authority between
/// the scheme and the next `/` is returned. Anything else passes through
/// unchanged, malformed or not.
pub fn resolve_target(raw: &str) -> &str {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return raw;
    }

    match raw.splitn(3, '/').nth(2) {
        Some(rest) => rest.split('/').next().unwrap_or(rest),
        None => raw,
    }
}
