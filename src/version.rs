//! Version negotiation over dotted numeric version strings.
//!
//! git-flow does not require full semantic versions: anything of the form
//! "N", "N.N", "N.N.N", ... is accepted, and everything else falls back to
//! the configured default version.

/// Parses a version string into its numeric components.
///
/// # Arguments
/// * `version` - Version string to parse (e.g., "1.2.3")
///
/// # Returns
/// * `Some(components)` - All dot-separated parts parsed as numbers
/// * `None` - If the string is empty or any component is non-numeric
///
/// # Example
/// ```ignore
/// assert_eq!(parse_components("1.2.3"), Some(vec![1, 2, 3]));
/// assert_eq!(parse_components("1.2.3-SNAPSHOT"), None);
/// ```
pub fn parse_components(version: &str) -> Option<Vec<u64>> {
    if version.is_empty() {
        return None;
    }

    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

fn render(components: &[u64]) -> String {
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Proposes the next version by incrementing the last numeric component.
///
/// Parse failure is non-fatal: the configured fallback is returned and a
/// diagnostic trace is recorded at debug level.
///
/// # Arguments
/// * `current` - The current project version
/// * `fallback` - Version to use when `current` cannot be parsed
///
/// # Example
/// ```ignore
/// assert_eq!(propose_next("1.0.1", "1.0.1"), "1.0.2");
/// assert_eq!(propose_next("2.9", "1.0.1"), "2.10");
/// assert_eq!(propose_next("not-a-version", "1.0.1"), "1.0.1");
/// ```
pub fn propose_next(current: &str, fallback: &str) -> String {
    match parse_components(current) {
        Some(mut components) => {
            if let Some(last) = components.last_mut() {
                *last += 1;
            }
            render(&components)
        }
        None => {
            tracing::debug!(current, fallback, "version not parsable, using fallback");
            fallback.to_string()
        }
    }
}

/// Truncates a version to its two leading components, without incrementing.
///
/// Used to name a long-lived maintenance line after the current major.minor.
/// Versions with fewer than two components (or unparsable ones) fall back to
/// the configured default.
///
/// # Example
/// ```ignore
/// assert_eq!(truncate_major_minor("1.2.3", "1.0"), "1.2");
/// assert_eq!(truncate_major_minor("1.0", "2.0"), "1.0");
/// ```
pub fn truncate_major_minor(current: &str, fallback: &str) -> String {
    match parse_components(current) {
        Some(components) if components.len() >= 2 => render(&components[..2]),
        _ => {
            tracing::debug!(
                current,
                fallback,
                "version has no major.minor pair, using fallback"
            );
            fallback.to_string()
        }
    }
}
