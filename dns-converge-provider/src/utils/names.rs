//! Domain name helpers

/// Strips the trailing dot of a fully-qualified name.
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Converts a fully-qualified name into a label relative to `zone_name`.
///
/// - `"www.example.com"` + `"example.com"` -> `"www"`
/// - `"example.com"` + `"example.com"` -> `"@"`
/// - names outside the zone are returned unchanged (without trailing dot)
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name).to_lowercase();
    let zone = normalize_domain_name(zone_name).to_lowercase();

    if full == zone {
        "@".to_string()
    } else if let Some(label) = full.strip_suffix(&format!(".{zone}")) {
        label.to_string()
    } else {
        full
    }
}

/// Re-attaches the zone origin to a label.
///
/// - `"www"` + `"example.com"` -> `"www.example.com"`
/// - `"@"` or `""` + `"example.com"` -> `"example.com"`
/// - a label that is already absolute (trailing dot) keeps its name
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone
    } else if relative_name.ends_with('.') {
        normalize_domain_name(relative_name)
    } else {
        format!("{relative_name}.{zone}")
    }
}
