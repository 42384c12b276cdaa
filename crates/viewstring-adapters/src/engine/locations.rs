//! View name classification and location expansion.
//!
//! Locations are root-relative strings such as `/Views/Shared/Card.jinja`.
//! They are what a failed lookup reports, so they keep the shape the format
//! produced (including empty segments like `/Views//Card.jinja`).

/// Starts with `~/` or `/`.
pub fn is_app_relative(name: &str) -> bool {
    name.starts_with("~/") || name.starts_with('/')
}

/// Ends with the view extension (ASCII case-insensitive).
pub fn is_relative_path(name: &str, extension: &str) -> bool {
    name.len() >= extension.len()
        && name.is_char_boundary(name.len() - extension.len())
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}

/// `~/a/b` and `/a/b` both become `/a/b`.
pub fn normalize_app_relative(name: &str) -> String {
    match name.strip_prefix('~') {
        Some(rest) => rest.to_string(),
        None => name.to_string(),
    }
}

/// Resolve `relative` against the directory of the executing view, if any.
pub fn combine(executing_file_path: Option<&str>, relative: &str) -> String {
    match executing_file_path.and_then(|path| path.rsplit_once('/')) {
        Some((dir, _)) => format!("{dir}/{relative}"),
        None => relative.to_string(),
    }
}

/// Fill `{0}`, `{1}`, `{2}` in a location format.
///
/// One pass over `format`: substituted values are copied as-is, so braces in
/// a view name or route value are never expanded again.
pub fn expand(format: &str, view_name: &str, controller: &str, area: &str) -> String {
    let mut out = String::with_capacity(format.len() + view_name.len() + controller.len());
    let mut rest = format;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = match tail.get(..3) {
            Some("{0}") => Some(view_name),
            Some("{1}") => Some(controller),
            Some("{2}") => Some(area),
            _ => None,
        };
        match value {
            Some(value) => {
                out.push_str(value);
                rest = &tail[3..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Template name under the content root for a location.
///
/// Empty and `.` segments are dropped; `None` if the location climbs out of
/// the root.
pub fn template_name(location: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in location.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => segments.push(s),
        }
    }
    (!segments.is_empty()).then(|| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_names() {
        assert!(is_app_relative("/Views/Home/Index.jinja"));
        assert!(is_app_relative("~/Views/Home/Index.jinja"));
        assert!(!is_app_relative("Index"));

        assert!(is_relative_path("Index.jinja", ".jinja"));
        assert!(is_relative_path("Index.JINJA", ".jinja"));
        assert!(!is_relative_path("Index", ".jinja"));
        assert!(!is_relative_path("a", ".jinja"));
    }

    #[test]
    fn normalizes_tilde_paths() {
        assert_eq!(normalize_app_relative("~/Views/A.jinja"), "/Views/A.jinja");
        assert_eq!(normalize_app_relative("/Views/A.jinja"), "/Views/A.jinja");
    }

    #[test]
    fn combines_with_executing_directory() {
        assert_eq!(
            combine(Some("/Views/Mail/Invoice.jinja"), "_Lines.jinja"),
            "/Views/Mail/_Lines.jinja"
        );
        assert_eq!(combine(None, "_Lines.jinja"), "_Lines.jinja");
        assert_eq!(combine(Some("Invoice.jinja"), "_Lines.jinja"), "_Lines.jinja");
    }

    #[test]
    fn expands_missing_route_values_to_empty() {
        assert_eq!(
            expand("/Views/{1}/{0}.jinja", "Index", "", ""),
            "/Views//Index.jinja"
        );
        assert_eq!(
            expand("/Areas/{2}/Views/{1}/{0}.jinja", "Index", "Home", "Admin"),
            "/Areas/Admin/Views/Home/Index.jinja"
        );
    }

    #[test]
    fn placeholders_inside_values_are_kept_literally() {
        assert_eq!(
            expand("/Views/{1}/{0}.jinja", "{1}x", "Home", ""),
            "/Views/Home/{1}x.jinja"
        );
        assert_eq!(
            expand("/Areas/{2}/Views/{1}/{0}.jinja", "Index", "{0}", "{1}"),
            "/Areas/{1}/Views/{0}/Index.jinja"
        );
    }

    #[test]
    fn unknown_braces_pass_through() {
        assert_eq!(expand("/{x}/{3}/{0}{", "A", "", ""), "/{x}/{3}/A{");
    }

    #[test]
    fn template_names_stay_inside_root() {
        assert_eq!(
            template_name("/Views//Index.jinja").as_deref(),
            Some("Views/Index.jinja")
        );
        assert_eq!(
            template_name("./Views/./A.jinja").as_deref(),
            Some("Views/A.jinja")
        );
        assert_eq!(template_name("/Views/../../etc/passwd"), None);
        assert_eq!(template_name("/"), None);
    }
}
