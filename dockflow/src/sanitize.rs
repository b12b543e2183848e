//! Image name normalization.
//!
//! Project names such as `@acme/My App` are not valid image references.
//! [`sanitize`] maps any string onto the `[a-z0-9._-]` alphabet used for
//! image names.

/// Normalizes a raw image name into an image-reference-safe string.
///
/// The input is lower-cased, every character outside `[a-z0-9._-]` becomes
/// `-`, runs of `-` collapse to one, and leading and trailing `-` are
/// removed. The function is total and idempotent. It may return an empty
/// string; callers decide whether that is acceptable.
///
/// # Examples
///
/// ```
/// use dockflow::sanitize;
///
/// assert_eq!(sanitize("My App!!"), "my-app");
/// assert_eq!(sanitize("@acme/web-ui"), "acme-web-ui");
/// assert_eq!(sanitize(&sanitize("My App!!")), "my-app");
/// assert_eq!(sanitize("!!!"), "");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.chars().flat_map(char::to_lowercase) {
        let c = if is_allowed(c) { c } else { '-' };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Returns true if `name` is already in sanitized form.
///
/// # Examples
///
/// ```
/// use dockflow::sanitize::is_sanitized;
///
/// assert!(is_sanitized("my-app"));
/// assert!(!is_sanitized("My-App"));
/// assert!(!is_sanitized("-app"));
/// ```
#[must_use]
pub fn is_sanitized(name: &str) -> bool {
    name.chars().all(is_allowed)
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

fn is_allowed(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}
