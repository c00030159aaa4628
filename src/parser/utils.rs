/// Reduce a lesson title to something safe as a filename on every platform.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    // Collapse runs of underscores left by the replacements above.
    let mut out = String::with_capacity(cleaned.len());
    let mut last_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !last_underscore {
                out.push(c);
            }
            last_underscore = true;
        } else {
            out.push(c);
            last_underscore = false;
        }
    }

    let out = out.trim_matches('_').to_string();
    if out.is_empty() { "lecture".to_string() } else { out }
}

/// File extension of a URL's path, ignoring query string and fragment.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.rsplit('/').next()?;
    let (stem, extension) = segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() || extension.len() > 4 {
        return None;
    }
    extension
        .chars()
        .all(|c| c.is_ascii_alphanumeric())
        .then(|| extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_title("Week 1: Intro / Overview"), "Week_1_Intro_Overview");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_title("   "), "lecture");
        assert_eq!(sanitize_title("///"), "lecture");
    }

    #[test]
    fn extension_ignores_query() {
        assert_eq!(
            extension_from_url("https://content.example.org/a/s1q1.m4s?sig=abc.def"),
            Some("m4s".to_string())
        );
        assert_eq!(extension_from_url("https://example.org/video"), None);
    }
}
