//! Shared utility functions.

/// Derive a display title from a file stem.
///
/// Hyphens become spaces, then every alphabetic run is capitalized with the
/// rest of the run lower-cased.
/// "getting-started" -> "Getting Started"
/// "README" -> "Readme"
pub fn title_from_stem(stem: &str) -> String {
    title_case(&stem.replace('-', " "))
}

/// Upper-case the first letter of each alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("getting-started"), "Getting Started");
        assert_eq!(title_from_stem("installation"), "Installation");
        assert_eq!(title_from_stem("my-cool-feature"), "My Cool Feature");
    }

    #[test]
    fn test_title_case_lowercases_rest_of_word() {
        assert_eq!(title_case("README"), "Readme");
        assert_eq!(title_case("uv_tips"), "Uv_Tips");
        assert_eq!(title_case("python3x guide"), "Python3X Guide");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
