//! HTML page templates and the placeholder filler.

/// Index page; see `index::render_index_page` for its keys
pub const INDEX_PAGE: &str = include_str!("../../templates/index.html");

/// Function detail page; see `detail::render_detail_page` for its keys
pub const FUNCTION_PAGE: &str = include_str!("../../templates/function.html");

/// Replace `{key}` placeholders in a single left-to-right pass
///
/// Braces that do not enclose a known key are copied unchanged, and
/// substituted values are never rescanned.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let known = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });

        match known {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fill_known_keys() {
        let out = fill("<h1>{title}</h1><p>{body}</p>", &[("title", "T"), ("body", "B")]);
        assert_eq!(out, "<h1>T</h1><p>B</p>");
    }

    #[test]
    fn test_fill_leaves_other_braces() {
        let out = fill("td { color: red; } {x} {", &[("x", "1")]);
        assert_eq!(out, "td { color: red; } 1 {");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("{a}{b}", &[("a", "{b}"), ("b", "2")]);
        assert_eq!(out, "{b}2");
    }

    #[test]
    fn test_templates_have_placeholders() {
        for key in ["{filename}", "{filter_exp}", "{table}", "{header}"] {
            assert!(INDEX_PAGE.contains(key), "index page lacks {}", key);
        }
        for key in ["{func}", "{self_row}", "{callers}", "{callees}", "{index_link}"] {
            assert!(FUNCTION_PAGE.contains(key), "function page lacks {}", key);
        }
    }
}
