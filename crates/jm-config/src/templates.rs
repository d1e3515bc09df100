//! Configuration templates for `jm init`.
//!
//! Templates are stored as valid TOML and handed out commented-out.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn templates_parse_as_valid_toml() {
        let local = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(local.settings.unwrap().top_k, Some(5));

        let global = parse_config(GLOBAL_TEMPLATE).unwrap();
        assert_eq!(global.embedding.unwrap().batch_size, Some(32));
    }

    #[test]
    fn commented_template_parses_as_empty() {
        let config = parse_config(&local_template()).unwrap();
        assert!(config.settings.is_none());
        assert!(config.dataset.is_none());
    }

    #[test]
    fn comment_template_keeps_comments_and_blank_lines() {
        let input = "# note\n[settings]\n\ntop_k = 3\n";
        assert_eq!(
            comment_template(input),
            "# note\n# [settings]\n\n# top_k = 3\n"
        );
    }
}
