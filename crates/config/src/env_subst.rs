/// Replace `${VAR}` and `${VAR:-default}` placeholders from the process
/// environment.
///
/// Unresolvable variables without a default are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Substitution against an arbitrary lookup, so tests need not touch the
/// process environment.
pub fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated, keep the remainder literally.
            result.push_str(&rest[start..]);
            return result;
        };

        let expr = &after[..end];
        let (name, default) = match expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (expr, None),
        };

        match (name.is_empty(), lookup(name), default) {
            (false, Some(value), _) => result.push_str(&value),
            (false, None, Some(default)) => result.push_str(default),
            _ => {
                result.push_str("${");
                result.push_str(expr);
                result.push('}');
            },
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "FORMPOST_BOUNDARY" => Some("----Fixed123".to_string()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_env_with("boundary = \"${FORMPOST_BOUNDARY}\"", lookup),
            "boundary = \"----Fixed123\""
        );
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_env_with("${FORMPOST_MISSING_XYZ}", lookup),
            "${FORMPOST_MISSING_XYZ}"
        );
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(substitute_env_with("${FORMPOST_MISSING:-file}", lookup), "file");
        assert_eq!(
            substitute_env_with("${FORMPOST_BOUNDARY:-other}", lookup),
            "----Fixed123"
        );
    }

    #[test]
    fn unterminated_and_empty_placeholders_are_literal() {
        assert_eq!(substitute_env_with("a ${OPEN", lookup), "a ${OPEN");
        assert_eq!(substitute_env_with("${}", lookup), "${}");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text $HOME"), "plain text $HOME");
    }
}
