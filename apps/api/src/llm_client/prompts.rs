// Shared prompt constants.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting system prompts.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-form career writing (cover letters).
pub const CAREER_WRITER_SYSTEM: &str = "You are an experienced career coach and professional \
    writer. You write clear, specific, and honest application material. \
    Never invent employers, degrees, or achievements that are not in the candidate profile.";

/// Fills `{key}` placeholders in one pass over `template`.
///
/// Substituted values are copied verbatim and never rescanned, so text a user
/// typed cannot expand another placeholder. Braces that do not name a known
/// key (JSON examples in a template) are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
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

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let filled = fill_template("{a} and {b}, {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y, x");
    }

    #[test]
    fn test_fill_template_does_not_expand_inside_values() {
        let filled = fill_template(
            "Title: {title}\nBio: {bio}",
            &[("title", "{bio}"), ("bio", "secret")],
        );
        assert_eq!(filled, "Title: {bio}\nBio: secret");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let template = "Return {\n  \"headline\": \"{role}\"\n} {unclosed";
        let filled = fill_template(template, &[("role", "Engineer")]);
        assert_eq!(filled, "Return {\n  \"headline\": \"Engineer\"\n} {unclosed");
    }
}
