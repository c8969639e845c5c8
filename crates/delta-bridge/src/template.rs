//! Initial content for a freshly created note, task or transaction.

const PLACEHOLDER: &str = "TEMPLATE";

const TEMPLATE: &str =
    "{\"delta\":{\"ops\":[{\"insert\":\"TEMPLATE\\n\"}]},\"###html###\":\"<p>TEMPLATE</p><p><br></p>\"}";

/// Builds a web-only content record whose single paragraph is `plain_text`.
///
/// The text is substituted verbatim. Callers must pass text that is already
/// escaped for a JSON string and safe inside HTML.
pub fn generate_template(plain_text: &str) -> String {
    TEMPLATE.replace(PLACEHOLDER, plain_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{supplement, ContentRecord};
    use serde_json::Value;

    #[test]
    fn hello_template() {
        let text = generate_template("Hello");
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["delta"]["ops"][0]["insert"], "Hello\n");
        assert_eq!(v["###html###"], "<p>Hello</p><p><br></p>");
        assert!(v.get("mdelta").is_none());
        assert!(v["delta"]["ops"][0].get("attributes").is_none());
    }

    #[test]
    fn empty_text() {
        assert_eq!(
            generate_template(""),
            r####"{"delta":{"ops":[{"insert":"\n"}]},"###html###":"<p></p><p><br></p>"}"####
        );
    }

    #[test]
    fn text_is_not_escaped() {
        let text = generate_template(r#"a\"b"#);
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["delta"]["ops"][0]["insert"], "a\"b\n");
    }

    #[test]
    fn template_can_be_supplemented() {
        let out = supplement(&generate_template("Day 1")).unwrap();
        let record = ContentRecord::parse(&out).unwrap();
        assert_eq!(record.mdelta.map(|m| m.len()), Some(1));
    }
}
