//! Helpers for emitting script fragments into host HTML.

use serde::Serialize;

/// JSON-encode `value` so it can sit inside an inline `<script>` block.
///
/// `<`, `>` and `&` are escaped so the payload cannot close the script tag or
/// open a comment; U+2028/U+2029 are escaped for pre-ES2019 parsers.
pub fn json_for_script<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Script block exposing `entries` under the page-global `Translation` object.
///
/// Each entry is `(client-side key, localized text)`.
pub fn translation_script<'a, I>(entries: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut script = String::from("\n<script>\n\twindow.Translation = window.Translation || {};\n");
    for (key, text) in entries {
        script.push_str(&format!(
            "\twindow.Translation['{}'] = {};\n",
            key.replace('\\', "\\\\").replace('\'', "\\'"),
            json_for_script(text)?
        ));
    }
    script.push_str("</script>\n");
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_script_breaking_characters() {
        let encoded = json_for_script("</script><b>&").unwrap();
        assert_eq!(encoded, r#""\u003c/script\u003e\u003cb\u003e\u0026""#);
    }

    #[test]
    fn plain_text_is_ordinary_json() {
        assert_eq!(json_for_script("Back").unwrap(), "\"Back\"");
    }

    #[test]
    fn script_assigns_each_entry() {
        let script = translation_script([("back", "Zurück")]).unwrap();
        assert!(script.contains("window.Translation = window.Translation || {};"));
        assert!(script.contains("window.Translation['back'] = \"Zurück\";"));
        assert!(script.trim_end().ends_with("</script>"));
    }
}
