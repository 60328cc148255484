//! Inline color tags.
//!
//! Text may embed styling instructions of the form `%H<code> text%H`. The
//! delimiter is removed everywhere and every fragment that starts with a
//! numeric code is wrapped in the matching SGR escape sequence:
//!
//! ```
//! use tagterm::color::colorize;
//!
//! assert_eq!(colorize("Hello %H1 World"), "Hello \x1b[1mWorld\x1b[0m");
//! ```
//!
//! Substitution targets the *first* occurrence of a fragment's text in the
//! partially rendered string, so an untagged copy of the same text that comes
//! earlier is the one that gets styled.

/// Delimiter that opens and closes a tag.
pub const TAG: &str = "%H";

const RESET: &str = "\x1b[0m";

/// Whether tags render as escapes by default. Any `NO_COLOR` value, even an
/// empty one, turns them off.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Replace every tag in `text` with its ANSI escape sequence.
pub fn colorize(text: &str) -> String {
    render(text, true)
}

/// Parse the tags in `text`. With `styled` unset the tags are dropped and
/// only their words are kept, which is what `NO_COLOR` output looks like.
pub fn render(text: &str, styled: bool) -> String {
    let fragments: Vec<&str> = text.split(TAG).collect();
    let mut rendered = fragments.concat();

    for fragment in &fragments {
        let Some((code, words)) = coded_fragment(text, fragment) else {
            continue;
        };

        let replacement = if styled {
            format!("\x1b[{}m{}{}", sgr_code(code), words, RESET)
        } else {
            words.to_string()
        };

        rendered = rendered.replacen(fragment, &replacement, 1);
    }

    rendered
}

/// Split a fragment into `(code, words)` when it carries a usable tag.
///
/// The code is everything up to the first space. It must be numeric and the
/// source must contain `%H<code>` verbatim; otherwise the fragment is plain.
fn coded_fragment<'a>(source: &str, fragment: &'a str) -> Option<(&'a str, &'a str)> {
    let (code, words) = fragment.split_once(' ').unwrap_or((fragment, ""));

    if code.is_empty() || !is_numeric(code) {
        return None;
    }
    if !source.contains(&format!("{TAG}{code}")) {
        return None;
    }

    Some((code, words))
}

/// Background codes get a readable foreground paired with them: dark
/// backgrounds (40-47) use bright black text, bright backgrounds (100-107)
/// use bright white. Every other code is emitted as written.
fn sgr_code(code: &str) -> String {
    match numeric_value(code) {
        Some(n) if (40.0..=47.0).contains(&n) => format!("90;{code}"),
        Some(n) if (100.0..=107.0).contains(&n) => format!("97;{code}"),
        _ => code.to_string(),
    }
}

/// Whether `code` reads as a number under loose numeric coercion: surrounding
/// whitespace is ignored, `0x`/`0o`/`0b` literals and `Infinity` are
/// accepted. Blank text is not a number, so a bare `%H\n` stays plain.
fn is_numeric(code: &str) -> bool {
    numeric_value(code).is_some()
}

pub(crate) fn numeric_value(code: &str) -> Option<f64> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = code.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    let unsigned = code.strip_prefix(['+', '-']).unwrap_or(code);
    if unsigned == "Infinity" {
        return Some(if code.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // Rust accepts `inf` and `nan` spellings that plain numbers never use.
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    code.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_tags_is_untouched() {
        for s in ["", "plain text", "1 leading number", "100% done", "%h1 lower"] {
            assert_eq!(colorize(s), s);
        }
    }

    #[test]
    fn inline_tag_styles_the_rest() {
        assert_eq!(colorize("Hello %H1 World"), "Hello \x1b[1mWorld\x1b[0m");
    }

    #[test]
    fn closed_tag_keeps_trailing_text_plain() {
        assert_eq!(
            colorize("%H31 red%H after"),
            "\x1b[31mred\x1b[0m after"
        );
    }

    #[test]
    fn background_codes_get_a_foreground() {
        assert_eq!(colorize("%H41  FAIL:%H"), "\x1b[90;41m FAIL:\x1b[0m");
        assert_eq!(colorize("%H100  INFO:%H"), "\x1b[97;100m INFO:\x1b[0m");
        assert_eq!(colorize("%H48 x%H"), "\x1b[48mx\x1b[0m");
    }

    #[test]
    fn non_numeric_code_is_plain_text() {
        assert_eq!(colorize("%Hbold text%H"), "bold text");
        assert_eq!(colorize("%Hinf x%H"), "inf x");
    }

    #[test]
    fn delimiter_alone_is_removed() {
        assert_eq!(colorize("a%H%Hb"), "ab");
    }

    #[test]
    fn rendered_output_is_stable() {
        let once = colorize("%H42  PASS:%H done %H1 ok");
        assert_eq!(colorize(&once), once);
    }

    #[test]
    fn repeated_fragment_text_styles_first_match() {
        // The untagged copy comes first, so it is the one that gets styled.
        assert_eq!(
            colorize("1 a%H1 a"),
            "\x1b[1ma\x1b[0m\x1b[1ma\x1b[0m"
        );
        assert_eq!(colorize("x 1 a%H1 a"), "x \x1b[1ma\x1b[0m1 a");
    }

    #[test]
    fn unstyled_render_keeps_words_only() {
        assert_eq!(render("%H46  name:%H%H44  demo ", false), " name: demo ");
        assert_eq!(render("plain", false), "plain");
    }

    #[test]
    fn loose_numeric_codes() {
        assert!(is_numeric("1"));
        assert!(is_numeric("1.5"));
        assert!(is_numeric("0x1f"));
        assert!(is_numeric("-Infinity"));
        assert!(!is_numeric("nan"));
        assert!(!is_numeric("1a"));
        assert!(!is_numeric("\n"));
    }

    #[test]
    fn closing_tag_before_newline_keeps_newline() {
        assert_eq!(colorize("%H1 x %H\n"), "\x1b[1mx \x1b[0m\n");
    }
}
