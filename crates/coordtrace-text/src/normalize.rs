/// Strip `@mention`s, lowercase, and collapse whitespace runs to single
/// spaces with leading/trailing whitespace removed (§4.2).
///
/// Mentions are stripped from the `@` up to (but not including) the next
/// whitespace character, so `"Hello @bob!"` becomes `"Hello"` — with no
/// whitespace between the handle and what follows, any trailing
/// punctuation is consumed along with the handle, not just `bob` itself.
pub fn normalize(text: &str) -> String {
    let stripped = strip_mentions(text);
    collapse_whitespace(&stripped.to_lowercase())
}

fn strip_mentions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c == '@' {
            while let Some((_, next)) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                chars.next();
            }
        } else {
            out.push(c);
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mention_up_to_whitespace() {
        assert_eq!(normalize("Hello @bob"), "hello");
    }

    #[test]
    fn mention_attached_trailing_punctuation_is_consumed_too() {
        assert_eq!(normalize("hi @bob!"), "hi");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize("hello   world\t\n!"), "hello world !");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("Hello @bob   there");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}
