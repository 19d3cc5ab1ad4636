//! Social sharing link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Maximum length of the shared text, in characters.
pub const SHARE_LIMIT: usize = 250;

const NEWLINE_TOKEN: &str = "%0A";

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Characters escaped in the query value: everything but unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Lines of the recipe that fit the share budget.
///
/// Every newline between kept lines costs the three characters of its
/// `%0A` token. A token that would not fit whole ends the text instead.
fn share_lines(recipe: &str) -> Vec<String> {
    let mut remaining = SHARE_LIMIT;
    let mut lines = Vec::new();

    for (i, line) in recipe.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if i > 0 {
            if remaining < NEWLINE_TOKEN.len() {
                break;
            }
            remaining -= NEWLINE_TOKEN.len();
        }

        let len = line.chars().count();
        if len > remaining {
            lines.push(line.chars().take(remaining).collect());
            break;
        }
        lines.push(line.to_string());
        remaining -= len;
    }

    lines
}

/// Share text for a recipe: newlines become `%0A`, then the result is cut to
/// [`SHARE_LIMIT`] characters.
///
/// A newline token split by the cut is dropped rather than left half-written.
pub fn share_text(recipe: &str) -> String {
    share_lines(recipe).join(NEWLINE_TOKEN)
}

/// Tweet intent URL pre-filled with the recipe's share text.
///
/// Each line is percent-encoded on its own, so a literal `%` in the recipe is
/// escaped while the line breaks still arrive as `%0A`.
pub fn share_url(recipe: &str) -> String {
    let text = share_lines(recipe)
        .iter()
        .map(|line| utf8_percent_encode(line, QUERY_VALUE).to_string())
        .collect::<Vec<_>>()
        .join(NEWLINE_TOKEN);

    format!("{}?text={}", TWEET_INTENT_URL, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_newlines_replaced() {
        assert_eq!(share_text("Pho\nBroth:\r\nbones"), "Pho%0ABroth:%0Abones");
    }

    #[test]
    fn test_truncated_to_limit() {
        let recipe = "é".repeat(400);
        let text = share_text(&recipe);
        assert_eq!(text.chars().count(), SHARE_LIMIT);
    }

    #[test]
    fn test_no_raw_newlines_after_truncation() {
        let recipe = "line\n".repeat(200);
        let text = share_text(&recipe);
        assert!(!text.contains('\n'));
        assert!(text.chars().count() <= SHARE_LIMIT);
    }

    #[test]
    fn test_split_token_is_dropped() {
        // 249 characters, then a newline: the cut lands inside "%0A".
        let recipe = format!("{}\nmore", "a".repeat(249));
        let text = share_text(&recipe);
        assert_eq!(text, "a".repeat(249));

        let recipe = format!("{}\nmore", "a".repeat(248));
        let text = share_text(&recipe);
        assert_eq!(text, "a".repeat(248));
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(share_text("Toast"), "Toast");
    }

    #[test]
    fn test_share_url() {
        let url = share_url("Mac & Cheese\nServes 4");
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=Mac%20%26%20Cheese%0AServes%204"
        );
    }

    #[test]
    fn test_share_url_decodes_to_recipe_text() {
        let recipe = "Burger\n100%Beef patty\n10% DV iron";
        let url = share_url(recipe);

        assert!(url.contains("100%25Beef"));
        let query = url.split_once("?text=").unwrap().1;
        let decoded = percent_decode_str(query).decode_utf8().unwrap();
        assert_eq!(decoded, recipe);
    }

    #[test]
    fn test_share_url_truncates_like_share_text() {
        let recipe = format!("{}\n{}", "50%".repeat(60), "b".repeat(200));
        let url = share_url(&recipe);

        let query = url.split_once("?text=").unwrap().1;
        let decoded = percent_decode_str(query).decode_utf8().unwrap();
        assert_eq!(decoded.replace('\n', "%0A"), share_text(&recipe));
        assert_eq!(share_text(&recipe).chars().count(), SHARE_LIMIT);
    }
}
