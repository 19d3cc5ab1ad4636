//! Plain-text downloads.

/// Filename for the current recipe as plain text.
pub const TXT_FILENAME: &str = "recipace_recipe.txt";

/// Content type for plain-text downloads.
pub const TXT_MIME: &str = "text/plain";

/// Filename for the `n`th saved recipe (1-based).
pub fn saved_filename(n: usize) -> String {
    format!("saved_{}.txt", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_filename() {
        assert_eq!(saved_filename(1), "saved_1.txt");
        assert_eq!(saved_filename(12), "saved_12.txt");
    }
}
