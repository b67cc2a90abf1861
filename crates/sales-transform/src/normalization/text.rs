//! Case normalization for descriptive text columns.

/// Title-case a string word by word.
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise, so apostrophes and digits start a new word:
///
/// ```
/// use sales_transform::normalization::title_case;
///
/// assert_eq!(title_case("ACME corp"), "Acme Corp");
/// assert_eq!(title_case("land of toys inc."), "Land Of Toys Inc.");
/// assert_eq!(title_case("o'brien"), "O'Brien");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for ch in value.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if !cased {
            out.push(ch);
            previous_cased = false;
            continue;
        }
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            // Multi-character upper mappings ('ß' -> "SS") keep only the
            // first character upper.
            let mut upper = ch.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
        previous_cased = true;
    }
    out
}

/// Trim and title-case.
pub fn standardize_title(value: &str) -> String {
    title_case(value.trim())
}

/// Trim and upper-case.
pub fn standardize_upper(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn title_case_examples() {
        assert_eq!(standardize_title("  acme corp "), "Acme Corp");
        assert_eq!(standardize_title("shipped"), "Shipped");
        assert_eq!(standardize_title("IN PROCESS"), "In Process");
        assert_eq!(standardize_title("classic cars"), "Classic Cars");
        assert_eq!(standardize_title("3rd street"), "3Rd Street");
        assert_eq!(standardize_title(""), "");
    }

    #[test]
    fn upper_examples() {
        assert_eq!(standardize_upper(" usa "), "USA");
        assert_eq!(standardize_upper("Norway"), "NORWAY");
    }

    #[test]
    fn sharp_s_is_stable() {
        let once = title_case("straße");
        assert_eq!(once, "Straße");
        assert_eq!(title_case("ßa"), "Ssa");
        assert_eq!(title_case(&title_case("ßa")), "Ssa");
    }

    proptest! {
        #[test]
        fn title_is_idempotent(value in "[a-zA-Z0-9 '.,&-]{0,40}") {
            let once = standardize_title(&value);
            prop_assert_eq!(standardize_title(&once), once);
        }

        #[test]
        fn upper_is_idempotent(value in "[a-zA-Z0-9 .-]{0,40}") {
            let once = standardize_upper(&value);
            prop_assert_eq!(standardize_upper(&once), once);
        }
    }
}
