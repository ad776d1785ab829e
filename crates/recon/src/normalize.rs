/// Canonicalize a display name for equality comparison.
///
/// Lowercases, turns hyphens into spaces, then drops periods, commas and
/// apostrophes, in that order. Whitespace is left untouched, so names that
/// differ only in spacing stay distinct.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace('-', " ")
        .replace(['.', ',', '\''], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case() {
        assert_eq!(normalize("McDonald's-Group."), normalize("mcdonalds group"));
        assert_eq!(normalize("O'Brien, J."), "obrien j");
    }

    #[test]
    fn hyphen_becomes_space() {
        assert_eq!(normalize("Al-Hassan"), "al hassan");
        assert_eq!(normalize("Al-Hassan"), normalize("al hassan"));
    }

    #[test]
    fn whitespace_not_collapsed() {
        assert_ne!(normalize("Jane  Doe"), normalize("Jane Doe"));
        assert_ne!(normalize(" Jane Doe"), normalize("Jane Doe"));
    }

    #[test]
    fn initials_do_not_expand() {
        assert_ne!(normalize("Jane Doe"), normalize("J. Doe"));
    }

    #[test]
    fn non_ascii_lowercased() {
        assert_eq!(normalize("ÉLODIE"), "élodie");
    }

    #[test]
    fn idempotent_on_samples() {
        for s in ["", "A-B.C,D'E", "--..", "Ὀδυσσεύς", "x y  z"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
