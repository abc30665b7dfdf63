//! Parsing of `"name"` / `"name.N"` object references.

use crate::mechanics::StateMatch;

/// A reference split into its name and optional exact state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reference<'a> {
    pub name: &'a str,
    pub state: StateMatch,
}

/// Split a reference at its last dot when the suffix is a number.
///
/// Anything else is taken whole as a name, so `"mr.smith"` names an object
/// called `mr.smith`. Returns `None` for an empty name.
pub(crate) fn parse_reference(raw: &str) -> Option<Reference<'_>> {
    let raw = raw.trim();
    let (name, state) = match raw.rsplit_once('.') {
        Some((name, suffix))
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            (name, StateMatch::Exactly(suffix.parse().ok()?))
        }
        _ => (raw, StateMatch::Any),
    };

    if name.is_empty() {
        return None;
    }
    Some(Reference { name, state })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_wildcard() {
        assert_eq!(
            parse_reference("key"),
            Some(Reference {
                name: "key",
                state: StateMatch::Any
            })
        );
    }

    #[test]
    fn test_name_with_state() {
        assert_eq!(
            parse_reference("lever.1"),
            Some(Reference {
                name: "lever",
                state: StateMatch::Exactly(1)
            })
        );
    }

    #[test]
    fn test_dotted_name_without_state() {
        let reference = parse_reference("mr.smith").unwrap();
        assert_eq!(reference.name, "mr.smith");
        assert_eq!(reference.state, StateMatch::Any);

        let reference = parse_reference("st.george.2").unwrap();
        assert_eq!(reference.name, "st.george");
        assert_eq!(reference.state, StateMatch::Exactly(2));
    }

    #[test]
    fn test_malformed_references() {
        assert_eq!(parse_reference(""), None);
        assert_eq!(parse_reference(".3"), None);
        assert_eq!(parse_reference("door.99999999999"), None);
    }
}
