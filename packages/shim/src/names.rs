//! Join field names into a phrase for diagnostic text.

use crate::Error;

/// Join `names` the way a sentence would list them.
///
/// - `["a"]` → `a`
/// - `["a", "b"]` → `a and b`
/// - `["a", "b", "c"]` → `a, b, and c`
///
/// # Errors
///
/// An empty list is a contract violation by the caller and yields
/// `Error::Invariant`; callers only ask for a description once they know
/// something was omitted.
pub fn describe_list_of_property_names<S: AsRef<str>>(names: &[S]) -> Result<String, Error> {
    match names {
        [] => Err(Error::invariant(
            "expected describe_list_of_property_names to be called with a non-empty list of names",
        )),
        [only] => Ok(only.as_ref().to_string()),
        [first, second] => Ok(format!("{} and {}", first.as_ref(), second.as_ref())),
        [init @ .., last] => {
            let mut description = String::new();
            for name in init {
                description.push_str(name.as_ref());
                description.push_str(", ");
            }
            description.push_str("and ");
            description.push_str(last.as_ref());
            Ok(description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_name() {
        assert_eq!(describe_list_of_property_names(&["a"]).unwrap(), "a");
    }

    #[test]
    fn two_names() {
        assert_eq!(describe_list_of_property_names(&["a", "b"]).unwrap(), "a and b");
    }

    #[test]
    fn three_names() {
        assert_eq!(
            describe_list_of_property_names(&["a", "b", "c"]).unwrap(),
            "a, b, and c"
        );
    }

    #[test]
    fn four_names() {
        assert_eq!(
            describe_list_of_property_names(&["then", "status", "value", "x"]).unwrap(),
            "then, status, value, and x"
        );
    }

    #[test]
    fn empty_list_is_an_invariant_error() {
        let names: [&str; 0] = [];
        let err = describe_list_of_property_names(&names).unwrap_err();
        assert!(matches!(err, Error::Invariant { .. }));
    }

    proptest::proptest! {
        #[test]
        fn mentions_every_name_in_order(names in proptest::collection::vec("[a-z]{1,8}", 1..8)) {
            let phrase = describe_list_of_property_names(&names).unwrap();
            let mut rest = phrase.as_str();
            for name in &names {
                let at = rest.find(name.as_str());
                proptest::prop_assert!(at.is_some());
                rest = &rest[at.unwrap() + name.len()..];
            }
            proptest::prop_assert_eq!(phrase.contains(" and "), names.len() > 1);
        }
    }
}
