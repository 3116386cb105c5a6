// Property tests for expansion

use proptest::prelude::*;
use urit::domain::template::encode;
use urit::{expand, VariableStore};

fn store_with_string(value: &str) -> VariableStore {
    let mut store = VariableStore::new();
    store.add_string("v", value);
    store
}

fn store_with_list(items: &[String]) -> VariableStore {
    let mut store = VariableStore::new();
    store.add_list("l", items.iter().cloned());
    store
}

proptest! {
    #[test]
    fn test_literal_templates_are_unchanged(
        template in "[A-Za-z0-9._~:/?#@!$&'()*+,;=\\-\\[\\]]{0,40}"
    ) {
        let result = expand(&template, &VariableStore::new());
        prop_assert_eq!(result.uri.as_deref(), Some(template.as_str()));
        prop_assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_simple_expansion_matches_encode(value in "[^%]{0,40}") {
        let result = expand("{v}", &store_with_string(&value));
        let expected = encode(&value, false, 0);
        prop_assert_eq!(result.uri.as_deref(), Some(expected.as_str()));
        prop_assert_eq!(expected, urlencoding::encode(&value).into_owned());
    }

    #[test]
    fn test_reserved_expansion_matches_encode(value in "\\PC{0,40}") {
        let result = expand("{+v}", &store_with_string(&value));
        let expected = encode(&value, true, 0);
        prop_assert_eq!(result.uri.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_prefix_keeps_leading_characters(value in "[A-Za-z0-9]{0,20}", len in 1usize..30) {
        let result = expand(&format!("{{v:{}}}", len), &store_with_string(&value));
        let expected: String = value.chars().take(len).collect();
        prop_assert_eq!(result.uri, Some(expected));
    }

    #[test]
    fn test_list_explode_only_changes_separators(
        items in prop::collection::vec("[a-z0-9]{1,8}", 1..6)
    ) {
        let store = store_with_list(&items);
        let joined = items.join(",");
        let plain = expand("{l}", &store).uri;
        let exploded = expand("{l*}", &store).uri;
        let path = expand("{/l*}", &store).uri;
        prop_assert_eq!(plain.as_deref(), Some(joined.as_str()));
        prop_assert_eq!(exploded.as_deref(), Some(joined.as_str()));
        prop_assert_eq!(path, Some(format!("/{}", items.join("/"))));
    }

    #[test]
    fn test_arbitrary_templates_never_panic(template in "\\PC{0,40}") {
        let result = expand(&template, &store_with_string("value"));
        prop_assert_eq!(result.uri.is_none(), result.is_fatal());
        prop_assert_eq!(result.is_ok(), result.diagnostics.is_empty());
        for diagnostic in &result.diagnostics {
            prop_assert!(diagnostic.position <= template.chars().count());
        }
    }
}
