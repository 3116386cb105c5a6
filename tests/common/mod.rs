// Common test utilities shared across test files

use urit::VariableStore;

/// The variables used by the RFC 6570 examples
#[allow(dead_code)]
pub fn rfc_store() -> VariableStore {
    let mut store = VariableStore::new();
    store.add_string("var", "value");
    store.add_string("hello", "Hello World!");
    store.add_string("half", "50%");
    store.add_string("empty", "");
    store.add_string("path", "/foo/bar");
    store.add_string("x", "1024");
    store.add_string("y", "768");
    store.add_list("list", ["red", "green", "blue"]);
    store.add_map("keys", [("semi", ";"), ("dot", "."), ("comma", ",")]);
    store.add_string("base", "http://example.com/home/");
    store.add_list("count", ["one", "two", "three"]);
    store.add_string("who", "fred");
    store
}

/// Expand against [`rfc_store`], asserting that no diagnostics were recorded
#[allow(dead_code)]
pub fn expand_ok(template: &str) -> String {
    let result = urit::expand(template, &rfc_store());
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {}: {:?}",
        template,
        result.diagnostics
    );
    result.uri.unwrap_or_else(|| panic!("no URI for {}", template))
}
