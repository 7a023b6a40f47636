//! Render property accesses back into source-like text.
//!
//! These strings end up inside deprecation messages, so they mirror what the
//! offending call site most likely looked like: `params.slug` for names that
//! are valid identifiers, `params["foo-bar"]` for everything else.

/// Whether `name` can be written after a `.` in source code.
///
/// Accepts a leading `$`, `_` or identifier-start character followed by `$`,
/// `_`, ZWNJ, ZWJ or identifier-continue characters.
pub fn is_definitely_a_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let valid_start = first == '$' || first == '_' || unicode_ident::is_xid_start(first);
    if !valid_start {
        return false;
    }

    chars.all(|c| {
        c == '$'
            || c == '_'
            || c == '\u{200C}'
            || c == '\u{200D}'
            || unicode_ident::is_xid_continue(c)
    })
}

/// Describe reading `prop` from the object named `target`.
///
/// ```rust
/// use paramshim_core::describe_string_property_access;
///
/// assert_eq!(describe_string_property_access("params", "id"), "`params.id`");
/// assert_eq!(
///     describe_string_property_access("params", "my-id"),
///     "`params[\"my-id\"]`"
/// );
/// ```
pub fn describe_string_property_access(target: &str, prop: &str) -> String {
    if is_definitely_a_valid_identifier(prop) {
        format!("`{}.{}`", target, prop)
    } else {
        format!("`{}[{}]`", target, quote(prop))
    }
}

/// Describe checking whether the object named `target` has `prop`.
pub fn describe_has_checking_string_property(target: &str, prop: &str) -> String {
    format!("`Reflect.has({}, {})`", target, quote(prop))
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
