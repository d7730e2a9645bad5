//! Hint-driven rendering of document values into text.
//!
//! One renderer serves both prose contexts (rule files, markdown) and
//! machine-readable contexts (JSON templates): callers derive a
//! [`RenderHint`] from the placeholder's own name, and [`render`] branches
//! on the runtime shape of the value. The shape dispatch is an exhaustive
//! match over `serde_yaml::Value` — the variant was fixed at parse time.
//!
//! ## Hint grammar
//!
//! | Placeholder name | Hint | List rendering |
//! |---|---|---|
//! | `*_ARRAY`, `BLOG_TOPICS`, `SERVICES`, `LOCATIONS` | Array | pretty-printed JSON |
//! | `*_MD` | Markdown | `\n- item` bullet list |
//! | anything else | Plain | comma-joined |
//!
//! Location records (maps with `CITY`/`STATE` keys) are summarized as
//! `City-State` labels, degrading to whichever part is present.

use serde_yaml::Value;

/// How a placeholder wants its value shaped.
///
/// Classification by placeholder name lives here and nowhere else; new
/// array-context placeholder names go in [`RenderHint::for_placeholder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// Pretty-printed JSON (schema/config contexts).
    Array,
    /// Markdown bullet list.
    Markdown,
    /// Inline text, lists comma-joined.
    Plain,
}

/// Names that render as JSON arrays despite lacking the `_ARRAY` suffix.
const ARRAY_CONTEXT_NAMES: &[&str] = &["BLOG_TOPICS", "SERVICES", "LOCATIONS"];

impl RenderHint {
    pub fn for_placeholder(name: &str) -> Self {
        if name.ends_with("_ARRAY") || ARRAY_CONTEXT_NAMES.contains(&name) {
            RenderHint::Array
        } else if name.ends_with("_MD") {
            RenderHint::Markdown
        } else {
            RenderHint::Plain
        }
    }
}

/// Render a document value into text according to the hint.
///
/// Total: every value shape renders to something, worst case an empty
/// string. Never fails, never panics.
pub fn render(value: &Value, hint: RenderHint) -> String {
    match value {
        Value::Sequence(items) => match hint {
            RenderHint::Array => json_pretty(value),
            RenderHint::Markdown => {
                let rendered: Vec<String> = items.iter().map(list_item_label).collect();
                if rendered.is_empty() {
                    String::new()
                } else {
                    format!("\n- {}", rendered.join("\n- "))
                }
            }
            RenderHint::Plain => {
                if !items.is_empty() && items.iter().all(Value::is_mapping) {
                    let labels: Vec<String> = items.iter().map(list_item_label).collect();
                    labels.join(", ")
                } else {
                    let parts: Vec<String> = items.iter().map(scalar_string).collect();
                    parts.join(", ")
                }
            }
        },
        Value::Mapping(_) => json_pretty(value),
        scalar => scalar_string(scalar),
    }
}

/// Label a list item: location records become `City-State`, everything
/// else is stringified.
fn list_item_label(item: &Value) -> String {
    if let Value::Mapping(map) = item {
        let has_location_keys =
            map.contains_key(Value::from("CITY")) || map.contains_key(Value::from("STATE"));
        if has_location_keys {
            return location_label(item);
        }
    }
    scalar_string(item)
}

/// `City-State` summary of a location record. City-only or state-only
/// records degrade to the part that exists.
pub fn location_label(location: &Value) -> String {
    let city = field_str(location, "CITY");
    let state = field_str(location, "STATE");
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}-{state}"),
        (false, true) => city,
        (true, false) => state,
        (true, true) => scalar_string(location),
    }
}

/// `City, State` form used for area-served strings.
pub fn area_label(location: &Value) -> String {
    let city = field_str(location, "CITY");
    let state = field_str(location, "STATE");
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city,
        (true, false) => state,
        (true, true) => String::new(),
    }
}

fn field_str(value: &Value, key: &str) -> String {
    value
        .as_mapping()
        .and_then(|m| m.get(Value::from(key)))
        .map(scalar_string)
        .unwrap_or_default()
}

/// Two-level (pillar → sub-topics) markdown for the supporting-topics map.
pub fn render_supporting_topics(topics: &Value) -> String {
    let Some(map) = topics.as_mapping() else {
        return String::new();
    };
    let mut md = String::new();
    for (pillar, subs) in map {
        md.push_str(&format!("## {} Supporting Pages\n\n", scalar_string(pillar)));
        if let Some(items) = subs.as_sequence() {
            for sub in items {
                md.push_str(&format!("- {}\n", scalar_string(sub)));
            }
        }
        md.push('\n');
    }
    md
}

/// Direct string conversion of a value. Nested lists comma-join, nested
/// maps fall back to compact JSON, null renders empty.
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(scalar_string).collect();
            parts.join(", ")
        }
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
    }
}

/// Canonical pretty-printed JSON serialization (stable order: sequences
/// keep document order, mappings keep insertion order).
pub fn json_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    // =========================================================================
    // Hint classification
    // =========================================================================

    #[test]
    fn array_suffix_and_literals_classify_as_array() {
        assert_eq!(
            RenderHint::for_placeholder("LOCATIONS_ARRAY"),
            RenderHint::Array
        );
        assert_eq!(RenderHint::for_placeholder("SERVICES"), RenderHint::Array);
        assert_eq!(RenderHint::for_placeholder("BLOG_TOPICS"), RenderHint::Array);
    }

    #[test]
    fn md_suffix_classifies_as_markdown() {
        assert_eq!(
            RenderHint::for_placeholder("SERVICES_MD"),
            RenderHint::Markdown
        );
    }

    #[test]
    fn other_names_classify_as_plain() {
        assert_eq!(
            RenderHint::for_placeholder("BUSINESS_NAME"),
            RenderHint::Plain
        );
        assert_eq!(RenderHint::for_placeholder("AREA_SERVED"), RenderHint::Plain);
    }

    // =========================================================================
    // Render branches
    // =========================================================================

    #[test]
    fn location_list_as_markdown() {
        let v = yaml("- CITY: Reno\n  STATE: NV\n- CITY: Tahoe");
        assert_eq!(render(&v, RenderHint::Markdown), "\n- Reno-NV\n- Tahoe");
    }

    #[test]
    fn state_only_location_degrades() {
        let v = yaml("- STATE: NV");
        assert_eq!(render(&v, RenderHint::Markdown), "\n- NV");
    }

    #[test]
    fn location_list_comma_joined_without_hint() {
        let v = yaml("- CITY: Reno\n  STATE: NV\n- CITY: Sparks\n  STATE: NV");
        assert_eq!(render(&v, RenderHint::Plain), "Reno-NV, Sparks-NV");
    }

    #[test]
    fn string_list_as_markdown() {
        let v = yaml("- One\n- Two");
        assert_eq!(render(&v, RenderHint::Markdown), "\n- One\n- Two");
    }

    #[test]
    fn string_list_as_json_array() {
        let v = yaml("- One\n- Two");
        assert_eq!(render(&v, RenderHint::Array), "[\n  \"One\",\n  \"Two\"\n]");
    }

    #[test]
    fn string_list_plain_comma_joined() {
        let v = yaml("- One\n- Two");
        assert_eq!(render(&v, RenderHint::Plain), "One, Two");
    }

    #[test]
    fn mapping_renders_as_pretty_json_regardless_of_hint() {
        let v = yaml("PHONE: '555-0100'");
        let rendered = render(&v, RenderHint::Plain);
        assert!(rendered.contains("\"PHONE\": \"555-0100\""));
    }

    #[test]
    fn scalars_render_directly() {
        assert_eq!(render(&yaml("hello"), RenderHint::Plain), "hello");
        assert_eq!(render(&yaml("42"), RenderHint::Plain), "42");
        assert_eq!(render(&yaml("true"), RenderHint::Plain), "true");
        assert_eq!(render(&Value::Null, RenderHint::Plain), "");
    }

    #[test]
    fn empty_list_markdown_is_empty() {
        let v = yaml("[]");
        assert_eq!(render(&v, RenderHint::Markdown), "");
    }

    // =========================================================================
    // Labels and supporting topics
    // =========================================================================

    #[test]
    fn area_label_comma_form() {
        let v = yaml("CITY: Reno\nSTATE: NV");
        assert_eq!(area_label(&v), "Reno, NV");
        assert_eq!(area_label(&yaml("CITY: Tahoe")), "Tahoe");
    }

    #[test]
    fn supporting_topics_two_level_markdown() {
        let v = yaml("Lawn Care:\n- Mowing\n- Edging\nIrrigation:\n- Drip Systems");
        let md = render_supporting_topics(&v);
        assert_eq!(
            md,
            "## Lawn Care Supporting Pages\n\n- Mowing\n- Edging\n\n\
             ## Irrigation Supporting Pages\n\n- Drip Systems\n\n"
        );
    }

    #[test]
    fn supporting_topics_non_mapping_is_empty() {
        assert_eq!(render_supporting_topics(&yaml("just text")), "");
    }
}
