//! Derived placeholder defaults.
//!
//! Many placeholders have no direct key in the business document — they are
//! synthesized from richer structures: a markdown rendering of the location
//! list, service name lists extracted from structured service records,
//! generated URL slugs, contact summary lines. [`derived_defaults`] builds
//! that table once per engine run; the resolver consults it only when a
//! direct document lookup comes up empty, so any of these keys can be
//! overridden by simply adding them to the document.
//!
//! Documents have grown through three service formats (flat string lists,
//! structured `SERVICES` records, and `CORE_SERVICES` with pre-flattened
//! companions like `ALL_SERVICES`/`CORE_SERVICES_URLS`); the derivations
//! here accept all of them.

use crate::document::{get, get_str};
use crate::render::{self, RenderHint, area_label, scalar_string};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Precompute the synthetic-placeholder table for a document.
pub fn derived_defaults(document: &Value) -> BTreeMap<String, Value> {
    let mut table: BTreeMap<String, Value> = BTreeMap::new();
    let mut put = |key: &str, value: Value| {
        table.insert(key.to_string(), value);
    };

    put(
        "BUSINESS_NAME",
        Value::from(get_str(document, "BUSINESS_NAME", &get_str(document, "SITE_NAME", ""))),
    );
    put(
        "PRIMARY_KEYWORD",
        Value::from(get_str(document, "PRIMARY_KEYWORD", "Landscaping")),
    );
    put(
        "WEBSITE_URL",
        Value::from(get_str(document, "WEBSITE_URL", &get_str(document, "BASE_URL", ""))),
    );

    let locations = get(document, "LOCATIONS").cloned().unwrap_or(Value::Sequence(vec![]));
    put(
        "LOCATIONS_MD",
        Value::from(render::render(&locations, RenderHint::Markdown)),
    );

    // Service name list and markdown: prefer the hierarchical CORE_SERVICES,
    // then structured SERVICES records, then a flat string list.
    let (service_names, services_md) = service_names_and_md(document);
    put("SERVICES_MD", Value::from(services_md));
    put("SERVICES", Value::Sequence(service_names.clone()));

    put(
        "CTA_TEXT",
        Value::from(get_str(
            document,
            "CTA_TEXT",
            "Contact us today for a free consultation!",
        )),
    );

    let meta_title = resolve_meta(document, "title");
    let meta_description = resolve_meta(document, "description");
    let meta_keywords = resolve_meta(document, "keywords");
    put("META_TITLE", Value::from(meta_title));
    put("META_DESCRIPTION", Value::from(meta_description));
    put(
        "KEYWORDS_MD",
        Value::from(render::render(
            &Value::Sequence(vec![Value::from(meta_keywords)]),
            RenderHint::Markdown,
        )),
    );

    // Page-level placeholders are filled per-page elsewhere; empty defaults
    // keep whole-site templates resolvable.
    for key in ["PAGE_TITLE", "PAGE_META_DESCRIPTION", "PAGE_URL_SLUG", "PAGE_CONTENT"] {
        put(key, Value::from(get_str(document, key, "")));
    }
    let page_keywords = get(document, "PAGE_KEYWORDS").cloned().unwrap_or(Value::Sequence(vec![]));
    put(
        "PAGE_KEYWORDS_MD",
        Value::from(render::render(&page_keywords, RenderHint::Markdown)),
    );

    let service_urls = service_urls(document);
    put(
        "SERVICES_URLS_MD",
        Value::from(render::render(
            &Value::Sequence(service_urls.clone()),
            RenderHint::Markdown,
        )),
    );
    put("SERVICES_URLS", Value::Sequence(service_urls));

    let blog_links: Vec<Value> = get(document, "BLOG_TOPICS")
        .and_then(Value::as_sequence)
        .map(|topics| {
            topics
                .iter()
                .map(|t| Value::from(blog_link(&scalar_string(t))))
                .collect()
        })
        .unwrap_or_default();
    put(
        "BLOG_LINKS_MD",
        Value::from(render::render(&Value::Sequence(blog_links), RenderHint::Markdown)),
    );

    put("CONTACT_MD", Value::from(contact_summary(document)));

    put(
        "LOCATIONS_ARRAY",
        get(document, "LOCATIONS_ARRAY")
            .or_else(|| get(document, "LOCATIONS"))
            .cloned()
            .unwrap_or(Value::Sequence(vec![])),
    );

    let services_array = get(document, "ALL_SERVICES")
        .or_else(|| get(document, "SERVICES_ARRAY"))
        .cloned()
        .unwrap_or(Value::Sequence(service_names));
    put("SERVICES_ARRAY", services_array);

    put(
        "SOCIAL_PROFILES_ARRAY",
        get(document, "SOCIAL_PROFILES_ARRAY")
            .cloned()
            .unwrap_or_else(|| Value::Sequence(social_profile_urls(document))),
    );

    put(
        "AREA_SERVED",
        Value::from(get_str(document, "AREA_SERVED", &area_served(document))),
    );
    put(
        "AVAILABLE_LANGUAGE",
        Value::from(get_str(document, "AVAILABLE_LANGUAGE", "English")),
    );

    table
}

/// Generate a URL slug for a service lacking an explicit URL.
///
/// `"Lawn Care (Residential) & More"` → `"/lawn-care-residential-and-more/"`.
pub fn service_url_from_name(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .replace(' ', "-")
        .replace(['(', ')'], "")
        .replace('&', "and");
    format!("/{slug}/")
}

/// Blog post link for a topic: `"Mulch, Rocks & Soil"` → `"/our-blog/mulch-rocks-and-soil/"`.
pub fn blog_link(topic: &str) -> String {
    let slug = topic
        .to_lowercase()
        .replace(' ', "-")
        .replace(',', "")
        .replace('&', "and");
    format!("/our-blog/{slug}/")
}

fn service_names_and_md(document: &Value) -> (Vec<Value>, String) {
    if let Some(core) = get(document, "CORE_SERVICES") {
        return (
            core.as_sequence().cloned().unwrap_or_default(),
            render::render(core, RenderHint::Markdown),
        );
    }
    if let Some(md) = get(document, "SERVICES_MD") {
        return (vec![], render::render(md, RenderHint::Markdown));
    }
    let services = get(document, "SERVICES").and_then(Value::as_sequence);
    let Some(services) = services else {
        return (vec![], String::new());
    };
    if services.first().is_some_and(Value::is_mapping) {
        // Structured records: extract the NAME field from each.
        let names: Vec<Value> = services
            .iter()
            .map(|s| {
                s.as_mapping()
                    .and_then(|m| m.get(Value::from("NAME")))
                    .cloned()
                    .unwrap_or(Value::from(""))
            })
            .collect();
        let md = render::render(&Value::Sequence(names.clone()), RenderHint::Markdown);
        (names, md)
    } else {
        let names = services.clone();
        let md = render::render(&Value::Sequence(names.clone()), RenderHint::Markdown);
        (names, md)
    }
}

fn service_urls(document: &Value) -> Vec<Value> {
    if let Some(urls) = get(document, "CORE_SERVICES_URLS").or_else(|| get(document, "SERVICES_URLS"))
    {
        return urls.as_sequence().cloned().unwrap_or_default();
    }
    let Some(services) = get(document, "SERVICES").and_then(Value::as_sequence) else {
        return vec![];
    };
    if services.first().is_some_and(Value::is_mapping) {
        services
            .iter()
            .map(|s| {
                s.as_mapping()
                    .and_then(|m| m.get(Value::from("URL")))
                    .cloned()
                    .unwrap_or(Value::from(""))
            })
            .collect()
    } else {
        services
            .iter()
            .map(|s| Value::from(service_url_from_name(&scalar_string(s))))
            .collect()
    }
}

fn contact_summary(document: &Value) -> String {
    if let Some(md) = get(document, "CONTACT_MD") {
        return scalar_string(md);
    }
    let phone = crate::document::resolve_with_fallback(document, "CONTACT.PHONE")
        .map(scalar_string)
        .unwrap_or_default();
    let email = crate::document::resolve_with_fallback(document, "CONTACT.EMAIL")
        .map(scalar_string)
        .unwrap_or_default();
    format!("Phone: {phone} | Email: {email}")
}

fn social_profile_urls(document: &Value) -> Vec<Value> {
    let Some(social) = get(document, "SOCIAL_MEDIA").and_then(Value::as_mapping) else {
        return vec![];
    };
    social
        .values()
        .filter_map(|entry| match entry {
            Value::Mapping(m) => m
                .get(Value::from("URL"))
                .filter(|url| !scalar_string(url).is_empty())
                .cloned(),
            Value::String(s) if !s.is_empty() => Some(entry.clone()),
            _ => None,
        })
        .collect()
}

fn area_served(document: &Value) -> String {
    let Some(locations) = get(document, "LOCATIONS").and_then(Value::as_sequence) else {
        return String::new();
    };
    if locations.first().is_some_and(Value::is_mapping) {
        let areas: Vec<String> = locations
            .iter()
            .map(area_label)
            .filter(|a| !a.is_empty())
            .collect();
        areas.join(", ")
    } else {
        let areas: Vec<String> = locations.iter().map(scalar_string).collect();
        areas.join(", ")
    }
}

fn resolve_meta(document: &Value, field: &str) -> String {
    crate::document::resolve(document, &format!("META.{field}"))
        .map(scalar_string)
        .unwrap_or_default()
}
