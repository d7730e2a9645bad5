//! Derived data-file emitters.
//!
//! Each emitter is a pure function from the business document to one
//! structured artifact, independent of the template engine:
//!
//! | Emitter | Output |
//! |---|---|
//! | [`faq_json`] | `data/faq.json` — fixed Q/A set with business facts interpolated |
//! | [`portfolio_json`] | `data/portfolio.json` — demo projects per core service |
//! | [`services_json`] | `data/services.json` — entry per service and sub-service |
//! | [`manifest_json`] | `public/manifest.json` — web app manifest |
//! | [`business_config_ts`] | `lib/business-config.ts` — typed config module |
//! | [`patch_site_config`] | `lib/seo-config.ts` — replaces the `siteConfig` block in place |
//!
//! Running the emitters twice on an unchanged document produces byte-identical
//! files: every derivation is deterministic and no emitter reads the clock or
//! the filesystem (the config patch reads only the file it rewrites).
//!
//! All emitters tolerate missing optional fields through defaults; a failed
//! emitter is reported and counted, and the remaining emitters still run.

use crate::config::GenerateConfig;
use crate::document::{get, get_str, resolve};
use crate::render::{area_label, scalar_string};
use serde::Serialize;
use serde_json::{Value as Json, json};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-run emitter statistics.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub generated: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Run every emitter, writing artifacts under the configured directories.
/// Per-emitter failures are reported and counted, never propagated.
pub fn emit_all(document: &Value, config: &GenerateConfig) -> EmitReport {
    let mut report = EmitReport::default();

    let json_outputs = [
        (config.data_dir.join("faq.json"), faq_json(document)),
        (config.data_dir.join("portfolio.json"), portfolio_json(document)),
        (config.data_dir.join("services.json"), services_json(document)),
        (config.public_dir.join("manifest.json"), manifest_json(document)),
    ];
    for (path, value) in json_outputs {
        match write_json(&path, &value) {
            Ok(()) => {
                println!("Generated: {}", path.display());
                report.generated += 1;
            }
            Err(e) => {
                eprintln!("Error generating {}: {e}", path.display());
                report.failed += 1;
            }
        }
    }

    let config_path = config.lib_dir.join("business-config.ts");
    match write_text(&config_path, &business_config_ts(document)) {
        Ok(()) => {
            println!("Generated: {}", config_path.display());
            report.generated += 1;
        }
        Err(e) => {
            eprintln!("Error generating {}: {e}", config_path.display());
            report.failed += 1;
        }
    }

    // The seo-config patch fails soft: a missing file or unlocatable block
    // leaves everything untouched.
    let seo_path = config.lib_dir.join("seo-config.ts");
    match std::fs::read_to_string(&seo_path) {
        Ok(content) => match patch_site_config(&content, document) {
            Some(patched) => match std::fs::write(&seo_path, patched) {
                Ok(()) => {
                    println!("Updated: {} (siteConfig only)", seo_path.display());
                    report.generated += 1;
                }
                Err(e) => {
                    eprintln!("Error updating {}: {e}", seo_path.display());
                    report.failed += 1;
                }
            },
            None => {
                eprintln!("Warning: could not find siteConfig block in {}", seo_path.display());
                report.skipped += 1;
            }
        },
        Err(_) => {
            eprintln!("Warning: {} not found, skipping update", seo_path.display());
            report.skipped += 1;
        }
    }

    report
}

fn write_json(path: &std::path::Path, value: &Json) -> Result<(), EmitError> {
    write_text(path, &serde_json::to_string_pretty(value)?)
}

fn write_text(path: &std::path::Path, content: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// First few location labels joined for prose ("Reno, NV, Sparks, NV").
fn service_areas(document: &Value, limit: usize) -> String {
    let locations = get(document, "LOCATIONS_ARRAY")
        .or_else(|| get(document, "LOCATIONS"))
        .and_then(Value::as_sequence);
    let Some(locations) = locations else {
        return String::new();
    };
    let labels: Vec<String> = locations
        .iter()
        .take(limit)
        .map(|loc| {
            if loc.is_mapping() {
                area_label(loc)
            } else {
                scalar_string(loc)
            }
        })
        .filter(|l| !l.is_empty())
        .collect();
    labels.join(", ")
}

fn core_service_names(document: &Value) -> Vec<String> {
    get(document, "CORE_SERVICES")
        .and_then(Value::as_sequence)
        .map(|services| services.iter().map(scalar_string).collect())
        .unwrap_or_default()
}

#[derive(Serialize)]
struct FaqEntry {
    id: u32,
    category: &'static str,
    question: &'static str,
    answer: String,
}

/// Fixed-size FAQ set with service/contact/location facts interpolated into
/// fixed-language prose.
pub fn faq_json(document: &Value) -> Json {
    let areas = service_areas(document, 4);
    let phone = resolve(document, "CONTACT.PHONE").map(scalar_string).unwrap_or_default();
    let email = resolve(document, "CONTACT.EMAIL").map(scalar_string).unwrap_or_default();
    let availability = resolve(document, "HOURS.MONDAY")
        .map(scalar_string)
        .unwrap_or_else(|| "7 days a week".to_string());
    let services = core_service_names(document).join(", ");

    let faqs = vec![
        FaqEntry {
            id: 1,
            category: "General",
            question: "Which areas do you serve?",
            answer: format!(
                "We proudly serve {areas} and the surrounding communities. \
                 Our professional services are available throughout these areas."
            ),
        },
        FaqEntry {
            id: 2,
            category: "General",
            question: "How can I reach you?",
            answer: format!(
                "You can call us at {phone} or email us at {email}. \
                 We are available {availability}."
            ),
        },
        FaqEntry {
            id: 3,
            category: "Services",
            question: "What services do you offer?",
            answer: format!(
                "We offer {services}. Contact us for a free consultation \
                 to discuss your specific needs."
            ),
        },
        FaqEntry {
            id: 4,
            category: "Services",
            question: "Do you offer free estimates?",
            answer: format!(
                "Yes, we provide completely free, no-obligation estimates for all \
                 of our services. Call us at {phone} to schedule yours."
            ),
        },
        FaqEntry {
            id: 5,
            category: "Pricing",
            question: "How much do your services cost?",
            answer: "Pricing varies with the scope of work, required materials, and \
                     your specific needs. We offer transparent, upfront pricing with \
                     no hidden fees. Contact us for a free estimate."
                .to_string(),
        },
        FaqEntry {
            id: 6,
            category: "Scheduling",
            question: "How quickly can you start a project?",
            answer: format!(
                "We offer same-day service for emergency repairs. Installations and \
                 larger projects can usually be scheduled within a few days. Call \
                 {phone} to check current availability."
            ),
        },
    ];

    json!({ "faqs": faqs })
}

/// Synthetic portfolio: one demo project per core service (up to 5), cycling
/// through available locations, plus fixed display statistics.
pub fn portfolio_json(document: &Value) -> Json {
    let services = core_service_names(document);
    let locations: Vec<Value> = get(document, "LOCATIONS")
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();

    let projects: Vec<Json> = services
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, service)| {
            let (city, state) = if locations.is_empty() {
                ("Local Area".to_string(), "TX".to_string())
            } else {
                let loc = &locations[i % locations.len()];
                if loc.is_mapping() {
                    let city = resolve(loc, "CITY").map(scalar_string).unwrap_or_default();
                    let state = resolve(loc, "STATE").map(scalar_string).unwrap_or_default();
                    (
                        if city.is_empty() { "Local Area".into() } else { city },
                        if state.is_empty() { "TX".into() } else { state },
                    )
                } else {
                    (scalar_string(loc), "TX".to_string())
                }
            };
            json!({
                "id": i + 1,
                "title": format!("Professional {service} Project"),
                "category": service,
                "image": "/assets/images/portfolio/featured-project.webp",
                "date": "2024",
                "location": format!("{city}, {state}"),
                "description": format!(
                    "Complete {} with professional installation and quality materials.",
                    service.to_lowercase()
                ),
                "features": [
                    "Professional Installation",
                    "Quality Materials",
                    "Expert Service",
                    "Customer Satisfaction",
                ],
                "client": if i % 2 == 0 { "Residential Client" } else { "Commercial Client" },
                "duration": "1-2 Days",
                "tags": [service, &city, &state],
            })
        })
        .collect();

    json!({
        "stats": {
            "totalProjects": 500,
            "happyClients": 450,
            "yearsExperience": 10,
            "averageRating": 4.9,
        },
        "projects": projects,
    })
}

/// One entry per structured service record plus one per nested sub-service.
/// Non-mapping entries in the services list are skipped.
pub fn services_json(document: &Value) -> Json {
    let business_name = get_str(document, "BUSINESS_NAME", "Example Company");
    let primary_keyword = get_str(document, "PRIMARY_KEYWORD", "Professional Services");
    let primary_city = {
        let areas = service_areas(document, 1);
        if areas.is_empty() { "Example City, ST".to_string() } else { areas }
    };

    let mut entries: Vec<Json> = Vec::new();
    let services = get(document, "SERVICES")
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();

    for service in &services {
        let Some(record) = service.as_mapping() else {
            continue;
        };
        let name = record.get(Value::from("NAME")).map(scalar_string).unwrap_or_default();
        let slug = record
            .get(Value::from("URL"))
            .map(scalar_string)
            .unwrap_or_default()
            .trim_matches('/')
            .replace('/', "-");
        let description = record
            .get(Value::from("DESCRIPTION"))
            .map(scalar_string)
            .unwrap_or_else(|| format!("Professional {name} solutions"));

        entries.push(json!({
            "id": slug,
            "name": name,
            "slug": slug,
            "description": description,
            "content": format!(
                "Our {name} provide exceptional quality and reliability for both \
                 residential and commercial clients.\n\n## Our Process\n\n\
                 ### 1. Consultation\n- Free consultation\n- Custom recommendations\n\
                 - Detailed quote and timeline\n\n### 2. Professional Service\n\
                 - Expert team\n- Quality materials\n- Precise execution\n\n\
                 ### 3. Follow-up Support\n- Thorough quality check\n\
                 - Operation demonstration\n- Warranty and maintenance guidance"
            ),
            "category": "Core Services",
            "duration": "1-2 days",
            "priceRange": "Contact for quote",
            "isCore": true,
            "parentService": Json::Null,
            "features": [
                "Free Consultation",
                "Professional Service",
                "Quality Guarantee",
                "Warranty Included",
                "Expert Team",
            ],
            "seo": {
                "metaTitle": format!("{name} in {primary_city} | {business_name}"),
                "metaDescription": format!(
                    "Professional {} in {primary_city}. Expert service, quality products \
                     & satisfaction guaranteed. Free consultation!",
                    name.to_lowercase()
                ),
                "keywords": format!(
                    "{}, {}, {primary_city}",
                    name.to_lowercase(),
                    primary_keyword.to_lowercase()
                ),
            },
            "featuredImage": "/assets/images/portfolio/featured-project.webp",
            "gallery": [
                "/assets/images/portfolio/project-gallery-1.webp",
                "/assets/images/portfolio/project-gallery-2.webp",
                "/assets/images/portfolio/project-gallery-3.webp",
            ],
            "contentVariations": {
                "opening": format!(
                    "Transform your property with professional {}. Our expert team \
                     provides quality solutions tailored to your specific needs.",
                    name.to_lowercase()
                ),
                "whyChoose": format!(
                    "We bring years of experience and expertise to every {} project. \
                     Our commitment to quality and customer satisfaction sets us apart.",
                    name.to_lowercase()
                ),
                "closing": format!(
                    "Ready to get started? Let's discuss your {} needs. Schedule \
                     your free consultation today.",
                    name.to_lowercase()
                ),
            },
            "uniqueFaqs": [
                {
                    "question": format!("What does {} include?", name.to_lowercase()),
                    "answer": format!(
                        "Our {} includes consultation, professional service delivery, \
                         quality materials, and follow-up support. We provide \
                         comprehensive solutions tailored to your needs.",
                        name.to_lowercase()
                    ),
                },
                {
                    "question": format!("How long does {} take?", name.to_lowercase()),
                    "answer": "Most projects are completed within 1-2 days, depending on \
                               scope and complexity. We'll provide an accurate timeline \
                               during your consultation.",
                },
            ],
        }));

        let sub_services = record
            .get(Value::from("SUB_SERVICES"))
            .and_then(Value::as_sequence)
            .cloned()
            .unwrap_or_default();
        for sub in &sub_services {
            let Some(sub_record) = sub.as_mapping() else {
                continue;
            };
            let sub_name = sub_record.get(Value::from("NAME")).map(scalar_string).unwrap_or_default();
            let sub_slug = sub_record
                .get(Value::from("URL"))
                .map(scalar_string)
                .unwrap_or_default()
                .trim_matches('/')
                .replace('/', "-");
            entries.push(json!({
                "id": sub_slug,
                "name": sub_name,
                "slug": sub_slug,
                "description": format!(
                    "Expert {} services. Professional quality and customer \
                     satisfaction guaranteed.",
                    sub_name.to_lowercase()
                ),
                "content": format!(
                    "Our {sub_name} services provide specialized solutions with \
                     professional expertise.\n\n## Service Features\n\n- Professional team\n\
                     - Quality materials\n- Expert execution\n\
                     - Customer satisfaction guarantee"
                ),
                "category": format!("{name} Services"),
                "duration": "1 day",
                "priceRange": "Contact for quote",
                "isCore": false,
                "parentService": slug,
                "features": [
                    "Expert Service",
                    "Quality Materials",
                    "Professional Team",
                    "Satisfaction Guarantee",
                ],
                "seo": {
                    "metaTitle": format!("{sub_name} | {business_name}"),
                    "metaDescription": format!(
                        "Expert {} services. Professional quality and customer \
                         satisfaction guaranteed. Free consultation available!",
                        sub_name.to_lowercase()
                    ),
                    "keywords": format!(
                        "{}, {}, {}",
                        sub_name.to_lowercase(),
                        name.to_lowercase(),
                        primary_keyword.to_lowercase()
                    ),
                },
                "featuredImage": "/assets/images/portfolio/featured-project.webp",
                "gallery": [
                    "/assets/images/portfolio/project-gallery-1.webp",
                    "/assets/images/portfolio/project-gallery-2.webp",
                ],
                "contentVariations": {
                    "opening": format!(
                        "Specialized {} services for your needs. Our expert team \
                         delivers quality solutions with professional care.",
                        sub_name.to_lowercase()
                    ),
                    "whyChoose": format!(
                        "Our {} services combine expertise with customer-focused \
                         solutions. We're committed to your satisfaction.",
                        sub_name.to_lowercase()
                    ),
                    "closing": format!(
                        "Get started with {} today. Contact us for your free \
                         consultation.",
                        sub_name.to_lowercase()
                    ),
                },
                "uniqueFaqs": [
                    {
                        "question": format!(
                            "What makes your {} different?",
                            sub_name.to_lowercase()
                        ),
                        "answer": format!(
                            "Our {} services combine professional expertise with \
                             personalized attention. We focus on quality and customer \
                             satisfaction in every project.",
                            sub_name.to_lowercase()
                        ),
                    },
                ],
            }));
        }
    }

    json!({ "services": entries })
}

/// Web-app-manifest structure derived from business name, keyword,
/// description, and category facts.
pub fn manifest_json(document: &Value) -> Json {
    let business_name = get_str(document, "BUSINESS_NAME", "Example Company");
    let primary_keyword = get_str(document, "PRIMARY_KEYWORD", "Professional Services");
    let primary_city = {
        let areas = service_areas(document, 1);
        if areas.is_empty() { "Example City, ST".to_string() } else { areas }
    };
    let description = resolve(document, "META.description")
        .map(scalar_string)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| {
            format!(
                "Professional {} for businesses in {primary_city} and surrounding areas",
                primary_keyword.to_lowercase()
            )
        });
    let primary_category = resolve(document, "CATEGORIES.PRIMARY")
        .map(scalar_string)
        .unwrap_or_else(|| "business".to_string());

    let favicon_icon = |sizes: &str| {
        json!({
            "src": "/assets/config/favicon.ico",
            "sizes": sizes,
            "type": "image/x-icon",
        })
    };

    json!({
        "name": format!("{business_name} - {primary_keyword}"),
        "short_name": business_name,
        "description": description,
        "start_url": "/",
        "display": "standalone",
        "background_color": "#ffffff",
        "theme_color": "#3B82F6",
        "orientation": "portrait-primary",
        "scope": "/",
        "lang": "en-US",
        "categories": [
            primary_category.to_lowercase(),
            primary_keyword.to_lowercase().replace(' ', "_"),
        ],
        "icons": [
            {
                "src": "/assets/config/favicon.ico",
                "sizes": "16x16",
                "type": "image/x-icon",
                "purpose": "maskable any",
            },
            {
                "src": "/assets/config/favicon.ico",
                "sizes": "512x512",
                "type": "image/x-icon",
                "purpose": "maskable any",
            },
            favicon_icon("180x180"),
            favicon_icon("32x32"),
            favicon_icon("16x16"),
        ],
        "screenshots": [
            {
                "src": "/assets/config/favicon.ico",
                "sizes": "1280x720",
                "type": "image/x-icon",
                "form_factor": "wide",
            },
            {
                "src": "/assets/config/favicon.ico",
                "sizes": "750x1334",
                "type": "image/x-icon",
                "form_factor": "narrow",
            },
        ],
        "shortcuts": [
            {
                "name": "Contact Us",
                "short_name": "Contact",
                "description": "Get in touch with us",
                "url": "/contact",
                "icons": [{ "src": "/assets/config/favicon.ico", "sizes": "16x16" }],
            },
            {
                "name": "Our Services",
                "short_name": "Services",
                "description": format!("Browse our professional {}", primary_keyword.to_lowercase()),
                "url": "/services",
                "icons": [{ "src": "/assets/config/favicon.ico", "sizes": "16x16" }],
            },
        ],
    })
}

/// Locate a named exported block by brace-balanced scanning and return the
/// byte range covering `start_token` through the matching closing brace
/// (plus a trailing semicolon when present).
///
/// The depth counter counts every `{`/`}` literally, including those inside
/// string literals. That can mis-detect the boundary when the block embeds
/// braces in strings; the generated config modules never do, so the simpler
/// scan is kept.
pub fn balanced_block_range(content: &str, start_token: &str) -> Option<(usize, usize)> {
    let start = content.find(start_token)?;
    let mut depth = 0usize;
    let mut entered = false;
    for (offset, ch) in content[start..].char_indices() {
        match ch {
            '{' => {
                depth += 1;
                entered = true;
            }
            '}' => {
                depth = depth.checked_sub(1)?;
                if entered && depth == 0 {
                    let mut end = start + offset + ch.len_utf8();
                    if content[end..].starts_with(';') {
                        end += 1;
                    }
                    return Some((start, end));
                }
            }
            _ => {}
        }
    }
    None
}

const SITE_CONFIG_TOKEN: &str = "export const siteConfig: SiteConfig = {";

/// Replace the `siteConfig` block of an seo-config module with a freshly
/// rendered equivalent, leaving every other byte untouched. Returns `None`
/// (caller warns and skips) when the block cannot be located.
pub fn patch_site_config(content: &str, document: &Value) -> Option<String> {
    let (start, end) = balanced_block_range(content, SITE_CONFIG_TOKEN)?;
    let website_url = get_str(document, "WEBSITE_URL", "https://example.com");
    // Wide raw-string delimiter: the block body contains `"#` sequences.
    let block = format!(
        r##"export const siteConfig: SiteConfig = {{
  name: BUSINESS_INFO.name,
  url: BUSINESS_INFO.websiteUrl || (process.env.NODE_ENV === 'development' ? 'http://localhost:3000' : '{website_url}'),
  description: `Expert ${{BUSINESS_INFO.primaryKeyword.toLowerCase()}} in ${{CONTACT.city}}, ${{CONTACT.state}}. Quality solutions and customer satisfaction guaranteed. ${{BUSINESS_INFO.ctaText}}`,
  logo: BUSINESS_INFO.logoUrl || "/assets/config/logo.png",
  favicon: "/assets/config/favicon.ico",
  themeColor: "#3B82F6",
  author: BUSINESS_INFO.name,
  copyright: getCopyright(),
  social: {{
    facebook: SOCIAL_MEDIA.facebook,
    twitter: SOCIAL_MEDIA.twitter,
    twitterHandle: SOCIAL_MEDIA.twitter?.split('/').pop(),
    instagram: SOCIAL_MEDIA.instagram,
    linkedin: SOCIAL_MEDIA.linkedin,
    pinterest: SOCIAL_MEDIA.pinterest,
    yelp: SOCIAL_MEDIA.yelp,
    nextdoor: SOCIAL_MEDIA.nextdoor
  }},
  contact: {{
    phone: CONTACT.phone,
    email: CONTACT.email,
    address: CONTACT.street,
    city: CONTACT.city,
    state: CONTACT.state,
    zipCode: CONTACT.zip,
    country: "USA"
  }},
  businessHours: BUSINESS_HOURS_SCHEMA,
  services: CORE_SERVICE_NAMES,
  coordinates: {{
    latitude: GOOGLE_MAPS.latitude,
    longitude: GOOGLE_MAPS.longitude
  }}
}};"##
    );
    let mut patched = String::with_capacity(content.len());
    patched.push_str(&content[..start]);
    patched.push_str(&block);
    patched.push_str(&content[end..]);
    Some(patched)
}

/// Render the `lib/business-config.ts` module: typed interfaces, one export
/// per document section, and the fixed derived-accessor tail.
pub fn business_config_ts(document: &Value) -> String {
    let business_name = get_str(document, "BUSINESS_NAME", "Our Company");
    let website_url = get_str(document, "WEBSITE_URL", "https://example.com");
    let logo_url = get_str(document, "LOGO_URL", &format!("{website_url}/logo.png"));
    let tagline = get_str(document, "TAGLINE", "Your Trusted Service Provider");
    let primary_keyword = get_str(document, "PRIMARY_KEYWORD", "Services");
    let cta_text = get_str(document, "CTA_TEXT", "Contact us today!");
    let tone = get_str(document, "TONE", "Professional");

    let primary_category = resolve(document, "CATEGORIES.PRIMARY")
        .map(scalar_string)
        .unwrap_or_else(|| "Service Business".to_string());
    let secondary = resolve(document, "CATEGORIES.SECONDARY")
        .and_then(Value::as_sequence)
        .map(|cats| {
            cats.iter()
                .map(|c| format!("\"{}\"", scalar_string(c)))
                .collect::<Vec<_>>()
                .join(",\n    ")
        })
        .unwrap_or_default();

    let services_ts = format_services(document);
    let locations_ts = format_locations(document);
    let social_media_ts = format_social_media(document);
    let blog_topics = get(document, "BLOG_TOPICS")
        .and_then(Value::as_sequence)
        .map(|topics| {
            topics
                .iter()
                .map(|t| format!("\"{}\"", scalar_string(t)))
                .collect::<Vec<_>>()
                .join(",\n  ")
        })
        .unwrap_or_default();

    let contact_field = |key: &str, default: &str| {
        resolve(document, &format!("CONTACT.{key}"))
            .map(scalar_string)
            .unwrap_or_else(|| default.to_string())
    };
    let hours_field = |key: &str, default: &str| {
        resolve(document, &format!("HOURS.{key}"))
            .map(scalar_string)
            .unwrap_or_else(|| default.to_string())
    };
    let maps_field = |key: &str, default: &str| {
        resolve(document, &format!("GOOGLE_MAPS.{key}"))
            .map(scalar_string)
            .unwrap_or_else(|| default.to_string())
    };
    let meta_field = |key: &str| {
        resolve(document, &format!("META.{key}"))
            .map(scalar_string)
            .unwrap_or_default()
    };

    let mut ts = String::from(TS_HEADER);

    ts.push_str(&format!(
        r#"// ==========================================
// BUSINESS INFORMATION
// ==========================================
export const BUSINESS_INFO = {{
  name: "{business_name}",
  websiteUrl: "{website_url}",
  tone: "{tone}",
  logoUrl: "{logo_url}",
  tagline: "{tagline}",
  primaryKeyword: "{primary_keyword}",
  ctaText: "{cta_text}",
}} as const;

// ==========================================
// BUSINESS CATEGORIES
// ==========================================
export const BUSINESS_CATEGORIES = {{
  primary: "{primary_category}",
  secondary: [
    {secondary}
  ],
}} as const;

// ==========================================
// CORE SERVICES
// ==========================================
export const CORE_SERVICES: ServiceItem[] = [
{services_ts}
];

// Flattened arrays for quick access
export const CORE_SERVICE_NAMES = CORE_SERVICES.map(s => s.name);
export const CORE_SERVICE_URLS = CORE_SERVICES.map(s => s.url);

// All services including sub-services
export const ALL_SERVICES = CORE_SERVICES.flatMap(service => [
  {{ name: service.name, url: service.url }},
  ...(service.subServices || []),
]);

// ==========================================
// SERVICE AREAS / LOCATIONS
// ==========================================
export const LOCATIONS: Location[] = [
{locations_ts}
];

// Helper to get top locations (first 4)
export const TOP_LOCATIONS = LOCATIONS.slice(0, 4);

// Helper to format location string
export const formatLocation = (location: Location): string =>
  `${{location.city}}, ${{location.state}}`;

// ==========================================
// CONTACT INFORMATION
// ==========================================
export const CONTACT: ContactInfo = {{
  address: "{address}",
  street: "{street}",
  city: "{city}",
  state: "{state}",
  zip: "{zip}",
  areaCode: "{area_code}",
  phone: "{phone}",
  email: "{email}",
  addressVisibility: "{address_visibility}",
}};

// ==========================================
// BUSINESS HOURS
// ==========================================
export const BUSINESS_HOURS: BusinessHours = {{
  monday: "{monday}",
  tuesday: "{tuesday}",
  wednesday: "{wednesday}",
  thursday: "{thursday}",
  friday: "{friday}",
  saturday: "{saturday}",
  sunday: "{sunday}",
}};

// Helper to format business hours for schema
export const BUSINESS_HOURS_SCHEMA = "{hours_schema}";

// ==========================================
// GOOGLE MAPS
// ==========================================
export const GOOGLE_MAPS: GoogleMaps = {{
  shortLink: "{maps_short}",
  fullUrl: "{maps_full}",
  embedCode: `{maps_embed}`,
  latitude: "{maps_lat}",
  longitude: "{maps_lng}",
}};

// ==========================================
// SOCIAL MEDIA
// ==========================================
export const SOCIAL_MEDIA: SocialMedia = {{
{social_media_ts}
}};

// Filter out undefined social media links
export const ACTIVE_SOCIAL_MEDIA = Object.entries(SOCIAL_MEDIA)
  .filter(([_, url]) => url)
  .reduce((acc, [key, url]) => ({{ ...acc, [key]: url }}), {{}}) as SocialMedia;

// ==========================================
// BLOG TOPICS
// ==========================================
export const BLOG_TOPICS = [
  {blog_topics}
] as const;

// ==========================================
// META INFORMATION
// ==========================================
export const META = {{
  title: "{meta_title}",
  description: "{meta_description}",
  keywords: "{meta_keywords}",
}} as const;

"#,
        address = contact_field("ADDRESS", ""),
        street = contact_field("STREET", ""),
        city = contact_field("CITY", ""),
        state = contact_field("STATE", ""),
        zip = contact_field("ZIP", ""),
        area_code = contact_field("AREA_CODE", ""),
        phone = contact_field("PHONE", ""),
        email = contact_field("EMAIL", ""),
        address_visibility = contact_field("ADDRESS_VISIBILITY", "HIDDEN"),
        monday = hours_field("MONDAY", "08:00 - 17:00"),
        tuesday = hours_field("TUESDAY", "08:00 - 17:00"),
        wednesday = hours_field("WEDNESDAY", "08:00 - 17:00"),
        thursday = hours_field("THURSDAY", "08:00 - 17:00"),
        friday = hours_field("FRIDAY", "08:00 - 17:00"),
        saturday = hours_field("SATURDAY", "08:00 - 17:00"),
        sunday = hours_field("SUNDAY", "Closed"),
        hours_schema = get_str(document, "BUSINESS_HOURS_SCHEMA", "Mo-Fr 09:00-17:00"),
        maps_short = maps_field("SHORT_LINK", ""),
        maps_full = maps_field("FULL_URL", ""),
        maps_embed = maps_field("EMBED_CODE", ""),
        maps_lat = maps_field("LATITUDE", "0"),
        maps_lng = maps_field("LONGITUDE", "0"),
        meta_title = meta_field("title"),
        meta_description = meta_field("description"),
        meta_keywords = meta_field("keywords"),
    ));

    ts.push_str(TS_HELPERS);
    ts
}

fn format_services(document: &Value) -> String {
    let services = get(document, "SERVICES")
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();
    let entries: Vec<String> = services
        .iter()
        .filter_map(|service| {
            let record = service.as_mapping()?;
            let name = record.get(Value::from("NAME")).map(scalar_string).unwrap_or_default();
            let url = record.get(Value::from("URL")).map(scalar_string).unwrap_or_default();
            let subs = record
                .get(Value::from("SUB_SERVICES"))
                .and_then(Value::as_sequence)
                .map(|subs| {
                    subs.iter()
                        .filter_map(|sub| {
                            let sub = sub.as_mapping()?;
                            let name = sub.get(Value::from("NAME")).map(scalar_string)?;
                            let url = sub.get(Value::from("URL")).map(scalar_string).unwrap_or_default();
                            Some(format!("      {{ name: \"{name}\", url: \"{url}\" }}"))
                        })
                        .collect::<Vec<_>>()
                })
                .filter(|subs| !subs.is_empty());
            let sub_block = match subs {
                Some(items) => format!(",\n    subServices: [\n{}\n    ]", items.join(",\n")),
                None => String::new(),
            };
            Some(format!(
                "  {{\n    name: \"{name}\",\n    url: \"{url}\"{sub_block},\n  }}"
            ))
        })
        .collect();
    entries.join(",\n")
}

fn format_locations(document: &Value) -> String {
    let locations = get(document, "LOCATIONS")
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();
    let entries: Vec<String> = locations
        .iter()
        .filter_map(|location| {
            let record = location.as_mapping()?;
            let city = record.get(Value::from("CITY")).map(scalar_string).unwrap_or_default();
            let state = record.get(Value::from("STATE")).map(scalar_string).unwrap_or_default();
            let url = record
                .get(Value::from("URL"))
                .map(scalar_string)
                .unwrap_or_else(|| {
                    format!("/{}-{}/", city.to_lowercase().replace(' ', "-"), state.to_lowercase())
                });
            Some(format!(
                "  {{ city: \"{city}\", state: \"{state}\", url: \"{url}\" }}"
            ))
        })
        .collect();
    entries.join(",\n")
}

fn format_social_media(document: &Value) -> String {
    let Some(social) = get(document, "SOCIAL_MEDIA").and_then(Value::as_mapping) else {
        return String::new();
    };
    let entries: Vec<String> = social
        .iter()
        .filter_map(|(platform, data)| {
            let url = match data {
                Value::Mapping(m) => m.get(Value::from("URL")).map(scalar_string)?,
                Value::String(s) => s.clone(),
                _ => return None,
            };
            if url.is_empty() {
                return None;
            }
            Some(format!("  {}: \"{url}\"", scalar_string(platform).to_lowercase()))
        })
        .collect();
    entries.join(",\n")
}

const TS_HEADER: &str = r#"/**
 * Business Configuration - Single Source of Truth
 * This file is AUTO-GENERATED from business.yaml
 * Run `bizgen generate` to regenerate
 * DO NOT EDIT THIS FILE DIRECTLY - Edit business.yaml instead
 */

export interface ServiceItem {
  name: string;
  url: string;
  description?: string;
  subServices?: ServiceItem[];
}

export interface Location {
  city: string;
  state: string;
  url?: string;
}

export interface ContactInfo {
  address: string;
  street: string;
  city: string;
  state: string;
  zip: string;
  areaCode: string;
  phone: string;
  email: string;
  addressVisibility: 'HIDDEN' | 'VISIBLE';
}

export interface SocialMedia {
  facebook?: string;
  twitter?: string;
  linkedin?: string;
  pinterest?: string;
  nextdoor?: string;
  yelp?: string;
  instagram?: string;
  youtube?: string;
}

export interface GoogleMaps {
  shortLink: string;
  fullUrl: string;
  embedCode: string;
  latitude: string;
  longitude: string;
}

export interface BusinessHours {
  monday: string;
  tuesday: string;
  wednesday: string;
  thursday: string;
  friday: string;
  saturday: string;
  sunday: string;
}

"#;

const TS_HELPERS: &str = r#"// ==========================================
// HELPER FUNCTIONS
// ==========================================

/**
 * Get services formatted for navigation/footer
 */
export const getServicesForNavigation = () => {
  return CORE_SERVICES.map(service => ({
    name: service.name,
    href: service.url,
  }));
};

/**
 * Get locations formatted for navigation/footer
 */
export const getLocationsForNavigation = (limit?: number) => {
  const locs = limit ? LOCATIONS.slice(0, limit) : LOCATIONS;
  return locs.map(location => ({
    name: formatLocation(location),
    href: location.url || `/${location.city.toLowerCase().replace(/\s+/g, '-')}-${location.state.toLowerCase()}/`,
  }));
};

/**
 * Get company links for footer/navigation
 */
export const getCompanyLinks = () => [
  { name: "About Us", href: "/about-us/" },
  { name: "Blog", href: "/blog/" },
  { name: "Contact", href: "/contact/" },
  { name: "Portfolio", href: "/portfolio/" },
  { name: "Service Areas", href: "/service-areas/" },
];

/**
 * Get legal links for footer
 */
export const getLegalLinks = () => [
  { name: "Privacy Policy", href: "/privacy-policy/" },
  { name: "Terms of Service", href: "/terms-of-service/" },
];

/**
 * Format phone number for display (555-123-4567)
 */
export const formatPhoneDisplay = (phone: string): string => {
  const digits = phone.replace(/\D/g, '');
  if (digits.length === 10) {
    return `${digits.slice(0, 3)}-${digits.slice(3, 6)}-${digits.slice(6)}`;
  }
  if (digits.length === 11 && digits.startsWith('1')) {
    const withoutCountryCode = digits.slice(1);
    return `${withoutCountryCode.slice(0, 3)}-${withoutCountryCode.slice(3, 6)}-${withoutCountryCode.slice(6)}`;
  }
  return phone;
};

/**
 * Format phone number for tel: links (+15551234567)
 */
export const formatPhoneTel = (phone: string): string => {
  const digits = phone.replace(/\D/g, '');
  if (digits.length === 10) {
    return `+1${digits}`;
  }
  if (digits.length === 11 && digits.startsWith('1')) {
    return `+${digits}`;
  }
  if (phone.startsWith('+')) {
    return phone;
  }
  return `+1${digits}`;
};

export const getPhoneDisplay = (): string => formatPhoneDisplay(CONTACT.phone);
export const getPhoneTel = (): string => formatPhoneTel(CONTACT.phone);
export const getEmail = (): string => CONTACT.email;
export const getBusinessHours = (): BusinessHours => BUSINESS_HOURS;
export const getBusinessHoursForDay = (day: keyof BusinessHours): string => BUSINESS_HOURS[day];
export const getSocialLinks = (): SocialMedia => ACTIVE_SOCIAL_MEDIA;
export const getSocialLink = (platform: keyof SocialMedia): string | undefined => ACTIVE_SOCIAL_MEDIA[platform];
export const getAddress = (): string => CONTACT.address;
export const getCityState = (): string => `${CONTACT.city}, ${CONTACT.state}`;
export const getGoogleMapsLink = (): string => GOOGLE_MAPS.shortLink;
export const getGoogleMapsUrl = (): string => GOOGLE_MAPS.fullUrl;
export const getBusinessName = (): string => BUSINESS_INFO.name;
export const getTagline = (): string => BUSINESS_INFO.tagline;
export const getPrimaryKeyword = (): string => BUSINESS_INFO.primaryKeyword;
export const getWebsiteUrl = (): string => BUSINESS_INFO.websiteUrl;
export const getTopLocations = (count: number = 4): Location[] => LOCATIONS.slice(0, count);
export const getLocationsString = (limit?: number): string => {
  const locs = limit ? LOCATIONS.slice(0, limit) : LOCATIONS;
  return locs.map(loc => formatLocation(loc)).join(', ');
};
export const getPrimaryLocation = (): Location => LOCATIONS[0];
export const getServiceByName = (serviceName: string): ServiceItem | undefined => {
  return CORE_SERVICES.find(service => service.name === serviceName);
};
export const getServiceByUrl = (url: string): ServiceItem | undefined => {
  return CORE_SERVICES.find(service => service.url === url);
};
export const getSubServices = (serviceName: string): ServiceItem[] => {
  const service = getServiceByName(serviceName);
  return service?.subServices || [];
};
export const servesLocation = (city: string, state?: string): boolean => {
  if (state) {
    return LOCATIONS.some(loc =>
      loc.city.toLowerCase() === city.toLowerCase() &&
      loc.state.toLowerCase() === state.toLowerCase()
    );
  }
  return LOCATIONS.some(loc => loc.city.toLowerCase() === city.toLowerCase());
};
export const getMetaInfo = () => ({
  title: META.title,
  description: META.description,
  keywords: META.keywords,
});
export const getBlogTopics = (): readonly string[] => BLOG_TOPICS;
export const getCopyright = (): string => `© ${new Date().getFullYear()} ${BUSINESS_INFO.name}. All rights reserved.`;
export const getBusinessCategories = () => BUSINESS_CATEGORIES;
export const getBusinessDescription = (): string => {
  return `${BUSINESS_INFO.primaryKeyword} professionals delivering quality solutions and exceptional service.`;
};
export const getContactInfo = () => ({
  phone: getPhoneDisplay(),
  email: getEmail(),
  address: getAddress(),
});
export const getSocialLinksFormatted = () => {
  return Object.entries(ACTIVE_SOCIAL_MEDIA).map(([key, href]) => ({
    name: key.charAt(0).toUpperCase() + key.slice(1),
    href: href as string,
    key: key as keyof SocialMedia,
  }));
};
export const getDefaultAddresses = () => [
  {
    location: getCityState(),
    address: getAddress(),
  }
];
export const getDefaultMapLocation = () => ({
  id: "main-location",
  name: getCityState(),
  address: getAddress(),
  mapEmbed: GOOGLE_MAPS.embedCode.match(/src="([^"]*)"/)?.[1] || "",
  mapTitle: `${getBusinessName()} ${getCityState()} Location`,
  isMain: true as const,
});
"#;
