//! TOML manifest loading.
//!
//! The manifest layout is two arrays of tables:
//!
//! ```toml
//! [[object]]
//! alias = "differdange"
//! class = "City"
//! attributes = [{ name = "name", value = "Differdange" }]
//!
//! [[relationship]]
//! source = "kpiTemp_Differdange"
//! target = "differdange"
//! ```
//!
//! Deserialization keeps the byte span of every alias, class, attribute name
//! and relationship endpoint so later phases can point at the exact text.

use std::collections::HashSet;

use log::{debug, trace};
use serde::Deserialize;
use toml::Spanned;

use kpiseed_core::{
    identifier::Id,
    record::{Attribute, Literal, ObjectRecord, RelationshipRecord},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ManifestError},
    manifest::{Manifest, ObjectSpans, RelationshipSpans, SourceMap},
    span::Span,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default, rename = "object")]
    objects: Vec<RawObject>,
    #[serde(default, rename = "relationship")]
    relationships: Vec<RawRelationship>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawObject {
    alias: Spanned<String>,
    class: Spanned<String>,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttribute {
    name: Spanned<String>,
    value: Literal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRelationship {
    source: Spanned<String>,
    target: Spanned<String>,
}

fn span_of<T>(value: &Spanned<T>) -> Span {
    Span::new(value.span())
}

fn is_blank(value: &Spanned<String>) -> bool {
    value.get_ref().trim().is_empty()
}

/// Load a manifest from TOML source text.
///
/// # Errors
///
/// Returns a [`ManifestError`] carrying:
/// - a single `E001` diagnostic if the text is not valid TOML or does not
///   follow the manifest layout;
/// - one diagnostic per blank alias (`E100`), class (`E101`), attribute
///   name (`E102`) or relationship endpoint (`E103`) otherwise.
///
/// Duplicate aliases and unresolved references are not checked here; they
/// are ordering concerns reported by the planner.
pub fn load(source: &str) -> Result<Manifest, ManifestError> {
    let document: RawDocument = toml::from_str(source).map_err(|err| invalid_manifest(&err))?;
    debug!(
        objects = document.objects.len(),
        relationships = document.relationships.len();
        "Manifest deserialized"
    );

    let mut collector = DiagnosticCollector::new();
    check_objects(&document.objects, &mut collector);
    check_relationships(&document.relationships, &mut collector);
    let warnings = collector.finish()?;

    let mut objects = Vec::with_capacity(document.objects.len());
    let mut object_spans = Vec::with_capacity(document.objects.len());
    for raw in document.objects {
        object_spans.push(ObjectSpans::new(
            span_of(&raw.alias),
            span_of(&raw.class),
            raw.attributes.iter().map(|attr| span_of(&attr.name)).collect(),
        ));
        let attributes = raw
            .attributes
            .into_iter()
            .map(|attr| Attribute::new(attr.name.into_inner(), attr.value))
            .collect();
        objects.push(
            ObjectRecord::new(Id::new(raw.alias.get_ref()), Id::new(raw.class.get_ref()))
                .with_attributes(attributes),
        );
    }

    let mut relationships = Vec::with_capacity(document.relationships.len());
    let mut relationship_spans = Vec::with_capacity(document.relationships.len());
    for raw in &document.relationships {
        relationship_spans.push(RelationshipSpans::new(
            span_of(&raw.source),
            span_of(&raw.target),
        ));
        relationships.push(RelationshipRecord::new(
            Id::new(raw.source.get_ref()),
            Id::new(raw.target.get_ref()),
        ));
    }

    let manifest = Manifest::new(
        objects,
        relationships,
        SourceMap::new(object_spans, relationship_spans),
        warnings,
    );
    trace!(manifest:?; "Loaded manifest");
    Ok(manifest)
}

fn invalid_manifest(err: &toml::de::Error) -> ManifestError {
    let mut diag = Diagnostic::error(err.message().trim().to_string())
        .with_code(ErrorCode::E001)
        .with_help(
            "a manifest holds `[[object]]` tables (`alias`, `class`, `attributes`) \
             and `[[relationship]]` tables (`source`, `target`)",
        );
    if let Some(range) = err.span() {
        diag = diag.with_label(Span::new(range), "invalid here");
    }
    diag.into()
}

fn check_objects(objects: &[RawObject], collector: &mut DiagnosticCollector) {
    for object in objects {
        if is_blank(&object.alias) {
            collector.emit(
                Diagnostic::error("object alias is blank")
                    .with_code(ErrorCode::E100)
                    .with_label(span_of(&object.alias), "blank alias")
                    .with_help("relationships refer to objects by alias; give it a name"),
            );
        }
        if is_blank(&object.class) {
            collector.emit(
                Diagnostic::error(format!(
                    "object `{}` has a blank class name",
                    object.alias.get_ref()
                ))
                .with_code(ErrorCode::E101)
                .with_label(span_of(&object.class), "blank class name"),
            );
        }
        for attribute in &object.attributes {
            if is_blank(&attribute.name) {
                collector.emit(
                    Diagnostic::error(format!(
                        "object `{}` has an attribute with a blank name",
                        object.alias.get_ref()
                    ))
                    .with_code(ErrorCode::E102)
                    .with_label(span_of(&attribute.name), "blank attribute name"),
                );
            }
        }
    }
}

fn check_relationships(relationships: &[RawRelationship], collector: &mut DiagnosticCollector) {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for relationship in relationships {
        let mut blank = false;
        for endpoint in [&relationship.source, &relationship.target] {
            if is_blank(endpoint) {
                blank = true;
                collector.emit(
                    Diagnostic::error("relationship endpoint is blank")
                        .with_code(ErrorCode::E103)
                        .with_label(span_of(endpoint), "blank alias"),
                );
            }
        }
        if blank {
            continue;
        }

        let key = (
            relationship.source.get_ref().as_str(),
            relationship.target.get_ref().as_str(),
        );
        if !seen.insert(key) {
            collector.emit(
                Diagnostic::warning(format!(
                    "relationship `{} -> {}` is declared more than once",
                    key.0, key.1
                ))
                .with_label(
                    span_of(&relationship.source).union(span_of(&relationship.target)),
                    "repeated here",
                ),
            );
        }
    }
}
