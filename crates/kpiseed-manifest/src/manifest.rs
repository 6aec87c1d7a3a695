//! The loaded manifest and its source map.

use kpiseed_core::record::{ObjectRecord, RelationshipRecord};

use crate::{error::Diagnostic, span::Span};

/// Source locations of one `[[object]]` table.
#[derive(Debug, Clone, Default)]
pub struct ObjectSpans {
    alias: Span,
    class: Span,
    attributes: Vec<Span>,
}

impl ObjectSpans {
    pub(crate) fn new(alias: Span, class: Span, attributes: Vec<Span>) -> Self {
        Self {
            alias,
            class,
            attributes,
        }
    }

    pub fn alias(&self) -> Span {
        self.alias
    }

    pub fn class(&self) -> Span {
        self.class
    }

    /// Span of the name of the attribute at `index`, in declaration order.
    pub fn attribute(&self, index: usize) -> Option<Span> {
        self.attributes.get(index).copied()
    }
}

/// Source locations of one `[[relationship]]` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipSpans {
    source: Span,
    target: Span,
}

impl RelationshipSpans {
    pub(crate) fn new(source: Span, target: Span) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> Span {
        self.source
    }

    pub fn target(&self) -> Span {
        self.target
    }
}

/// Maps record indices back to the manifest text they were loaded from.
///
/// Manifests built from in-memory records have an empty source map, and
/// every lookup returns `None`.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    objects: Vec<ObjectSpans>,
    relationships: Vec<RelationshipSpans>,
}

impl SourceMap {
    pub(crate) fn new(objects: Vec<ObjectSpans>, relationships: Vec<RelationshipSpans>) -> Self {
        Self {
            objects,
            relationships,
        }
    }

    /// Spans of the object at `index` in [`Manifest::objects`].
    pub fn object(&self, index: usize) -> Option<&ObjectSpans> {
        self.objects.get(index)
    }

    /// Spans of the relationship at `index` in [`Manifest::relationships`].
    pub fn relationship(&self, index: usize) -> Option<RelationshipSpans> {
        self.relationships.get(index).copied()
    }

    /// Returns `true` if the map carries no locations at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.relationships.is_empty()
    }
}

/// A validated object diagram: records plus where they came from.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    objects: Vec<ObjectRecord>,
    relationships: Vec<RelationshipRecord>,
    source_map: SourceMap,
    warnings: Vec<Diagnostic>,
}

impl Manifest {
    /// Creates a manifest from in-memory records without source locations.
    pub fn from_records(objects: Vec<ObjectRecord>, relationships: Vec<RelationshipRecord>) -> Self {
        Self {
            objects,
            relationships,
            source_map: SourceMap::default(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn new(
        objects: Vec<ObjectRecord>,
        relationships: Vec<RelationshipRecord>,
        source_map: SourceMap,
        warnings: Vec<Diagnostic>,
    ) -> Self {
        Self {
            objects,
            relationships,
            source_map,
            warnings,
        }
    }

    /// Declared objects, in declaration order.
    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    /// Declared relationships, in declaration order.
    pub fn relationships(&self) -> &[RelationshipRecord] {
        &self.relationships
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Non-fatal diagnostics reported while loading.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Consumes the manifest, returning its records.
    pub fn into_parts(self) -> (Vec<ObjectRecord>, Vec<RelationshipRecord>) {
        (self.objects, self.relationships)
    }
}
