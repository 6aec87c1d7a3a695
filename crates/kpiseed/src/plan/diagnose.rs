//! Conversion of planning errors into located diagnostics.

use kpiseed_core::identifier::Id;
use kpiseed_manifest::{Manifest, error::Diagnostic};

use super::{
    error::{Endpoint, PlanError},
    sort::CycleError,
};

/// Builds a [`Diagnostic`] for `err`, labelling the manifest entries involved.
///
/// `manifest` must be the one the failed plan was built from. When it has no
/// source locations (for example one built with
/// [`Manifest::from_records`]) the diagnostic carries no labels.
pub fn diagnose(err: &PlanError, manifest: &Manifest) -> Diagnostic {
    let map = manifest.source_map();
    let mut diag = Diagnostic::error(err.to_string()).with_code(err.code());

    match err {
        PlanError::DuplicateAlias {
            first, duplicate, ..
        } => {
            if let Some(spans) = map.object(*duplicate) {
                diag = diag.with_label(spans.alias(), "declared again here");
            }
            if let Some(spans) = map.object(*first) {
                diag = diag.with_secondary_label(spans.alias(), "first declared here");
            }
            diag.with_help("rename one of the objects; relationships refer to objects by alias")
        }
        PlanError::UnresolvedReference {
            relationship,
            endpoint,
            ..
        } => {
            if let Some(spans) = map.relationship(*relationship) {
                let span = match endpoint {
                    Endpoint::Source => spans.source(),
                    Endpoint::Target => spans.target(),
                };
                diag = diag.with_label(span, "not declared by any object");
            }
            diag.with_help("declare an `[[object]]` with this alias or fix the reference")
        }
        PlanError::DuplicateAttribute {
            object,
            first,
            duplicate,
            ..
        } => {
            if let Some(spans) = map.object(*object) {
                if let Some(span) = spans.attribute(*duplicate) {
                    diag = diag.with_label(span, "assigned again here");
                }
                if let Some(span) = spans.attribute(*first) {
                    diag = diag.with_secondary_label(span, "first assigned here");
                }
            }
            diag.with_help(
                "remove one of the assignments, or set `plan.duplicate_attributes = \"last_wins\"`",
            )
        }
        PlanError::CycleDetected(cycle) => label_cycle(diag, cycle, manifest)
            .with_help("break the cycle by removing one of the listed relationships"),
    }
}

/// Labels the first relationship declaring each step of the cycle.
fn label_cycle(diag: Diagnostic, err: &CycleError, manifest: &Manifest) -> Diagnostic {
    let cycle = err.cycle();
    let map = manifest.source_map();

    let steps = cycle.iter().enumerate().filter_map(|(step, &source)| {
        let target = cycle[(step + 1) % cycle.len()];
        let spans = find_relationship(manifest, source, target)
            .and_then(|index| map.relationship(index))?;
        Some((
            spans.source().union(spans.target()),
            format!("`{source}` depends on `{target}`"),
        ))
    });
    diag.with_label_chain(steps)
}

fn find_relationship(manifest: &Manifest, source: Id, target: Id) -> Option<usize> {
    manifest
        .relationships()
        .iter()
        .position(|rel| rel.source() == source && rel.target() == target)
}

#[cfg(test)]
mod tests {
    use kpiseed_core::record::{ObjectRecord, RelationshipRecord};
    use kpiseed_manifest::{error::ErrorCode, load};

    use super::*;
    use crate::plan::{AttributePolicy, PlanOptions, materialize};

    fn plan_error(manifest: &Manifest) -> PlanError {
        materialize(
            manifest.objects(),
            manifest.relationships(),
            &PlanOptions::default(),
        )
        .unwrap_err()
    }

    fn text<'a>(source: &'a str, diag: &Diagnostic, label: usize) -> &'a str {
        let span = diag.labels()[label].span();
        &source[span.start()..span.end()]
    }

    #[test]
    fn test_duplicate_alias_points_at_both_declarations() {
        let source = r#"
[[object]]
alias = "sofia"
class = "City"

[[object]]
alias = "sofia"
class = "Town"
"#;
        let manifest = load(source).unwrap();
        let diag = diagnose(&plan_error(&manifest), &manifest);

        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[0].span().start() > diag.labels()[1].span().start());
        assert!(text(source, &diag, 1).contains("sofia"));
    }

    #[test]
    fn test_unresolved_reference_points_at_endpoint() {
        let source = r#"
[[object]]
alias = "kpi"
class = "KPI"

[[relationship]]
source = "kpi"
target = "ghostCity"
"#;
        let manifest = load(source).unwrap();
        let diag = diagnose(&plan_error(&manifest), &manifest);

        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 1);
        assert!(text(source, &diag, 0).contains("ghostCity"));
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_cycle_labels_each_step() {
        let source = r#"
[[object]]
alias = "a"
class = "Node"

[[object]]
alias = "b"
class = "Node"

[[relationship]]
source = "a"
target = "b"

[[relationship]]
source = "b"
target = "a"
"#;
        let manifest = load(source).unwrap();
        let diag = diagnose(&plan_error(&manifest), &manifest);

        assert_eq!(diag.code(), Some(ErrorCode::E300));
        assert_eq!(diag.labels().len(), 2);
        assert_eq!(
            diag.labels().iter().filter(|label| label.is_primary()).count(),
            1
        );
    }

    #[test]
    fn test_duplicate_attribute_labels() {
        let source = r#"
[[object]]
alias = "kpi"
class = "KPI"
attributes = [
    { name = "unitText", value = "Kg" },
    { name = "unitText", value = "Tons" },
]
"#;
        let manifest = load(source).unwrap();
        let err = materialize(
            manifest.objects(),
            manifest.relationships(),
            &PlanOptions::new().with_duplicate_attributes(AttributePolicy::Reject),
        )
        .unwrap_err();
        let diag = diagnose(&err, &manifest);

        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.labels().len(), 2);
        assert!(text(source, &diag, 0).contains("unitText"));
    }

    #[test]
    fn test_records_without_spans_have_no_labels() {
        let manifest = Manifest::from_records(
            vec![ObjectRecord::new("loop", "Node")],
            vec![RelationshipRecord::new("loop", "loop")],
        );
        let diag = diagnose(&plan_error(&manifest), &manifest);

        assert_eq!(diag.code(), Some(ErrorCode::E300));
        assert!(diag.labels().is_empty());
        assert!(diag.message().contains("loop -> loop"));
    }
}
