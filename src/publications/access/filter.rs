use super::super::catalog::ListTypeRegistry;
use super::super::domain::{Artefact, Viewer};
use super::policy::can_view_publication;

/// Retains the artefacts the viewer may browse on public-facing surfaces.
///
/// Each artefact's list type is resolved through the registry; an artefact
/// whose list type cannot be resolved is excluded for every viewer. Input
/// order is preserved and nothing is mutated.
pub fn filter_accessible<'a>(
    viewer: Option<&Viewer>,
    artefacts: &'a [Artefact],
    list_types: &ListTypeRegistry,
) -> Vec<&'a Artefact> {
    artefacts
        .iter()
        .filter(|artefact| {
            list_types
                .resolve(&artefact.list_type_id)
                .map_or(false, |list_type| {
                    can_view_publication(viewer, artefact, Some(list_type))
                })
        })
        .collect()
}
