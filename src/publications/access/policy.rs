use super::super::domain::{Artefact, ListType, Sensitivity, Viewer, ViewerRole};

/// Decides whether a viewer may know the artefact exists and see its
/// descriptive metadata (title, dates, court), on any surface.
///
/// This is deliberately more permissive than the data decisions: internal
/// admin roles may always see that a private or classified list exists, and
/// provenance plays no part at this level.
pub fn can_view_metadata(viewer: Option<&Viewer>, artefact: &Artefact) -> bool {
    match artefact.sensitivity {
        Sensitivity::Public => true,
        Sensitivity::Private | Sensitivity::Classified => viewer.map_or(false, |viewer| {
            matches!(
                viewer.role,
                ViewerRole::SystemAdmin
                    | ViewerRole::CourtAdmin
                    | ViewerRole::RegionalAdmin
                    | ViewerRole::Verified
            )
        }),
    }
}

/// Decides whether the rendered list body may be shown on admin-facing
/// surfaces.
///
/// Internal admin roles never see non-public body content; they are limited
/// to metadata. Classified bodies additionally require the viewer's
/// provenance to match the list type's, and deny outright when no list type
/// is supplied.
pub fn can_view_data(
    viewer: Option<&Viewer>,
    artefact: &Artefact,
    list_type: Option<&ListType>,
) -> bool {
    match artefact.sensitivity {
        Sensitivity::Public => true,
        Sensitivity::Private => viewer.map_or(false, |viewer| {
            matches!(viewer.role, ViewerRole::SystemAdmin | ViewerRole::Verified)
        }),
        Sensitivity::Classified => grants_classified(viewer, list_type),
    }
}

/// Decides whether the publication is visible on public-facing pages.
///
/// An internal-admin account browsing the public site gets no
/// citizen-equivalent access: private and classified lists stay hidden from
/// it here even though the same account may see their metadata in admin
/// tooling.
pub fn can_view_publication(
    viewer: Option<&Viewer>,
    artefact: &Artefact,
    list_type: Option<&ListType>,
) -> bool {
    match artefact.sensitivity {
        Sensitivity::Public => true,
        Sensitivity::Private => viewer.map_or(false, |viewer| {
            matches!(viewer.role, ViewerRole::SystemAdmin | ViewerRole::Verified)
        }),
        Sensitivity::Classified => grants_classified(viewer, list_type),
    }
}

fn grants_classified(viewer: Option<&Viewer>, list_type: Option<&ListType>) -> bool {
    // No list type means no provenance to match against; deny for everyone.
    let list_type = match list_type {
        Some(list_type) => list_type,
        None => return false,
    };

    match viewer {
        Some(viewer) => match viewer.role {
            ViewerRole::SystemAdmin => true,
            ViewerRole::Verified => viewer.provenance == list_type.provenance,
            _ => false,
        },
        None => false,
    }
}
