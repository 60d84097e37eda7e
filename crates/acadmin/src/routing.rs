//! Typed route table and page dispatch.
//!
//! Routes are parsed once into a typed [`Route`]; view selection is a total
//! match over that value rather than string inspection of a live location.
//! Unknown paths fall back to the home route.

/// The four entity types with list/form/detail screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Subjects,
    Instructors,
    Rooms,
    ClassSections,
}

impl EntityKind {
    /// Every routed entity, in navigation order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Subjects,
        EntityKind::Instructors,
        EntityKind::Rooms,
        EntityKind::ClassSections,
    ];

    /// URL path segment for this entity's routes.
    pub fn path_segment(self) -> &'static str {
        match self {
            EntityKind::Subjects => "subjects",
            EntityKind::Instructors => "instructors",
            EntityKind::Rooms => "rooms",
            EntityKind::ClassSections => "class-sections",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == segment)
    }
}

/// A parsed client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    List(EntityKind),
    Create(EntityKind),
    Detail(EntityKind, i64),
    Edit(EntityKind, i64),
}

/// The view a route resolves to for its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    List,
    FormCreate,
    FormEdit(i64),
    Detail(i64),
}

impl Route {
    /// Parses a URL path into a route.
    ///
    /// Recognized shapes per entity: `/{resource}`, `/{resource}/novo`,
    /// `/{resource}/:id`, `/{resource}/editar/:id`. Anything else, including
    /// a malformed id, is the home redirect.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            [resource] => match EntityKind::from_segment(resource) {
                Some(kind) => Route::List(kind),
                None => Route::Home,
            },
            [resource, action_or_id] => match EntityKind::from_segment(resource) {
                Some(kind) if *action_or_id == "novo" => Route::Create(kind),
                Some(kind) => match action_or_id.parse::<i64>() {
                    Ok(id) => Route::Detail(kind, id),
                    Err(_) => Route::Home,
                },
                None => Route::Home,
            },
            [resource, "editar", id] => {
                match (EntityKind::from_segment(resource), id.parse::<i64>()) {
                    (Some(kind), Ok(id)) => Route::Edit(kind, id),
                    _ => Route::Home,
                }
            }
            _ => Route::Home,
        }
    }

    /// Renders the route back to its URL path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List(kind) => format!("/{}", kind.path_segment()),
            Route::Create(kind) => format!("/{}/novo", kind.path_segment()),
            Route::Detail(kind, id) => format!("/{}/{}", kind.path_segment(), id),
            Route::Edit(kind, id) => format!("/{}/editar/{}", kind.path_segment(), id),
        }
    }

    /// The entity this route belongs to, if any.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Route::Home => None,
            Route::List(kind)
            | Route::Create(kind)
            | Route::Detail(kind, _)
            | Route::Edit(kind, _) => Some(*kind),
        }
    }

    /// Selects the view for this route.
    ///
    /// Total and deterministic: every route maps to exactly one view, and
    /// anything that is not an explicit form or detail route is the list.
    pub fn view(&self) -> PageView {
        match self {
            Route::Create(_) => PageView::FormCreate,
            Route::Edit(_, id) => PageView::FormEdit(*id),
            Route::Detail(_, id) => PageView::Detail(*id),
            Route::Home | Route::List(_) => PageView::List,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_route_shapes_per_entity() {
        for kind in EntityKind::ALL {
            let base = kind.path_segment();
            assert_eq!(Route::parse(&format!("/{base}")), Route::List(kind));
            assert_eq!(Route::parse(&format!("/{base}/novo")), Route::Create(kind));
            assert_eq!(Route::parse(&format!("/{base}/7")), Route::Detail(kind, 7));
            assert_eq!(Route::parse(&format!("/{base}/editar/7")), Route::Edit(kind, 7));
        }
    }

    #[test]
    fn unknown_paths_redirect_home() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/grades"), Route::Home);
        assert_eq!(Route::parse("/subjects/abc"), Route::Home);
        assert_eq!(Route::parse("/subjects/editar/abc"), Route::Home);
        assert_eq!(Route::parse("/subjects/editar"), Route::Home);
        assert_eq!(Route::parse("/subjects/7/extra"), Route::Home);
    }

    #[test]
    fn dispatch_is_total_and_defaults_to_list() {
        assert_eq!(Route::Home.view(), PageView::List);
        for kind in EntityKind::ALL {
            assert_eq!(Route::List(kind).view(), PageView::List);
            assert_eq!(Route::Create(kind).view(), PageView::FormCreate);
            assert_eq!(Route::Detail(kind, 3).view(), PageView::Detail(3));
            assert_eq!(Route::Edit(kind, 3).view(), PageView::FormEdit(3));
        }
    }

    #[test]
    fn entity_is_known_for_every_non_home_route() {
        assert_eq!(Route::Home.entity(), None);
        for kind in EntityKind::ALL {
            assert_eq!(Route::List(kind).entity(), Some(kind));
            assert_eq!(Route::Edit(kind, 1).entity(), Some(kind));
        }
    }

    #[test]
    fn paths_round_trip_through_parse() {
        let routes = [
            Route::List(EntityKind::Rooms),
            Route::Create(EntityKind::ClassSections),
            Route::Detail(EntityKind::Subjects, 12),
            Route::Edit(EntityKind::Instructors, 4),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
