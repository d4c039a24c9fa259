// Route path constants - single source of truth for client routes and API
// resource paths.

/// API resource paths, joined onto the configured base URL by the units.
pub mod api {
    pub const CLUBS: &str = "/clubs";
    pub const TRAINERS: &str = "/trainers";
    pub const AREAS: &str = "/areas";
}

pub const CLUBS: &str = "/";
pub const CLUB_DETAIL: &str = "/clubs/{id}";
pub const TRAINERS: &str = "/trainers";
pub const TRAINER_DETAIL: &str = "/trainers/{id}";
pub const AREAS: &str = "/areas";
pub const AREA_DETAIL: &str = "/areas/{id}";

/// Views the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Clubs,
    ClubDetail,
    Trainers,
    TrainerDetail,
    Areas,
    AreaDetail,
}

/// One navigable route: a path pattern and the view it renders.
///
/// Matching and history management are the navigation library's business;
/// this table is only the declaration it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub view: View,
    /// Load the view's code on first navigation instead of at startup.
    pub lazy: bool,
}

/// The navigation table. The root view ships eagerly; everything else is
/// marked for lazy loading.
pub const ROUTES: [RouteDef; 6] = [
    RouteDef {
        name: "clubs",
        path: CLUBS,
        view: View::Clubs,
        lazy: false,
    },
    RouteDef {
        name: "club-detail",
        path: CLUB_DETAIL,
        view: View::ClubDetail,
        lazy: true,
    },
    RouteDef {
        name: "trainers",
        path: TRAINERS,
        view: View::Trainers,
        lazy: true,
    },
    RouteDef {
        name: "trainer-detail",
        path: TRAINER_DETAIL,
        view: View::TrainerDetail,
        lazy: true,
    },
    RouteDef {
        name: "areas",
        path: AREAS,
        view: View::Areas,
        lazy: true,
    },
    RouteDef {
        name: "area-detail",
        path: AREA_DETAIL,
        view: View::AreaDetail,
        lazy: true,
    },
];

/// Look a route up by its registered name.
pub fn by_name(name: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|route| route.name == name)
}
