use super::{Route, Router};
use crate::error::BuildError;
use crate::handler::HandlerRef;
use crate::params::ParamMap;

fn route(path: &str) -> Route {
    Route::new(path, HandlerRef::deferred("test")).unwrap()
}

#[test]
fn test_static_route_matches_trivially() {
    let r = route("/blog");
    let params = r.matches("/blog").unwrap();
    assert!(params.is_empty());
    assert!(r.matches("/blog/").is_none());
}

#[test]
fn test_defaults_overlay() {
    let defaults: ParamMap = [("lang", "en")].into_iter().collect();
    let r = route("/docs/{page}").with_defaults(defaults);
    let params = r.matches("/docs/intro").unwrap();
    assert_eq!(params.get_str("lang"), Some("en"));
    assert_eq!(params.get_str("page"), Some("intro"));
}

#[test]
fn test_capture_wins_over_default() {
    let defaults: ParamMap = [("page", "index")].into_iter().collect();
    let r = route("/docs/{page}").with_defaults(defaults);
    let params = r.matches("/docs/setup").unwrap();
    assert_eq!(params.get_str("page"), Some("setup"));
}

#[test]
fn test_first_match_wins_over_specificity() {
    let mut router = Router::new();
    router.add_route(route("/items/{id}").named("generic"));
    router.add_route(route(r"/items/{id:\d+}").named("numeric"));

    // Both match; declaration order decides, not specificity.
    let m = router.match_path("/items/42").unwrap();
    assert_eq!(m.route.name(), Some("generic"));
}

#[test]
fn test_duplicate_name_last_wins() {
    let mut router = Router::new();
    router.add_route(route("/old").named("page"));
    router.add_route(route("/new").named("page"));
    assert_eq!(router.route_by_name("page").unwrap().path(), "/new");
    // Both routes still participate in matching.
    assert_eq!(router.len(), 2);
    assert!(router.match_path("/old").is_some());
}

#[test]
fn test_build_unknown_name() {
    let router = Router::new();
    let err = router.build("does/not/exist", ParamMap::new()).unwrap_err();
    assert!(matches!(err, BuildError::UnknownRoute(name) if name == "does/not/exist"));
}

#[test]
fn test_build_falls_back_to_default() {
    let defaults: ParamMap = [("page", "index")].into_iter().collect();
    let r = route("/docs/{page}").with_defaults(defaults);
    assert_eq!(r.build(ParamMap::new()).unwrap(), "/docs/index");
}

#[test]
fn test_build_rejects_falsy_values() {
    let r = route("/docs/{page}");

    let empty: ParamMap = [("page", "")].into_iter().collect();
    assert!(matches!(
        r.build(empty),
        Err(BuildError::MissingParameter { name, .. }) if name == "page"
    ));

    let zero: ParamMap = [("page", 0)].into_iter().collect();
    assert!(matches!(
        r.build(zero),
        Err(BuildError::MissingParameter { .. })
    ));
}

#[test]
fn test_build_stringifies_numbers() {
    let r = route(r"/archive/{year:\d\d\d\d}");
    let params: ParamMap = [("year", 2024)].into_iter().collect();
    assert_eq!(r.build(params).unwrap(), "/archive/2024");
}

#[test]
fn test_build_encodes_values() {
    let r = route("/tags/{tag}");
    let params: ParamMap = [("tag", "rust lang")].into_iter().collect();
    // quote_plus semantics: space becomes '+'.
    assert_eq!(r.build(params).unwrap(), "/tags/rust+lang");
}

#[test]
fn test_build_rejects_value_that_encodes_out_of_pattern() {
    // A slash in the value encodes to %2F, which the letters-only pattern rejects.
    let r = route("/files/{name:[a-z]+}");
    let params: ParamMap = [("name", "a/b")].into_iter().collect();
    assert!(matches!(
        r.build(params),
        Err(BuildError::InvalidParameter { name, .. }) if name == "name"
    ));
}
