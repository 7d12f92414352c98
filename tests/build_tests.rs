use pretty_assertions::assert_eq;
use waymark::{BuildError, HandlerRef, ParamMap, Router};

fn router() -> Router {
    let mut router = Router::new();
    router
        .add(
            r"/blog/archive/{year:\d\d\d\d}/{slug}",
            HandlerRef::deferred("blog_item"),
            Some("blog/item"),
            ParamMap::new(),
        )
        .expect("item template");
    router
        .add(
            "/docs/{page}",
            HandlerRef::deferred("docs"),
            Some("docs/page"),
            [("page", "index")].into_iter().collect(),
        )
        .expect("docs template");
    router
        .add(
            "/search",
            HandlerRef::deferred("search"),
            Some("search"),
            ParamMap::new(),
        )
        .expect("search template");
    router
}

#[test]
fn test_build_blog_item() {
    let router = router();
    let params: ParamMap = [("year", "2024"), ("slug", "my-post")].into_iter().collect();
    assert_eq!(
        router.build("blog/item", params).expect("build"),
        "/blog/archive/2024/my-post"
    );
}

#[test]
fn test_build_accepts_numbers() {
    let router = router();
    let mut params = ParamMap::new();
    params.insert("year", 2024);
    params.insert("slug", "my-post");
    assert_eq!(
        router.build("blog/item", params).expect("build"),
        "/blog/archive/2024/my-post"
    );
}

#[test]
fn test_build_rejects_invalid_value() {
    let router = router();
    let params: ParamMap = [("year", "abcd"), ("slug", "my-post")].into_iter().collect();
    match router.build("blog/item", params) {
        Err(BuildError::InvalidParameter { name, value }) => {
            assert_eq!(name, "year");
            assert_eq!(value, "abcd");
        }
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[test]
fn test_build_rejects_short_year() {
    let router = router();
    let mut params = ParamMap::new();
    params.insert("year", 24);
    params.insert("slug", "my-post");
    assert!(matches!(
        router.build("blog/item", params),
        Err(BuildError::InvalidParameter { .. })
    ));
}

#[test]
fn test_build_missing_parameter() {
    let router = router();
    let params: ParamMap = [("year", "2024")].into_iter().collect();
    match router.build("blog/item", params) {
        Err(BuildError::MissingParameter { name, .. }) => assert_eq!(name, "slug"),
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn test_build_empty_value_counts_as_missing() {
    let router = router();
    let params: ParamMap = [("year", "2024"), ("slug", "")].into_iter().collect();
    assert!(matches!(
        router.build("blog/item", params),
        Err(BuildError::MissingParameter { name, .. }) if name == "slug"
    ));
}

#[test]
fn test_build_unknown_route_name() {
    let router = router();
    match router.build("does/not/exist", ParamMap::new()) {
        Err(BuildError::UnknownRoute(name)) => assert_eq!(name, "does/not/exist"),
        other => panic!("expected UnknownRoute, got {other:?}"),
    }
}

#[test]
fn test_build_uses_route_default() {
    let router = router();
    assert_eq!(
        router.build("docs/page", ParamMap::new()).expect("build"),
        "/docs/index"
    );
}

#[test]
fn test_supplied_value_overrides_default() {
    let router = router();
    let params: ParamMap = [("page", "setup")].into_iter().collect();
    assert_eq!(
        router.build("docs/page", params).expect("build"),
        "/docs/setup"
    );
}

#[test]
fn test_extra_keys_become_query_string() {
    let router = router();
    let mut params = ParamMap::new();
    params.insert("page", "setup");
    params.insert("ref", "toc");
    params.insert("hl", "rust lang");
    assert_eq!(
        router.build("docs/page", params).expect("build"),
        "/docs/setup?ref=toc&hl=rust+lang"
    );
}

#[test]
fn test_extra_keys_preserve_insertion_order() {
    let router = router();
    let mut params = ParamMap::new();
    params.insert("z", "1");
    params.insert("a", "2");
    params.insert("m", 3);
    assert_eq!(
        router.build("search", params).expect("build"),
        "/search?z=1&a=2&m=3"
    );
}

#[test]
fn test_no_query_suffix_without_extras() {
    let router = router();
    let params: ParamMap = [("page", "setup")].into_iter().collect();
    let url = router.build("docs/page", params).expect("build");
    assert!(!url.contains('?'), "unexpected query suffix in {url}");
}

#[test]
fn test_round_trip_match_then_build() {
    let router = router();
    for path in ["/blog/archive/2024/my-post", "/docs/setup", "/search"] {
        let m = router.match_path(path).expect("match");
        let name = m.route.name().expect("named route");
        // Drop defaults that are not template variables before rebuilding;
        // docs/page has none, so params rebuild the path exactly.
        let rebuilt = router.build(name, m.params.clone()).expect("build");
        assert_eq!(rebuilt, path, "round trip failed for {path}");
    }
}

#[test]
fn test_values_are_percent_encoded() {
    let router = router();
    let params: ParamMap = [("page", "a b&c")].into_iter().collect();
    assert_eq!(
        router.build("docs/page", params).expect("build"),
        "/docs/a+b%26c"
    );
}
