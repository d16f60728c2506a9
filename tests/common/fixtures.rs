//! Static URL corpora and rule tables used across harnesses.

use pathnorm_core::RuleSet;

/// Rules a typical JSON API would configure, most specific first.
pub const API_RULES: &[[&str; 2]] = &[
    [r"^/api/v\d+/users/\d+/orders/\d+", "/api/v:version/users/:id/orders/:order"],
    [r"^/api/v(\d+)/users/\d+", "/api/v$1/users/:id"],
    [r"/orders/[0-9a-f-]{36}", "/orders/:uuid"],
    [r"^/static/.*", "/static/*"],
];

/// Request targets as a router would see them, with query strings and
/// fragments left in.
pub const URL_CORPUS: &[&str] = &[
    "/api/v1/users/42",
    "/api/v2/users/42?expand=profile",
    "/api/v1/users/42/orders/7#summary",
    "/orders/4f5accfe-45d2-43b1-bf10-fdad708732a8?currency=EUR",
    "/static/js/app.3f9c1b.js?v=12",
    "https://shop.example.com/api/v3/users/9",
    "/healthz",
    "/",
];

/// Status codes around every bucket edge.
pub const STATUS_EDGES: &[(i64, &str)] = &[
    (i64::MIN, "5XX"),
    (-1, "5XX"),
    (0, "5XX"),
    (100, "5XX"),
    (199, "5XX"),
    (200, "2XX"),
    (299, "2XX"),
    (300, "3XX"),
    (399, "3XX"),
    (400, "4XX"),
    (499, "4XX"),
    (500, "5XX"),
    (599, "5XX"),
    (600, "5XX"),
    (i64::MAX, "5XX"),
];

/// [`API_RULES`] as a [`RuleSet`].
pub fn api_rules() -> RuleSet {
    RuleSet::from_pairs(API_RULES).expect("API_RULES are well-formed pairs")
}
