// Request routing.
//
// `route` maps a method and a raw request URL (path plus optional query) to
// a `Route`. It does no I/O and knows nothing about bodies, so every path in
// the API can be checked without a socket. Path segments and query values
// are percent-decoded; `+` in a query value is a space.

use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    CreateGame,
    ListGames { user_id: Option<String> },
    GetGame(String),
    PatchGame(String),
    DeleteGame(String),
    Guide,
    Preview,
    PreviewQuery { config: Option<String> },
    Status,
    /// Known path, wrong method.
    MethodNotAllowed,
    NotFound,
}

pub fn route(method: &str, url: &str) -> Route {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let segments: Vec<Cow<'_, str>> = path
        .trim_matches('/')
        .split('/')
        .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
        .collect();
    let segments: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();

    let Some(("api", rest)) = segments.split_first().map(|(head, rest)| (*head, rest)) else {
        return Route::NotFound;
    };

    match (method, rest) {
        ("POST", ["games", "create"]) => Route::CreateGame,
        // The web client lists through the create path.
        ("GET", ["games"]) | ("GET", ["games", "create"]) => Route::ListGames {
            user_id: query_param(query, "userId"),
        },
        (_, ["games", "create"]) | (_, ["games"]) => Route::MethodNotAllowed,
        ("GET", ["games", id]) => Route::GetGame(id.to_string()),
        ("PATCH", ["games", id]) => Route::PatchGame(id.to_string()),
        ("DELETE", ["games", id]) => Route::DeleteGame(id.to_string()),
        (_, ["games", _]) => Route::MethodNotAllowed,
        ("POST", ["guide"]) => Route::Guide,
        (_, ["guide"]) => Route::MethodNotAllowed,
        ("POST", ["preview"]) => Route::Preview,
        ("GET", ["preview"]) => Route::PreviewQuery {
            config: query_param(query, "config"),
        },
        (_, ["preview"]) => Route::MethodNotAllowed,
        ("GET", ["status"]) => Route::Status,
        (_, ["status"]) => Route::MethodNotAllowed,
        _ => Route::NotFound,
    }
}

/// First value of `key` in a query string, decoded.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v).ok().map(Cow::into_owned)
        })
}
