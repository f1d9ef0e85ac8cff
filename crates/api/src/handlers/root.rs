use axum::http::StatusCode;

pub async fn welcome() -> String {
    format!(
        "Welcome to {} v{}, a DNS-over-HTTPS proxy. Send queries to /dns-query.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404, not found!")
}
