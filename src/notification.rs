use std::path::Path;

const APP_NAME: &str = "tagsheet";

/// Desktop toast announcing the saved document. Best-effort; headless
/// sessions just log and move on.
pub fn saved_document(path: &Path) {
    send(format!("PDF saved: {}", path.display()));
}

pub fn send(body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary("Label sheets ready")
        .body(&body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}
