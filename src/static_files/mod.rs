//! Static file serving collaborator.
//!
//! The request handler only knows the [`StaticFiles`] trait. The default
//! implementation, [`DirectoryFiles`], maps URL paths onto a directory through
//! `tower_http`'s `ServeDir`, which also owns not-found, path traversal and
//! content-type behavior. A directory requested with a trailing slash and
//! holding no `index.html` is answered with an HTML listing instead of 404.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Characters escaped in listing links. `/` stays so subdirectory links work.
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Something that can answer a request from a file tree.
pub trait StaticFiles: Send + Sync {
    /// Serve the request. The path has already been rewritten by routing.
    fn serve(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

/// Files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryFiles {
    root: PathBuf,
    service: ServeDir,
}

impl DirectoryFiles {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            service: ServeDir::new(&root),
            root,
        }
    }

    /// Directory a trailing-slash URL path names under the root.
    ///
    /// Returns `None` for paths without a trailing slash, undecodable paths
    /// and any segment that could step outside the root.
    fn listing_dir(&self, url_path: &str) -> Option<PathBuf> {
        if !url_path.ends_with('/') {
            return None;
        }
        let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
        let mut dir = self.root.clone();
        for segment in decoded.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." || segment.contains('\\') {
                return None;
            }
            dir.push(segment);
        }
        Some(dir)
    }
}

impl StaticFiles for DirectoryFiles {
    fn serve(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let service = self.service.clone();
        let url_path = request.uri().path().to_string();
        let listing_dir = self.listing_dir(&url_path);
        Box::pin(async move {
            let response = match service.oneshot(request).await {
                Ok(response) => response.map(Body::new),
                Err(never) => match never {},
            };
            if response.status() != StatusCode::NOT_FOUND {
                return response;
            }
            let Some(dir) = listing_dir else {
                return response;
            };
            match tokio::fs::metadata(&dir).await {
                Ok(meta) if meta.is_dir() => {}
                _ => return response,
            }
            match render_listing(&dir, &url_path).await {
                Ok(html) => (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("text/html; charset=utf-8"),
                    )],
                    html,
                )
                    .into_response(),
                Err(err) => {
                    tracing::debug!(
                        dir = %dir.display(),
                        error = %err,
                        "Directory listing failed"
                    );
                    response
                }
            }
        })
    }
}

/// HTML page listing the entries of `dir`, directories suffixed with `/`.
async fn render_listing(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_by_key(|name| name.to_lowercase());

    let title = escape_html(&percent_decode_str(url_path).decode_utf8_lossy());
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {title}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n"
    );
    for name in &names {
        let href = utf8_percent_encode(name, HREF);
        html.push_str(&format!(
            "<li><a href=\"{href}\">{}</a></li>\n",
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
