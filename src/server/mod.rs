//! Development server with live reload and on-demand sidebar fragments

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        RawQuery, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands::generate::write_site;
use crate::commands::sidebar::render_query;
use crate::plugins::PostList;
use crate::sidebar::{parse_query, QueryError, SidebarController, StateRoutes, Variant, ViewState};
use crate::theme::is_active;
use crate::Blog;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    base_dir: PathBuf,
    site: RwLock<Site>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Config and post list of the latest successful build
struct Site {
    blog: Blog,
    posts: PostList,
}

impl Site {
    /// Reload the config, build once and write the public directory
    fn build(base_dir: &Path) -> Result<Self> {
        let blog = Blog::new(base_dir)?;
        let build = blog.build()?;
        write_site(&blog, &build)?;
        let posts = build.post_list().cloned().unwrap_or_default();
        Ok(Self { blog, posts })
    }
}

/// Generate the site and start the development server
pub async fn start(base_dir: &Path, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let site = Site::build(base_dir)?;

    let state = Arc::new(ServerState {
        base_dir: base_dir.to_path_buf(),
        site: RwLock::new(site),
        reload_tx,
        live_reload: watch,
    });

    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/__sidebar", get(sidebar_handler))
        .fallback(fallback_handler)
        .with_state(state.clone());

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch sources and config, regenerate, swap in the new site and notify clients
fn watch_and_reload(state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let source_dir = match state.site.read() {
        Ok(site) => site.blog.source_dir.clone(),
        Err(_) => anyhow::bail!("Site state is poisoned"),
    };
    if source_dir.exists() {
        debouncer
            .watcher()
            .watch(&source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", source_dir);
    }

    let config_path = state.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path = e.path.to_string_lossy();
                        !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match Site::build(&state.base_dir) {
                    Ok(site) => {
                        if let Ok(mut current) = state.site.write() {
                            *current = site;
                        }
                        tracing::info!("Regenerated successfully");
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Parameters of a `/__sidebar` request
#[derive(Debug, PartialEq)]
struct SidebarRequest {
    route: String,
    variant: Variant,
    state: ViewState,
}

impl SidebarRequest {
    fn parse(query: &str, all_label: &str) -> Result<Self, QueryError> {
        let mut route = "/".to_string();
        let mut variant = Variant::default();
        for (key, value) in parse_query(query)? {
            match key.as_str() {
                "route" => route = value,
                "variant" => variant = value.parse()?,
                _ => {}
            }
        }
        Ok(Self {
            route,
            variant,
            state: ViewState::from_query(query, all_label)?,
        })
    }
}

/// Render a sidebar fragment for `?route=&variant=&category=&page=`
async fn sidebar_handler(
    State(state): State<Arc<ServerState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.unwrap_or_default();
    let site = match state.site.read() {
        Ok(site) => site,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Site unavailable").into_response(),
    };

    let request = match SidebarRequest::parse(&query, &site.blog.config.sidebar.all_label) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    Html(render_query(
        &site.blog,
        &site.posts,
        &request.route,
        request.variant,
        request.state,
    ))
    .into_response()
}

/// Static page for `<post>?category=&page=`, when the query picks a non-default state
fn state_redirect(site: &Site, path: &str, query: Option<&str>) -> Option<String> {
    let config = &site.blog.config;
    if !config.sidebar.state_pages {
        return None;
    }

    let view = ViewState::from_query(query?, &config.sidebar.all_label).ok()?;
    if view == ViewState::default() {
        return None;
    }
    if !site.posts.iter().any(|post| is_active(&post.permalink, path)) {
        return None;
    }

    let items = &site.posts[..config.blog.sidebar_count.take(site.posts.len())];
    let controller = SidebarController::new(items, config.sidebar.page_size, &config.sidebar.all_label)
        .with_state(view);
    StateRoutes::from_controller(&controller).url_for(path, controller.state())
}

/// Public directory and optional redirect for a request, read under the lock
fn route_request(
    state: &ServerState,
    path: &str,
    query: Option<&str>,
) -> Option<(PathBuf, Option<String>)> {
    let site = state.site.read().ok()?;
    Some((site.blog.public_dir.clone(), state_redirect(&site, path, query)))
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve generated files, injecting the live reload script into HTML
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some((public_dir, redirect)) =
        route_request(&state, request.uri().path(), request.uri().query())
    else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Site unavailable").into_response();
    };
    if let Some(location) = redirect {
        return Redirect::to(&location).into_response();
    }

    let file_path = resolve_file(&public_dir, request.uri().path());

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to a file under `public_dir`
fn resolve_file(public_dir: &Path, path: &str) -> PathBuf {
    let clean_path = path.trim_start_matches('/');
    if clean_path.is_empty() {
        return public_dir.join("index.html");
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        candidate.join("index.html")
    } else if candidate.exists() {
        candidate
    } else {
        let with_html = public_dir.join(format!("{}.html", clean_path));
        if with_html.exists() {
            with_html
        } else {
            candidate
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PostSummary;
    use crate::sidebar::Selection;

    #[test]
    fn test_sidebar_request_defaults() {
        let request = SidebarRequest::parse("", "all").unwrap();
        assert_eq!(request.route, "/");
        assert_eq!(request.variant, Variant::Desktop);
        assert_eq!(request.state, ViewState::default());
    }

    #[test]
    fn test_sidebar_request_full() {
        let request =
            SidebarRequest::parse("route=%2Fa%2F&variant=mobile&category=go&page=2", "all").unwrap();
        assert_eq!(request.route, "/a/");
        assert_eq!(request.variant, Variant::Mobile);
        assert_eq!(request.state.selection, Selection::Category("go".into()));
        assert_eq!(request.state.current_page, 2);
    }

    #[test]
    fn test_sidebar_request_errors() {
        assert!(matches!(
            SidebarRequest::parse("variant=tv", "all"),
            Err(QueryError::UnknownVariant(_))
        ));
        assert!(matches!(
            SidebarRequest::parse("page=-1", "all"),
            Err(QueryError::InvalidPage(_))
        ));
    }

    fn site(n: usize) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let posts = (1..=n)
            .map(|i| PostSummary {
                permalink: format!("/p{}/", i),
                title: format!("P{}", i),
                categories: if i <= 3 { vec!["go".into()] } else { Vec::new() },
            })
            .collect();
        (dir, Site { blog, posts })
    }

    #[test]
    fn test_state_query_redirects_to_state_page() {
        let (_dir, site) = site(25);
        assert_eq!(
            state_redirect(&site, "/p2/", Some("category=go")).as_deref(),
            Some("/p2/category/go/")
        );
        assert_eq!(
            state_redirect(&site, "/p2", Some("page=3")).as_deref(),
            Some("/p2/page/3/")
        );
        // out-of-range pages clamp like the controller does
        assert_eq!(
            state_redirect(&site, "/p2/", Some("category=go&page=9")).as_deref(),
            Some("/p2/category/go/")
        );
    }

    #[test]
    fn test_state_query_without_redirect() {
        let (_dir, mut site) = site(25);
        assert_eq!(state_redirect(&site, "/p2/", None), None);
        assert_eq!(state_redirect(&site, "/p2/", Some("category=all")), None);
        assert_eq!(state_redirect(&site, "/p2/", Some("category=haskell")), None);
        assert_eq!(state_redirect(&site, "/p2/", Some("page=0")), None);
        assert_eq!(state_redirect(&site, "/style.css", Some("page=2")), None);

        site.blog.config.sidebar.state_pages = false;
        assert_eq!(state_redirect(&site, "/p2/", Some("category=go")), None);
    }

    #[test]
    fn test_site_build_reloads_config() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("source/_posts");
        std::fs::create_dir_all(&posts).unwrap();
        std::fs::write(
            posts.join("a.md"),
            "---\ntitle: A\ndate: 2024-01-01\ncategories: [go]\n---\nBody\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("_config.yml"), "title: First\npermalink: :title/\n").unwrap();

        let site = Site::build(dir.path()).unwrap();
        assert_eq!(site.blog.config.title, "First");
        assert_eq!(site.posts.len(), 1);
        assert!(site.blog.public_dir.join("a/category/go/index.html").exists());

        std::fs::write(dir.path().join("_config.yml"), "title: Second\npermalink: :title/\n").unwrap();
        let site = Site::build(dir.path()).unwrap();
        assert_eq!(site.blog.config.title, "Second");
        let page = std::fs::read_to_string(site.blog.public_dir.join("a/index.html")).unwrap();
        assert!(page.contains("<title>A | Second</title>"));
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        assert_eq!(resolve_file(dir.path(), "/"), dir.path().join("index.html"));
        assert_eq!(resolve_file(dir.path(), "/a/"), dir.path().join("a/index.html"));
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body>x</body></html>");
        assert!(html.contains("/__livereload"));
        assert!(html.ends_with("</body>\n</html>"));
    }
}
