use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::error::BlockingError;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::content::CollectionKind;
use crate::og::OgError;
use crate::query_string::QueryString;
use crate::website::Website;

type SiteState = web::types::State<Arc<Website>>;

fn html(rendered: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered)
}

fn not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body("Not found")
}

fn internal_error(what: &str, e: impl std::fmt::Display) -> web::HttpResponse {
    error!("Error rendering {}: {}", what, e);
    web::HttpResponse::InternalServerError()
        .body(format!("Error rendering {}", what))
}

fn render_detail(website: &Website, kind: CollectionKind, slug: &str) -> web::HttpResponse {
    match website.render_entry(kind, slug) {
        Ok(Some(rendered)) => html(rendered),
        Ok(None) => not_found(),
        Err(e) => internal_error(slug, e),
    }
}

/// Rasterizing runs on the blocking pool, off the worker thread.
async fn render_og(state: SiteState, kind: CollectionKind, slug: String) -> web::HttpResponse {
    let what = format!("OG image for {}", slug);
    let website = state.get_ref().clone();
    match web::block(move || website.render_og(kind, &slug)).await {
        Ok(png) => web::HttpResponse::Ok()
            .content_type("image/png")
            .body(png),
        Err(BlockingError::Error(OgError::NotFound)) => not_found(),
        Err(e) => internal_error(&what, e),
    }
}

fn get_cur_page(req: &HttpRequest) -> u32 {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).get_page(),
        None => 1,
    }
}

fn render_list(req: &HttpRequest, website: &Website, kind: CollectionKind) -> web::HttpResponse {
    match website.render_list(kind, get_cur_page(req)) {
        Ok(rendered) => html(rendered),
        Err(e) => internal_error(kind.name(), e),
    }
}

// Begin: Redirect region --------
fn redirect(location: String) -> web::HttpResponse {
    web::HttpResponse::PermanentRedirect()
        .header("Location", location)
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/blog/{year}/{slug}/")]
async fn blog_with_slash(path: web::types::Path<(String, String)>) -> web::HttpResponse {
    let (year, slug) = path.into_inner();
    redirect(format!("/blog/{}/{}", year, slug))
}

#[web::get("/notes/{slug}/")]
async fn notes_with_slash(path: web::types::Path<String>) -> web::HttpResponse {
    redirect(format!("/notes/{}", path.into_inner()))
}

#[web::get("/blog")]
async fn blog_wo_slash() -> web::HttpResponse {
    redirect("/blog/".to_string())
}

#[web::get("/notes")]
async fn notes_wo_slash() -> web::HttpResponse {
    redirect("/notes/".to_string())
}
// End: Redirect region --------

#[web::get("/")]
async fn index(state: SiteState) -> web::HttpResponse {
    html(state.render_index())
}

#[web::get("/blog/")]
async fn blog_list(req: HttpRequest, state: SiteState) -> web::HttpResponse {
    render_list(&req, &state, CollectionKind::Blog)
}

#[web::get("/notes/")]
async fn notes_list(req: HttpRequest, state: SiteState) -> web::HttpResponse {
    render_list(&req, &state, CollectionKind::Notes)
}

#[web::get("/blog/{year}/{slug}")]
async fn blog_post(path: web::types::Path<(String, String)>, state: SiteState) -> web::HttpResponse {
    let (year, slug) = path.into_inner();
    render_detail(&state, CollectionKind::Blog, &format!("{}/{}", year, slug))
}

#[web::get("/notes/{slug}")]
async fn notes_post(path: web::types::Path<String>, state: SiteState) -> web::HttpResponse {
    render_detail(&state, CollectionKind::Notes, &path.into_inner())
}

#[web::get("/blog/{year}/{slug}/og.png")]
async fn blog_og(path: web::types::Path<(String, String)>, state: SiteState) -> web::HttpResponse {
    let (year, slug) = path.into_inner();
    render_og(state, CollectionKind::Blog, format!("{}/{}", year, slug)).await
}

#[web::get("/notes/{slug}/og.png")]
async fn notes_og(path: web::types::Path<String>, state: SiteState) -> web::HttpResponse {
    render_og(state, CollectionKind::Notes, path.into_inner()).await
}

#[web::get("/rss.xml")]
async fn rss(state: SiteState) -> web::HttpResponse {
    match state.render_feed() {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => internal_error("rss feed", e),
    }
}

#[web::get("/sitemap.xml")]
async fn sitemap(state: SiteState) -> web::HttpResponse {
    match state.render_sitemap() {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(xml),
        Err(e) => internal_error("sitemap", e),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: SiteState) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

/// Every route of the site. Shared by `server_run` and the tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(public_files)
        .service(rss)
        .service(sitemap)
        .service(blog_list)
        .service(blog_wo_slash)
        .service(notes_list)
        .service(notes_wo_slash)
        .service(blog_og)
        .service(notes_og)
        .service(blog_post)
        .service(blog_with_slash)
        .service(notes_post)
        .service(notes_with_slash);
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    // Content is read once, the served set never changes while running
    let website = Arc::new(Website::load(config)?);
    for kind in CollectionKind::ALL {
        for entry in website.collection(kind) {
            info!("Route: {}", entry.permalink);
        }
    }

    info!("Listening on {}:{}", bind_addr, bind_port);
    web::HttpServer::new(move || {
        web::App::new()
            .state(website.clone())
            .configure(configure_routes)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
