//! Blog pages and the write routes behind Basic Auth.

use actix_web::{HttpResponse, http::header, web};
use chrono::Utc;

use quill_core::ports::{BaseRepository, IdAllocator, PostRepository};
use quill_core::{Post, PostId};
use quill_shared::dto::{AddPostForm, SavePostForm};
use quill_shared::{ApiResponse, PageData};

use crate::middleware::auth::Writer;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn page(data: PageData) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET {prefix}/ - every post, newest first.
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    Ok(page(PageData::index(&posts, Utc::now())))
}

/// GET {prefix}/view/{id}
pub async fn view(state: web::Data<AppState>, id: web::Path<PostId>) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(id.into_inner()).await?;
    Ok(page(PageData::view(&post, Utc::now())))
}

/// GET {prefix}/edit/{id}
pub async fn edit(
    _writer: Writer,
    state: web::Data<AppState>,
    id: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(id.into_inner()).await?;
    Ok(page(PageData::edit(&post, Utc::now())))
}

/// POST {prefix}/save/{id}
pub async fn save(
    writer: Writer,
    state: web::Data<AppState>,
    id: web::Path<PostId>,
    form: web::Form<SavePostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let mut post = state.posts.find_by_id(id.into_inner()).await?;

    post.title = form.title;
    post.content_markdown = form.markdown;
    let post = state.posts.save(post).await?;

    tracing::info!(post_id = post.id, user = %writer.user, "Post updated");
    Ok(redirect(state.site.url(&format!("/view/{}", post.id_str()))))
}

/// GET {prefix}/save/{id} - saving only happens through the edit form.
pub async fn save_via_get(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed(format!(
        "Only through the {} url",
        state.site.url("/edit/{id}")
    )))
}

/// GET|POST {prefix}/del/{id}
pub async fn delete(
    writer: Writer,
    state: web::Data<AppState>,
    id: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(id.into_inner()).await?;
    state.posts.delete(post.id).await?;

    tracing::info!(post_id = post.id, user = %writer.user, "Post deleted");
    Ok(redirect(state.site.url("/")))
}

/// GET {prefix}/add
pub async fn add_form(_writer: Writer) -> AppResult<HttpResponse> {
    Ok(page(PageData::add(Utc::now())))
}

/// POST {prefix}/add - allocate an id, then save the new post.
pub async fn add(
    writer: Writer,
    state: web::Data<AppState>,
    form: web::Form<AddPostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let id = state.ids.next_id().await?;

    let mut post = Post::new(id, writer.user.clone(), Utc::now());
    post.url_friendly_link = form.slug();
    post.title = form.title;
    post.content_markdown = form.markdown;
    let post = state.posts.save(post).await?;

    tracing::info!(post_id = post.id, user = %writer.user, "Post created");
    Ok(redirect(state.site.url(&format!("/view/{}", post.id_str()))))
}
