// Blog post and testimonial handlers
use axum::extract::{Path, State};
use jobspring_types::{BlogPost, Testimonial};

use crate::error::ApiResult;
use crate::extract::Json;
use crate::AppState;

use super::parse_id;

pub async fn list_blog_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    let posts = state.store.list_blog_posts().await?;
    Ok(Json(posts))
}

pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<BlogPost>>> {
    let post_id = parse_id(&id)?;

    let post = state.store.find_blog_post(post_id).await?;
    Ok(Json(post))
}

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Testimonial>>> {
    let testimonials = state.store.list_testimonials().await?;
    Ok(Json(testimonials))
}
