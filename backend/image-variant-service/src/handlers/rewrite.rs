/// Rewrite handler - HTTP stand-in for the CDN origin-request trigger
use actix_web::{web, HttpResponse};

use crate::models::CdnRequest;
use crate::services::RequestRewrite;

/// Rewrite a request descriptor.
///
/// A `null` descriptor means there is nothing to act on and is echoed back.
pub async fn rewrite_request(
    rewriter: web::Data<dyn RequestRewrite>,
    payload: web::Json<Option<CdnRequest>>,
) -> HttpResponse {
    let response = match payload.into_inner() {
        Some(request) => Some(rewriter.rewrite(request).await),
        None => None,
    };

    HttpResponse::Ok().json(response)
}
