//! 联系表单与收件箱处理器

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::warn;

use super::{
    links,
    model::{ContactForm, Message, MessageQuery, ReplyLinks, WhatsAppLink},
    service::InboxService,
};
use crate::{
    app::AppState,
    core::{
        error::CoreError,
        extract::{ApiJson, ApiQuery},
        response::{created, ApiResponse, Created},
    },
};

pub async fn submit_contact(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<Created<Message>, CoreError> {
    let message = state.inbox.submit(form)?;
    if let Err(err) = state.notifications.new_message(&message.name) {
        warn!("新消息提醒写入失败: {}", err);
    }
    Ok(created(message))
}

/// 生成发往公司 WhatsApp 的链接，不写入收件箱
pub async fn contact_whatsapp(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<Json<ApiResponse<WhatsAppLink>>, CoreError> {
    let form = InboxService::check_form(form)?;
    let phone = form.phone.clone().ok_or_else(|| {
        CoreError::BadRequest("Por favor completa todos los campos del formulario.".to_string())
    })?;

    let settings = state.settings.get()?;
    let url = links::customer_whatsapp(&settings.phone, &form, &phone);
    Ok(Json(ApiResponse::success(WhatsAppLink { url })))
}

pub async fn list_messages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MessageQuery>,
) -> Result<Json<ApiResponse<Vec<Message>>>, CoreError> {
    let messages = state.inbox.list(query.unread_only)?;
    Ok(Json(ApiResponse::success(messages)))
}

pub async fn view_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Message>>, CoreError> {
    Ok(Json(ApiResponse::success(state.inbox.view(&id)?)))
}

pub async fn mark_message_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Message>>, CoreError> {
    Ok(Json(ApiResponse::success(state.inbox.mark_read(&id)?)))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Message>>, CoreError> {
    Ok(Json(ApiResponse::success(state.inbox.delete(&id)?)))
}

pub async fn reply_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReplyLinks>>, CoreError> {
    let message = state.inbox.get(&id)?;
    let company = state.settings.get()?.company_name;
    Ok(Json(ApiResponse::success(ReplyLinks {
        mailto: links::reply_mailto(&company, &message),
        whatsapp: links::reply_whatsapp(&company, &message),
    })))
}
