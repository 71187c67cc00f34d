//! 联系消息业务服务

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use chrono::Utc;
use tracing::info;
use validator::Validate;

use super::model::{ContactForm, Message};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct InboxService {
    messages: Arc<RwLock<Vec<Message>>>,
    next_id: Arc<AtomicU64>,
}

impl InboxService {
    pub fn new(messages: Vec<Message>) -> Self {
        let next_id = messages.len() as u64 + 1;
        Self {
            messages: Arc::new(RwLock::new(messages)),
            next_id: Arc::new(AtomicU64::new(next_id)),
        }
    }

    /// 校验联系表单，不写入收件箱
    pub fn check_form(form: ContactForm) -> Result<ContactForm, CoreError> {
        let form = form.normalized();
        form.validate()?;
        Ok(form)
    }

    pub fn submit(&self, form: ContactForm) -> Result<Message, CoreError> {
        let form = Self::check_form(form)?;

        let message = Message {
            id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            message: form.message,
            date: Utc::now(),
            read: false,
        };

        self.messages.write()?.push(message.clone());
        info!("收到联系消息: {} <{}>", message.id, message.email);
        Ok(message)
    }

    /// 按时间倒序
    pub fn list(&self, unread_only: bool) -> Result<Vec<Message>, CoreError> {
        let messages = self.messages.read()?;
        let mut result: Vec<Message> = messages
            .iter()
            .filter(|message| !unread_only || !message.read)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(result)
    }

    pub fn get(&self, id: &str) -> Result<Message, CoreError> {
        let messages = self.messages.read()?;
        messages
            .iter()
            .find(|message| message.id == id)
            .cloned()
            .ok_or_else(|| message_not_found(id))
    }

    /// 查看消息，同时标记为已读
    pub fn view(&self, id: &str) -> Result<Message, CoreError> {
        self.mark_read(id)
    }

    pub fn mark_read(&self, id: &str) -> Result<Message, CoreError> {
        let mut messages = self.messages.write()?;
        let message = messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or_else(|| message_not_found(id))?;
        message.read = true;
        Ok(message.clone())
    }

    pub fn delete(&self, id: &str) -> Result<Message, CoreError> {
        let mut messages = self.messages.write()?;
        let index = messages
            .iter()
            .position(|message| message.id == id)
            .ok_or_else(|| message_not_found(id))?;
        let removed = messages.remove(index);
        info!("联系消息已删除: {}", removed.id);
        Ok(removed)
    }

    pub fn unread_count(&self) -> Result<usize, CoreError> {
        Ok(self.messages.read()?.iter().filter(|m| !m.read).count())
    }

    pub fn total(&self) -> Result<usize, CoreError> {
        Ok(self.messages.read()?.len())
    }
}

fn message_not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("El mensaje {} no existe", id))
}
