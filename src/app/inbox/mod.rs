//! 联系表单与收件箱

pub mod handler;
pub mod links;
pub mod model;
pub mod service;
