//! 核心层：错误、请求提取、响应包装与中间件

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
