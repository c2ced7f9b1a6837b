//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`guests`] - 宾客管理接口
//! - [`tables`] - 桌台管理接口
//! - [`connections`] - 宾客关系接口
//! - [`seating`] - 排座生成与查询

pub mod connections;
pub mod guests;
pub mod health;
pub mod seating;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
