//! Core 模块 - 配置, 错误与状态
//!
//! # 结构
//!
//! - [`config`] - 环境变量配置
//! - [`error`] - 应用错误
//! - [`state`] - 意图驱动的状态机 ([`DeskState`])

pub mod config;
pub mod error;
pub mod state;

pub use config::{Config, Schema};
pub use error::{DeskError, Result};
pub use state::{Confirm, DeskState, MSG_CHECK_INPUT, MSG_SAVE_FAILED, open_store};
