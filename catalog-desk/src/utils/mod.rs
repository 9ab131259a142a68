//! 工具模块 - 通用工具函数
//!
//! # 内容
//!
//! - [`logger`] - 日志 (rolling files + in-app pane)
//! - [`time`] - 可注入时钟, 日期解析
//! - [`validation`] - 长度常量与各记录类型的校验

pub mod logger;
pub mod time;
pub mod validation;

pub use time::{Clock, FixedClock, SystemClock};
