//! Catalog Desk - 商品目录管理终端
//!
//! # 架构概述
//!
//! A single-user form + table for managing a product catalog:
//!
//! - **校验** (`utils::validation`): field rules, errors collected per field
//! - **存储** (`storage`): the record list as one JSON blob in redb
//! - **目录** (`catalog`): record store, form controller, notifier
//! - **状态** (`core::state`): one `update` function consuming every intent
//! - **终端** (`tui`): ratatui front end with a modal delete confirmation
//!
//! # 模块结构
//!
//! ```text
//! catalog-desk/src/
//! ├── core/          # 配置、状态、错误
//! ├── catalog/       # Record, RecordStore, FormController, Notifier
//! ├── storage/       # redb + 内存存储
//! ├── tui/           # 终端界面
//! └── utils/         # 日志、时间、校验
//! ```

pub mod catalog;
pub mod core;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export 公共类型
pub use catalog::{FormController, FormMode, Notifier, Record, RecordStore, Severity};
pub use core::{Config, Confirm, DeskError, DeskState, Schema, open_store};
pub use storage::{MemoryStorage, RecordStorage, RedbStorage, StorageError};
pub use utils::{Clock, FixedClock, SystemClock};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// Build the state for schema `R` from the configuration
pub fn build_state<R: Record>(config: &Config) -> core::Result<DeskState<R>> {
    let store = open_store::<R>(config)?;
    let notifier = Notifier::new(config.notify_timeout());
    Ok(DeskState::new(store, notifier, Box::new(SystemClock)))
}
