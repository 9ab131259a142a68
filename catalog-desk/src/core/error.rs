use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("终端错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeskError>;
