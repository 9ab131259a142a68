use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::error::DeskError;

/// Which record schema the desk manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schema {
    /// Products with price, category, release date, stock and status (persisted)
    #[default]
    Product,
    /// Items with a unique name and a description (in memory)
    Item,
}

impl FromStr for Schema {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "produk" => Ok(Self::Product),
            "item" => Ok(Self::Item),
            other => Err(DeskError::Config(format!("unknown schema: {other}"))),
        }
    }
}

/// 应用配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 也会被加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库 + 日志) |
/// | SCHEMA | product | `product` 或 `item` |
/// | STORAGE_KEY | products | 存储 blob 的键 |
/// | PERSIST | true | 是否持久化 (仅 product) |
/// | NOTIFY_TIMEOUT_MS | 3000 | 通知自动关闭(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
///
/// # 示例
///
/// ```ignore
/// SCHEMA=item WORK_DIR=/tmp/desk cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: PathBuf,
    pub schema: Schema,
    /// Key of the persisted blob
    pub storage_key: String,
    pub persist: bool,
    /// 通知自动关闭时间 (毫秒)
    pub notify_timeout_ms: u64,
    pub log_level: String,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, DeskError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DeskError> {
        let defaults = Self::default();

        let schema = match lookup("SCHEMA") {
            Some(s) => s.parse()?,
            None => defaults.schema,
        };

        Ok(Self {
            work_dir: lookup("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            schema,
            storage_key: lookup("STORAGE_KEY").unwrap_or(defaults.storage_key),
            persist: lookup("PERSIST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.persist),
            notify_timeout_ms: lookup("NOTIFY_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notify_timeout_ms),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Embedded database file
    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join("catalog.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }

    /// Only the product schema is ever persisted
    pub fn persists(&self) -> bool {
        self.persist && self.schema == Schema::Product
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("./data"),
            schema: Schema::Product,
            storage_key: "products".into(),
            persist: true,
            notify_timeout_ms: 3000,
            log_level: "info".into(),
        }
    }
}
