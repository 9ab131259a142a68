use anyhow::Context;
use catalog_desk::utils::logger::LOG_RETENTION_DAYS;
use catalog_desk::{
    Clock, Config, Schema, SystemClock, build_state, cleanup_old_logs, init_logger_with_file, tui,
};
use shared::{Item, Product};

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let _guard = init_logger_with_file(&config.log_level, &config.log_dir())
        .context("failed to initialize logging")?;

    match cleanup_old_logs(&config.log_dir(), SystemClock.today(), LOG_RETENTION_DAYS) {
        Ok(0) => {}
        Ok(n) => tracing::info!(removed = n, "Cleaned up old log files"),
        Err(e) => tracing::warn!(error = %e, "Failed to clean up old log files"),
    }

    tracing::info!(
        schema = ?config.schema,
        work_dir = %config.work_dir.display(),
        persist = config.persists(),
        "Catalog desk starting..."
    );

    // 2. 按记录类型启动终端界面
    match config.schema {
        Schema::Product => tui::run(build_state::<Product>(&config)?)?,
        Schema::Item => tui::run(build_state::<Item>(&config)?)?,
    }

    tracing::info!("Catalog desk stopped");
    Ok(())
}
