// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::LogConfig;
use crate::core::KspResult;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 初始化日志系统
///
/// `config.to_file` 为 true 时写入按大小轮转的日志文件（异步写入），
/// 否则输出到 stderr。重复初始化时只替换级别设置。
///
/// # Examples
/// ```no_run
/// use kpaths::config::LogConfig;
/// use kpaths::utils::logging;
///
/// let config = LogConfig::default();
/// logging::init(&config).expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> KspResult<()> {
    let mut guard = LOGGER_HANDLE.lock();
    if let Some(handle) = guard.as_mut() {
        handle.parse_new_spec(&config.level)?;
        return Ok(());
    }

    let logger = Logger::try_with_str(&config.level)?;
    let handle = if config.to_file {
        logger
            .log_to_file(
                FileSpec::default()
                    .basename(&config.file)
                    .directory(&config.dir),
            )
            .rotate(
                Criterion::Size(config.max_file_size),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.max_files),
            )
            .write_mode(WriteMode::Async)
            .append()
            .start()?
    } else {
        logger.log_to_stderr().start()?
    };

    // 保存句柄供后续 flush 使用
    *guard = Some(handle);
    drop(guard);

    if config.to_file {
        log::info!("日志系统初始化完成: {}/{}", config.dir, config.file);
    }
    Ok(())
}

/// 刷新日志
///
/// 在程序退出前调用，确保所有异步日志都已写入文件。
/// 句柄保留，`log` 门面只能设置一次全局 logger。
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().as_ref() {
        handle.flush();
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
