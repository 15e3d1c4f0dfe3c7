// ==========================================
// 供应商质量管理门户 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置存储锁获取失败: {0}")]
    LockError(String),

    #[error("配置读写失败: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("配置快照格式错误: {0}")]
    SnapshotFormatError(#[from] serde_json::Error),

    #[error("配置值非法 (key={key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
