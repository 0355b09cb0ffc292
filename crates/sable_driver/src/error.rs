//! Driver Errors
//!
//! 驱动层的错误类型。源码中的问题以诊断形式报告，这里只描述流程本身的失败。

use std::io;
use std::path::PathBuf;

use sable_diagnostics::{Diagnostic, SourceId};
use thiserror::Error;

/// 驱动错误
#[derive(Debug, Error)]
pub enum DriverError {
    /// 读取源文件失败
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 句柄不属于当前会话
    #[error("unknown source {0}")]
    UnknownSource(SourceId),

    /// 写出诊断失败
    #[error("failed to render diagnostics: {0}")]
    Render(#[from] io::Error),
}

impl DriverError {
    /// 转换为不带位置的诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error().with_message(self.to_string())
    }
}

/// 驱动结果类型
pub type DriverResult<T> = Result<T, DriverError>;
