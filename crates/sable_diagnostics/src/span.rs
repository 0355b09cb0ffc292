//! Span - 源码位置信息
//!
//! 表示某个源码中的半开字节区间 `[start, stop)`

use std::fmt;
use std::ops::Range;

use crate::source::SourceId;

/// 源码位置范围 (字节偏移)
///
/// 相等与哈希按 (源码句柄, start, stop) 结构比较，可直接作为缓存键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub source: SourceId,
    pub start: usize,
    pub stop: usize,
}

/// 词法单元上使用的位置，与 [`Span`] 是同一类型
pub type Location = Span;

impl Span {
    /// 创建一个新的 Span
    ///
    /// 不校验 `start <= stop`；颠倒或越界的区间在渲染时只输出标题行。
    pub fn new(source: SourceId, start: usize, stop: usize) -> Self {
        Self {
            source,
            start,
            stop,
        }
    }

    /// 获取长度
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }

    /// 字节区间
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    /// 是否包含偏移
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.stop
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.source, self.start, self.stop)
    }
}
