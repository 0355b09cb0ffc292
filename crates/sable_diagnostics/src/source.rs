//! Source - 源码注册表
//!
//! 持有所有源码文本与文件名，并为每个源码分配稳定的 [`SourceId`]。
//! 下游结构（Span、行索引缓存、报告器）只保存句柄，不持有源码。

use std::collections::HashMap;
use std::fmt;

/// 源码句柄
///
/// 由 [`SourceMap`] 按注册顺序分配，在整个会话期间保持不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u32);

impl SourceId {
    /// 句柄在注册表中的下标
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 一份不可变的源码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    content: String,
    filename: String,
}

impl Source {
    pub fn new(content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// 源码字节长度
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// 源码注册表
///
/// 只追加、不删除。同一文件名重复注册时返回已有的句柄，新内容被忽略。
#[derive(Debug, Default)]
pub struct SourceMap {
    sources: Vec<Source>,
    by_name: HashMap<String, SourceId>,
}

impl SourceMap {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册源码，返回其句柄
    pub fn add(&mut self, content: impl Into<String>, filename: impl Into<String>) -> SourceId {
        let filename = filename.into();
        if let Some(&id) = self.by_name.get(&filename) {
            tracing::debug!(%filename, %id, "source already registered, keeping first content");
            return id;
        }

        let id = SourceId(self.sources.len() as u32);
        self.by_name.insert(filename.clone(), id);
        self.sources.push(Source::new(content, filename));
        id
    }

    /// 按文件名查找句柄
    pub fn lookup(&self, filename: &str) -> Option<SourceId> {
        self.by_name.get(filename).copied()
    }

    /// 按句柄取源码
    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.index())
    }

    /// 已注册源码数量
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 按注册顺序遍历所有源码
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &Source)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, source)| (SourceId(index as u32), source))
    }
}
