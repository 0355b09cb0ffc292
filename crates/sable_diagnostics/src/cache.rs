//! Cache - 行索引缓存
//!
//! 把字节偏移映射到从 1 开始的物理行。每个源码的行表在首次注册时
//! 一次线性扫描构建，之后不再失效（源码不可变）。

use std::collections::HashMap;

use crate::source::{Source, SourceId, SourceMap};
use crate::span::Span;

/// 一个物理行，`[start, stop)` 不包含结尾的 `\n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub stop: usize,
    /// 行号，从 1 开始
    pub number: usize,
}

impl Line {
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// 偏移是否落在本行
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.stop
    }

    /// 区间 `[start, stop)` 是否与本行相交
    pub fn overlaps(&self, start: usize, stop: usize) -> bool {
        self.start < stop && start < self.stop
    }
}

/// 单个源码的行表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<Line>,
    len: usize,
}

impl LineIndex {
    /// 扫描源码构建行表
    pub fn build(content: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (offset, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                lines.push(Line {
                    start,
                    stop: offset,
                    number: lines.len() + 1,
                });
                start = offset + 1;
            }
        }
        if start < content.len() {
            lines.push(Line {
                start,
                stop: content.len(),
                number: lines.len() + 1,
            });
        }

        Self {
            lines,
            len: content.len(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 包含偏移的行
    pub fn line_containing(&self, offset: usize) -> Option<&Line> {
        let index = self.lines.partition_point(|line| line.stop <= offset);
        self.lines.get(index).filter(|line| line.contains(offset))
    }

    /// 与 `[start, stop)` 相交的连续行，按行号升序
    ///
    /// 空区间按其起点所在的行解析（行尾的 `\n` 归入该行）；起点恰好位于文本末尾时取最后一行。
    pub fn lines_overlapping(&self, start: usize, stop: usize) -> &[Line] {
        if start > stop || stop > self.len {
            return &[];
        }

        if start == stop {
            let index = self.lines.partition_point(|line| line.stop < start);
            return match self.lines.get(index) {
                Some(line) if line.start <= start => &self.lines[index..=index],
                _ if start == self.len && !self.lines.is_empty() => {
                    &self.lines[self.lines.len() - 1..]
                }
                _ => &[],
            };
        }

        let first = self.lines.partition_point(|line| line.stop <= start);
        let last = self.lines.partition_point(|line| line.start < stop);
        if first >= last {
            return &[];
        }
        &self.lines[first..last]
    }
}

/// 缓存条目：源码与其行表
#[derive(Debug, Clone, Copy)]
pub struct CacheEntry<'a> {
    pub source: &'a Source,
    pub index: &'a LineIndex,
}

impl<'a> CacheEntry<'a> {
    pub fn filename(&self) -> &'a str {
        self.source.filename()
    }

    pub fn content(&self) -> &'a str {
        self.source.content()
    }
}

/// 报告缓存
///
/// 借用源码注册表；只有注册过的源码才能在报告中解析出代码片段。
#[derive(Debug)]
pub struct ReportCache<'a> {
    sources: &'a SourceMap,
    entries: HashMap<SourceId, LineIndex>,
}

impl<'a> ReportCache<'a> {
    pub fn new(sources: &'a SourceMap) -> Self {
        Self {
            sources,
            entries: HashMap::new(),
        }
    }

    pub fn sources(&self) -> &'a SourceMap {
        self.sources
    }

    /// 注册源码，首次注册时构建行表；未知句柄返回 `false`
    pub fn register(&mut self, id: SourceId) -> bool {
        if self.entries.contains_key(&id) {
            return true;
        }
        let Some(source) = self.sources.get(id) else {
            return false;
        };

        let index = LineIndex::build(source.content());
        tracing::debug!(
            filename = source.filename(),
            lines = index.line_count(),
            "built line index"
        );
        self.entries.insert(id, index);
        true
    }

    /// 注册注册表中的全部源码
    pub fn register_all(&mut self) {
        for (id, _) in self.sources.iter() {
            self.register(id);
        }
    }

    pub fn is_registered(&self, id: SourceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn entry(&self, id: SourceId) -> Option<CacheEntry<'_>> {
        let index = self.entries.get(&id)?;
        let source = self.sources.get(id)?;
        Some(CacheEntry { source, index })
    }

    /// 与 span 相交的行；源码未注册时为空
    pub fn lines_overlapping(&self, span: &Span) -> &[Line] {
        match self.entries.get(&span.source) {
            Some(index) => index.lines_overlapping(span.start, span.stop),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn line(start: usize, stop: usize, number: usize) -> Line {
        Line {
            start,
            stop,
            number,
        }
    }

    #[test]
    fn test_build_terminated_lines() {
        let index = LineIndex::build("ab\ncd\n");
        assert_eq!(index.lines(), &[line(0, 2, 1), line(3, 5, 2)]);
    }

    #[test]
    fn test_build_unterminated_tail() {
        let index = LineIndex::build("ab\ncd");
        assert_eq!(index.lines(), &[line(0, 2, 1), line(3, 5, 2)]);
    }

    #[test]
    fn test_build_empty_lines() {
        let index = LineIndex::build("\n\nx");
        assert_eq!(
            index.lines(),
            &[line(0, 0, 1), line(1, 1, 2), line(2, 3, 3)]
        );
    }

    #[test]
    fn test_build_empty_source() {
        assert_eq!(LineIndex::build("").line_count(), 0);
    }

    #[test]
    fn test_line_containing() {
        let index = LineIndex::build("one\ntwo\nthree");
        assert_eq!(index.line_containing(0).map(|l| l.number), Some(1));
        assert_eq!(index.line_containing(5).map(|l| l.number), Some(2));
        assert_eq!(index.line_containing(3), None);
        assert_eq!(index.line_containing(12).map(|l| l.number), Some(3));
        assert_eq!(index.line_containing(13), None);
    }

    #[test]
    fn test_overlapping_single_line() {
        let index = LineIndex::build("one\ntwo\nthree");
        let lines = index.lines_overlapping(4, 7);
        assert_eq!(lines, &[line(4, 7, 2)]);
    }

    #[test]
    fn test_overlapping_crosses_boundary() {
        let index = LineIndex::build("one\ntwo\nthree");
        let numbers: Vec<_> = index
            .lines_overlapping(2, 10)
            .iter()
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_overlapping_out_of_bounds() {
        let index = LineIndex::build("one\ntwo");
        assert!(index.lines_overlapping(5, 40).is_empty());
        assert!(index.lines_overlapping(3, 2).is_empty());
    }

    #[test]
    fn test_overlapping_newline_only() {
        let index = LineIndex::build("one\ntwo");
        assert!(index.lines_overlapping(3, 4).is_empty());
    }

    #[test]
    fn test_zero_length_span_resolves_to_line() {
        let index = LineIndex::build("one\ntwo");
        assert_eq!(index.lines_overlapping(5, 5), &[line(4, 7, 2)]);
        assert_eq!(index.lines_overlapping(7, 7), &[line(4, 7, 2)]);
        assert_eq!(index.lines_overlapping(3, 3), &[line(0, 3, 1)]);

        let trailing = LineIndex::build("a =\n");
        assert_eq!(trailing.lines_overlapping(4, 4), &[line(0, 3, 1)]);
    }

    #[test]
    fn test_entry_text_outlives_entry() {
        let mut map = SourceMap::new();
        let id = map.add("a\nb", "main.sable");
        let mut cache = ReportCache::new(&map);
        cache.register(id);

        let (name, content) = match cache.entry(id) {
            Some(entry) => (entry.filename(), entry.content()),
            None => ("", ""),
        };
        assert_eq!(name, "main.sable");
        assert_eq!(content, "a\nb");
    }

    #[test]
    fn test_cache_register_is_idempotent() {
        let mut map = SourceMap::new();
        let id = map.add("a\nb", "main.sable");
        let mut cache = ReportCache::new(&map);

        assert!(!cache.is_registered(id));
        assert!(cache.register(id));
        assert!(cache.register(id));
        assert_eq!(cache.entry(id).map(|e| e.index.line_count()), Some(2));
        assert_eq!(cache.entry(id).map(|e| e.filename()), Some("main.sable"));
    }

    #[test]
    fn test_cache_unregistered_source() {
        let mut map = SourceMap::new();
        let id = map.add("a\nb", "main.sable");
        let cache = ReportCache::new(&map);

        assert!(cache.entry(id).is_none());
        assert!(cache.lines_overlapping(&Span::new(id, 0, 1)).is_empty());
    }

    #[test]
    fn test_cache_register_all() {
        let mut map = SourceMap::new();
        let a = map.add("a", "a.sable");
        let b = map.add("b", "b.sable");
        let mut cache = ReportCache::new(&map);
        cache.register_all();

        assert!(cache.is_registered(a));
        assert!(cache.is_registered(b));
        assert_eq!(cache.lines_overlapping(&Span::new(b, 0, 1)).len(), 1);
    }

    proptest! {
        #[test]
        fn lines_partition_source(text in "[a-c \n]{0,64}") {
            let index = LineIndex::build(&text);
            let lines = index.lines();

            if let Some(first) = lines.first() {
                prop_assert_eq!(first.start, 0);
            }
            for (i, pair) in lines.windows(2).enumerate() {
                prop_assert_eq!(pair[0].number, i + 1);
                prop_assert_eq!(pair[1].number, i + 2);
                prop_assert_eq!(pair[1].start, pair[0].stop + 1);
                prop_assert_eq!(text.as_bytes()[pair[0].stop], b'\n');
            }
            if let Some(last) = lines.last() {
                prop_assert!(last.stop == text.len() || last.stop + 1 == text.len());
            }

            for (offset, byte) in text.bytes().enumerate() {
                let containing = lines.iter().filter(|l| l.contains(offset)).count();
                let expected = if byte == b'\n' { 0 } else { 1 };
                prop_assert_eq!(containing, expected);
            }
        }

        #[test]
        fn overlapping_matches_linear_scan(
            text in "[ab\n]{0,48}",
            a in 0usize..48,
            b in 0usize..48,
        ) {
            let index = LineIndex::build(&text);
            let (start, stop) = (a.min(b).min(text.len()), a.max(b).min(text.len()));
            prop_assume!(start < stop);

            let expected: Vec<Line> = index
                .lines()
                .iter()
                .filter(|l| l.overlaps(start, stop))
                .copied()
                .collect();
            prop_assert_eq!(index.lines_overlapping(start, stop), expected.as_slice());
        }
    }
}
