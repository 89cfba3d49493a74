//! # Page Entity
//!
//! カーソル方式でページングされた一覧の1ページ

/// 一覧の1ページ
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// このページの要素
    pub items: Vec<T>,
    /// 続きのページがあるか
    pub has_more: bool,
    /// 次のページを取得するためのカーソル
    pub cursor: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool, cursor: i64) -> Self {
        Self {
            items,
            has_more,
            cursor,
        }
    }

    /// 最終ページ（続きなし）
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false, 0)
    }

    /// 空の最終ページ
    pub fn empty() -> Self {
        Self::last(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
