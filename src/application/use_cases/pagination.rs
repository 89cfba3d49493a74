//! # Pagination
//!
//! カーソル方式の一覧を件数制限まで収集する

use std::future::Future;

use anyhow::Result;
use log::{debug, warn};

use crate::domain::entities::Page;

/// 進捗を通知する間隔（件数）
pub const PROGRESS_INTERVAL: usize = 10;

/// 進捗通知のコールバック（収集済み件数を受け取る）
pub type ProgressFn<'a> = &'a (dyn Fn(usize) + Send + Sync);

/// 何もしない進捗コールバック
pub fn no_progress(_count: usize) {}

/// ページを順に取得して `limit` 件まで集める
///
/// 次の条件のいずれかで停止する:
///
/// - `limit` 件に達した
/// - APIが続きなし（`has_more == false`）と返した
/// - 空のページが返った
/// - カーソルが進まなかった
///
/// # Arguments
///
/// * `limit` - 最大件数
/// * `fetch` - カーソルを受け取り1ページ取得する関数（初回は 0）
/// * `progress` - [`PROGRESS_INTERVAL`] 件ごとに呼ばれるコールバック
///
/// # Errors
///
/// ページの取得に失敗した場合、そのエラーをそのまま返す
pub async fn collect_pages<T, F, Fut>(
    limit: usize,
    mut fetch: F,
    progress: ProgressFn<'_>,
) -> Result<Vec<T>>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor = 0_i64;

    while items.len() < limit {
        let page = fetch(cursor).await?;
        debug!(
            "Fetched page at cursor {}: {} items (has_more: {}, next cursor: {})",
            cursor,
            page.items.len(),
            page.has_more,
            page.cursor
        );

        if page.items.is_empty() {
            break;
        }

        for item in page.items {
            if items.len() >= limit {
                break;
            }
            items.push(item);
            if items.len() % PROGRESS_INTERVAL == 0 {
                progress(items.len());
            }
        }

        if !page.has_more {
            break;
        }
        if page.cursor == cursor {
            warn!("Pagination cursor did not advance ({}), stopping", cursor);
            break;
        }
        cursor = page.cursor;
    }

    Ok(items)
}
