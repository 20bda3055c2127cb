// SPDX-License-Identifier: GPL-3.0-or-later
use std::future::Future;

use discographer_catalog::{CatalogError, Page};
use tracing::debug;

use crate::retry::{RetryPolicy, Sleeper};

/// Collect every item of a paginated listing, in page order.
///
/// `first` fetches the opening page; `next` fetches the page behind a cursor.
/// Both go through `retry`. An empty listing is a valid result.
pub async fn collect_pages<T, S, F, Fut, N, NFut>(
    retry: &RetryPolicy<S>,
    mut first: F,
    mut next: N,
) -> Result<Vec<T>, CatalogError>
where
    S: Sleeper,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Page<T>, CatalogError>>,
    N: FnMut(String) -> NFut,
    NFut: Future<Output = Result<Page<T>, CatalogError>>,
{
    let mut page = retry.call(&mut first).await?;
    // `total` is reported by the server and only informational
    let mut items = Vec::with_capacity(page.items.len());
    let mut pages = 1usize;

    loop {
        items.extend(page.items);
        let Some(cursor) = page.next else {
            break;
        };

        page = retry.call(|| next(cursor.clone())).await?;
        pages += 1;
    }

    debug!(target: "pager", pages, items = items.len(), "pagination complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSleeper;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    fn policy() -> RetryPolicy<RecordingSleeper> {
        RetryPolicy::with_sleeper(RecordingSleeper::default())
    }

    /// Pages addressed by cursor "page:N".
    fn book(pages: Vec<Vec<u32>>) -> Vec<Page<u32>> {
        let count = pages.len();
        pages
            .into_iter()
            .enumerate()
            .map(|(index, items)| {
                let next = (index + 1 < count).then(|| format!("page:{}", index + 1));
                Page::new(items, next)
            })
            .collect()
    }

    fn index(cursor: &str) -> usize {
        cursor.trim_start_matches("page:").parse().unwrap()
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let pages = &book(vec![vec![1, 2, 3], vec![4], vec![5, 6]]);
        let retry = policy();

        let items = collect_pages(
            &retry,
            || async move { Ok(pages[0].clone()) },
            |cursor| async move { Ok(pages[index(&cursor)].clone()) },
        )
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn output_length_is_sum_of_page_lengths() {
        let shapes: [&[usize]; 4] = [&[0], &[50, 50, 7], &[1, 0, 1], &[3; 10]];

        for shape in shapes {
            let pages = &book(
                shape
                    .iter()
                    .map(|len| (0..*len as u32).collect())
                    .collect(),
            );
            let retry = policy();

            let items = collect_pages(
                &retry,
                || async move { Ok(pages[0].clone()) },
                |cursor| async move { Ok(pages[index(&cursor)].clone()) },
            )
            .await
            .unwrap();

            assert_eq!(items.len(), shape.iter().sum::<usize>());
        }
    }

    #[tokio::test]
    async fn oversized_reported_total_is_ignored() {
        let retry = policy();
        let mut page = Page::new(vec![7u32], None);
        page.total = Some(u32::MAX);
        let page = &page;

        let items = collect_pages(
            &retry,
            || async move { Ok(page.clone()) },
            |_cursor| async { Err(CatalogError::fatal("no next page expected")) },
        )
        .await
        .unwrap();

        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn empty_listing_is_not_an_error() {
        let retry = policy();
        let items: Vec<u32> = collect_pages(
            &retry,
            || async { Ok(Page::new(Vec::new(), None)) },
            |_cursor| async { Err(CatalogError::fatal("no next page expected")) },
        )
        .await
        .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn next_page_requests_are_retried() {
        let pages = &book(vec![vec![1], vec![2]]);
        let failures = &Mutex::new(VecDeque::from(vec![CatalogError::RateLimited {
            retry_after: Some(Duration::from_secs(1)),
        }]));
        let retry = policy();

        let items = collect_pages(
            &retry,
            || async move { Ok(pages[0].clone()) },
            |cursor| async move {
                if let Some(error) = failures.lock().unwrap().pop_front() {
                    return Err(error);
                }
                Ok(pages[index(&cursor)].clone())
            },
        )
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(retry.sleeper().slept(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn fatal_error_on_later_page_aborts() {
        let pages = &book(vec![vec![1], vec![2]]);
        let retry = policy();

        let result = collect_pages(
            &retry,
            || async move { Ok(pages[0].clone()) },
            |_cursor| async { Err(CatalogError::fatal("403 - forbidden")) },
        )
        .await;

        assert_eq!(result, Err(CatalogError::fatal("403 - forbidden")));
    }
}
