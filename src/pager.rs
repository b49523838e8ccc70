//! Fixed-size, 1-based paging over an already ordered sequence.

/// Items per page on every listing endpoint.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// One page window plus the size of the full sequence it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total: usize,
}

impl<T> Page<T> {
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Normalize a raw `page` query value: absent, non-numeric or < 1 means page 1.
pub fn page_number(raw: Option<&str>) -> usize {
  raw
    .and_then(|s| s.trim().parse::<usize>().ok())
    .filter(|p| *p >= 1)
    .unwrap_or(1)
}

/// Page number from a raw query string. Only the first `page` pair counts;
/// repeats and unparseable values never fail the request.
pub fn page_from_query(query: Option<&str>) -> usize {
  let first = query
    .unwrap_or("")
    .split('&')
    .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
    .find(|(key, _)| *key == "page")
    .map(|(_, value)| value);
  page_number(first)
}

/// Cut `sequence[(page-1)*size .. page*size]` with clamped bounds.
/// An out-of-range page yields an empty window; `total` is always the full length.
pub fn paginate<T: Clone>(sequence: &[T], page: usize, page_size: usize) -> Page<T> {
  let total = sequence.len();
  let page = page.max(1);
  let start = (page - 1).saturating_mul(page_size).min(total);
  let end = start.saturating_add(page_size).min(total);
  Page { items: sequence[start..end].to_vec(), total }
}
