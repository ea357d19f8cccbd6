//! Client-side table state: one sort column and a page cursor.
//!
//! List pages fetch up to `tables.fetch_limit` rows once and let the user
//! sort and page through them locally. Clicking a header cycles
//! ascending → descending → unsorted.

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A sortable column of rows of type `T`.
pub trait SortColumn<T>: Copy + PartialEq {
    fn compare(self, a: &T, b: &T) -> Ordering;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableState<K> {
    sort: Option<(K, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl<K: Copy + PartialEq> TableState<K> {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn sorted_by(mut self, key: K, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    pub fn toggle_sort(&mut self, key: K) {
        self.sort = match self.sort {
            Some((k, SortDirection::Asc)) if k == key => Some((key, SortDirection::Desc)),
            Some((k, SortDirection::Desc)) if k == key => None,
            _ => Some((key, SortDirection::Asc)),
        };
        self.page = 0;
    }

    pub fn direction(&self, key: K) -> Option<SortDirection> {
        self.sort.filter(|(k, _)| *k == key).map(|(_, d)| d)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    pub fn can_prev(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }

    /// `Menampilkan 11-20 dari 42`
    pub fn range_label(&self, total: usize) -> String {
        if total == 0 {
            return "Tidak ada data".to_string();
        }
        let page = self.page.min(self.page_count(total) - 1);
        let start = page * self.page_size + 1;
        let end = (start + self.page_size - 1).min(total);
        format!("Menampilkan {start}-{end} dari {total}")
    }

    /// Sort `rows` by the active column and cut out the current page.
    pub fn apply<'a, T>(&self, rows: &'a [T]) -> Vec<&'a T>
    where
        K: SortColumn<T>,
    {
        let mut view: Vec<&T> = rows.iter().collect();
        if let Some((key, direction)) = self.sort {
            view.sort_by(|a, b| {
                let ord = key.compare(a, b);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        let page = self.page.min(self.page_count(rows.len()) - 1);
        view.into_iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .collect()
    }
}

/// Case-insensitive text comparison for sort columns.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Col {
        Name,
        Size,
    }

    impl SortColumn<(&'static str, u32)> for Col {
        fn compare(self, a: &(&'static str, u32), b: &(&'static str, u32)) -> Ordering {
            match self {
                Col::Name => compare_text(a.0, b.0),
                Col::Size => a.1.cmp(&b.1),
            }
        }
    }

    const ROWS: [(&str, u32); 5] = [("delta", 4), ("Alpha", 9), ("charlie", 1), ("bravo", 7), ("echo", 3)];

    #[test]
    fn test_toggle_cycles() {
        let mut state = TableState::new(10);
        state.toggle_sort(Col::Name);
        assert_eq!(state.direction(Col::Name), Some(SortDirection::Asc));
        assert_eq!(state.direction(Col::Size), None);
        state.toggle_sort(Col::Name);
        assert_eq!(state.direction(Col::Name), Some(SortDirection::Desc));
        state.toggle_sort(Col::Name);
        assert_eq!(state.direction(Col::Name), None);
        state.toggle_sort(Col::Name);
        state.toggle_sort(Col::Size);
        assert_eq!(state.direction(Col::Size), Some(SortDirection::Asc));
    }

    #[test]
    fn test_sort_and_page() {
        let mut state = TableState::new(2).sorted_by(Col::Name, SortDirection::Asc);
        let names: Vec<&str> = state.apply(&ROWS).iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["Alpha", "bravo"]);

        state.set_page(2, ROWS.len());
        let names: Vec<&str> = state.apply(&ROWS).iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["echo"]);
        assert!(!state.can_next(ROWS.len()));
        assert_eq!(state.range_label(ROWS.len()), "Menampilkan 5-5 dari 5");

        state.toggle_sort(Col::Size);
        assert_eq!(state.page(), 0);
        state.toggle_sort(Col::Size);
        let sizes: Vec<u32> = state.apply(&ROWS).iter().map(|r| r.1).collect();
        assert_eq!(sizes, vec![9, 7]);
    }

    #[test]
    fn test_page_clamps_when_rows_shrink() {
        let mut state: TableState<Col> = TableState::new(2);
        state.set_page(9, ROWS.len());
        assert_eq!(state.page(), 2);
        assert_eq!(state.apply(&ROWS[..1]).len(), 1);
        assert_eq!(state.range_label(0), "Tidak ada data");
        assert_eq!(state.page_count(0), 1);
    }
}
