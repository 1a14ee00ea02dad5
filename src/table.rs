//! Read-only tabular projection of the employee collection.
//!
//! Columns are declared once in [`COLUMNS`] (title plus accessors). A
//! [`TableQuery`] narrows, orders and pages the collection the way the list
//! screen's grid does: multi-word case-insensitive search, single-column
//! sort, fixed page lengths.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::config::PAGE_SIZES;
use crate::employee::{Employee, display_date};

/// Value a column sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    /// Blank dates sort first.
    Date(Option<NaiveDate>),
}

/// One table column.
#[derive(Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    /// JSON key of the backing field.
    pub key: &'static str,
    cell: fn(&Employee) -> String,
    sort_key: fn(&Employee) -> SortKey,
}

impl Column {
    pub fn cell(&self, employee: &Employee) -> String {
        (self.cell)(employee)
    }

    pub fn sort_key(&self, employee: &Employee) -> SortKey {
        (self.sort_key)(employee)
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("key", &self.key)
            .finish()
    }
}

fn text(value: &str) -> SortKey {
    SortKey::Text(value.to_lowercase())
}

/// List columns, in display order.
pub const COLUMNS: &[Column] = &[
    Column {
        title: "First Name",
        key: "firstName",
        cell: |e| e.first_name.clone(),
        sort_key: |e| text(&e.first_name),
    },
    Column {
        title: "Last Name",
        key: "lastName",
        cell: |e| e.last_name.clone(),
        sort_key: |e| text(&e.last_name),
    },
    Column {
        title: "Start Date",
        key: "startDate",
        cell: |e| display_date(e.start_date),
        sort_key: |e| SortKey::Date(e.start_date),
    },
    Column {
        title: "Department",
        key: "department",
        cell: |e| e.department.to_string(),
        sort_key: |e| text(e.department.as_str()),
    },
    Column {
        title: "Date of Birth",
        key: "dateOfBirth",
        cell: |e| display_date(e.date_of_birth),
        sort_key: |e| SortKey::Date(e.date_of_birth),
    },
    Column {
        title: "Street",
        key: "street",
        cell: |e| e.street.clone(),
        sort_key: |e| text(&e.street),
    },
    Column {
        title: "City",
        key: "city",
        cell: |e| e.city.clone(),
        sort_key: |e| text(&e.city),
    },
    Column {
        title: "State",
        key: "state",
        cell: |e| e.state.clone(),
        sort_key: |e| text(&e.state),
    },
    Column {
        title: "Zip Code",
        key: "zipCode",
        cell: |e| e.zip_code.clone(),
        sort_key: |e| text(&e.zip_code),
    },
];

/// Find a column by title or JSON key, ignoring case and spaces.
pub fn column_index(name: &str) -> Option<usize> {
    let wanted: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase();
    COLUMNS.iter().position(|c| {
        c.key.to_lowercase() == wanted || c.title.replace(' ', "").to_lowercase() == wanted
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Search, sort and paging settings of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    search: String,
    sort: Option<(usize, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(PAGE_SIZES[0])
    }
}

impl TableQuery {
    /// Unsorted (insertion order), unfiltered, first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// New search text; back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    /// Sort by the column at `column`; an index past the column list
    /// leaves rows in insertion order.
    pub fn set_sort(&mut self, column: usize, direction: SortDirection) {
        self.sort = Some((column, direction));
    }

    /// Header click: ascending first, then flip on the same column.
    pub fn toggle_sort(&mut self, column: usize) {
        let direction = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.set_sort(column, direction);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// New page length; back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    fn matches(terms: &[String], cells: &[String]) -> bool {
        terms.iter().all(|term| {
            cells
                .iter()
                .any(|cell| cell.to_lowercase().contains(term.as_str()))
        })
    }

    /// Project `employees` through [`COLUMNS`] into the visible page.
    pub fn project(&self, employees: &[Employee]) -> TablePage {
        self.project_columns(COLUMNS, employees)
    }

    pub fn project_columns(&self, columns: &[Column], employees: &[Employee]) -> TablePage {
        let terms: Vec<String> = self
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let mut visible: Vec<(&Employee, Vec<String>)> = employees
            .iter()
            .map(|e| (e, columns.iter().map(|c| c.cell(e)).collect::<Vec<_>>()))
            .filter(|(_, cells)| Self::matches(&terms, cells))
            .collect();

        if let Some((column, direction)) = self
            .sort
            .and_then(|(col, dir)| columns.get(col).map(|c| (c, dir)))
        {
            // sort_by is stable: ties keep insertion order in both directions.
            visible.sort_by(|(a, _), (b, _)| {
                let ord: Ordering = column.sort_key(a).cmp(&column.sort_key(b));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        let filtered = visible.len();
        let page_count = filtered.div_ceil(self.page_size).max(1);
        let page = self.page.min(page_count - 1);
        let start = page * self.page_size;

        let rows = visible
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .map(|(e, cells)| TableRow { id: e.id, cells })
            .collect::<Vec<_>>();

        TablePage {
            first: if rows.is_empty() { 0 } else { start + 1 },
            last: start + rows.len(),
            rows,
            total: employees.len(),
            filtered,
            page,
            page_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: Option<u64>,
    /// One display string per entry of [`COLUMNS`].
    pub cells: Vec<String>,
}

/// One page of the projected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    pub rows: Vec<TableRow>,
    /// Size of the whole collection.
    pub total: usize,
    /// Rows left after search.
    pub filtered: usize,
    /// Zero-based page actually shown (clamped).
    pub page: usize,
    pub page_count: usize,
    /// One-based position of the first shown row, 0 when empty.
    pub first: usize,
    pub last: usize,
}

impl TablePage {
    /// `Showing 1 to 10 of 57 entries`, with a filter note when searching.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Showing {} to {} of {} entries",
            self.first, self.last, self.filtered
        );
        if self.filtered != self.total {
            text.push_str(&format!(" (filtered from {} total entries)", self.total));
        }
        text
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}
