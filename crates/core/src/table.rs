//! Patient table pipeline: search, sort, paginate.
//!
//! The visible page is always recomputed from scratch:
//!
//! ```text
//! paginate(sort(search(patients, query), field, direction), page, page_size)
//! ```
//!
//! Sorting here is the only sort in the system. It never reorders the register itself.

use crate::constants::{PAGE_SIZE, PAGE_WINDOW};
use crate::patient::Patient;
use crate::store::PatientStore;
use crate::PatientError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A patient attribute the table can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Nik,
    Diagnosis,
    AdmissionDate,
    Doctor,
    Room,
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Id,
        SortField::Name,
        SortField::Nik,
        SortField::Diagnosis,
        SortField::AdmissionDate,
        SortField::Doctor,
        SortField::Room,
        SortField::CreatedAt,
    ];

    /// Columns with a clickable sort header.
    pub const TABLE_COLUMNS: [SortField; 2] = [SortField::Name, SortField::AdmissionDate];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Nik => "nik",
            SortField::Diagnosis => "diagnosis",
            SortField::AdmissionDate => "admissionDate",
            SortField::Doctor => "doctor",
            SortField::Room => "room",
            SortField::CreatedAt => "createdAt",
        }
    }

    /// Native ordering of the field's value. Dates compare as ISO strings or timestamps.
    pub fn compare(self, a: &Patient, b: &Patient) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Nik => a.nik.cmp(&b.nik),
            SortField::Diagnosis => a.diagnosis.cmp(&b.diagnosis),
            SortField::AdmissionDate => a.admission_date.cmp(&b.admission_date),
            SortField::Doctor => a.doctor.cmp(&b.doctor),
            SortField::Room => a.room.cmp(&b.room),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect();

        SortField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(&key))
            .ok_or_else(|| PatientError::InvalidInput(format!("unknown sort field: {}", s)))
    }
}

/// Current sort selection of the table. No field means register order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Header click: the same field flips direction, a new field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        self.direction = if self.field == Some(field) {
            self.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.field = Some(field);
    }

    pub fn apply(&self, patients: &[Patient]) -> Vec<Patient> {
        match self.field {
            Some(field) => sort_patients(patients, field, self.direction),
            None => patients.to_vec(),
        }
    }
}

/// Case-insensitive substring match on name, or raw substring match on NIK.
///
/// A blank query returns every patient in register order.
pub fn search_patients(patients: &[Patient], query: &str) -> Vec<Patient> {
    if query.trim().is_empty() {
        return patients.to_vec();
    }

    let term = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term) || p.nik.contains(&term))
        .cloned()
        .collect()
}

/// Stable sort on a copy; ties keep their incoming order in both directions.
pub fn sort_patients(
    patients: &[Patient],
    field: SortField,
    direction: SortDirection,
) -> Vec<Patient> {
    let mut sorted = patients.to_vec();
    sorted.sort_by(|a, b| {
        let ord = field.compare(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// The 1-based `page` of `items`.
///
/// The page is not clamped: callers pass a page from [`Pagination::clamp`]. A page past
/// the end yields an empty slice.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items.iter().skip(start).take(page_size).cloned().collect()
}

/// Page navigation state for the pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Bring a requested page into `[1, total_pages]`; with no pages, page 1.
    pub fn clamp(&self, page: usize) -> usize {
        page.min(self.total_pages).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn next(&self) -> usize {
        if self.has_next() {
            self.current_page + 1
        } else {
            self.current_page
        }
    }

    pub fn previous(&self) -> usize {
        if self.has_previous() {
            self.current_page - 1
        } else {
            self.current_page
        }
    }

    pub fn first(&self) -> usize {
        1
    }

    pub fn last(&self) -> usize {
        self.total_pages.max(1)
    }

    /// The control is hidden when everything fits on one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Page buttons to show: at most [`PAGE_WINDOW`], centred on the current page where
    /// possible.
    pub fn visible_pages(&self) -> Vec<usize> {
        let total = self.total_pages;
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }

        let half = PAGE_WINDOW / 2;
        let start = if self.current_page <= half + 1 {
            1
        } else if self.current_page + half >= total {
            total + 1 - PAGE_WINDOW
        } else {
            self.current_page - half
        };
        (start..start + PAGE_WINDOW).collect()
    }
}

/// What the table view should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableStatus {
    Loading,
    /// The register itself is empty.
    NoPatients,
    /// The register has patients but none match the query.
    NoSearchResults,
    Rows,
}

/// One rendered page of the patient table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub rows: Vec<Patient>,
    #[serde(flatten)]
    pub pagination: Pagination,
    pub total_matches: usize,
    pub total_patients: usize,
    pub status: TableStatus,
}

impl TablePage {
    /// Caption under the search box.
    pub fn summary(&self) -> String {
        format!(
            "Menampilkan {} dari {} pasien",
            self.rows.len(),
            self.total_matches
        )
    }
}

/// Pure page computation over an already searched result set.
pub fn build_page(
    matches: &[Patient],
    sort: &SortState,
    page: usize,
    page_size: usize,
) -> (Vec<Patient>, Pagination) {
    let sorted = sort.apply(matches);
    let pages = total_pages(sorted.len(), page_size);
    let rows = paginate(&sorted, page, page_size);
    (rows, Pagination::new(page, pages))
}

/// UI state of the table view: query, sort selection and current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientTable {
    query: String,
    sort: SortState,
    page: usize,
    page_size: usize,
}

impl Default for PatientTable {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PatientTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            sort: SortState::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// New query; back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Header click; back to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
        self.page = 1;
        tracing::debug!(
            field = %field,
            direction = self.sort.direction.as_str(),
            "table sort changed"
        );
    }

    /// Set an explicit sort; back to page 1.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to `page`, clamped to the pages available for the current result set.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = Pagination::new(self.page, total_pages).clamp(page);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = Pagination::new(self.page, total_pages).next();
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Recompute the visible page from the register.
    pub fn render(&self, store: &PatientStore) -> TablePage {
        let snapshot = store.snapshot();
        let matches = search_patients(&snapshot.patients, &self.query);
        let (rows, pagination) = build_page(&matches, &self.sort, self.page, self.page_size);

        let status = if snapshot.is_loading {
            TableStatus::Loading
        } else if snapshot.patients.is_empty() {
            TableStatus::NoPatients
        } else if matches.is_empty() {
            TableStatus::NoSearchResults
        } else {
            TableStatus::Rows
        };

        TablePage {
            rows,
            pagination,
            total_matches: matches.len(),
            total_patients: snapshot.patients.len(),
            status,
        }
    }
}
