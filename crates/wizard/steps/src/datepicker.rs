//! The modal date picker attached to dated fields.
//!
//! One picker per dated field, three views: a day grid for one month, a
//! month grid for one year, and a 24-year range anchored to end at the
//! current year. Selecting a day writes `YYYY-MM-DD` into the field and
//! announces the selection. Pickers live in a group; opening one closes
//! every other.

use chrono::{Datelike, NaiveDate};
use wizard_engine::EventBus;
use wizard_types::{FieldId, FormDocument, WizardEvent};

/// Years shown per range page.
const YEAR_SPAN: i32 = 24;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Which grid the picker currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerView {
    /// Day grid of one month.
    Days { year: i32, month: u32 },
    /// Month grid of one year.
    Months { year: i32 },
    /// The 24-year range ending at the anchor year.
    Years,
}

/// A date picker bound to one dated field.
#[derive(Clone, Debug)]
pub struct DatePicker {
    field: FieldId,
    open: bool,
    view: PickerView,
    anchor_year: i32,
}

impl DatePicker {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: FieldId::new(field),
            open: false,
            view: PickerView::Years,
            anchor_year: 0,
        }
    }

    pub fn field(&self) -> &FieldId {
        &self.field
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> PickerView {
        self.view
    }

    /// Open on today's month.
    pub fn open(&mut self) {
        self.open_on(chrono::Local::now().date_naive());
    }

    /// Open anchored to a given "today" (the year range ends at its year).
    pub fn open_on(&mut self, today: NaiveDate) {
        self.open = true;
        self.anchor_year = today.year();
        self.view = PickerView::Days {
            year: today.year(),
            month: today.month(),
        };
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Header copy for the current view.
    pub fn title(&self) -> String {
        match self.view {
            PickerView::Days { year, month } => {
                format!("{} {}", month_name(month), year)
            }
            PickerView::Months { year } => year.to_string(),
            PickerView::Years => {
                let (start, end) = self.year_range();
                format!("{} - {}", start, end)
            }
        }
    }

    /// The selectable year range: always the span ending at the anchor.
    pub fn year_range(&self) -> (i32, i32) {
        (self.anchor_year - (YEAR_SPAN - 1), self.anchor_year)
    }

    /// Step the day view one month back, wrapping across years.
    pub fn prev_month(&mut self) {
        if let PickerView::Days { year, month } = self.view {
            self.view = if month == 1 {
                PickerView::Days { year: year - 1, month: 12 }
            } else {
                PickerView::Days { year, month: month - 1 }
            };
        }
    }

    /// Step the day view one month forward, wrapping across years.
    pub fn next_month(&mut self) {
        if let PickerView::Days { year, month } = self.view {
            self.view = if month == 12 {
                PickerView::Days { year: year + 1, month: 1 }
            } else {
                PickerView::Days { year, month: month + 1 }
            };
        }
    }

    /// Switch to the year-range view (the day-view title control).
    pub fn show_years(&mut self) {
        self.view = PickerView::Years;
    }

    /// A year was picked from the range: show its months.
    pub fn select_year(&mut self, year: i32) {
        self.view = PickerView::Months { year };
    }

    /// A month was picked: show its days. No-op outside the month view.
    pub fn select_month(&mut self, month: u32) {
        if let PickerView::Months { year } = self.view {
            if (1..=12).contains(&month) {
                self.view = PickerView::Days { year, month };
            }
        }
    }

    /// Leading blank cells of the day grid (weekday of the 1st, Sunday
    /// first), and the number of days in the shown month.
    pub fn day_grid(&self) -> Option<(u32, u32)> {
        let PickerView::Days { year, month } = self.view else {
            return None;
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some((
            first.weekday().num_days_from_sunday(),
            days_in_month(year, month)?,
        ))
    }

    /// A day was picked: write `YYYY-MM-DD` into the bound field, announce
    /// the selection, and close. Invalid days are ignored.
    pub fn select_day(
        &mut self,
        day: u32,
        doc: &mut FormDocument,
        bus: &mut EventBus,
    ) -> Option<String> {
        let PickerView::Days { year, month } = self.view else {
            return None;
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let formatted = date.format("%Y-%m-%d").to_string();

        match doc.field_mut(&self.field) {
            Some(field) => field.value = formatted.clone(),
            None => {
                tracing::warn!(field = %self.field, "date picker field not in document");
            }
        }
        bus.publish(WizardEvent::DateSelected {
            field: self.field.clone(),
            value: formatted.clone(),
        });
        self.open = false;
        Some(formatted)
    }
}

/// A set of pickers where at most one is open at a time.
#[derive(Clone, Debug, Default)]
pub struct PickerGroup {
    pickers: Vec<DatePicker>,
}

impl PickerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picker(mut self, picker: DatePicker) -> Self {
        self.pickers.push(picker);
        self
    }

    pub fn get(&self, field: &FieldId) -> Option<&DatePicker> {
        self.pickers.iter().find(|p| p.field() == field)
    }

    pub fn get_mut(&mut self, field: &FieldId) -> Option<&mut DatePicker> {
        self.pickers.iter_mut().find(|p| p.field() == field)
    }

    /// Open the picker for `field` on today, closing every other first.
    pub fn open(&mut self, field: &FieldId) -> bool {
        self.open_on(field, chrono::Local::now().date_naive())
    }

    pub fn open_on(&mut self, field: &FieldId, today: NaiveDate) -> bool {
        self.close_all();
        match self.get_mut(field) {
            Some(picker) => {
                picker.open_on(today);
                true
            }
            None => false,
        }
    }

    pub fn close_all(&mut self) {
        for picker in &mut self.pickers {
            picker.close();
        }
    }

    pub fn open_picker(&self) -> Option<&DatePicker> {
        self.pickers.iter().find(|p| p.is_open())
    }
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).saturating_sub(1))
        .copied()
        .unwrap_or("")
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_types::{Field, Region, StepForm};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    fn make_doc() -> FormDocument {
        FormDocument::new().with_form(
            StepForm::new(2)
                .with_region(Region::new("s2q2-fieldset").with_field(Field::text("s2q2-field", "s2q2"))),
        )
    }

    #[test]
    fn test_open_lands_on_current_month() {
        let mut picker = DatePicker::new("s2q2-field");
        picker.open_on(today());
        assert!(picker.is_open());
        assert_eq!(picker.view(), PickerView::Days { year: 2026, month: 8 });
        assert_eq!(picker.title(), "August 2026");
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let mut picker = DatePicker::new("s2q2-field");
        picker.open_on(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        picker.prev_month();
        assert_eq!(picker.view(), PickerView::Days { year: 2025, month: 12 });

        picker.next_month();
        assert_eq!(picker.view(), PickerView::Days { year: 2026, month: 1 });
    }

    #[test]
    fn test_year_range_anchored_to_current_year() {
        let mut picker = DatePicker::new("s2q2-field");
        picker.open_on(today());
        picker.show_years();
        assert_eq!(picker.year_range(), (2003, 2026));
        assert_eq!(picker.title(), "2003 - 2026");
    }

    #[test]
    fn test_year_then_month_drills_into_days() {
        let mut picker = DatePicker::new("s2q2-field");
        picker.open_on(today());
        picker.show_years();
        picker.select_year(2019);
        assert_eq!(picker.view(), PickerView::Months { year: 2019 });

        picker.select_month(2);
        assert_eq!(picker.view(), PickerView::Days { year: 2019, month: 2 });
        // Feb 2019: starts on a Friday, 28 days.
        assert_eq!(picker.day_grid(), Some((5, 28)));
    }

    #[test]
    fn test_select_day_writes_field_and_emits() {
        let mut picker = DatePicker::new("s2q2-field");
        let mut doc = make_doc();
        let mut bus = EventBus::new();
        picker.open_on(today());
        picker.show_years();
        picker.select_year(2024);
        picker.select_month(3);

        let value = picker.select_day(7, &mut doc, &mut bus);
        assert_eq!(value.as_deref(), Some("2024-03-07"));
        assert!(!picker.is_open());
        assert_eq!(
            doc.field(&FieldId::new("s2q2-field")).unwrap().value,
            "2024-03-07"
        );
        match bus.pop() {
            Some(WizardEvent::DateSelected { field, value }) => {
                assert_eq!(field, FieldId::new("s2q2-field"));
                assert_eq!(value, "2024-03-07");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_day_ignored() {
        let mut picker = DatePicker::new("s2q2-field");
        let mut doc = make_doc();
        let mut bus = EventBus::new();
        picker.open_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

        assert!(picker.select_day(30, &mut doc, &mut bus).is_none());
        assert!(picker.is_open());
        assert!(bus.pop().is_none());
    }

    #[test]
    fn test_group_opens_one_at_a_time() {
        let mut group = PickerGroup::new()
            .with_picker(DatePicker::new("s4q2-field"))
            .with_picker(DatePicker::new("s4q3-field"));

        assert!(group.open_on(&FieldId::new("s4q2-field"), today()));
        assert!(group.open_on(&FieldId::new("s4q3-field"), today()));

        assert!(!group.get(&FieldId::new("s4q2-field")).unwrap().is_open());
        assert!(group.get(&FieldId::new("s4q3-field")).unwrap().is_open());
        assert!(!group.open_on(&FieldId::new("nope"), today()));
    }
}
