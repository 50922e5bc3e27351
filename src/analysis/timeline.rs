/// Timeline layout and positioning math
///
/// Turns dated records into geometry a client can draw directly: column headers,
/// proportional left/width offsets in pixels, packed rows, and semantic tones.
/// Nothing here knows about colors or markup.

use crate::analysis::interval::{days_between, DateRange, Dated};
use crate::planning::validation::REQUIRED_COUNT_MAX;
use crate::planning::{Allocation, LeavePeriod, Requirement};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pixel width of one column header
pub const COLUMN_WIDTH: f64 = 133.0;
/// Height of one requirement slot
pub const SLOT_HEIGHT: f64 = 30.0;
/// Header and padding inside a requirement block
pub const BLOCK_PADDING: f64 = 20.0;
pub const MIN_BLOCK_HEIGHT: f64 = 60.0;
/// Vertical gap between requirement blocks
pub const BLOCK_MARGIN: f64 = 32.0;
/// Narrowest a requirement block is drawn, whatever its span
pub const MIN_BLOCK_WIDTH: f64 = 150.0;
/// Narrowest an allocation bar inside a slot is drawn
pub const MIN_ALLOCATION_WIDTH: f64 = 20.0;
/// Minimum height of the timeline body, even when empty
pub const MIN_CONTENT_HEIGHT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// Visible window and column granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub granularity: Granularity,
}

impl TimelineConfig {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start_date,
            end_date,
            granularity,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Move the window by its own span, keeping granularity
    ///
    /// A window that would leave chrono's date range stays where it is.
    pub fn shift(&self, direction: Direction) -> Self {
        let span = self.end_date - self.start_date;
        let delta = match direction {
            Direction::Prev => -span,
            Direction::Next => span,
        };
        match (
            self.start_date.checked_add_signed(delta),
            self.end_date.checked_add_signed(delta),
        ) {
            (Some(start_date), Some(end_date)) => Self {
                start_date,
                end_date,
                granularity: self.granularity,
            },
            _ => *self,
        }
    }
}

/// Add (or subtract) whole months, saturating at chrono's representable range
fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Monday on or before `date`; the date itself when that Monday is unrepresentable
fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date)
}

fn day_before(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Window shown when the client does not pick one: from the first day of the month
/// two months back to the last day of the month three months ahead
pub fn default_range(today: NaiveDate) -> DateRange {
    let this_month = first_of_month(today);
    let start = shift_months(this_month, -2);
    let end = day_before(shift_months(this_month, 4));
    DateRange::new(start, end)
}

/// Current calendar month, used as the "now" window for utilization
pub fn month_window(today: NaiveDate) -> DateRange {
    let start = first_of_month(today);
    let end = day_before(shift_months(start, 1));
    DateRange::new(start, end)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineColumn {
    pub date: NaiveDate,
    pub label: String,
    pub full_label: String,
}

/// Column headers covering the configured window
///
/// Weekly columns start on Mondays; monthly columns on the first of the month.
pub fn generate_columns(config: &TimelineConfig) -> Vec<TimelineColumn> {
    let mut columns = Vec::new();
    if config.end_date < config.start_date {
        return columns;
    }

    match config.granularity {
        Granularity::Week => {
            let last = monday_of_week(config.end_date);
            let mut current = monday_of_week(config.start_date);
            while current <= last {
                columns.push(TimelineColumn {
                    date: current,
                    label: current.format("%b %d").to_string(),
                    full_label: current.format("%b %d, %Y").to_string(),
                });
                match current.checked_add_days(Days::new(7)) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        Granularity::Month => {
            let last = first_of_month(config.end_date);
            let mut current = first_of_month(config.start_date);
            while current <= last {
                columns.push(TimelineColumn {
                    date: current,
                    label: current.format("%b %Y").to_string(),
                    full_label: current.format("%B %Y").to_string(),
                });
                let next = shift_months(current, 1);
                if next == current {
                    break;
                }
                current = next;
            }
        }
    }

    columns
}

/// Total drawable width for a set of columns
pub fn timeline_width(columns: &[TimelineColumn]) -> f64 {
    columns.len() as f64 * COLUMN_WIDTH
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemPosition {
    pub left: f64,
    pub width: f64,
}

impl ItemPosition {
    pub const EMPTY: Self = Self {
        left: 0.0,
        width: 0.0,
    };
}

/// Proportional placement of `item` inside `timeline`, `total_width` pixels wide
///
/// The item is clipped to the window and is always at least one day wide. A window
/// with no span yields an empty position.
pub fn item_position(item: DateRange, timeline: DateRange, total_width: f64) -> ItemPosition {
    let total_days = days_between(timeline.start, timeline.end);
    if total_days <= 0 {
        return ItemPosition::EMPTY;
    }

    let start_days = days_between(timeline.start, item.start).max(0);
    let end_days = days_between(timeline.start, item.end).min(total_days);
    let duration = (end_days - start_days).max(1);

    let total = total_days as f64;
    ItemPosition {
        left: start_days as f64 / total * total_width,
        width: duration as f64 / total * total_width,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Requirement,
    Allocation,
    Leave,
    Gap,
}

/// Semantic styling hint for a timeline item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTone {
    Requirement,
    OverAllocated,
    Healthy,
    Partial,
    Leave,
    Gap,
}

pub fn item_tone(kind: ItemKind, percentage: Option<i64>) -> ItemTone {
    match kind {
        ItemKind::Requirement => ItemTone::Requirement,
        ItemKind::Allocation => match percentage {
            Some(p) if p > 100 => ItemTone::OverAllocated,
            Some(p) if p >= 80 => ItemTone::Healthy,
            _ => ItemTone::Partial,
        },
        ItemKind::Leave => ItemTone::Leave,
        ItemKind::Gap => ItemTone::Gap,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineItem {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub kind: ItemKind,
    pub percentage: Option<i64>,
}

impl Dated for TimelineItem {
    fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl From<&Allocation> for TimelineItem {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: allocation.id.clone(),
            title: allocation
                .project_name
                .clone()
                .unwrap_or_else(|| "Allocation".to_string()),
            start_date: allocation.start_date,
            end_date: allocation.end_date,
            kind: ItemKind::Allocation,
            percentage: Some(allocation.allocation_percentage),
        }
    }
}

impl From<&LeavePeriod> for TimelineItem {
    fn from(leave: &LeavePeriod) -> Self {
        let kind = leave.leave_type.as_deref().unwrap_or("Leave");
        Self {
            id: leave.id.clone(),
            title: format!("{} ({})", kind, leave.status.as_str()),
            start_date: leave.start_date,
            end_date: leave.end_date,
            kind: ItemKind::Leave,
            percentage: None,
        }
    }
}

/// Hover text: title, date span with inclusive day count, and allocation share
pub fn tooltip(item: &TimelineItem) -> String {
    let mut text = format!(
        "{}\n{} - {} ({} days)",
        item.title,
        item.start_date.format("%b %d"),
        item.end_date.format("%b %d"),
        item.date_range().duration_days()
    );
    if let Some(p) = item.percentage.filter(|p| *p != 0) {
        text.push_str(&format!("\n{p}% allocation"));
    }
    text
}

/// Pack items into rows so no row holds two overlapping items
///
/// Items are taken in start-date order and dropped into the first row they fit.
/// Items that merely touch at a boundary may share a row.
pub fn group_into_rows(items: &[TimelineItem]) -> Vec<Vec<TimelineItem>> {
    let mut sorted: Vec<&TimelineItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.start_date);

    let mut rows: Vec<Vec<TimelineItem>> = Vec::new();
    for item in sorted {
        let range = item.date_range();
        let free_row = rows.iter_mut().find(|row| {
            !row
                .iter()
                .any(|existing| range.overlaps_exclusive(&existing.date_range()))
        });

        match free_row {
            Some(row) => row.push(item.clone()),
            None => rows.push(vec![item.clone()]),
        }
    }

    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedItem {
    #[serde(flatten)]
    pub item: TimelineItem,
    pub position: ItemPosition,
    pub tone: ItemTone,
    pub tooltip: String,
}

/// Allocation drawn inside a requirement slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAllocation {
    pub allocation_id: String,
    pub person_id: String,
    pub person_name: Option<String>,
    pub allocation_percentage: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Pixels from the block's left edge
    pub offset: f64,
    pub width: f64,
    pub tone: ItemTone,
}

/// One of the `required_count` positions a requirement asks for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementSlot {
    pub id: String,
    pub requirement_id: String,
    pub position_index: usize,
    pub role_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub allocation: Option<SlotAllocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementBlock {
    pub requirement: Requirement,
    pub allocations: Vec<Allocation>,
    pub slots: Vec<RequirementSlot>,
    pub position: ItemPosition,
    /// Drawn width, never narrower than [`MIN_BLOCK_WIDTH`]
    pub display_width: f64,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTimeline {
    pub config: TimelineConfig,
    pub columns: Vec<TimelineColumn>,
    pub width: f64,
    pub height: f64,
    pub blocks: Vec<RequirementBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTimeline {
    pub config: TimelineConfig,
    pub columns: Vec<TimelineColumn>,
    pub width: f64,
    pub rows: Vec<Vec<PositionedItem>>,
}

pub fn block_height(slot_count: usize) -> f64 {
    (slot_count as f64 * SLOT_HEIGHT + BLOCK_PADDING).max(MIN_BLOCK_HEIGHT)
}

/// Offset of an allocation bar from the start of its requirement block
pub fn allocation_offset(requirement: DateRange, allocation: DateRange, block_width: f64) -> f64 {
    let requirement_days = days_between(requirement.start, requirement.end);
    if requirement_days <= 0 {
        return 0.0;
    }
    let from_start = days_between(requirement.start, allocation.start).max(0);
    from_start as f64 / requirement_days as f64 * block_width
}

/// Width of an allocation bar, clipped to its requirement and never thinner than
/// [`MIN_ALLOCATION_WIDTH`]
pub fn allocation_width(requirement: DateRange, allocation: DateRange, block_width: f64) -> f64 {
    let requirement_days = days_between(requirement.start, requirement.end);
    if requirement_days <= 0 {
        return block_width.max(MIN_ALLOCATION_WIDTH);
    }
    let overlap = days_between(
        allocation.start.max(requirement.start),
        allocation.end.min(requirement.end),
    );
    (overlap as f64 / requirement_days as f64 * block_width).max(MIN_ALLOCATION_WIDTH)
}

/// Requirement slots for `requirement`, the i-th slot filled by the i-th
/// allocation linked to it
fn requirement_slots(
    requirement: &Requirement,
    linked: &[Allocation],
    block_width: f64,
) -> Vec<RequirementSlot> {
    let slot_count = requirement.required_count.clamp(1, REQUIRED_COUNT_MAX) as usize;
    let role_type_name = requirement.role_type_name.clone().unwrap_or_default();
    let requirement_range = requirement.date_range();

    (0..slot_count)
        .map(|index| RequirementSlot {
            id: format!("req-{}-{}", requirement.id, index),
            requirement_id: requirement.id.clone(),
            position_index: index,
            role_type_name: role_type_name.clone(),
            start_date: requirement.start_date,
            end_date: requirement.end_date,
            allocation: linked.get(index).map(|a| SlotAllocation {
                allocation_id: a.id.clone(),
                person_id: a.person_id.clone(),
                person_name: a.person_name.clone(),
                allocation_percentage: a.allocation_percentage,
                start_date: a.start_date,
                end_date: a.end_date,
                offset: allocation_offset(requirement_range, a.date_range(), block_width),
                width: allocation_width(requirement_range, a.date_range(), block_width),
                tone: item_tone(ItemKind::Allocation, Some(a.allocation_percentage)),
            }),
        })
        .collect()
}

/// Layout of a project's requirements and their staffed slots
pub fn layout_project_timeline(
    config: TimelineConfig,
    requirements: &[Requirement],
    allocations: &[Allocation],
) -> ProjectTimeline {
    let columns = generate_columns(&config);
    let width = timeline_width(&columns);
    let window = config.range();

    let mut top = 0.0;
    let mut blocks = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        let linked: Vec<Allocation> = allocations
            .iter()
            .filter(|a| a.requirement_id.as_deref() == Some(requirement.id.as_str()))
            .cloned()
            .collect();

        let position = item_position(requirement.date_range(), window, width);
        let slots = requirement_slots(requirement, &linked, position.width);
        let height = block_height(slots.len());

        blocks.push(RequirementBlock {
            requirement: requirement.clone(),
            allocations: linked,
            slots,
            position,
            display_width: position.width.max(MIN_BLOCK_WIDTH),
            top,
            height,
        });
        top += height + BLOCK_MARGIN;
    }

    ProjectTimeline {
        config,
        columns,
        width,
        height: top.max(MIN_CONTENT_HEIGHT),
        blocks,
    }
}

/// Layout of one person's allocations and leave, packed into rows
///
/// Records outside the window are left out.
pub fn layout_person_timeline(
    config: TimelineConfig,
    allocations: &[Allocation],
    leave: &[LeavePeriod],
) -> PersonTimeline {
    let columns = generate_columns(&config);
    let width = timeline_width(&columns);
    let window = config.range();

    let items: Vec<TimelineItem> = allocations
        .iter()
        .map(TimelineItem::from)
        .chain(leave.iter().map(TimelineItem::from))
        .filter(|item| item.date_range().overlaps_inclusive(&window))
        .collect();

    let rows = group_into_rows(&items)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|item| PositionedItem {
                    position: item_position(item.date_range(), window, width),
                    tone: item_tone(item.kind, item.percentage),
                    tooltip: tooltip(&item),
                    item,
                })
                .collect()
        })
        .collect();

    PersonTimeline {
        config,
        columns,
        width,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{allocation, date, leave, linked, requirement};

    fn item(id: &str, start: NaiveDate, end: NaiveDate) -> TimelineItem {
        TimelineItem {
            id: id.to_string(),
            title: id.to_string(),
            start_date: start,
            end_date: end,
            kind: ItemKind::Allocation,
            percentage: None,
        }
    }

    #[test]
    fn test_week_columns_start_on_monday() {
        // 2025-01-08 is a Wednesday
        let config = TimelineConfig::new(date(2025, 1, 8), date(2025, 1, 31), Granularity::Week);
        let columns = generate_columns(&config);
        let dates: Vec<NaiveDate> = columns.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 6), date(2025, 1, 13), date(2025, 1, 20), date(2025, 1, 27)]
        );
        assert_eq!(columns[0].label, "Jan 06");
        assert_eq!(columns[0].full_label, "Jan 06, 2025");
    }

    #[test]
    fn test_month_columns_span_year_boundary() {
        let config = TimelineConfig::new(date(2024, 11, 15), date(2025, 2, 3), Granularity::Month);
        let columns = generate_columns(&config);
        let labels: Vec<&str> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);
        assert_eq!(columns[2].full_label, "January 2025");
    }

    #[test]
    fn test_inverted_window_has_no_columns() {
        let config = TimelineConfig::new(date(2025, 2, 1), date(2025, 1, 1), Granularity::Month);
        assert!(generate_columns(&config).is_empty());
    }

    #[test]
    fn test_item_position_proportional() {
        let window = DateRange::new(date(2025, 1, 1), date(2025, 1, 11));
        let pos = item_position(DateRange::new(date(2025, 1, 3), date(2025, 1, 8)), window, 1000.0);
        assert_eq!(pos.left, 200.0);
        assert_eq!(pos.width, 500.0);
    }

    #[test]
    fn test_item_position_clips_to_window() {
        let window = DateRange::new(date(2025, 1, 1), date(2025, 1, 11));
        let pos = item_position(DateRange::new(date(2024, 12, 1), date(2025, 3, 1)), window, 1000.0);
        assert_eq!(pos.left, 0.0);
        assert_eq!(pos.width, 1000.0);
    }

    #[test]
    fn test_item_position_minimum_one_day() {
        let window = DateRange::new(date(2025, 1, 1), date(2025, 1, 11));
        let pos = item_position(DateRange::new(date(2025, 1, 5), date(2025, 1, 5)), window, 1000.0);
        assert_eq!(pos.left, 400.0);
        assert_eq!(pos.width, 100.0);
    }

    #[test]
    fn test_item_position_empty_window() {
        let window = DateRange::new(date(2025, 1, 1), date(2025, 1, 1));
        let pos = item_position(window, window, 500.0);
        assert_eq!(pos, ItemPosition::EMPTY);
    }

    #[test]
    fn test_item_tone_thresholds() {
        assert_eq!(item_tone(ItemKind::Allocation, Some(120)), ItemTone::OverAllocated);
        assert_eq!(item_tone(ItemKind::Allocation, Some(100)), ItemTone::Healthy);
        assert_eq!(item_tone(ItemKind::Allocation, Some(80)), ItemTone::Healthy);
        assert_eq!(item_tone(ItemKind::Allocation, Some(79)), ItemTone::Partial);
        assert_eq!(item_tone(ItemKind::Allocation, None), ItemTone::Partial);
        assert_eq!(item_tone(ItemKind::Leave, None), ItemTone::Leave);
        assert_eq!(item_tone(ItemKind::Gap, None), ItemTone::Gap);
        assert_eq!(item_tone(ItemKind::Requirement, Some(50)), ItemTone::Requirement);
    }

    #[test]
    fn test_group_into_rows_packs_non_overlapping() {
        let items = vec![
            item("c", date(2025, 1, 20), date(2025, 1, 31)),
            item("a", date(2025, 1, 1), date(2025, 1, 10)),
            item("b", date(2025, 1, 5), date(2025, 1, 25)),
            // touches "a" at its end only
            item("d", date(2025, 1, 10), date(2025, 1, 15)),
        ];
        let rows = group_into_rows(&items);
        let ids: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|i| i.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a", "d", "c"], vec!["b"]]);
    }

    #[test]
    fn test_group_into_rows_never_overlaps_within_row() {
        let items: Vec<TimelineItem> = (0..10)
            .map(|i| item(&format!("i{i}"), date(2025, 1, 1 + i), date(2025, 1, 5 + i)))
            .collect();
        for row in group_into_rows(&items) {
            for (idx, a) in row.iter().enumerate() {
                for b in &row[idx + 1..] {
                    assert!(!a.date_range().overlaps_exclusive(&b.date_range()));
                }
            }
        }
    }

    #[test]
    fn test_default_range() {
        let range = default_range(date(2025, 5, 17));
        assert_eq!(range.start, date(2025, 3, 1));
        assert_eq!(range.end, date(2025, 8, 31));

        let range = default_range(date(2025, 1, 2));
        assert_eq!(range.start, date(2024, 11, 1));
        assert_eq!(range.end, date(2025, 4, 30));
    }

    #[test]
    fn test_month_window() {
        let window = month_window(date(2024, 2, 10));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
    }

    #[test]
    fn test_tooltip() {
        let mut it = item("Apollo", date(2025, 3, 1), date(2025, 3, 10));
        assert_eq!(tooltip(&it), "Apollo\nMar 01 - Mar 10 (10 days)");
        it.percentage = Some(50);
        assert_eq!(tooltip(&it), "Apollo\nMar 01 - Mar 10 (10 days)\n50% allocation");
    }

    #[test]
    fn test_shift_by_span() {
        let config = TimelineConfig::new(date(2025, 1, 1), date(2025, 1, 31), Granularity::Week);
        let next = config.shift(Direction::Next);
        assert_eq!(next.start_date, date(2025, 1, 31));
        assert_eq!(next.end_date, date(2025, 3, 2));
        assert_eq!(next.shift(Direction::Prev), config);
    }

    #[test]
    fn test_columns_at_end_of_calendar() {
        let end = NaiveDate::MAX;
        let start = end.checked_sub_days(Days::new(11)).unwrap();

        let weeks = generate_columns(&TimelineConfig::new(start, end, Granularity::Week));
        assert!(!weeks.is_empty());
        assert!(weeks.iter().all(|c| c.date <= end));

        let months = generate_columns(&TimelineConfig::new(start, end, Granularity::Month));
        assert_eq!(months.len(), 1);
    }

    #[test]
    fn test_shift_past_end_of_calendar_stays_put() {
        let start = NaiveDate::MAX.checked_sub_days(Days::new(11)).unwrap();
        let config = TimelineConfig::new(start, NaiveDate::MAX, Granularity::Week);
        assert_eq!(config.shift(Direction::Next), config);

        let first = TimelineConfig::new(NaiveDate::MIN, date(2025, 1, 1), Granularity::Month);
        assert_eq!(first.shift(Direction::Prev), first);
    }

    #[test]
    fn test_allocation_offset_and_width() {
        let req = DateRange::new(date(2025, 1, 1), date(2025, 1, 11));
        let alloc = DateRange::new(date(2025, 1, 6), date(2025, 2, 1));
        assert_eq!(allocation_offset(req, alloc, 200.0), 100.0);
        assert_eq!(allocation_width(req, alloc, 200.0), 100.0);

        let tiny = DateRange::new(date(2025, 1, 6), date(2025, 1, 6));
        assert_eq!(allocation_width(req, tiny, 200.0), MIN_ALLOCATION_WIDTH);
    }

    #[test]
    fn test_project_layout_slots_and_heights() {
        let config = TimelineConfig::new(date(2025, 1, 1), date(2025, 3, 31), Granularity::Month);
        let requirements = vec![
            requirement("r1", "rt-dev", 3, date(2025, 1, 1), date(2025, 2, 28)),
            requirement("r2", "rt-qa", 1, date(2025, 2, 1), date(2025, 3, 31)),
        ];
        let allocations = vec![
            linked(allocation("a1", "p1", 100, date(2025, 1, 1), date(2025, 2, 28)), "r1"),
            linked(allocation("a2", "p2", 50, date(2025, 1, 15), date(2025, 2, 28)), "r1"),
            // legacy allocation: not drawn in a slot
            allocation("a3", "p3", 100, date(2025, 2, 1), date(2025, 3, 31)),
        ];

        let layout = layout_project_timeline(config, &requirements, &allocations);
        assert_eq!(layout.columns.len(), 3);
        assert_eq!(layout.width, 3.0 * COLUMN_WIDTH);
        assert_eq!(layout.blocks.len(), 2);

        let first = &layout.blocks[0];
        assert_eq!(first.slots.len(), 3);
        assert_eq!(first.slots[0].id, "req-r1-0");
        assert_eq!(first.slots[0].allocation.as_ref().unwrap().allocation_id, "a1");
        assert_eq!(first.slots[1].allocation.as_ref().unwrap().allocation_id, "a2");
        assert!(first.slots[2].allocation.is_none());
        assert_eq!(first.height, 110.0);
        assert_eq!(first.top, 0.0);

        let second = &layout.blocks[1];
        assert_eq!(second.height, MIN_BLOCK_HEIGHT);
        assert_eq!(second.top, 110.0 + BLOCK_MARGIN);
        assert!(second.slots[0].allocation.is_none());
        assert_eq!(layout.height, 110.0 + 60.0 + 2.0 * BLOCK_MARGIN);
    }

    #[test]
    fn test_project_layout_caps_slot_count() {
        let config = TimelineConfig::new(date(2025, 1, 1), date(2025, 3, 31), Granularity::Month);
        let requirements = vec![requirement("r1", "rt-dev", i64::MAX, date(2025, 1, 1), date(2025, 2, 28))];

        let layout = layout_project_timeline(config, &requirements, &[]);
        assert_eq!(layout.blocks[0].slots.len(), REQUIRED_COUNT_MAX as usize);
    }

    #[test]
    fn test_project_layout_empty() {
        let config = TimelineConfig::new(date(2025, 1, 1), date(2025, 3, 31), Granularity::Month);
        let layout = layout_project_timeline(config, &[], &[]);
        assert!(layout.blocks.is_empty());
        assert_eq!(layout.height, MIN_CONTENT_HEIGHT);
    }

    #[test]
    fn test_person_layout_filters_and_packs() {
        let config = TimelineConfig::new(date(2025, 1, 1), date(2025, 3, 31), Granularity::Month);
        let allocations = vec![
            allocation("a1", "p1", 50, date(2025, 1, 1), date(2025, 2, 28)),
            allocation("a2", "p1", 50, date(2025, 2, 1), date(2025, 3, 31)),
            allocation("a3", "p1", 50, date(2025, 6, 1), date(2025, 6, 30)),
        ];
        let leave = vec![leave("l1", "p1", date(2025, 3, 10), date(2025, 3, 14))];

        let layout = layout_person_timeline(config, &allocations, &leave);
        let ids: Vec<Vec<&str>> = layout
            .rows
            .iter()
            .map(|row| row.iter().map(|p| p.item.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a1", "l1"], vec!["a2"]]);
        assert_eq!(layout.rows[0][1].tone, ItemTone::Leave);
        assert_eq!(layout.rows[0][0].tone, ItemTone::Partial);
    }
}
