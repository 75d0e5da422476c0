//! Date and Time Fields
//!
//! Composite fields rendered as a `div` holding one select box per
//! component. Values are strings in `2024-03-05`, `07:30:00` and
//! `2024-03-05 07:30:00` form; the select order follows a format string
//! such as `"mdy"` or `"hms"`.

use std::ops::RangeInclusive;

use weft_dom::{ContentList, DomResult, ElementTree, NodeId, Params};

use crate::FormResult;
use crate::field::{FieldParams, FieldState, FormField, readonly_attributes};
use crate::options::{OptionList, SelectField};

const DEFAULT_DATE_FORMAT: &str = "mdy";
const DEFAULT_TIME_FORMAT: &str = "hms";
const DEFAULT_YEARS: RangeInclusive<u32> = 2009..=2020;

/// `year`, `month` and `day` of a `YYYY-MM-DD` string
fn date_parts(text: &str) -> [Option<u32>; 3] {
    let mut parts = text.trim().splitn(3, '-').map(|p| p.trim().parse::<u32>().ok());
    [
        parts.next().flatten(),
        parts.next().flatten(),
        parts.next().flatten(),
    ]
}

/// `hour`, `minute` and `second` of a colon separated string. The parts are
/// read in `format` order, so `"hm"` reads `07:30` as hour and minute.
fn time_parts(text: &str, format: &str) -> [Option<u32>; 3] {
    let mut values = text.trim().split(':').map(|p| p.trim().parse::<u32>().ok());
    let mut parts = [None; 3];
    for component in format.chars() {
        let slot = match component {
            'h' => 0,
            'm' => 1,
            's' => 2,
            _ => continue,
        };
        parts[slot] = values.next().flatten();
    }
    parts
}

/// `select.<suffix>_select` named `<name>_<suffix>` over numeric options
fn number_select(
    tree: &mut ElementTree,
    name: &str,
    suffix: &str,
    selected: Option<u32>,
    options: impl IntoIterator<Item = u32>,
    padded: bool,
    with_id: bool,
) -> DomResult<NodeId> {
    let show = |n: u32| if padded { format!("{n:02}") } else { n.to_string() };

    let mut params = FieldParams::new().class(format!("{suffix}_select"));
    if with_id {
        params = params.id(format!("{}_{suffix}", name.replace('.', "_")));
    }
    if let Some(value) = selected {
        params = params.value(show(value));
    }
    let options: OptionList = options.into_iter().map(|n| (show(n), show(n))).collect();
    SelectField::named(format!("{name}_{suffix}"), params, options).element(tree)
}

#[derive(Debug, Clone)]
struct DateSelects {
    format: String,
    years: RangeInclusive<u32>,
}

impl Default for DateSelects {
    fn default() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
            years: DEFAULT_YEARS,
        }
    }
}

impl DateSelects {
    fn build(
        &self,
        tree: &mut ElementTree,
        name: &str,
        [year, month, day]: [Option<u32>; 3],
        selects: &mut ContentList,
    ) -> DomResult<()> {
        for component in self.format.chars() {
            let select = match component {
                'y' => number_select(tree, name, "year", year, self.years.clone(), false, false)?,
                'm' => number_select(tree, name, "month", month, 1..=12, false, false)?,
                'd' => number_select(tree, name, "day", day, 1..=31, false, false)?,
                _ => continue,
            };
            selects.push(select);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct TimeSelects {
    format: String,
    minutes: Vec<u32>,
    padded: bool,
    with_ids: bool,
}

impl TimeSelects {
    fn new(padded: bool, with_ids: bool) -> Self {
        Self {
            format: DEFAULT_TIME_FORMAT.to_string(),
            minutes: (0..=59).collect(),
            padded,
            with_ids,
        }
    }

    fn build(
        &self,
        tree: &mut ElementTree,
        name: &str,
        [hour, minute, second]: [Option<u32>; 3],
        selects: &mut ContentList,
    ) -> DomResult<()> {
        let (padded, with_ids) = (self.padded, self.with_ids);
        for component in self.format.chars() {
            let select = match component {
                'h' => number_select(tree, name, "hour", hour, 0..=23, padded, with_ids)?,
                'm' => number_select(tree, name, "minute", minute, self.minutes.clone(), padded, with_ids)?,
                's' => number_select(tree, name, "second", second, 0..=59, padded, with_ids)?,
                _ => continue,
            };
            selects.push(select);
        }
        Ok(())
    }
}

fn selects_div(tree: &mut ElementTree, state: &FieldState, selects: ContentList) -> DomResult<NodeId> {
    tree.create(
        Params::new()
            .tag("div")
            .attrs(readonly_attributes(state.attributes()))
            .content(selects),
    )
}

/// Year, month and day select boxes
#[derive(Debug, Clone)]
pub struct DateField {
    state: FieldState,
    date: DateSelects,
}

impl DateField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Ok(Self {
            state: FieldState::new("date_field", params)?,
            date: DateSelects::default(),
        })
    }

    /// Select order, e.g. `"ymd"`. Default `"mdy"`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date.format = format.into();
        self
    }

    /// Years offered for selection
    pub fn year_range(mut self, years: RangeInclusive<u32>) -> Self {
        self.date.years = years;
        self
    }

    /// `[year, month, day]` of the current value
    pub fn date(&self) -> [Option<u32>; 3] {
        date_parts(&self.state.value().display())
    }
}

impl FormField for DateField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "date_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut selects = ContentList::new();
        self.date.build(tree, self.state.name(), self.date(), &mut selects)?;
        selects_div(tree, &self.state, selects)
    }
}

/// Hour, minute and second select boxes with zero padded options.
/// Components without a value select `00`.
#[derive(Debug, Clone)]
pub struct TimeField {
    state: FieldState,
    time: TimeSelects,
}

impl TimeField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Ok(Self {
            state: FieldState::new("time_field", params)?,
            time: TimeSelects::new(true, true),
        })
    }

    /// Select order, e.g. `"hm"`. Default `"hms"`.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time.format = format.into();
        self
    }

    /// Minutes offered for selection, e.g. quarter hours
    pub fn minutes(mut self, minutes: impl IntoIterator<Item = u32>) -> Self {
        self.time.minutes = minutes.into_iter().collect();
        self
    }

    /// `[hour, minute, second]` of the current value
    pub fn time(&self) -> [u32; 3] {
        time_parts(&self.state.value().display(), &self.time.format).map(|part| part.unwrap_or(0))
    }
}

impl FormField for TimeField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "time_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut selects = ContentList::new();
        self.time
            .build(tree, self.state.name(), self.time().map(Some), &mut selects)?;
        selects_div(tree, &self.state, selects)
    }
}

/// Date selects followed by time selects
#[derive(Debug, Clone)]
pub struct DatetimeField {
    state: FieldState,
    date: DateSelects,
    time: TimeSelects,
}

impl DatetimeField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Ok(Self {
            state: FieldState::new("datetime_field", params)?,
            date: DateSelects::default(),
            time: TimeSelects::new(false, false),
        })
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date.format = format.into();
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time.format = format.into();
        self
    }

    pub fn year_range(mut self, years: RangeInclusive<u32>) -> Self {
        self.date.years = years;
        self
    }

    fn split(&self) -> (String, String) {
        let value = self.state.value().display();
        match value.trim().split_once(|c: char| c == ' ' || c == 'T') {
            Some((date, time)) => (date.to_string(), time.to_string()),
            None => (value.trim().to_string(), String::new()),
        }
    }

    /// `[year, month, day]` of the current value
    pub fn date(&self) -> [Option<u32>; 3] {
        date_parts(&self.split().0)
    }

    /// `[hour, minute, second]` of the current value
    pub fn time(&self) -> [Option<u32>; 3] {
        time_parts(&self.split().1, &self.time.format)
    }
}

impl FormField for DatetimeField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "datetime_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let name = self.state.name();
        let mut selects = ContentList::new();
        self.date.build(tree, name, self.date(), &mut selects)?;
        self.time.build(tree, name, self.time(), &mut selects)?;
        selects_div(tree, &self.state, selects)
    }
}
