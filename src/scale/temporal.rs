//! Date, date-time and time-of-day scales.
//!
//! Temporal values are encoded as decimals before they reach the linear map:
//! dates as days since 1970-01-01, date-times as seconds since the Unix epoch
//! and times as seconds since midnight. Breaks are generated on the calendar,
//! so monthly and yearly ticks land on the first of the month.

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use fastnum::decimal::D128;
use log::{debug, warn};
use serde::Deserialize;

use super::{util, CommonConfig, ContinuousConfig, ContinuousScale, Domain, Scale};
use crate::aesthetic::Aesthetic;
use crate::error::{Result, ScaleError};
use crate::value::{Mapped, Value};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const SECONDS_PER_DAY: i64 = 86_400;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Upper bound on generated breaks, for intervals far finer than the domain.
const MAX_BREAKS: usize = 1_000;

/// Which temporal type a scale maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    DateTime,
    Time,
}

impl TemporalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemporalKind::Date => "date",
            TemporalKind::DateTime => "datetime",
            TemporalKind::Time => "time",
        }
    }

    /// Encodes a value in this kind's numeric units. Plain numbers are taken
    /// to be encoded already.
    pub fn to_number(self, value: &Value) -> Option<D128> {
        match (self, value) {
            (_, Value::Null) => None,
            (TemporalKind::Date, Value::Date(date)) => Some(util::dec_int(days_since_epoch(date))),
            (TemporalKind::Date | TemporalKind::DateTime, Value::DateTime(datetime)) => {
                Some(self.from_datetime(datetime))
            }
            (TemporalKind::DateTime, Value::Date(date)) => {
                date.and_hms_opt(0, 0, 0).map(|midnight| self.from_datetime(&midnight))
            }
            (TemporalKind::Time, Value::Time(time)) => Some(seconds_of_day(time)),
            (TemporalKind::Time, Value::DateTime(datetime)) => Some(seconds_of_day(&datetime.time())),
            (_, Value::Text(text)) => match self.parse(text) {
                Some(parsed) => self.to_number(&parsed),
                None => value.as_decimal(),
            },
            (_, Value::Int(_) | Value::Float(_) | Value::Decimal(_)) => value.as_decimal(),
            _ => None,
        }
    }

    /// Parses ISO-8601 style text into a temporal value.
    fn parse(self, text: &str) -> Option<Value> {
        let text = text.trim();
        match self {
            TemporalKind::Time => ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                .map(Value::Time),
            TemporalKind::Date | TemporalKind::DateTime => [
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%dT%H:%M",
            ]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(Value::DateTime)
            .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(Value::Date)),
        }
    }

    fn from_datetime(self, datetime: &NaiveDateTime) -> D128 {
        let time = seconds_of_day(&datetime.time());
        match self {
            TemporalKind::Date => {
                let days = util::dec_int(days_since_epoch(&datetime.date()));
                if time == D128::from(0) {
                    days
                } else {
                    days + time / util::dec_int(SECONDS_PER_DAY)
                }
            }
            TemporalKind::DateTime => {
                util::dec_int(datetime.and_utc().timestamp()) + nanos_fraction(datetime.nanosecond())
            }
            TemporalKind::Time => time,
        }
    }

    fn to_datetime(self, number: D128) -> Option<NaiveDateTime> {
        match self {
            TemporalKind::Date => {
                let (days, fraction) = split_whole(number)?;
                let date = date_from_epoch_days(days)?;
                let (seconds, nanos) = split_seconds(fraction * util::dec_int(SECONDS_PER_DAY))?;
                let time = NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(seconds).ok()?, nanos)?;
                Some(date.and_time(time))
            }
            TemporalKind::DateTime => {
                let (seconds, nanos) = split_seconds(number)?;
                DateTime::from_timestamp(seconds, nanos).map(|utc| utc.naive_utc())
            }
            TemporalKind::Time => {
                let (seconds, nanos) = split_seconds(number)?;
                let time = NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(seconds).ok()?, nanos)?;
                Some(date_from_epoch_days(0)?.and_time(time))
            }
        }
    }

    /// Decodes a number back into a value of this kind. Dates that fall
    /// between midnights come back as date-times.
    pub fn to_value(self, number: D128) -> Option<Value> {
        let datetime = self.to_datetime(number)?;
        Some(match self {
            TemporalKind::Date if is_midnight(&datetime.time()) => Value::Date(datetime.date()),
            TemporalKind::Date | TemporalKind::DateTime => Value::DateTime(datetime),
            TemporalKind::Time => Value::Time(datetime.time()),
        })
    }

    fn allows(self, unit: TimeUnit) -> bool {
        match self {
            TemporalKind::Date => unit >= TimeUnit::Day,
            TemporalKind::DateTime => true,
            TemporalKind::Time => unit <= TimeUnit::Hour,
        }
    }

    /// Seconds per numeric unit.
    fn unit_seconds(self) -> f64 {
        match self {
            TemporalKind::Date => SECONDS_PER_DAY as f64,
            TemporalKind::DateTime | TemporalKind::Time => 1.0,
        }
    }

    fn default_label_format(self, unit: TimeUnit) -> &'static str {
        match (self, unit) {
            (_, TimeUnit::Year) => "%Y",
            (_, TimeUnit::Month) => "%b %Y",
            (_, TimeUnit::Week | TimeUnit::Day) => "%Y-%m-%d",
            (TemporalKind::Time, TimeUnit::Second) => "%H:%M:%S",
            (TemporalKind::Time, _) => "%H:%M",
            (_, TimeUnit::Second) => "%Y-%m-%d %H:%M:%S",
            (_, _) => "%Y-%m-%d %H:%M",
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn days_since_epoch(date: &NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_from_epoch_days(days: i64) -> Option<NaiveDate> {
    let from_ce = i32::try_from(days + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
    NaiveDate::from_num_days_from_ce_opt(from_ce)
}

fn is_midnight(time: &NaiveTime) -> bool {
    time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0
}

fn nanos_fraction(nanos: u32) -> D128 {
    if nanos == 0 {
        D128::from(0)
    } else {
        util::dec_int(i64::from(nanos)) / util::dec_int(NANOS_PER_SECOND)
    }
}

fn seconds_of_day(time: &NaiveTime) -> D128 {
    util::dec_int(i64::from(time.num_seconds_from_midnight())) + nanos_fraction(time.nanosecond())
}

/// `(floor(number), number - floor(number))`.
fn split_whole(number: D128) -> Option<(i64, D128)> {
    let whole = util::floor(number);
    Some((util::to_i64(&whole)?, number - whole))
}

/// Whole seconds and nanoseconds, rounded to the nearest nanosecond.
fn split_seconds(number: D128) -> Option<(i64, u32)> {
    let (seconds, fraction) = split_whole(number)?;
    let nanos = util::to_i64(&util::floor(
        fraction * util::dec_int(NANOS_PER_SECOND) + util::dec(0.5)?,
    ))?;
    if nanos >= NANOS_PER_SECOND {
        Some((seconds + 1, 0))
    } else {
        Some((seconds, u32::try_from(nanos).ok()?))
    }
}

/// Calendar unit of a break interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// Length in seconds; months and years use their Gregorian mean.
    pub fn approx_seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Week => 604_800.0,
            TimeUnit::Month => 2_629_746.0,
            TimeUnit::Year => 31_556_952.0,
        }
    }

    fn fixed_seconds(self) -> Option<i64> {
        match self {
            TimeUnit::Month | TimeUnit::Year => None,
            fixed => Some(fixed.approx_seconds() as i64),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Second),
            "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minute),
            "hour" | "hours" => Ok(TimeUnit::Hour),
            "day" | "days" => Ok(TimeUnit::Day),
            "week" | "weeks" => Ok(TimeUnit::Week),
            "month" | "months" => Ok(TimeUnit::Month),
            "year" | "years" => Ok(TimeUnit::Year),
            _ => Err(()),
        }
    }
}

/// A break spacing such as "2 weeks" or "6 hours".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub count: u32,
    pub unit: TimeUnit,
}

impl FromStr for Interval {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            ScaleError::invalid(
                "temporal",
                "date_breaks",
                format!("`{s}` is not an interval such as \"2 weeks\""),
            )
        };
        let mut parts = s.split_whitespace();
        let (count, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(unit), None, None) => (1, unit),
            (Some(count), Some(unit), None) => (count.parse::<u32>().map_err(|_| invalid())?, unit),
            _ => return Err(invalid()),
        };
        if count == 0 {
            return Err(invalid());
        }
        let unit = unit.parse::<TimeUnit>().map_err(|_| invalid())?;
        Ok(Interval { count, unit })
    }
}

/// Candidate spacings for automatic breaks, finest first.
const AUTO_INTERVALS: &[(u32, TimeUnit)] = &[
    (1, TimeUnit::Second),
    (2, TimeUnit::Second),
    (5, TimeUnit::Second),
    (10, TimeUnit::Second),
    (15, TimeUnit::Second),
    (30, TimeUnit::Second),
    (1, TimeUnit::Minute),
    (2, TimeUnit::Minute),
    (5, TimeUnit::Minute),
    (10, TimeUnit::Minute),
    (15, TimeUnit::Minute),
    (30, TimeUnit::Minute),
    (1, TimeUnit::Hour),
    (2, TimeUnit::Hour),
    (3, TimeUnit::Hour),
    (6, TimeUnit::Hour),
    (12, TimeUnit::Hour),
    (1, TimeUnit::Day),
    (2, TimeUnit::Day),
    (1, TimeUnit::Week),
    (2, TimeUnit::Week),
    (1, TimeUnit::Month),
    (2, TimeUnit::Month),
    (3, TimeUnit::Month),
    (6, TimeUnit::Month),
    (1, TimeUnit::Year),
    (2, TimeUnit::Year),
    (5, TimeUnit::Year),
    (10, TimeUnit::Year),
    (20, TimeUnit::Year),
    (25, TimeUnit::Year),
    (50, TimeUnit::Year),
    (100, TimeUnit::Year),
    (200, TimeUnit::Year),
    (500, TimeUnit::Year),
    (1000, TimeUnit::Year),
];

impl Interval {
    pub fn approx_seconds(self) -> f64 {
        f64::from(self.count) * self.unit.approx_seconds()
    }

    /// The finest candidate spacing giving at most `n_breaks` intervals over
    /// `span_seconds`.
    fn auto(kind: TemporalKind, span_seconds: f64, n_breaks: usize) -> Interval {
        let allowed = AUTO_INTERVALS
            .iter()
            .filter(|(_, unit)| kind.allows(*unit))
            .map(|&(count, unit)| Interval { count, unit });
        let mut last = Interval {
            count: 1,
            unit: TimeUnit::Day,
        };
        for interval in allowed {
            last = interval;
            if span_seconds / interval.approx_seconds() <= n_breaks as f64 {
                return interval;
            }
        }
        last
    }

    /// The latest aligned boundary at or before `datetime`.
    fn floor(self, datetime: NaiveDateTime) -> Option<NaiveDateTime> {
        let count = i64::from(self.count);
        match self.unit {
            TimeUnit::Week => {
                let date = datetime.date();
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back))?.and_hms_opt(0, 0, 0)
            }
            TimeUnit::Month => {
                let months = i64::from(datetime.year()) * 12 + i64::from(datetime.month0());
                let aligned = months - months.rem_euclid(count);
                let year = i32::try_from(aligned.div_euclid(12)).ok()?;
                let month = u32::try_from(aligned.rem_euclid(12)).ok()? + 1;
                NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
            }
            TimeUnit::Year => {
                let year = i64::from(datetime.year());
                let aligned = i32::try_from(year - year.rem_euclid(count)).ok()?;
                NaiveDate::from_ymd_opt(aligned, 1, 1)?.and_hms_opt(0, 0, 0)
            }
            fixed => {
                let length = count * fixed.fixed_seconds()?;
                let timestamp = datetime.and_utc().timestamp();
                let aligned = timestamp.div_euclid(length) * length;
                DateTime::from_timestamp(aligned, 0).map(|utc| utc.naive_utc())
            }
        }
    }

    fn advance(self, datetime: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.unit {
            TimeUnit::Month => datetime.checked_add_months(Months::new(self.count)),
            TimeUnit::Year => datetime.checked_add_months(Months::new(self.count.checked_mul(12)?)),
            fixed => {
                let length = i64::from(self.count) * fixed.fixed_seconds()?;
                let timestamp = datetime.and_utc().timestamp().checked_add(length)?;
                DateTime::from_timestamp(timestamp, datetime.nanosecond()).map(|utc| utc.naive_utc())
            }
        }
    }

    /// Aligned boundaries inside `[lo, hi]`.
    pub fn sequence(self, lo: NaiveDateTime, hi: NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut out = Vec::new();
        let Some(mut current) = self.floor(lo) else {
            return out;
        };
        while current <= hi {
            if current >= lo {
                if out.len() == MAX_BREAKS {
                    warn!("interval {} yields more than {} breaks, truncating", self, MAX_BREAKS);
                    break;
                }
                out.push(current);
            }
            match self.advance(current) {
                Some(next) if next > current => current = next,
                _ => break,
            }
        }
        out
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TimeUnit::Second => "sec",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {unit}{plural}", self.count)
    }
}

/// Options specific to temporal scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemporalConfig {
    /// Major break spacing, e.g. `"1 month"`.
    pub date_breaks: Option<String>,
    /// Minor break spacing. Defaults to midpoints between majors.
    pub date_minor_breaks: Option<String>,
    /// `strftime` pattern for labels.
    pub date_labels: Option<String>,
    pub range: Option<(f64, f64)>,
}

impl TemporalConfig {
    pub const KEYS: &'static [&'static str] =
        &["date_breaks", "date_minor_breaks", "date_labels", "range"];
}

fn check_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ScaleError::invalid(
            "temporal",
            "date_labels",
            format!("`{format}` is not a valid strftime pattern"),
        ));
    }
    Ok(())
}

/// A continuous scale over dates, date-times or times of day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ggscale::aesthetic::Aesthetic;
/// use ggscale::scale::{CommonConfig, Scale, TemporalConfig, TemporalKind, TemporalScale};
/// use ggscale::value::Value;
///
/// let common = CommonConfig { expand: Some((0.0, 0.0)), ..CommonConfig::default() };
/// let mut scale =
///     TemporalScale::new(TemporalKind::Date, Aesthetic::X, common, TemporalConfig::default()).unwrap();
/// scale.train(&[Value::from("2024-01-01"), Value::from("2024-12-31")]);
///
/// assert_eq!(scale.computed_labels(), ["Jan 2024", "Apr 2024", "Jul 2024", "Oct 2024"]);
/// assert_eq!(
///     scale.computed_breaks()[1],
///     Value::Date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TemporalScale {
    kind: TemporalKind,
    inner: ContinuousScale,
    breaks: Option<Interval>,
    minor_breaks: Option<Interval>,
    label_format: Option<String>,
    explicit_breaks: bool,
}

impl TemporalScale {
    pub fn new(
        kind: TemporalKind,
        aesthetic: Aesthetic,
        common: CommonConfig,
        config: TemporalConfig,
    ) -> Result<Self> {
        let parse_interval = |text: &Option<String>| -> Result<Option<Interval>> {
            let Some(text) = text else {
                return Ok(None);
            };
            let interval = text.parse::<Interval>()?;
            if !kind.allows(interval.unit) {
                return Err(ScaleError::invalid(
                    "temporal",
                    "date_breaks",
                    format!("`{text}` is not usable on a {kind} scale"),
                ));
            }
            Ok(Some(interval))
        };
        let breaks = parse_interval(&config.date_breaks)?;
        let minor_breaks = parse_interval(&config.date_minor_breaks)?;
        if let Some(format) = &config.date_labels {
            check_format(format)?;
        }

        let encode = |param: &'static str, values: &[Value]| -> Result<Vec<Value>> {
            values
                .iter()
                .map(|value| {
                    if value.is_null() {
                        return Ok(Value::Null);
                    }
                    kind.to_number(value).map(Value::Decimal).ok_or_else(|| {
                        ScaleError::invalid("temporal", param, format!("`{value}` is not a {kind}"))
                    })
                })
                .collect()
        };
        let explicit_breaks = common.breaks.is_some();
        let common = CommonConfig {
            limits: common.limits.as_deref().map(|v| encode("limits", v)).transpose()?,
            breaks: common.breaks.as_deref().map(|v| encode("breaks", v)).transpose()?,
            ..common
        };
        let continuous = ContinuousConfig {
            range: config.range,
            ..ContinuousConfig::default()
        };
        let inner = ContinuousScale::new(aesthetic, common, continuous)?;

        Ok(Self {
            kind,
            inner,
            breaks,
            minor_breaks,
            label_format: config.date_labels,
            explicit_breaks,
        })
    }

    pub fn kind(&self) -> TemporalKind {
        self.kind
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.inner.set_range(lo, hi);
        self
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) {
        self.inner.set_range(lo, hi);
    }

    /// Configured break spacing, or the automatic one for the trained domain.
    pub fn interval(&self) -> Option<Interval> {
        if self.breaks.is_some() {
            return self.breaks;
        }
        let (lo, hi) = self.inner.continuous_domain()?;
        let span = util::to_f64(&(hi - lo)) * self.kind.unit_seconds();
        Some(Interval::auto(self.kind, span, self.inner.common().n_breaks))
    }

    fn calendar_breaks(&self, interval: Interval) -> Vec<D128> {
        let Some((lo, hi)) = self.inner.continuous_domain() else {
            return Vec::new();
        };
        let (Some(lo), Some(hi)) = (self.kind.to_datetime(lo), self.kind.to_datetime(hi)) else {
            return Vec::new();
        };
        interval
            .sequence(lo, hi)
            .iter()
            .map(|datetime| self.kind.from_datetime(datetime))
            .collect()
    }

    fn break_numbers(&self) -> Vec<D128> {
        if self.explicit_breaks {
            return self.inner.break_numbers();
        }
        match self.interval() {
            Some(interval) => self.calendar_breaks(interval),
            None => Vec::new(),
        }
    }

    fn format_number(&self, number: &D128) -> String {
        let Some(datetime) = self.kind.to_datetime(*number) else {
            return number.to_string();
        };
        let format = match (&self.label_format, self.interval()) {
            (Some(format), _) => format.as_str(),
            (None, Some(interval)) => self.kind.default_label_format(interval.unit),
            (None, None) => self.kind.default_label_format(TimeUnit::Day),
        };
        datetime.format(format).to_string()
    }

    fn missing(&self) -> Mapped {
        self.inner.common().na_mapped().unwrap_or(Mapped::Missing)
    }

    fn to_values(&self, numbers: Vec<D128>) -> Vec<Value> {
        numbers.into_iter().filter_map(|number| self.kind.to_value(number)).collect()
    }
}

impl Scale for TemporalScale {
    fn aesthetic(&self) -> Aesthetic {
        self.inner.aesthetic()
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn is_trained(&self) -> bool {
        self.inner.is_trained()
    }

    fn train(&mut self, values: &[Value]) {
        let numbers: Vec<D128> = values.iter().filter_map(|value| self.kind.to_number(value)).collect();
        self.inner.train_numbers(&numbers);
        if let Some(interval) = self.interval() {
            debug!("{} scale on {} uses {interval} breaks", self.kind, self.inner.aesthetic());
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn transform(&self, value: &Value) -> Mapped {
        self.kind
            .to_number(value)
            .and_then(|number| self.inner.transform_number(number))
            .map(Mapped::Number)
            .unwrap_or_else(|| self.missing())
    }

    fn inverse(&self, position: &D128) -> Option<Value> {
        self.inner
            .inverse_number(*position)
            .and_then(|number| self.kind.to_value(number))
    }

    fn domain(&self) -> Domain {
        self.inner.domain()
    }

    fn range(&self) -> Option<(D128, D128)> {
        self.inner.range()
    }

    fn computed_breaks(&self) -> Vec<Value> {
        self.to_values(self.break_numbers())
    }

    fn computed_minor_breaks(&self) -> Vec<Value> {
        let majors = self.break_numbers();
        let minors = match self.minor_breaks {
            Some(interval) => self
                .calendar_breaks(interval)
                .into_iter()
                .filter(|minor| !majors.contains(minor))
                .collect(),
            None => majors
                .windows(2)
                .map(|pair| util::midpoint(pair[0], pair[1]))
                .collect(),
        };
        self.to_values(minors)
    }

    fn computed_labels(&self) -> Vec<String> {
        if self.explicit_breaks {
            return self.inner.label_strings(|number| self.format_number(number));
        }
        let breaks = self.computed_breaks();
        self.inner.common().labels_for(&breaks, |value| match self.kind.to_number(value) {
            Some(number) => self.format_number(&number),
            None => value.to_string(),
        })
    }
}
