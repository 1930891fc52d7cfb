//! Pāraṇam (fast-breaking) window computation and presentation rounding.

use std::fmt;

use chrono_tz::Tz;
use vrata_time::{proportional_time, JulDaysUt};

/// Which rule produced the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParanType {
    /// From sunrise until one fifth of the daytime.
    Standard,
    /// Wait until the first quarter of dvādaśī has passed; no fixed end.
    FromQuarterDvadashi,
    /// Dvādaśī ends within the morning window: break fast before it does.
    PucchaDvadashi,
}

impl fmt::Display for ParanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "Standard pāraṇam: from sunrise until 1/5 of daytime",
            Self::FromQuarterDvadashi => "Pāraṇam after the first quarter of dvādaśī",
            Self::PucchaDvadashi => "Puccha-dvādaśī pāraṇam: before dvādaśī ends",
        };
        f.write_str(s)
    }
}

/// The permitted fast-breaking interval on the morning after the fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paran {
    pub paran_type: ParanType,
    pub start: Option<JulDaysUt>,
    pub end: Option<JulDaysUt>,
    pub time_zone: Tz,
}

impl Paran {
    pub fn new(
        paran_type: ParanType,
        start: Option<JulDaysUt>,
        end: Option<JulDaysUt>,
        time_zone: Tz,
    ) -> Self {
        Self {
            paran_type,
            start,
            end,
            time_zone,
        }
    }

    /// Minute granularity unless the minute-rounded window is shorter
    /// than five minutes; then seconds.
    pub fn is_rounded_to_minutes(&self) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return true;
        };
        let start_rounded = start.round_to_minute_up(self.time_zone);
        let end_rounded = end.round_to_minute_down(self.time_zone);
        (end_rounded - start_rounded).num_minutes() >= 5
    }

    /// Window start as zoned wall time, rounded up.
    pub fn start_str(&self) -> String {
        match self.start {
            None => "…".to_string(),
            Some(t) if self.is_rounded_to_minutes() => {
                t.round_to_minute_up(self.time_zone).format("%H:%M").to_string()
            }
            Some(t) => t
                .round_to_second_up(self.time_zone)
                .format("%H:%M:%S")
                .to_string(),
        }
    }

    /// Window end as zoned wall time, rounded down.
    pub fn end_str(&self) -> String {
        match self.end {
            None => "…".to_string(),
            Some(t) if self.is_rounded_to_minutes() => {
                t.round_to_minute_down(self.time_zone).format("%H:%M").to_string()
            }
            Some(t) => t
                .round_to_second_down(self.time_zone)
                .format("%H:%M:%S")
                .to_string(),
        }
    }
}

impl fmt::Display for Paran {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start_str(), self.end_str())
    }
}

/// Pāraṇam for a single-day fast.
///
/// `sunrise`/`sunset` bound the pāraṇam day; `dvadashi_start`/
/// `dvadashi_end` bound the twelfth tithi. Rules, in order:
/// 1. sunrise before the end of dvādaśī's first quarter — wait for the
///    quarter, no declared end;
/// 2. dvādaśī ends in the morning window — break fast before it does;
/// 3. otherwise the standard window up to one fifth of the daytime.
pub fn compute_paran(
    sunrise: JulDaysUt,
    sunset: JulDaysUt,
    dvadashi_start: JulDaysUt,
    dvadashi_end: JulDaysUt,
    time_zone: Tz,
) -> Paran {
    let one_fifth = proportional_time(sunrise, sunset, 0.2);
    let quarter = proportional_time(dvadashi_start, dvadashi_end, 0.25);

    if sunrise < quarter {
        Paran::new(ParanType::FromQuarterDvadashi, Some(quarter), None, time_zone)
    } else if sunrise <= dvadashi_end && dvadashi_end < one_fifth {
        Paran::new(
            ParanType::PucchaDvadashi,
            Some(sunrise),
            Some(dvadashi_end),
            time_zone,
        )
    } else {
        Paran::new(ParanType::Standard, Some(sunrise), Some(one_fifth), time_zone)
    }
}

/// Pāraṇam after a two-day (atiriktā) fast.
///
/// The quarter rule cannot apply — dvādaśī began a full day earlier — so
/// only the puccha check remains.
pub fn compute_atirikta_paran(
    sunrise: JulDaysUt,
    sunset: JulDaysUt,
    dvadashi_end: JulDaysUt,
    time_zone: Tz,
) -> Paran {
    let one_fifth = proportional_time(sunrise, sunset, 0.2);
    if one_fifth < dvadashi_end {
        Paran::new(ParanType::Standard, Some(sunrise), Some(one_fifth), time_zone)
    } else {
        Paran::new(
            ParanType::PucchaDvadashi,
            Some(sunrise),
            Some(dvadashi_end),
            time_zone,
        )
    }
}
