//! Chronological detail report for one vrata.
//!
//! Produces the named time points a reader wants to see around the fast:
//! sunrises, tithi boundaries with their lengths, the ativṛddhādi
//! reference instants, and the pāraṇam bounds — sorted by time, with
//! coincident events merged onto one line.

use vrata_time::{proportional_time, JulDaysUt};

use crate::vrata_types::{is_atirikta, Ativrddhaadi, Vrata};

/// One line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTimePoint {
    pub name: String,
    pub time: JulDaysUt,
}

fn point(name: impl Into<String>, time: JulDaysUt) -> NamedTimePoint {
    NamedTimePoint {
        name: name.into(),
        time,
    }
}

/// Marker for the classification that is actually in force.
fn status_mark(active: Ativrddhaadi, this: Ativrddhaadi) -> &'static str {
    if active == this {
        "**"
    } else {
        ""
    }
}

/// Build the report for a resolved vrata.
pub fn detail_events(vrata: &Vrata) -> Vec<NamedTimePoint> {
    let times = &vrata.times;
    let mut events = vec![
        point("**sunrise1**", vrata.sunrise1),
        point("aruṇodaya", times.arunodaya),
        point("sunrise2", vrata.sunrise2),
        point("sunset2", vrata.sunset2),
        point(
            "1/5 of day2",
            proportional_time(vrata.sunrise2, vrata.sunset2, 0.2),
        ),
    ];
    if is_atirikta(vrata.vrata_type) {
        if let (Some(sunrise3), Some(sunset3)) = (vrata.sunrise3, vrata.sunset3) {
            events.push(point("sunrise3", sunrise3));
            events.push(point("sunset3", sunset3));
            events.push(point("1/5 of day3", proportional_time(sunrise3, sunset3, 0.2)));
        }
    }

    // Lengths shown in civil ghaṭikās (24 minutes each), unlike the
    // classification, which uses the night-derived unit.
    let d10 = (times.ekadashi_start - times.dashami_start).as_ghatikas().0;
    let d11 = (times.dvadashi_start - times.ekadashi_start).as_ghatikas().0;
    let d12 = (times.trayodashi_start - times.dvadashi_start).as_ghatikas().0;
    events.push(point(
        format!("daśamī start ({d10:.3}gh long)"),
        times.dashami_start,
    ));
    events.push(point(
        format!(
            "**ekādaśī start** ({d11:.3}gh long; **{:+.3}gh**)",
            d11 - d10
        ),
        times.ekadashi_start,
    ));
    events.push(point(
        format!(
            "dvādaśī start ({d12:.3}gh long; **{:+.3}gh**)",
            d12 - d11
        ),
        times.dvadashi_start,
    ));
    events.push(point(
        "dvādaśī's first quarter ends",
        proportional_time(times.dvadashi_start, times.trayodashi_start, 0.25),
    ));
    events.push(point("dvādaśī end", times.trayodashi_start));

    events.push(point("sunset0", times.sunset0));
    let status = times.ativrddhaadi();
    let labelled = [
        ("54gh 40vigh", Ativrddhaadi::Ativrddha, times.ativrddha_54gh_40vigh),
        ("55gh", Ativrddhaadi::Vrddha, times.vrddha_55gh),
        ("55gh 50vigh", Ativrddhaadi::Samyam, times.samyam_55gh_50vigh),
        ("55gh 55vigh", Ativrddhaadi::Hrasva, times.hrasva_55gh_55vigh),
    ];
    for (label, class, time) in labelled {
        let m = status_mark(status, class);
        events.push(point(format!("{label} ({m}{class}{m})"), time));
    }

    // Pushed last so that after merging, pāraṇam labels follow the
    // sunrise they coincide with.
    if let Some(start) = vrata.paran.start {
        events.push(point("**pāraṇam start**", start));
    }
    if let Some(end) = vrata.paran.end {
        events.push(point("**pāraṇam end**", end));
    }

    events.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
    merge_coincident(&mut events);
    events
}

/// Join adjacent events that fall on the same instant.
fn merge_coincident(events: &mut Vec<NamedTimePoint>) {
    let mut i = 1;
    while i < events.len() {
        if events[i - 1].time.approx_eq(events[i].time) {
            let name = events.remove(i).name;
            events[i - 1].name.push_str(", ");
            events[i - 1].name.push_str(&name);
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vrata_astro::{CalcFlags, Ephemeris, LocationRegistry};

    use crate::vrata::find_next_vrata;

    fn sample_vrata() -> Vrata {
        let eph = Ephemeris::new(
            LocationRegistry::find("Udupi").unwrap(),
            CalcFlags::default(),
        );
        find_next_vrata(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), &eph).unwrap()
    }

    #[test]
    fn events_are_sorted() {
        let events = detail_events(&sample_vrata());
        for pair in events.windows(2) {
            assert!(pair[0].time <= pair[1].time, "{} before {}", pair[1].name, pair[0].name);
        }
    }

    #[test]
    fn report_names_the_key_moments() {
        let events = detail_events(&sample_vrata());
        let all = events.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join("\n");
        assert!(all.contains("sunrise1"));
        assert!(all.contains("ekādaśī start"));
        assert!(all.contains("dvādaśī's first quarter ends"));
        assert!(all.contains("pāraṇam start"));
        assert!(all.contains("aruṇodaya"));
    }

    #[test]
    fn exactly_one_classification_is_marked() {
        let events = detail_events(&sample_vrata());
        let marked = events
            .iter()
            .filter(|e| {
                e.name.contains("**ativṛddhiḥ**")
                    || e.name.contains("**vṛddhiḥ**")
                    || e.name.contains("**sāmyam**")
                    || e.name.contains("**hrāsaḥ**")
            })
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn merge_joins_identical_instants() {
        let t = JulDaysUt::new(2_459_000.0);
        let mut events = vec![point("a", t), point("b", t), point("c", t + vrata_time::DoubleDays(0.5))];
        merge_coincident(&mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "a, b");
    }
}
