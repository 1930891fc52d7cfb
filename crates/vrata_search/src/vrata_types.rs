//! Vrata result types and the ativṛddhādi night classification.

use std::fmt;

use chrono::NaiveDate;
use vrata_astro::Location;
use vrata_time::{DoubleDays, JulDaysUt};

use crate::paran::Paran;

/// Kind of fast resolved for an ekādaśī.
///
/// `Sandigdha*` variants mark fasts that were shifted forward one solar
/// day because the sub-aruṇodaya test instant was still daśamī.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrataType {
    Ekadashi,
    SandigdhaEkadashi,
    WithAtiriktaEkadashi,
    SandigdhaAtiriktaEkadashi,
    WithAtiriktaDvadashi,
    SandigdhaWithAtiriktaDvadashi,
}

impl VrataType {
    /// The doubtful variant of this type.
    pub fn sandigdha(self) -> Self {
        match self {
            Self::Ekadashi | Self::SandigdhaEkadashi => Self::SandigdhaEkadashi,
            Self::WithAtiriktaEkadashi | Self::SandigdhaAtiriktaEkadashi => {
                Self::SandigdhaAtiriktaEkadashi
            }
            Self::WithAtiriktaDvadashi | Self::SandigdhaWithAtiriktaDvadashi => {
                Self::SandigdhaWithAtiriktaDvadashi
            }
        }
    }
}

/// Whether this fast spans two days.
pub fn is_atirikta(vrata_type: VrataType) -> bool {
    matches!(
        vrata_type,
        VrataType::WithAtiriktaEkadashi
            | VrataType::SandigdhaAtiriktaEkadashi
            | VrataType::WithAtiriktaDvadashi
            | VrataType::SandigdhaWithAtiriktaDvadashi
    )
}

impl fmt::Display for VrataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ekadashi => "Ekadashi",
            Self::SandigdhaEkadashi => "Sandigdha Ekadashi",
            Self::WithAtiriktaEkadashi => "Ekadashi with Atirikta Ekadashi",
            Self::SandigdhaAtiriktaEkadashi => "Sandigdha Ekadashi with Atirikta Ekadashi",
            Self::WithAtiriktaDvadashi => "Ekadashi with Atirikta Dvadashi",
            Self::SandigdhaWithAtiriktaDvadashi => "Sandigdha Ekadashi with Atirikta Dvadashi",
        };
        f.write_str(s)
    }
}

/// The 26 ekādaśī names of the year cycle, in traditional order starting
/// from the ekādaśī after Phālguna pūrṇimā. Indices 1–23 and 0 pair off
/// with (amānta month, pakṣa), śukla first within each month; the last
/// two belong to an adhika month. [`crate::masa::ekadashi_name_for_sunrise`]
/// resolves a fast-day sunrise to its entry.
pub const EKADASHI_NAMES: [&str; 26] = [
    "Pāpamocanī",
    "Kāmadā",
    "Varūthinī",
    "Mohinī",
    "Aparā",
    "Nirjalā",
    "Yoginī",
    "Śayanī",
    "Kāmikā",
    "Pāvitrā",
    "Ajā",
    "Pārśva-parivartinī",
    "Indirā",
    "Pāśāṅkuśā",
    "Ramā",
    "Prabodhinī",
    "Utpattikā",
    "Mokṣadā",
    "Saphalā",
    "Putradā",
    "Ṣaṭ-tilā",
    "Jayā",
    "Vijayā",
    "Āmalakī",
    "Kamalā",
    "Padmā",
];

/// Four-way night classification deciding which sub-aruṇodaya instant
/// tests for daśamī contamination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ativrddhaadi {
    Ativrddha,
    Vrddha,
    Samyam,
    Hrasva,
}

impl fmt::Display for Ativrddhaadi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ativrddha => "ativṛddhiḥ",
            Self::Vrddha => "vṛddhiḥ",
            Self::Samyam => "sāmyam",
            Self::Hrasva => "hrāsaḥ",
        };
        f.write_str(s)
    }
}

/// Key instants of the night preceding the fast-day sunrise.
///
/// The reference instants are named by their ghaṭikā count from the
/// previous sunrise (a full sunrise-to-sunrise cycle being 60 ghaṭikās):
/// 54gh40v is 5gh20v before sunrise, and so on. Here a ghaṭikā is 1/30 of
/// the actual night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VrataTimePoints {
    pub sunset0: JulDaysUt,
    pub sunrise1: JulDaysUt,
    pub ativrddha_54gh_40vigh: JulDaysUt,
    pub vrddha_55gh: JulDaysUt,
    pub samyam_55gh_50vigh: JulDaysUt,
    pub hrasva_55gh_55vigh: JulDaysUt,
    pub arunodaya: JulDaysUt,
    pub dashami_start: JulDaysUt,
    pub ekadashi_start: JulDaysUt,
    pub dvadashi_start: JulDaysUt,
    pub trayodashi_start: JulDaysUt,
}

impl VrataTimePoints {
    /// Daśamī length in night-ghaṭikās.
    pub fn dashami_length_gh(&self) -> f64 {
        self.tithi_length_gh(self.dashami_start, self.ekadashi_start)
    }

    /// Ekādaśī length in night-ghaṭikās.
    pub fn ekadashi_length_gh(&self) -> f64 {
        self.tithi_length_gh(self.ekadashi_start, self.dvadashi_start)
    }

    /// Dvādaśī length in night-ghaṭikās.
    pub fn dvadashi_length_gh(&self) -> f64 {
        self.tithi_length_gh(self.dvadashi_start, self.trayodashi_start)
    }

    fn tithi_length_gh(&self, from: JulDaysUt, to: JulDaysUt) -> f64 {
        let ghatika = self.night_ghatika();
        (to - from).0 / ghatika.0
    }

    /// One ghaṭikā of this night (night / 30).
    fn night_ghatika(&self) -> DoubleDays {
        (self.sunrise1 - self.sunset0) / 30.0
    }

    /// Classify the night from the growth of adjacent tithi lengths.
    pub fn ativrddhaadi(&self) -> Ativrddhaadi {
        let delta1 = self.ekadashi_length_gh() - self.dashami_length_gh();
        let delta2 = self.dvadashi_length_gh() - self.ekadashi_length_gh();
        let max = delta1.max(delta2);
        if delta1 > 0.0 && delta2 > 0.0 && max >= 4.0 {
            Ativrddhaadi::Ativrddha
        } else if delta1 > 0.0 && delta2 > 0.0 && max >= 1.0 {
            Ativrddhaadi::Vrddha
        } else if delta1 < 0.0 && delta2 < 0.0 {
            Ativrddhaadi::Hrasva
        } else {
            Ativrddhaadi::Samyam
        }
    }

    /// The instant whose tithi must not be daśamī for the fast to stand.
    pub fn relevant_instant(&self) -> JulDaysUt {
        match self.ativrddhaadi() {
            Ativrddhaadi::Ativrddha => self.ativrddha_54gh_40vigh,
            Ativrddhaadi::Vrddha => self.vrddha_55gh,
            Ativrddhaadi::Samyam => self.samyam_55gh_50vigh,
            Ativrddhaadi::Hrasva => self.hrasva_55gh_55vigh,
        }
    }
}

/// A resolved ekādaśī fast with its pāraṇam window.
///
/// `sunrise0` is populated only when the fast was shifted forward one day
/// (the skipped sunrise). `sunrise3`/`sunset3` are populated only for
/// two-day (atiriktā) fasts.
#[derive(Debug, Clone, PartialEq)]
pub struct Vrata {
    pub vrata_type: VrataType,
    /// Traditional name from [`EKADASHI_NAMES`], e.g. `Saphalā`.
    pub ekadashi_name: &'static str,
    /// Local civil date of the fast at the location.
    pub date: NaiveDate,
    pub location: Location,
    pub sunrise0: Option<JulDaysUt>,
    pub sunset0: JulDaysUt,
    pub sunrise1: JulDaysUt,
    pub sunset1: JulDaysUt,
    pub sunrise2: JulDaysUt,
    pub sunset2: JulDaysUt,
    pub sunrise3: Option<JulDaysUt>,
    pub sunset3: Option<JulDaysUt>,
    pub times: VrataTimePoints,
    pub paran: Paran,
}

impl Vrata {
    /// Location name, marked when the polar fallback lowered the latitude.
    pub fn location_name(&self) -> String {
        if self.location.latitude_adjusted {
            format!("{} (adjusted)", self.location.name)
        } else {
            self.location.name.clone()
        }
    }
}

impl fmt::Display for Vrata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} at {}", self.vrata_type, self.date, self.location_name())
    }
}
