//! Ekādaśī vrata search engine.
//!
//! This crate provides:
//! - The tithi-boundary solver (`find_tithi_start`)
//! - The vrata resolver (`find_next_vrata`): ativṛddhādi postponement,
//!   atiriktā two-day fast detection, pāraṇam window
//! - Amānta month determination and traditional ekādaśī naming
//! - The polar-latitude fallback and the memoised registry batch driver
//! - A chronological detail report for presentation layers

pub mod batch;
pub mod detail;
pub mod error;
pub mod masa;
pub mod paran;
pub mod tithi_search;
pub mod vrata;
pub mod vrata_types;

pub use batch::{calc_all, calc_one, calc_one_named, MaybeVrata, VratasForDate};
pub use detail::{detail_events, NamedTimePoint};
pub use error::CalcError;
pub use masa::{amanta_masa, ekadashi_name_for_sunrise, next_amavasya, Masa};
pub use paran::{compute_atirikta_paran, compute_paran, Paran, ParanType};
pub use tithi_search::find_tithi_start;
pub use vrata::find_next_vrata;
pub use vrata_types::{
    is_atirikta, Ativrddhaadi, Vrata, VrataTimePoints, VrataType, EKADASHI_NAMES,
};
