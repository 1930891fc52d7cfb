use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use vrata_astro::{CalcFlags, Location, LocationRegistry};
use vrata_search::{calc_all, calc_one, calc_one_named, detail_events, MaybeVrata};
use vrata_time::locate_zone;

#[derive(Parser)]
#[command(name = "vrata", about = "Ekādaśī vrata and pāraṇam calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Next vrata for one location, with the full detail timeline
    Next {
        /// Base date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Location name from the registry
        #[arg(long)]
        location: Option<String>,
        /// Ad-hoc location: latitude in degrees, north positive
        #[arg(long)]
        latitude: Option<f64>,
        /// Ad-hoc location: longitude in degrees, east positive
        #[arg(long)]
        longitude: Option<f64>,
        /// Ad-hoc location: IANA zone name, e.g. Europe/Prague
        #[arg(long)]
        zone: Option<String>,
        /// Use disc-edge sunrise (reference-table definition)
        #[arg(long)]
        disc_edge: bool,
    },
    /// Next vrata for every registry location, one line each
    All {
        /// Base date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Use disc-edge sunrise (reference-table definition)
        #[arg(long)]
        disc_edge: bool,
    },
    /// List the location registry
    Locations,
}

fn parse_date(s: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            eprintln!("Invalid date '{s}', expected YYYY-MM-DD");
            std::process::exit(1);
        }
    }
}

fn flags_for(disc_edge: bool) -> CalcFlags {
    if disc_edge {
        CalcFlags::disc_edge()
    } else {
        CalcFlags::default()
    }
}

/// Build a one-off location from explicit coordinates and a zone name.
fn ad_hoc_location(latitude: f64, longitude: f64, zone: &str) -> Location {
    match locate_zone(zone) {
        Ok(tz) => Location::new(&format!("{latitude:.4} {longitude:.4}"), latitude, longitude, tz),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn print_one_line(vrata: &MaybeVrata) {
    match vrata {
        Ok(v) => println!(
            "{:<28} {}  {:<20} {}  pāraṇam {}",
            v.location_name(),
            v.date,
            v.ekadashi_name,
            v.vrata_type,
            v.paran
        ),
        Err(e) => println!("Can't find next ekādaśī: {e}"),
    }
}

fn print_details(vrata: &MaybeVrata) {
    match vrata {
        Ok(v) => {
            println!("# {}", v.location_name());
            println!("{} ekādaśī", v.ekadashi_name);
            println!("{}:", v);
            println!("{}", v.paran.paran_type);
            let tz = v.location.time_zone;
            for event in detail_events(v) {
                let zoned = event.time.as_zoned(tz);
                println!("{} {}", zoned.format("%Y-%m-%d %H:%M:%S%.6f %Z"), event.name);
            }
        }
        Err(e) => println!("Can't find next ekādaśī: {e}"),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Next {
            date,
            location,
            latitude,
            longitude,
            zone,
            disc_edge,
        } => {
            let base_date = parse_date(&date);
            let flags = flags_for(disc_edge);
            let vrata = match (location, latitude, longitude, zone) {
                (Some(name), _, _, _) => calc_one_named(base_date, &name, flags),
                (None, Some(lat), Some(lon), Some(zone)) => {
                    calc_one(base_date, &ad_hoc_location(lat, lon, &zone), flags)
                }
                _ => {
                    eprintln!(
                        "Provide --location NAME, or --latitude, --longitude and --zone together"
                    );
                    std::process::exit(1);
                }
            };
            print_details(&vrata);
            if vrata.is_err() {
                std::process::exit(1);
            }
        }

        Commands::All { date, disc_edge } => {
            let base_date = parse_date(&date);
            let vratas = calc_all(base_date, flags_for(disc_edge));
            for vrata in vratas.iter() {
                print_one_line(vrata);
            }
        }

        Commands::Locations => {
            for l in LocationRegistry::all() {
                println!(
                    "{:<28} {:>8.4} {:>9.4}  {}",
                    l.name, l.latitude, l.longitude, l.time_zone
                );
            }
        }
    }
}
