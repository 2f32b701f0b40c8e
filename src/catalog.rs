//! The specimen catalog and the date selector. A [`Catalog`] holds two ordered
//! lists of [`Specimen`]s (rocks and minerals) and maps any calendar date onto
//! one entry of each via [`day_of_year`] modulo the list length.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fmt;

/// A named catalog entry (a rock or a mineral) with its bundled description.
/// The description doubles as the fallback text on generated pages when the
/// client-side encyclopedia lookup fails.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Specimen {
    pub name: String,
    pub description: String,
}

impl Specimen {
    pub fn new(name: &str, description: &str) -> Specimen {
        Specimen {
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// The rocks and minerals to choose from. Order matters: it decides which
/// entry lands on which day. Both lists are guaranteed non-empty.
#[derive(Clone, Debug)]
pub struct Catalog {
    rocks: Vec<Specimen>,
    minerals: Vec<Specimen>,
}

/// The derived pairing for a single date. Never stored; recompute it with
/// [`Catalog::select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySelection<'a> {
    pub date: NaiveDate,
    pub rock: &'a Specimen,
    pub mineral: &'a Specimen,
}

impl Catalog {
    /// Builds a catalog, refusing empty lists since every date must map to a
    /// valid index.
    pub fn new(rocks: Vec<Specimen>, minerals: Vec<Specimen>) -> Result<Catalog> {
        if rocks.is_empty() {
            return Err(Error::Empty(Kind::Rocks));
        }
        if minerals.is_empty() {
            return Err(Error::Empty(Kind::Minerals));
        }
        Ok(Catalog { rocks, minerals })
    }

    /// The curated catalog shipped with the binary: 30 rocks and 34 minerals.
    pub fn builtin() -> Catalog {
        let to_specimens = |table: &[(&str, &str)]| -> Vec<Specimen> {
            table
                .iter()
                .map(|(name, description)| Specimen::new(name, description))
                .collect()
        };
        Catalog {
            rocks: to_specimens(ROCKS),
            minerals: to_specimens(MINERALS),
        }
    }

    pub fn rocks(&self) -> &[Specimen] {
        &self.rocks
    }

    pub fn minerals(&self) -> &[Specimen] {
        &self.minerals
    }

    /// Maps `date` onto one rock and one mineral. Leap years shift every date
    /// after February 29th by one slot relative to other years.
    pub fn select(&self, date: NaiveDate) -> DaySelection<'_> {
        let day = day_of_year(date) as usize;
        DaySelection {
            date,
            rock: &self.rocks[day % self.rocks.len()],
            mineral: &self.minerals[day % self.minerals.len()],
        }
    }

    /// Selections for each date in `dates`, in the same order.
    pub fn select_all(&self, dates: &[NaiveDate]) -> Vec<DaySelection<'_>> {
        dates.iter().map(|date| self.select(*date)).collect()
    }
}

/// The 1-based ordinal of `date` within its year (January 1st is 1).
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Returns `n` consecutive dates ending at `today`, most recent first. The
/// list stops early at the earliest representable date.
pub fn recent_dates(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    std::iter::successors(Some(today), |date| date.pred_opt())
        .take(n)
        .collect()
}

type Result<T> = std::result::Result<T, Error>;

/// Which of the two catalog lists an [`Error`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Rocks,
    Minerals,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Rocks => f.write_str("rocks"),
            Kind::Minerals => f.write_str("minerals"),
        }
    }
}

/// Represents an invalid catalog.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when one of the lists has no entries.
    Empty(Kind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Empty(kind) => write!(f, "Catalog has no {}", kind),
        }
    }
}

impl std::error::Error for Error {}

const ROCKS: &[(&str, &str)] = &[
    ("Granite", "A coarse-grained intrusive igneous rock composed mainly of quartz, feldspar, and mica. Widely used as a construction and decorative stone."),
    ("Basalt", "A dark, fine-grained volcanic rock that makes up most of the ocean floor. Forms from rapidly cooled lava."),
    ("Sandstone", "A sedimentary rock composed mainly of sand-sized mineral particles or rock fragments."),
    ("Limestone", "A sedimentary rock composed largely of calcite. Forms from marine organisms and chemical precipitation."),
    ("Marble", "A metamorphic rock formed from limestone under heat and pressure. Prized for sculpture and architecture."),
    ("Slate", "A fine-grained metamorphic rock that splits into thin sheets. Used for roofing and flooring."),
    ("Schist", "A medium-grade metamorphic rock with visible mineral grains aligned in parallel layers."),
    ("Gneiss", "A high-grade metamorphic rock with alternating light and dark bands. Very hard and durable."),
    ("Obsidian", "Volcanic glass formed from rapidly cooled lava. Sharp edges made it valuable for tools and weapons."),
    ("Pumice", "A vesicular volcanic rock so full of gas bubbles that it can float on water."),
    ("Andesite", "An intermediate volcanic rock named after the Andes Mountains where it's common."),
    ("Rhyolite", "A fine-grained volcanic rock with high silica content. The volcanic equivalent of granite."),
    ("Shale", "A fine-grained sedimentary rock formed from clay and silt. The most common sedimentary rock."),
    ("Conglomerate", "A sedimentary rock composed of rounded pebbles and cobbles cemented together."),
    ("Breccia", "Similar to conglomerate but composed of angular rock fragments cemented together."),
    ("Diorite", "An intrusive igneous rock intermediate in composition between granite and gabbro."),
    ("Gabbro", "A coarse-grained intrusive igneous rock, the plutonic equivalent of basalt."),
    ("Peridotite", "A dense, coarse-grained igneous rock composed mainly of olivine and pyroxene."),
    ("Dunite", "An ultramafic rock composed almost entirely of olivine."),
    ("Tuff", "A rock formed from consolidated volcanic ash."),
    ("Mudstone", "A fine-grained sedimentary rock composed of clay and silt particles."),
    ("Siltstone", "A sedimentary rock composed mainly of silt-sized particles."),
    ("Quartzite", "A hard metamorphic rock formed from sandstone. Very resistant to weathering."),
    ("Anthracite", "The highest grade of coal. Very hard and has the highest carbon content."),
    ("Bituminous coal", "A relatively soft coal containing a tar-like substance called bitumen. The most abundant type of coal."),
    ("Lignite", "A soft brownish coal showing traces of plant structure. The lowest grade of coal."),
    ("Dolomite rock", "A sedimentary carbonate rock composed primarily of the mineral dolomite."),
    ("Chert", "A hard, fine-grained sedimentary rock composed of microcrystalline quartz."),
    ("Phyllite", "A metamorphic rock intermediate between slate and schist with a silky sheen."),
    ("Migmatite", "A high-grade metamorphic rock showing both igneous and metamorphic characteristics."),
];

const MINERALS: &[(&str, &str)] = &[
    ("Quartz", "One of the most abundant minerals in Earth's crust. Composed of silicon and oxygen, it's very hard and comes in many varieties."),
    ("Feldspar", "The most abundant mineral group in Earth's crust, comprising about 60% of terrestrial rocks."),
    ("Calcite", "A carbonate mineral and the main component of limestone and marble. Reacts with dilute acid."),
    ("Gypsum", "A soft sulfate mineral used to make plaster of Paris and drywall. Can form large transparent crystals."),
    ("Halite", "Rock salt. Forms from evaporation of seawater. Essential for human life and historically valuable for trade."),
    ("Pyrite", "Known as 'fool's gold' for its metallic luster and pale brass-yellow color. An iron sulfide mineral."),
    ("Magnetite", "A black magnetic iron oxide. The most magnetic of all naturally occurring minerals on Earth."),
    ("Hematite", "The main ore of iron. Named from the Greek word for blood due to its red color when powdered."),
    ("Garnet", "A group of silicate minerals used as gemstones and abrasives. Commonly deep red but can be many colors."),
    ("Olivine", "A green silicate mineral common in Earth's mantle. The gem variety is called peridot."),
    ("Mica", "A group of silicate minerals known for their perfect sheet-like cleavage and flexibility."),
    ("Talc", "The softest mineral (hardness 1 on Mohs scale). Used in cosmetics and as a lubricant."),
    ("Fluorite", "A colorful halide mineral that fluoresces under UV light. Used in optics and metallurgy."),
    ("Apatite", "A group of phosphate minerals. The main component of tooth enamel and bones."),
    ("Orthoclase", "A common potassium feldspar mineral. An important component of granite."),
    ("Plagioclase", "A series of sodium-calcium feldspar minerals. Very common in igneous rocks."),
    ("Hornblende", "A dark amphibole mineral common in igneous and metamorphic rocks."),
    ("Augite", "A black or dark green pyroxene mineral common in basalt and gabbro."),
    ("Serpentine", "A group of green minerals formed by alteration of olivine and pyroxene. Often used as decorative stone."),
    ("Kaolinite", "A white clay mineral used in ceramics and paper manufacturing."),
    ("Chalcopyrite", "The most abundant copper ore mineral. Has a brass-yellow color."),
    ("Galena", "The primary ore of lead. Forms cubic crystals with perfect cleavage."),
    ("Sphalerite", "The primary ore of zinc. Can be various colors but often brown or black."),
    ("Barite", "A heavy sulfate mineral used in drilling mud and as a source of barium."),
    ("Graphite", "A soft form of carbon used in pencils and lubricants. The most stable form of carbon under standard conditions."),
    ("Diamond", "The hardest natural substance. A form of carbon crystallized under extreme pressure and temperature."),
    ("Corundum", "The second hardest mineral after diamond. Includes ruby and sapphire varieties."),
    ("Beryl", "A beryllium silicate mineral. Gem varieties include emerald and aquamarine."),
    ("Topaz", "A hard silicate mineral often used as a gemstone. Can be many colors."),
    ("Tourmaline", "A complex boron silicate mineral that comes in many colors. Often used as a gemstone."),
    ("Zircon", "A zirconium silicate mineral used in geochronology and as a gemstone."),
    ("Chlorite", "A green sheet silicate mineral common in low-grade metamorphic rocks."),
    ("Epidote", "A green calcium aluminum silicate mineral common in metamorphic rocks."),
    ("Dolomite", "A carbonate mineral similar to limestone but contains magnesium. Used as a source of magnesia."),
];

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(30, catalog.rocks().len());
        assert_eq!(34, catalog.minerals().len());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(1, day_of_year(date(2023, 1, 1)));
        assert_eq!(65, day_of_year(date(2024, 3, 5)));
        assert_eq!(365, day_of_year(date(2023, 12, 31)));
        assert_eq!(366, day_of_year(date(2024, 12, 31)));
    }

    #[test]
    fn test_select_jan_first() {
        let catalog = Catalog::builtin();
        let selection = catalog.select(date(2025, 1, 1));
        assert_eq!("Basalt", selection.rock.name);
        assert_eq!("Feldspar", selection.mineral.name);
    }

    #[test]
    fn test_select_wraps_to_first_rock() {
        // day 30
        let catalog = Catalog::builtin();
        assert_eq!("Granite", catalog.select(date(2025, 1, 30)).rock.name);
        // day 34
        assert_eq!("Quartz", catalog.select(date(2025, 2, 3)).mineral.name);
    }

    #[test]
    fn test_select_march_fifth_leap_year() {
        let catalog = Catalog::builtin();
        let selection = catalog.select(date(2024, 3, 5));
        assert_eq!("Slate", selection.rock.name);
        assert_eq!("Chlorite", selection.mineral.name);
    }

    #[test]
    fn test_leap_year_shifts_mapping() {
        let catalog = Catalog::builtin();
        let leap = catalog.select(date(2024, 3, 5));
        let common = catalog.select(date(2023, 3, 5));
        assert_ne!(leap.rock, common.rock);
        assert_eq!(catalog.select(date(2023, 3, 6)).rock, leap.rock);
    }

    #[test]
    fn test_select_is_deterministic() {
        let catalog = Catalog::builtin();
        let mut d = date(2024, 1, 1);
        while d.year() == 2024 {
            assert_eq!(catalog.select(d), catalog.select(d));
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_single_entry_lists() -> Result<()> {
        let catalog = Catalog::new(
            vec![Specimen::new("Only rock", "r")],
            vec![Specimen::new("Only mineral", "m")],
        )?;
        let selection = catalog.select(date(2024, 7, 19));
        assert_eq!("Only rock", selection.rock.name);
        assert_eq!("Only mineral", selection.mineral.name);
        Ok(())
    }

    #[test]
    fn test_empty_lists_rejected() {
        let m = vec![Specimen::new("Quartz", "q")];
        assert_eq!(
            Error::Empty(Kind::Rocks),
            Catalog::new(Vec::new(), m.clone()).unwrap_err()
        );
        assert_eq!(
            Error::Empty(Kind::Minerals),
            Catalog::new(m, Vec::new()).unwrap_err()
        );
    }

    #[test]
    fn test_recent_dates() {
        let dates = recent_dates(date(2024, 3, 2), 3);
        assert_eq!(vec![date(2024, 3, 2), date(2024, 3, 1), date(2024, 2, 29)], dates);
        assert_eq!(30, recent_dates(date(2024, 3, 2), 30).len());
        assert!(recent_dates(date(2024, 3, 2), 0).is_empty());
    }

    #[test]
    fn test_recent_dates_huge_window() {
        let earliest = NaiveDate::MIN.succ_opt().unwrap();
        assert_eq!(
            vec![earliest, NaiveDate::MIN],
            recent_dates(earliest, 400_000_000)
        );
    }
}
