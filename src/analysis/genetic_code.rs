//! Genetic code tables understood by HyPhy.

use crate::error::Error;
use serde::Serialize;

/// Table of genetic codes in HyPhy's menu order. Ids are 1-based.
const GENETIC_CODES: [&str; 19] = [
    "Universal",
    "Vertebrate mtDNA",
    "Yeast mtDNA",
    "Mold/Protozoan mtDNA",
    "Invertebrate mtDNA",
    "Ciliate Nuclear",
    "Echinoderm mtDNA",
    "Euplotid Nuclear",
    "Alt. Yeast Nuclear",
    "Ascidian mtDNA",
    "Flatworm mtDNA",
    "Blepharisma Nuclear",
    "Chlorophycean mtDNA",
    "Trematode mtDNA",
    "Scenedesmus obliquus mtDNA",
    "Thraustochytrium mtDNA",
    "Pterobranchia mtDNA",
    "SR1 and Gracilibacteria",
    "Pachysolen Nuclear",
];

/// A codon translation table, selected by name or number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneticCode {
    id: u8,
    name: &'static str,
}

impl GeneticCode {
    /// The standard code.
    pub const UNIVERSAL: Self = Self {
        id: 1,
        name: GENETIC_CODES[0],
    };

    /// Look up a code by its 1-based id.
    pub fn from_id(id: u8) -> Option<Self> {
        let index = usize::from(id).checked_sub(1)?;
        GENETIC_CODES
            .get(index)
            .map(|&name| Self { id, name })
    }

    /// Look up a code by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        GENETIC_CODES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name.trim()))
            .and_then(|index| u8::try_from(index + 1).ok())
            .and_then(Self::from_id)
    }

    /// All codes in id order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=19).filter_map(Self::from_id)
    }

    /// 1-based id.
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Canonical name, as passed to HyPhy.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::UNIVERSAL
    }
}

impl std::fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::str::FromStr for GeneticCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidGeneticCode {
            value: s.to_string(),
        };

        match s.trim().parse::<u8>() {
            Ok(id) => Self::from_id(id).ok_or_else(invalid),
            Err(_) => Self::from_name(s).ok_or_else(invalid),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_nineteen_codes() {
        assert_eq!(GeneticCode::all().count(), 19);
        assert_eq!(GeneticCode::all().last().unwrap().name(), "Pachysolen Nuclear");
    }

    #[test]
    fn test_parse_by_number() {
        let code: GeneticCode = "2".parse().unwrap();
        assert_eq!(code.name(), "Vertebrate mtDNA");
        assert_eq!(code.id(), 2);
    }

    #[test]
    fn test_parse_by_name() {
        let code: GeneticCode = "Mold/Protozoan mtDNA".parse().unwrap();
        assert_eq!(code.id(), 4);

        let code: GeneticCode = "universal".parse().unwrap();
        assert_eq!(code, GeneticCode::UNIVERSAL);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("0".parse::<GeneticCode>().is_err());
        assert!("20".parse::<GeneticCode>().is_err());
        assert!("Martian".parse::<GeneticCode>().is_err());
        assert!(matches!(
            "Martian".parse::<GeneticCode>(),
            Err(Error::InvalidGeneticCode { .. })
        ));
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(GeneticCode::from_id(15).unwrap().to_string(), "Scenedesmus obliquus mtDNA");
    }
}
