use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Closed taxonomy of surface types. `GasGiant`, `Rock`, `Oasis` and `Fungal`
/// are never produced by the classifier; they exist because the texture set
/// ships folders for them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
pub enum PlanetType {
    Volcanic,
    Venusian,
    Dry,
    Martian,
    Tropical,
    Savannah,
    Swamp,
    Wetlands,
    Terrestrial,
    Oceanic,
    Alpine,
    Tundra,
    Ice,
    Primordial,
    #[serde(rename = "Gas_Giant")]
    #[strum(serialize = "Gas_Giant")]
    GasGiant,
    Rock,
    Oasis,
    Fungal,
}

pub const FALLBACK_DESCRIPTION: &str = "Um mundo misterioso aguardando exploração.";

impl PlanetType {
    /// Types whose texture set includes a cloud layer variant.
    pub fn supports_clouds(self) -> bool {
        matches!(
            self,
            Self::Oceanic
                | Self::Savannah
                | Self::Swamp
                | Self::Terrestrial
                | Self::Tropical
                | Self::Tundra
                | Self::Wetlands
                | Self::Alpine
                | Self::Venusian
                | Self::Fungal
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Volcanic => "Um mundo infernal com mares de lava e atividade geológica intensa.",
            Self::Venusian => "Efeito estufa descontrolado sob uma atmosfera densa e corrosiva.",
            Self::Dry => "Planeta árido com vastos desertos e pouca água superficial.",
            Self::Martian => "Desértico e frio, com atmosfera fina e poeira abundante.",
            Self::Tropical => "Quente e úmido, com florestas densas e oceanos quentes.",
            Self::Savannah => "Planícies extensas com estações marcadas e rios sazonais.",
            Self::Swamp => "Pântanos permanentes com alta umidade e vegetação aquática.",
            Self::Wetlands => "Regiões alagadiças, lagos e clima persistentemente úmido.",
            Self::Terrestrial => "Similar à Terra, com oceanos, continentes e clima estável.",
            Self::Oceanic => "Coberto por oceanos profundos com pouca terra emersa.",
            Self::Alpine => "Montanhoso e frio, com geleiras e neve frequente.",
            Self::Tundra => "Frio subártico com permafrost e verões curtos.",
            Self::Ice => "Mundo permanentemente congelado de gelo e rocha.",
            Self::Primordial => "Mundo jovem em torno de estrela fria, atmosfera em evolução.",
            Self::GasGiant => "Gigante gasoso.",
            Self::Rock => "Pequeno e rochoso, atmosfera mínima.",
            Self::Oasis => "Desertos com raros oásis de água.",
            Self::Fungal => "Ecossistemas dominados por fungos e esporos.",
        }
    }

    /// Description for a type given by name, for callers holding raw strings.
    pub fn describe(name: &str) -> &'static str {
        name.parse::<PlanetType>()
            .map(PlanetType::description)
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Folder under the texture root holding this type's images.
    pub fn texture_folder(self) -> &'static str {
        self.into()
    }
}
