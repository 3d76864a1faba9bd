use crate::planet::planet_type::PlanetType;

pub const TEXTURE_ROOT: &str = "/textures";
const DEFAULT_FOLDER: &str = "Rock";
const GAS_GIANT: &str = "Gas_Giant";

/// Folder for a type name. Names outside the taxonomy land in `Rock`.
pub fn texture_folder(type_name: &str) -> &'static str {
    type_name
        .parse::<PlanetType>()
        .map(PlanetType::texture_folder)
        .unwrap_or(DEFAULT_FOLDER)
}

pub fn texture_file_name(type_name: &str, variation: u32, has_clouds: bool) -> String {
    if type_name == GAS_GIANT {
        return format!("Gas_{}.png", variation);
    }

    let cloud_layer = has_clouds
        && type_name
            .parse::<PlanetType>()
            .map(PlanetType::supports_clouds)
            .unwrap_or(false);

    if cloud_layer {
        format!("{}_{}_clouds.png", type_name, variation)
    } else {
        format!("{}_{}.png", type_name, variation)
    }
}

/// Path of the surface texture for a classified planet.
///
/// The file name always keeps `type_name` as given, so an unknown type
/// resolves to `/textures/Rock/<type>_<n>.png`. That matches the deployed
/// asset layout and is kept for compatibility.
pub fn texture_path(type_name: &str, variation: u32, has_clouds: bool) -> String {
    format!(
        "{}/{}/{}",
        TEXTURE_ROOT,
        texture_folder(type_name),
        texture_file_name(type_name, variation, has_clouds)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn cloud_variant_for_cloud_capable_type() {
        assert_eq!(
            texture_path("Terrestrial", 2, true),
            "/textures/Terrestrial/Terrestrial_2_clouds.png"
        );
        assert_eq!(
            texture_path("Terrestrial", 2, false),
            "/textures/Terrestrial/Terrestrial_2.png"
        );
    }

    #[test]
    fn gas_giant_ignores_clouds() {
        assert_eq!(texture_path("Gas_Giant", 3, true), "/textures/Gas_Giant/Gas_3.png");
        assert_eq!(texture_path("Gas_Giant", 3, false), "/textures/Gas_Giant/Gas_3.png");
    }

    #[test]
    fn unknown_type_uses_rock_folder_but_keeps_name() {
        assert_eq!(
            texture_path("Unknown_Type", 1, false),
            "/textures/Rock/Unknown_Type_1.png"
        );
        assert_eq!(
            texture_path("Unknown_Type", 1, true),
            "/textures/Rock/Unknown_Type_1.png"
        );
    }

    #[test]
    fn clouds_dropped_for_types_without_cloud_layer() {
        for name in ["Volcanic", "Martian", "Ice", "Primordial", "Dry", "Rock", "Oasis"] {
            let path = texture_path(name, 4, true);
            assert!(!path.ends_with("_clouds.png"), "{} should not use clouds: {}", name, path);
        }
        assert_eq!(
            texture_path("Venusian", 1, true),
            "/textures/Venusian/Venusian_1_clouds.png"
        );
    }

    #[test]
    fn every_type_has_its_own_folder() {
        let mut count = 0;
        for kind in PlanetType::iter() {
            let name = kind.to_string();
            assert_eq!(texture_folder(&name), name);
            count += 1;
        }
        assert_eq!(count, 18);
    }
}
