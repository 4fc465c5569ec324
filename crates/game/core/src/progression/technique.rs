//! Procedural technique generation.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::env::TechniqueOracle;
use crate::types::Technique;

/// Generate a technique for the given realm/stage indices.
///
/// The name is drawn from the sect × type × element tables and the power
/// bonus scales with progression plus a uniform roll from the type's range,
/// rounded to two decimals:
///
/// ```text
/// power = realm_index * 10 + stage_index * 2 + uniform(bonus_min..=bonus_max)
/// ```
///
/// Any lookup failure (empty tables, inverted range) returns
/// [`Technique::default_fallback`] instead of an error — reward flows depend
/// on this for backward compatibility.
pub fn generate_technique(
    realm_idx: usize,
    stage_idx: usize,
    techniques: &dyn TechniqueOracle,
    rng: &mut impl Rng,
) -> Technique {
    let tables = techniques.tables();

    let (Some(sect), Some(ty), Some(element)) = (
        tables.sects.choose(rng),
        tables.types.choose(rng),
        tables.elements.choose(rng),
    ) else {
        return Technique::default_fallback();
    };

    if ty.bonus_min > ty.bonus_max {
        return Technique::default_fallback();
    }

    let scaling = (realm_idx * 10 + stage_idx * 2) as f64;
    let roll = rng.gen_range(ty.bonus_min..=ty.bonus_max);
    let power_bonus = ((scaling + roll) * 100.0).round() / 100.0;

    Technique {
        name: format!("{} {} of {}", sect, ty.name, element),
        element: *element,
        power_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{TechniqueTables, TechniqueTypeDef};
    use crate::types::Element;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Tables(TechniqueTables);

    impl TechniqueOracle for Tables {
        fn tables(&self) -> &TechniqueTables {
            &self.0
        }
    }

    #[test]
    fn power_scales_and_rounds() {
        let tables = Tables(TechniqueTables {
            sects: vec!["Azure Peak".into()],
            types: vec![TechniqueTypeDef {
                name: "Sword Art".into(),
                bonus_min: 1.0,
                bonus_max: 3.0,
            }],
            elements: vec![Element::Fire],
        });
        let mut rng = StdRng::seed_from_u64(7);
        let t = generate_technique(2, 4, &tables, &mut rng);

        assert_eq!(t.name, "Azure Peak Sword Art of fire");
        assert!(t.power_bonus >= 29.0 && t.power_bonus <= 31.0);
        // Rounded to two decimals.
        assert_eq!(t.power_bonus, (t.power_bonus * 100.0).round() / 100.0);
    }

    #[test]
    fn empty_tables_fall_back() {
        let tables = Tables(TechniqueTables {
            sects: vec![],
            types: vec![],
            elements: vec![],
        });
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generate_technique(5, 5, &tables, &mut rng),
            Technique::default_fallback()
        );
    }
}
