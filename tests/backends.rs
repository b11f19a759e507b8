//! Cross-checks of the alternative back ends against the bundled DPLL solver,
//! compiled only when the matching feature selects them.

#![cfg(any(feature = "external", feature = "bdd"))]

use convex_enum::{
    generator::ConfigurationGenerator,
    structures::{configuration::Configuration, triple::triple_count},
};

use convex_enum::backend::{dpll::DpllSolver, ClauseContexts};

fn extensions<S: ClauseContexts>(
    size: u32,
    old_conf: &Configuration,
    prev_struct: &[u32],
    new_struct: &[u32],
) -> Vec<Configuration> {
    let mut generator: ConfigurationGenerator<S> = ConfigurationGenerator::new(size);
    generator.set_configuration(old_conf, &prev_struct.to_vec());
    generator.set_structure(old_conf, &new_struct.to_vec());

    let mut buffer = vec![false; triple_count(size)];
    let mut models = Vec::new();
    while generator.generate_next_configuration(&mut buffer) {
        models.push(buffer.clone());
    }
    models.sort();
    models
}

#[cfg(feature = "external")]
mod external {
    use super::*;
    use convex_enum::backend::external::ExternalSolver;

    #[test]
    fn same_extensions_as_dpll() {
        let triangle: Configuration = vec![false];
        for new_struct in [vec![4], vec![3, 1]] {
            let dpll = extensions::<DpllSolver>(4, &triangle, &[3], &new_struct);
            let external = extensions::<ExternalSolver>(4, &triangle, &[3], &new_struct);
            assert_eq!(dpll, external, "structure {new_struct:?}");
        }

        let quad: Configuration = vec![false; triple_count(4)];
        for new_struct in [vec![5], vec![4, 1]] {
            let dpll = extensions::<DpllSolver>(5, &quad, &[4], &new_struct);
            let external = extensions::<ExternalSolver>(5, &quad, &[4], &new_struct);
            assert_eq!(dpll, external, "structure {new_struct:?}");
        }
    }
}

#[cfg(feature = "bdd")]
mod bdd {
    use super::*;
    use convex_enum::backend::bdd::BddSolver;

    #[test]
    fn same_extensions_as_dpll() {
        let triangle: Configuration = vec![false];
        for new_struct in [vec![4], vec![3, 1]] {
            let dpll = extensions::<DpllSolver>(4, &triangle, &[3], &new_struct);
            let bdd = extensions::<BddSolver>(4, &triangle, &[3], &new_struct);
            assert_eq!(dpll, bdd, "structure {new_struct:?}");
        }
    }
}
