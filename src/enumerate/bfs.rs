//! The breadth-first driver.
//!
//! An instance of Read's algorithm: all canonical configurations of one size are
//! held while those of the next size are produced, so the per-size counts come out
//! as the enumeration proceeds.
//!
//! Hull structures live in a graph grown lazily beside the configurations: a node
//! holds its structure and the indices of its (at most two) augmented structures in
//! the next size's node list, materialised the first time any configuration of the
//! parent structure is expanded and memoised after.
//! Configurations reference their structure by node index, and the order of the new
//! configuration list follows the graph expansion, which keeps the output stable
//! from run to run.

use std::io::{self, Write};

use crate::{
    canonical::Canonicalizer,
    db::Tables,
    enumerate::Tally,
    generator::ConfigurationGenerator,
    misc::{interrupt, log::targets},
    structures::{
        configuration::Configuration,
        hull::{augmentations, HullStructure},
        permutation::AutomorphismSets,
    },
};

#[cfg(feature = "print")]
use crate::{enumerate::merge_by_configuration, structures::configuration::render};

#[cfg(not(feature = "print"))]
use crate::enumerate::summary_line;

const NO_CHILD: usize = usize::MAX;

/// A node of the structure graph.
struct StructNode {
    hull: HullStructure,
    first_child: usize,
    second_child: usize,
}

impl StructNode {
    fn new(hull: HullStructure) -> Self {
        StructNode {
            hull,
            first_child: NO_CHILD,
            second_child: NO_CHILD,
        }
    }
}

/// A canonical configuration with its structure node and automorphism sets.
///
/// `prev` holds the automorphisms of the configuration with its innermost hull
/// removed, `own` those of the configuration itself.
struct ConfData {
    conf: Configuration,
    struct_index: usize,
    prev: AutomorphismSets,
    own: AutomorphismSets,
}

/// The tally and structure count of one enumerated size.
#[derive(Clone, Copy, Debug)]
pub struct SizeSummary {
    pub size: u32,
    pub tally: Tally,
    pub structures: usize,
}

/// Enumerate all canonical configurations up to `limit`, writing one summary line
/// per size, and under the `print` feature every configuration as well.
pub fn enumerate(
    limit: u32,
    tables: &Tables,
    out: &mut impl Write,
) -> io::Result<Vec<SizeSummary>> {
    assert!(limit >= 3);

    let mut summaries = Vec::new();

    #[cfg(feature = "print")]
    writeln!(out, "1: -")?;

    if limit == 3 {
        let tally = Tally {
            configurations: 1,
            mirror_symmetric: 1,
        };
        #[cfg(not(feature = "print"))]
        writeln!(out, "{}", summary_line(3, tally, None))?;
        summaries.push(SizeSummary {
            size: 3,
            tally,
            structures: 1,
        });
        return Ok(summaries);
    }

    let mut prev_configs: Vec<ConfData> = Vec::new();
    let mut new_configs: Vec<ConfData> = vec![ConfData {
        conf: vec![false],
        struct_index: 0,
        prev: AutomorphismSets::empty(),
        own: AutomorphismSets {
            plain: tables.cyclic.rotations(3).clone(),
            #[cfg(feature = "order-types")]
            mirrored: tables.cyclic.mirrored_rotations(3).clone(),
        },
    }];

    let mut prev_structs: Vec<StructNode> = Vec::new();
    let mut new_structs: Vec<StructNode> = vec![StructNode::new(vec![3])];

    let mut canon = Canonicalizer::new(limit);
    let mut s_indices: Vec<usize> = Vec::new();

    for size in 4..=limit {
        std::mem::swap(&mut prev_configs, &mut new_configs);
        std::mem::swap(&mut prev_structs, &mut new_structs);
        new_configs.clear();
        new_structs.clear();

        let mut tally = Tally::default();
        let mut generator: ConfigurationGenerator = ConfigurationGenerator::new(size);
        let mut new_config = tables.smallest.configuration(size).clone();

        for i in 0..prev_configs.len() {
            if interrupt::interrupted() {
                log::warn!(target: targets::ENUMERATION, "Interrupted at size {size} after {i} predecessors.");
                break;
            }

            let record = &prev_configs[i];
            let struct_index = record.struct_index;
            let before = tally;

            // Materialise the augmented structures on first visit.
            s_indices.clear();
            {
                let node = &mut prev_structs[struct_index];
                if node.first_child == NO_CHILD {
                    for (which, child) in augmentations(&node.hull).into_iter().enumerate() {
                        new_structs.push(StructNode::new(child));
                        let index = new_structs.len() - 1;
                        if which == 0 {
                            node.first_child = index;
                        } else {
                            node.second_child = index;
                        }
                        s_indices.push(index);
                    }
                } else {
                    s_indices.push(node.first_child);
                    if node.second_child != NO_CHILD {
                        s_indices.push(node.second_child);
                    }
                }
            }

            generator.set_configuration(&record.conf, &prev_structs[struct_index].hull);

            #[cfg(feature = "print")]
            let mut temp: [Vec<ConfData>; 2] = [Vec::new(), Vec::new()];

            #[cfg_attr(not(feature = "print"), allow(unused_variables))]
            for (k, &s_index) in s_indices.iter().enumerate() {
                let hull = &new_structs[s_index].hull;
                generator.set_structure(&record.conf, hull);

                // A new interior point leaves the whole predecessor untouched, so
                // its automorphisms apply; a grown hull only keeps the outer
                // layers, so the previous automorphisms do.
                let inherited = if *hull.last().unwrap() == 1 {
                    &record.own
                } else {
                    &record.prev
                };

                while generator.generate_next_configuration(&mut new_config) {
                    let Some(own) =
                        canon.is_canonical(&new_config, hull.len(), inherited, size, tables)
                    else {
                        continue;
                    };

                    tally.count(&own);

                    if size != limit || cfg!(feature = "print") {
                        let data = ConfData {
                            conf: new_config.clone(),
                            struct_index: s_index,
                            prev: inherited.clone(),
                            own,
                        };
                        #[cfg(feature = "print")]
                        temp[k].push(data);
                        #[cfg(not(feature = "print"))]
                        new_configs.push(data);
                    }
                }
            }

            #[cfg(feature = "print")]
            {
                let [first, second] = temp;
                let start = new_configs.len();
                new_configs.extend(merge_by_configuration(first, second, |data| &data.conf));
                for (j, data) in new_configs[start..].iter().enumerate() {
                    writeln!(
                        out,
                        "{}: {}",
                        before.configurations + j as u64 + 1,
                        render(&data.conf)
                    )?;
                }
                if size == limit {
                    new_configs.clear();
                }
            }
            #[cfg(not(feature = "print"))]
            let _ = before;

            if i > 0 && i % 1000 == 0 {
                log::info!(target: targets::ENUMERATION, "Processed {i} old configs");
            }
        }

        #[cfg(not(feature = "print"))]
        writeln!(out, "{}", summary_line(size, tally, Some(new_structs.len())))?;

        summaries.push(SizeSummary {
            size,
            tally,
            structures: new_structs.len(),
        });
    }

    Ok(summaries)
}
