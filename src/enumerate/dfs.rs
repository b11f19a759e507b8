//! The depth-first driver.
//!
//! The recursion holds one chain of configurations from the triangle down to the
//! limit size, so memory stays proportional to depth rather than to the count of a
//! whole size.
//! Only the leaf size is counted; intermediate canonical configurations exist just
//! long enough to be expanded.
//!
//! A [Workspace] bundles what one worker needs across the recursion: a generator
//! per size, so the axiom clauses of each size are built once, and the canonicality
//! engine with its scratch space.
//!
//! # Parallelism
//!
//! Under the `parallel` feature the loop over canonical configurations one layer
//! below the leaf is dispatched to rayon's work-stealing pool, one task per subtree.
//! Each worker obtains its own [Workspace] through `map_init`; the shared tables are
//! read-only.
//! Tallies combine by addition, so the reduction is associative and commutative and
//! the total does not depend on the stealing order.
//!
//! The `print` feature lists the limit-size configurations after the recursion
//! returns from each subtree; printing is incompatible with `parallel` and is
//! disabled when both are selected.

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

#[cfg(all(feature = "print", not(feature = "parallel")))]
use crate::{enumerate::merge_by_configuration, structures::configuration::render};

#[cfg(not(all(feature = "print", not(feature = "parallel"))))]
use crate::enumerate::summary_line;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A canonical configuration in flight, with its hull structure and automorphism
/// sets.
///
/// `prev` holds the automorphisms of the configuration with its innermost hull
/// removed, `own` those of the configuration itself.
struct DfsRecord {
    conf: Configuration,
    hull: HullStructure,
    prev: AutomorphismSets,
    own: AutomorphismSets,
}

/// Everything one worker needs: a generator per size (amortising the axiom
/// clauses), and the canonicality engine with its scratch.
pub struct Workspace {
    pool: Vec<ConfigurationGenerator>,
    canon: Canonicalizer,
}

impl Workspace {
    pub fn new(limit: u32) -> Self {
        Workspace {
            pool: (0..=limit).map(ConfigurationGenerator::new).collect(),
            canon: Canonicalizer::new(limit),
        }
    }
}

#[cfg_attr(
    not(all(feature = "print", not(feature = "parallel"))),
    allow(unused_variables)
)]
fn dfs_enumerate(
    workspace: &mut Workspace,
    record: &DfsRecord,
    prev_size: u32,
    limit: u32,
    tables: &Tables,
    counter: u64,
) -> Tally {
    let size = prev_size + 1;
    let Workspace { pool, canon } = &mut *workspace;

    let generator = &mut pool[size as usize];
    generator.set_configuration(&record.conf, &record.hull);

    let augmented = augmentations(&record.hull);

    let mut tally = Tally::default();

    #[cfg(not(all(feature = "print", not(feature = "parallel"))))]
    let mut new_configs: Vec<DfsRecord> = Vec::new();

    #[cfg(all(feature = "print", not(feature = "parallel")))]
    let mut temp: [Vec<DfsRecord>; 2] = [Vec::new(), Vec::new()];

    let mut buffer = tables.smallest.configuration(size).clone();

    #[cfg_attr(
        not(all(feature = "print", not(feature = "parallel"))),
        allow(unused_variables)
    )]
    for (k, hull) in augmented.iter().enumerate() {
        generator.set_structure(&record.conf, hull);

        // A new interior point leaves the whole predecessor untouched, so its
        // automorphisms apply; a grown hull only keeps the outer layers, so the
        // previous automorphisms do.
        let inherited = if *hull.last().unwrap() == 1 {
            &record.own
        } else {
            &record.prev
        };

        while generator.generate_next_configuration(&mut buffer) {
            let Some(own) = canon.is_canonical(&buffer, hull.len(), inherited, size, tables)
            else {
                continue;
            };

            tally.count(&own);

            if size != limit || cfg!(all(feature = "print", not(feature = "parallel"))) {
                let data = DfsRecord {
                    conf: buffer.clone(),
                    hull: hull.clone(),
                    prev: inherited.clone(),
                    own,
                };
                #[cfg(all(feature = "print", not(feature = "parallel")))]
                temp[k].push(data);
                #[cfg(not(all(feature = "print", not(feature = "parallel"))))]
                new_configs.push(data);
            }
        }
    }

    #[cfg(all(feature = "print", not(feature = "parallel")))]
    let new_configs = {
        let [first, second] = temp;
        merge_by_configuration(first, second, |data| &data.conf)
    };

    if size != limit {
        if size == limit - 1 {
            log::info!(
                target: targets::ENUMERATION,
                "Expanding {} configurations of size {size}.",
                new_configs.len(),
            );
        }

        #[cfg(feature = "parallel")]
        if size == limit - 1 {
            // One task per subtree; every worker gets its own workspace.
            return new_configs
                .par_iter()
                .map_init(
                    || Workspace::new(limit),
                    |local, data| dfs_enumerate(local, data, size, limit, tables, 0),
                )
                .reduce(Tally::default, |a, b| a + b);
        }

        let mut total = Tally::default();
        for data in &new_configs {
            if interrupt::interrupted() {
                break;
            }
            #[cfg(all(feature = "print", not(feature = "parallel")))]
            {
                total += dfs_enumerate(
                    workspace,
                    data,
                    size,
                    limit,
                    tables,
                    counter + total.configurations,
                );
            }
            #[cfg(not(all(feature = "print", not(feature = "parallel"))))]
            {
                total += dfs_enumerate(workspace, data, size, limit, tables, counter);
            }
        }
        return total;
    }

    #[cfg(all(feature = "print", not(feature = "parallel")))]
    for (j, data) in new_configs.iter().enumerate() {
        println!("{}: {}", counter + j as u64 + 1, render(&data.conf));
    }

    tally
}

/// Enumerate depth-first up to `limit`, writing the summary line for the limit
/// size, and return the tally.
pub fn enumerate(limit: u32, tables: &Tables, out: &mut impl Write) -> io::Result<Tally> {
    assert!(limit >= 3);

    if limit == 3 {
        let tally = Tally {
            configurations: 1,
            mirror_symmetric: 1,
        };
        #[cfg(all(feature = "print", not(feature = "parallel")))]
        writeln!(out, "1: -")?;
        #[cfg(not(all(feature = "print", not(feature = "parallel"))))]
        writeln!(out, "{}", summary_line(3, tally, None))?;
        return Ok(tally);
    }

    let mut workspace = Workspace::new(limit);

    let root = DfsRecord {
        conf: vec![false],
        hull: vec![3],
        prev: AutomorphismSets::empty(),
        own: AutomorphismSets {
            plain: tables.cyclic.rotations(3).clone(),
            #[cfg(feature = "order-types")]
            mirrored: tables.cyclic.mirrored_rotations(3).clone(),
        },
    };

    let tally = dfs_enumerate(&mut workspace, &root, 3, limit, tables, 0);

    #[cfg(not(all(feature = "print", not(feature = "parallel"))))]
    writeln!(out, "{}", summary_line(limit, tally, None))?;

    Ok(tally)
}
