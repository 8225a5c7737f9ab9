//! Computes role equivalences of a network given as a tie list.
#![deny(unsafe_code)]

mod input;

use std::{ffi::OsString, path::Path};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};
use rolequiv_network::{Direction, NetworkView, PositionView};
use rolequiv_refine::{compare::by_label, oracle::PetgraphScc, universal};
use rolequiv_util::fmt::fmt_classes;
use serde_json::json;

use crate::input::{parse_partition, parse_ties, NamedNetwork};

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Notion {
    Regular,
    Exact,
    Weak,
    WeakExact,
    StrongStructural,
    WeakStructural,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Ties {
    Out,
    In,
    Both,
}

impl From<Ties> for Direction {
    fn from(ties: Ties) -> Self {
        match ties {
            Ties::Out => Direction::Outgoing,
            Ties::In => Direction::Incoming,
            Ties::Both => Direction::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tie list with lines of the form `source target [label]`.
    input: OsString,
    #[clap(short = 'n', long, value_enum, default_value = "regular")]
    notion: Notion,
    /// Which ties define a node's position.
    #[clap(short = 'd', long, value_enum, default_value = "out")]
    direction: Ties,
    /// Compare ties by their integer labels.
    #[clap(short = 'l', long)]
    labels: bool,
    /// Partition to refine, with lines of the form `node class`.
    #[clap(short = 'r', long)]
    refine: Option<OsString>,
    /// Compute a single step relative to this partition instead of a fixpoint.
    #[clap(long)]
    relative: Option<OsString>,

    #[clap(long)]
    jsonl_output: bool,
}

fn read_partition(path: impl AsRef<Path>, names: &[String]) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading partition {}", path.display()))?;
    parse_partition(&text, names).wrap_err_with(|| format!("in partition {}", path.display()))
}

fn compute(
    args: &Args,
    named: &NamedNetwork,
    view: &NetworkView<'_>,
    to_refine: &[usize],
    reference: Option<&[usize]>,
) -> Result<Vec<usize>> {
    use rolequiv_refine::*;

    let order = by_label(&named.labels);
    let result = match (args.notion, reference, args.labels) {
        (Notion::Regular, None, false) => refining_regular_equivalence(view, to_refine)?,
        (Notion::Regular, None, true) => {
            refining_regular_equivalence_ordered(view, to_refine, &order)?
        }
        (Notion::Regular, Some(reference), false) => {
            refining_relative_regular_equivalence(view, reference, to_refine)?
        }
        (Notion::Regular, Some(reference), true) => {
            refining_relative_regular_equivalence_ordered(view, reference, to_refine, &order)?
        }
        (Notion::Exact, None, false) => refining_exact_equivalence(view, to_refine)?,
        (Notion::Exact, None, true) => refining_exact_equivalence_ordered(view, to_refine, &order)?,
        (Notion::Exact, Some(reference), false) => {
            refining_relative_exact_equivalence(view, reference, to_refine)?
        }
        (Notion::Exact, Some(reference), true) => {
            refining_relative_exact_equivalence_ordered(view, reference, to_refine, &order)?
        }
        (Notion::Weak, None, false) => refining_weak_equivalence(view, to_refine)?,
        (Notion::Weak, None, true) => refining_weak_equivalence_ordered(view, to_refine, &order)?,
        (Notion::WeakExact, None, false) => refining_weak_exact_equivalence(view, to_refine)?,
        (Notion::WeakExact, None, true) => {
            refining_weak_exact_equivalence_ordered(view, to_refine, &order)?
        }
        (Notion::StrongStructural, None, false) => {
            refining_strong_structural_equivalence(view, to_refine)?
        }
        (Notion::StrongStructural, None, true) => {
            refining_strong_structural_equivalence_ordered(view, to_refine, &order)?
        }
        (Notion::WeakStructural, None, false) => {
            refining_weak_structural_equivalence(view, to_refine)?
        }
        (Notion::WeakStructural, None, true) => refining_weak_structural_equivalence_dominated(
            view,
            to_refine,
            &order,
            &mut PetgraphScc,
        )?,
        (notion, Some(_), _) => bail!("{notion:?} equivalence has no relative variant"),
    };
    Ok(result)
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    rolequiv_logger::setup();

    let text = std::fs::read_to_string(&args.input)
        .wrap_err_with(|| format!("reading {}", Path::new(&args.input).display()))?;
    let named = parse_ties(&text)?;
    let view = named.network.view(args.direction.into());
    log::info!(
        "read {} nodes and {} ties",
        view.node_count(),
        named.network.tie_count()
    );

    let to_refine = match &args.refine {
        Some(path) => read_partition(path, &named.names)?,
        None => universal(view.node_count()),
    };
    let reference = match &args.relative {
        Some(path) => Some(read_partition(path, &named.names)?),
        None => None,
    };

    let partition = compute(&args, &named, &view, &to_refine, reference.as_deref())?;
    let class_count = rolequiv_refine::class_count(&partition);
    log::info!("{:?} equivalence has {class_count} classes", args.notion);
    log::debug!("classes: {}", fmt_classes(&partition));

    if args.jsonl_output {
        println!(
            "{}",
            serde_json::to_string(&json!({
                "notion": format!("{:?}", args.notion),
                "class_count": class_count,
                "nodes": named.names,
                "classes": partition,
            }))?
        );
    } else {
        for (name, class) in named.names.iter().zip(&partition) {
            println!("{name} {class}");
        }
    }

    Ok(())
}
