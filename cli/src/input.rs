//! Plain text tie lists and partitions.
//!
//! Both formats are line based with whitespace separated fields. Everything after a `#` is a
//! comment and blank lines are ignored.

use std::{collections::HashMap, hash::BuildHasherDefault};

use color_eyre::eyre::{bail, eyre, Result};
use rolequiv_network::Network;
use zwohash::ZwoHasher;

type NameMap = HashMap<String, usize, BuildHasherDefault<ZwoHasher>>;

/// A network read from a tie list, with node names.
#[derive(Debug)]
pub struct NamedNetwork {
    /// Node names indexed by node.
    pub names: Vec<String>,
    /// Ties in file order.
    pub network: Network,
    /// Tie labels indexed by tie.
    pub labels: Vec<i64>,
}

fn fields(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(index, line)| {
        let line = line.split('#').next().unwrap_or("");
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        (!fields.is_empty()).then_some((index + 1, fields))
    })
}

/// Parses a tie list with lines of the form `source target [label]`.
///
/// Nodes are numbered by first appearance. Ties without a label get label `0`.
pub fn parse_ties(text: &str) -> Result<NamedNetwork> {
    let mut ids = NameMap::default();
    let mut names = vec![];
    let mut ties = vec![];
    let mut labels = vec![];

    let mut node = |name: &str| {
        *ids.entry(name.to_owned()).or_insert_with(|| {
            names.push(name.to_owned());
            names.len() - 1
        })
    };

    for (line, fields) in fields(text) {
        let label = match fields[..] {
            [_, _] => 0,
            [_, _, label] => label
                .parse()
                .map_err(|err| eyre!("line {line}: invalid label {label:?}: {err}"))?,
            _ => bail!("line {line}: expected `source target [label]`"),
        };
        let source = node(fields[0]);
        let target = node(fields[1]);
        ties.push((source, target));
        labels.push(label);
    }

    let network = Network::new(names.len(), ties);
    Ok(NamedNetwork {
        names,
        network,
        labels,
    })
}

/// Parses a partition with lines of the form `node class` into canonical format.
///
/// Every node of `names` must be assigned exactly one class. Class names are arbitrary tokens.
pub fn parse_partition(text: &str, names: &[String]) -> Result<Vec<usize>> {
    let ids: NameMap = names
        .iter()
        .enumerate()
        .map(|(id, name)| (name.clone(), id))
        .collect();
    let mut class_names: Vec<Option<&str>> = vec![None; names.len()];

    for (line, fields) in fields(text) {
        let [name, class] = fields[..] else {
            bail!("line {line}: expected `node class`");
        };
        let Some(&id) = ids.get(name) else {
            bail!("line {line}: unknown node {name:?}");
        };
        if class_names[id].replace(class).is_some() {
            bail!("line {line}: node {name:?} assigned twice");
        }
    }

    let mut class_ids: HashMap<&str, usize, BuildHasherDefault<ZwoHasher>> = Default::default();
    class_names
        .iter()
        .zip(names)
        .map(|(class, name)| -> Result<usize> {
            let class = class.ok_or_else(|| eyre!("node {name:?} has no class"))?;
            let next = class_ids.len();
            Ok(*class_ids.entry(class).or_insert(next))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_list() {
        let input = "# comment\na b 3\nb c\n\nc a -1 # trailing\n";
        let parsed = parse_ties(input).unwrap();
        assert_eq!(parsed.names, ["a", "b", "c"]);
        assert_eq!(parsed.labels, [3, 0, -1]);
        assert_eq!(parsed.network.tie(2), (2, 0));

        assert!(parse_ties("a b c d").is_err());
        assert!(parse_ties("a b x").is_err());
    }

    #[test]
    fn partition() {
        let names: Vec<String> = ["a", "b", "c"].map(String::from).into();
        assert_eq!(
            parse_partition("c left\na right\nb left\n", &names).unwrap(),
            [0, 1, 1]
        );
        assert!(parse_partition("a x\nb x\n", &names).is_err());
        assert!(parse_partition("a x\nb x\nc x\nd x\n", &names).is_err());
        assert!(parse_partition("a x\na y\nb x\nc x\n", &names).is_err());
    }
}
