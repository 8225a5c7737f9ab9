//! Helpers for displaying partitions.

use std::fmt::{Debug, Display, Formatter};

struct FmtClosure<T>(T);

impl<T> Debug for FmtClosure<T>
where
    T: Fn(&mut Formatter<'_>) -> std::fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0(f)
    }
}

impl<T> Display for FmtClosure<T>
where
    T: Fn(&mut Formatter<'_>) -> std::fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0(f)
    }
}

/// Turns a closure that writes to a [`Formatter`] into a type that implements [`Display`] and
/// [`Debug`] by calling that closure.
pub fn fmt_closure<T: Fn(&mut Formatter<'_>) -> std::fmt::Result>(
    closure: T,
) -> impl Display + Debug {
    FmtClosure(closure)
}

/// Formats a class labeling as its classes, e.g. `{0 2} {1}` for `[0, 1, 0]`.
///
/// Classes are listed in order of their smallest member, so the output does not depend on the
/// particular labels used.
pub fn fmt_classes(labels: &[usize]) -> impl Display + Debug + '_ {
    fmt_closure(move |f| {
        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by_key(|&node| labels[node]);

        let mut classes: Vec<&[usize]> = vec![];
        for run in order.chunk_by(|&a, &b| labels[a] == labels[b]) {
            classes.push(run);
        }
        classes.sort_by_key(|run| run[0]);

        for (i, run) in classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str("{")?;
            for (j, node) in run.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{node}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_by_smallest_member() {
        assert_eq!(fmt_classes(&[3, 1, 3, 0, 1]).to_string(), "{0 2} {1 4} {3}");
        assert_eq!(fmt_classes(&[]).to_string(), "");
    }
}
